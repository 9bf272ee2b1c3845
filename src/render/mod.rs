//! Rendering
//!
//! - [`RecordRenderer`]: one volume record to one card [`Fragment`]
//! - [`DashboardPage`]: the full page around a populated document
//! - [`Markup`]: the escaping HTML writer both are built on

mod fragment;
mod markup;
mod page;

pub use fragment::{Fragment, RecordRenderer, DEFAULT_VOLUME_IMAGE};
pub use markup::{escape_html, Markup, RenderMode};
pub use page::{DashboardPage, DEFAULT_PAGE_TITLE};
