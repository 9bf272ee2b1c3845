//! Document Model
//!
//! Containers addressed by id and the appender that fills them.

mod appender;
mod document;

pub use appender::{DomAppender, DomError};
pub use document::{Container, Document, VOLUME_LIST_ID};
