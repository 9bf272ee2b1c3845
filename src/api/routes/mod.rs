//! API Routes
//!
//! Route handlers organized by functionality.

pub mod charts;
pub mod dashboard;
pub mod health;
pub mod volumes;
