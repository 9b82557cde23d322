//! Parcelwatch — email-to-package tracking extraction core.

pub mod carriers;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod sync;
