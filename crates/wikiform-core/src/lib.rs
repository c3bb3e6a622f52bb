//! Wikiform Core Library
//!
//! Codec between raw wiki page text and its structured record: item type,
//! embedded key/value data block, named sections, and free-text body.

pub mod document;
pub mod error;
pub mod format;
pub mod logging;

pub use document::{Document, DEFAULT_ITEM_TYPE};
pub use error::{Result, WikiformError};
pub use format::OutputFormat;
