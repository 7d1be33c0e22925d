//! Student-housing discovery around university campuses.
//!
//! Searches combine free text, a campus and structured filters, and are
//! answered either by a deterministic matcher over the catalog or by an
//! external semantic-search provider. Favorites and enquiries are persisted
//! in a key-value store whose change events keep independent views in sync.

pub mod catalog;
pub mod config;
pub mod enquiry;
pub mod error;
pub mod favorites;
pub mod models;
pub mod providers;
pub mod search;
pub mod session;
pub mod storage;

pub use error::{Error, Result};
pub use session::Session;
