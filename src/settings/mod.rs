//! Settings service: snapshot types, the service trait, and the SQLite store.

mod document;
mod error;
mod service;
mod store;
mod types;

pub use document::{parse_document, SettingsDocument, DOCUMENT_VERSION};
pub use error::SettingsError;
pub use service::SettingsService;
pub use store::SettingsStore;
pub use types::*;
