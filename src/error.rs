//! Error types for parcelwatch.
//!
//! Absence of a match is never an error in this crate: a message with no
//! tracking signal yields `None`, and an unclassifiable tracking number yields
//! the unknown-carrier sentinel. Errors here cover the registry lookup
//! contract and the store seam only.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Carrier registry errors.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Callers must treat this as "unknown carrier", never as a failure to
    /// bubble up.
    #[error("No carrier registered under id {0:?}")]
    NotFound(String),
}

/// Package store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to load collection for user {user_id}: {reason}")]
    Load { user_id: String, reason: String },

    #[error("Failed to save collection for user {user_id}: {reason}")]
    Save { user_id: String, reason: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
