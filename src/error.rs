use thiserror::Error;

use crate::petition::FormField;

/// Failures while talking to the browser's key-value storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// `window.localStorage` is missing or blocked (private mode, sandboxed iframe).
    #[error("local storage is unavailable")]
    Unavailable,

    /// The storage call itself threw (quota exceeded, security error).
    #[error("storage access failed: {0}")]
    Access(String),

    #[error("storage value could not be (de)serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reasons a petition form is rejected before generation.
///
/// `Display` yields the Turkish prompt shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Lütfen tüm alanları doldurun.")]
    MissingField(FormField),

    #[error("TC Kimlik No 11 haneli olmalıdır.")]
    InvalidTckn,
}

/// Failures while loading the static post list.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("failed to fetch post list: {0}")]
    Fetch(String),

    #[error("post list request returned status {0}")]
    Status(u16),

    #[error("post list is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
