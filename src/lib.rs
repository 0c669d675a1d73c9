//! Client for the Genç Girişimci information site: checklist progress kept in
//! localStorage, the SGK objection petition generator, the share intent and
//! the social embed feed.

pub mod app;
pub mod banner;
pub mod checklist;
pub mod clipboard;
pub mod config;
pub mod embed;
pub mod error;
pub mod logger;
pub mod petition;
pub mod share;
pub mod storage;

pub use app::App;
pub use error::{EmbedError, StorageError, ValidationError};
