pub mod document;
pub mod layer;
pub mod layout;
pub mod model;
pub mod session;
pub mod store;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeynotesError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format Error: {0}")]
    Format(String),

    #[error("Precondition Error: {0}")]
    Precondition(String),

    #[error("Unknown Layout: {0}")]
    UnknownLayout(String),
}

pub type KnResult<T> = Result<T, KeynotesError>;
