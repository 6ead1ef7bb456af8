//! Error-handling module for the crate

use thiserror::Error;

/// Error-Collection for all the possible Errors occurring in this crate
#[derive(Error, Debug)]
pub enum Error {
    /// The source is not well-formed JSON, could not be read,
    /// or does not have the shape of a schema
    #[error("Failed to parse schema: {0}")]
    Parse(#[source] serde_json::Error),
    /// The schema could not be written
    #[error("Failed to write schema: {0}")]
    Write(#[source] serde_json::Error),
    /// Error of the column model
    #[error(transparent)]
    Column(#[from] paleo_core::error::Error),
}

impl Error {
    /// Returns true iff this error was raised while parsing a schema.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }
}
