use crate::core::models::contact_map::ContactMapError;
use crate::core::models::structure::StructureError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Corrupt file: {0}")]
    Corrupt(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{what} is too large for the file format ({len})")]
    Oversized { what: &'static str, len: usize },
}

impl From<StructureError> for FormatError {
    fn from(e: StructureError) -> Self {
        FormatError::Corrupt(e.to_string())
    }
}

impl From<ContactMapError> for FormatError {
    fn from(e: ContactMapError) -> Self {
        FormatError::Corrupt(e.to_string())
    }
}
