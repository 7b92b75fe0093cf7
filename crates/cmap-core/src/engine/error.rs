use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::FormatError;
use crate::core::models::alignment::AlignmentError;
use crate::core::models::contact_map::ContactMapError;
use crate::core::models::structure::StructureError;
use crate::core::utils::geometry::GeometryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid alignment: {0}")]
    InvalidAlignment(#[from] AlignmentError),

    #[error("Invalid structure: {0}")]
    Structure(#[from] StructureError),

    #[error("Invalid contact map: {0}")]
    ContactMap(#[from] ContactMapError),

    #[error("Invalid distance map: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Failed to read or write '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: FormatError,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl EngineError {
    pub(crate) fn file(path: &std::path::Path, source: FormatError) -> Self {
        EngineError::File {
            path: path.display().to_string(),
            source,
        }
    }
}
