//! Pre-trained disease model: label encoders, the decision-tree
//! classifier, and the prediction adapter that joins reference advice.

pub mod classifier;
pub mod encoder;
pub mod predict;

pub use classifier::*;
pub use encoder::*;
pub use predict::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read {0}: {1}")]
    ArtifactLoad(String, String),

    #[error("Failed to parse {0}: {1}")]
    ArtifactParse(String, String),

    #[error("Unknown {field} '{value}'. Valid: {valid:?}")]
    UnknownCategory {
        field: &'static str,
        value: String,
        valid: Vec<String>,
    },

    #[error("Label code {code} outside the {field} decoder range")]
    LabelOutOfRange { field: &'static str, code: i64 },

    #[error("Malformed model artifact: {0}")]
    MalformedModel(String),

    #[error("Predicted disease '{0}' has no advice entry")]
    UnknownDisease(String),
}
