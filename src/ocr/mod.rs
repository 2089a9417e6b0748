//! Medicine-label recognition: an OCR engine seam plus the substring
//! match against the medicine directory.

pub mod engine;
pub mod http;
pub mod recognizer;

pub use engine::*;
pub use http::*;
pub use recognizer::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR endpoint unreachable: {0}")]
    Unavailable(String),

    #[error("OCR request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("OCR extracted no text from the image")]
    EmptyExtraction,

    #[error("No medicine in the directory matched the label text")]
    NoMatch,
}
