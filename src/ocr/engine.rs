use super::OcrError;

/// OCR engine abstraction (allows mocking for tests)
pub trait OcrEngine: Send + Sync {
    fn extract_text(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

/// Canned-text engine for tests.
pub struct MockOcrEngine {
    text: String,
}

impl MockOcrEngine {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn extract_text(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Engine whose endpoint is never reachable, for failure-path tests.
pub struct UnavailableOcrEngine;

impl OcrEngine for UnavailableOcrEngine {
    fn extract_text(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::Unavailable("connection refused".into()))
    }
}
