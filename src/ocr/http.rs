//! HTTP-backed OCR engine for a local vision model endpoint.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::{OcrEngine, OcrError};

/// Instruction sent alongside the label image.
const LABEL_PROMPT: &str = "\
Read all text printed on this medicine package or label. \
Output only the text you can see, nothing else.";

/// OCR engine that posts the image to a local vision model.
pub struct HttpOcrEngine {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    images: Vec<String>,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl HttpOcrEngine {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        }
    }
}

impl OcrEngine for HttpOcrEngine {
    fn extract_text(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        let _span = tracing::info_span!(
            "label_ocr",
            model = %self.model,
            image_size = image_bytes.len(),
        )
        .entered();
        let start = std::time::Instant::now();

        let base64_image = base64::engine::general_purpose::STANDARD.encode(image_bytes);
        let request = GenerateRequest {
            model: &self.model,
            prompt: LABEL_PROMPT,
            images: vec![base64_image],
            stream: false,
        };

        // Connect and timeout failures both mean "endpoint not reachable"
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .map_err(|e| OcrError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OcrError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        let parsed: GenerateResponse = response.json().map_err(|e| OcrError::Api {
            status: status.as_u16(),
            message: e.to_string(),
        })?;

        tracing::info!(
            elapsed_ms = %start.elapsed().as_millis(),
            text_len = parsed.response.len(),
            "Label OCR complete"
        );

        Ok(parsed.response)
    }
}
