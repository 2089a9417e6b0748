//! Medicine-label endpoints.
//!
//! - `GET /upload_medicine` — the label upload page
//! - `POST /upload_medicine` — OCR the uploaded photo and look the
//!   medicine up in the reference directory

use axum::extract::{Multipart, State};
use axum::response::Html;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::ocr::recognize_medicine;

#[derive(Serialize)]
pub struct MedicineResponse {
    pub medicine: String,
    #[serde(rename = "use")]
    pub usage: String,
    pub side_effects: String,
    pub extracted_text: String,
}

/// `GET /upload_medicine` — label upload page.
pub async fn upload_page() -> Html<&'static str> {
    Html(MEDICINE_PAGE_HTML)
}

/// `POST /upload_medicine` — multipart upload with a single `file`
/// field. The OCR round-trip runs on the blocking pool.
pub async fn upload(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<MedicineResponse>, ApiError> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidInput(format!("Failed to read file data: {e}")))?;
            image = Some(bytes.to_vec());
        }
    }

    let image = image.ok_or_else(|| ApiError::InvalidInput("No 'file' field provided".into()))?;

    // Magic bytes only; the Content-Type header is not trusted
    let mime = detect_image_mime(&image).ok_or_else(|| {
        ApiError::InvalidInput("Unsupported file type. Send a JPEG or PNG photo of the label.".into())
    })?;
    tracing::info!(size = image.len(), mime, "Label image received");

    let state = ctx.state.clone();
    let found = tokio::task::spawn_blocking(move || {
        recognize_medicine(state.ocr.as_ref(), &state.reference, &image)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Recognition task failed: {e}")))??;

    Ok(Json(MedicineResponse {
        medicine: found.name,
        usage: found.usage,
        side_effects: found.side_effects,
        extracted_text: found.extracted_text,
    }))
}

/// Identify the upload from its leading bytes.
fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    // JPEG: FF D8 FF
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    // PNG: 89 50 4E 47
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Some("image/png");
    }
    None
}

// ---------------------------------------------------------------------------
// Upload page HTML (self-contained, no external resources)
// ---------------------------------------------------------------------------

const MEDICINE_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>CareSage — Identify a Medicine</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917;
      min-height: 100vh; display: flex; flex-direction: column;
      align-items: center; padding: 32px 24px;
    }
    h1 { font-size: 24px; margin-bottom: 8px; }
    p.lead { color: #78716c; font-size: 14px; margin-bottom: 24px; text-align: center; }
    form, #result { width: 100%; max-width: 420px; }
    input[type=file] {
      width: 100%; padding: 10px 12px; font-size: 14px;
      border: 2px dashed #d6d3d1; border-radius: 12px; background: #ffffff;
    }
    button {
      margin-top: 20px; width: 100%; padding: 12px; font-size: 16px; font-weight: 600;
      color: #ffffff; background: #4a7c59; border: none; border-radius: 12px; cursor: pointer;
    }
    button:disabled { opacity: 0.6; cursor: wait; }
    .card {
      margin-top: 16px; padding: 16px; background: #ffffff;
      border: 1px solid #d6d3d1; border-radius: 12px;
    }
    .card h2 { font-size: 16px; margin-bottom: 6px; }
    .card div { font-size: 14px; color: #44403c; margin-top: 2px; }
    .extracted { margin-top: 8px; font-size: 12px; color: #78716c; font-style: italic; }
    .error { margin-top: 16px; color: #b91c1c; font-size: 14px; text-align: center; }
    nav { margin-top: 28px; font-size: 14px; }
    nav a { color: #4a7c59; text-decoration: none; }
  </style>
</head>
<body>
  <h1>Identify a Medicine</h1>
  <p class="lead">Upload a photo of a medicine label to look up what it is for
    and its common side effects.</p>

  <form id="upload-form">
    <input id="file" name="file" type="file" accept="image/jpeg,image/png" required>
    <button type="submit" id="submit-btn">Identify</button>
  </form>

  <div id="result"></div>

  <nav><a href="/">Back to consultation</a></nav>

  <script>
    const form = document.getElementById('upload-form');
    const btn = document.getElementById('submit-btn');
    const result = document.getElementById('result');

    form.addEventListener('submit', async (ev) => {
      ev.preventDefault();
      btn.disabled = true;
      result.innerHTML = '';
      try {
        const resp = await fetch('/upload_medicine', {
          method: 'POST',
          body: new FormData(form),
        });
        const data = await resp.json();
        if (!resp.ok) {
          showError(data.error ? data.error.message : 'Request failed');
          return;
        }
        const card = document.createElement('div');
        card.className = 'card';
        card.innerHTML = '<h2></h2><div></div><div></div><div class="extracted"></div>';
        card.querySelector('h2').textContent = data.medicine;
        const rows = card.querySelectorAll('div');
        rows[0].textContent = 'Use: ' + data.use;
        rows[1].textContent = 'Side effects: ' + data.side_effects;
        rows[2].textContent = 'Read from label: ' + data.extracted_text;
        result.appendChild(card);
      } catch (e) {
        showError('Could not reach the server');
      } finally {
        btn.disabled = false;
      }
    });

    function showError(message) {
      const div = document.createElement('div');
      div.className = 'error';
      div.textContent = message;
      result.appendChild(div);
    }
  </script>
</body>
</html>
"#;
