//! Consultation endpoints.
//!
//! Two routes on `/`:
//! - `GET /` — the consultation form page
//! - `POST /` — run prediction for the submitted vitals and symptoms

use std::str::FromStr;

use axum::extract::{Form, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::{self, NewRecord};
use crate::model::PredictionInput;

/// Raw form fields. Numeric fields arrive as strings so malformed
/// values surface as `INVALID_INPUT` rather than an extractor reject.
#[derive(Debug, Deserialize)]
pub struct ConsultForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub bp: String,
    #[serde(default)]
    pub temp: String,
    #[serde(default)]
    pub symptom: String,
    #[serde(default)]
    pub symptom_desc: String,
}

#[derive(Serialize)]
pub struct ConsultResponse {
    pub results: Vec<ConsultResult>,
}

#[derive(Serialize)]
pub struct ConsultResult {
    pub symptom: String,
    pub disease: String,
    pub suggestion: String,
    pub tablet: String,
}

/// `GET /` — consultation form page.
pub async fn form_page() -> Html<&'static str> {
    Html(CONSULT_PAGE_HTML)
}

/// `POST /` — predict a condition per resolved symptom and store each
/// outcome. Returns the advice rows in resolution order.
pub async fn submit(
    State(ctx): State<ApiContext>,
    Form(form): Form<ConsultForm>,
) -> Result<Json<ConsultResponse>, ApiError> {
    let state = &ctx.state;

    let age: i64 = numeric_field("age", &form.age)?;
    let bp: f64 = numeric_field("bp", &form.bp)?;
    let temp: f64 = numeric_field("temp", &form.temp)?;

    let gender = form.gender.trim().to_uppercase();
    if gender.is_empty() {
        return Err(ApiError::InvalidInput("Field 'gender' is required".into()));
    }
    // An unknown gender fails the whole request before anything is stored
    state.predictor.validate_gender(&gender)?;

    let description = none_if_blank(&form.symptom_desc);
    let typed = none_if_blank(&form.symptom);

    let symptoms = state.normalizer.resolve(description, typed);
    if symptoms.is_empty() {
        return Err(ApiError::InvalidInput(
            "Provide a symptom or describe how you feel".into(),
        ));
    }
    // resolve() falls back to the typed symptom when the description has
    // no known keyword; only description-derived tags may be skipped below.
    let from_description =
        description.is_some_and(|text| !state.normalizer.extract_tags(text).is_empty());

    let name = none_if_blank(&form.name).unwrap_or("Anonymous").to_string();

    let conn = state.open_db()?;
    let mut results = Vec::with_capacity(symptoms.len());
    for symptom in &symptoms {
        if from_description && !state.predictor.knows_symptom(symptom) {
            tracing::debug!(symptom, "Skipping symptom outside the model vocabulary");
            continue;
        }

        let input = PredictionInput {
            age,
            gender: &gender,
            bp,
            temp,
            symptom,
        };
        let prediction = state.predictor.predict(&input, &state.reference)?;

        db::insert_record(
            &conn,
            &NewRecord {
                name: name.clone(),
                age,
                gender: gender.clone(),
                bp,
                temp,
                symptom: prediction.symptom.clone(),
                symptom_description: description.map(str::to_string),
                disease: prediction.disease.clone(),
                suggestion: prediction.suggestion.clone(),
                tablet: prediction.tablet.clone(),
            },
        )?;

        results.push(ConsultResult {
            symptom: prediction.symptom,
            disease: prediction.disease,
            suggestion: prediction.suggestion,
            tablet: prediction.tablet,
        });
    }

    if results.is_empty() {
        return Err(ApiError::UnknownCategory(format!(
            "No recognized symptom in the description. Valid: {:?}",
            state.predictor.symptom_classes()
        )));
    }

    tracing::info!(count = results.len(), "Consultation stored");
    Ok(Json(ConsultResponse { results }))
}

fn numeric_field<T: FromStr>(name: &str, raw: &str) -> Result<T, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("Field '{name}' is required")));
    }
    trimmed.parse().map_err(|_| {
        ApiError::InvalidInput(format!("Field '{name}' must be a number, got '{trimmed}'"))
    })
}

fn none_if_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// ---------------------------------------------------------------------------
// Consultation page HTML (self-contained, no external resources)
// ---------------------------------------------------------------------------

const CONSULT_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>CareSage — Consultation</title>
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
    form, #results { width: 100%; max-width: 420px; }
    label { display: block; font-size: 13px; font-weight: 600; margin: 12px 0 4px; }
    input, select, textarea {
      width: 100%; padding: 10px 12px; font-size: 15px;
      border: 2px solid #d6d3d1; border-radius: 12px; outline: none;
      background: #ffffff; color: inherit; font-family: inherit;
    }
    input:focus, select:focus, textarea:focus { border-color: #4a7c59; }
    textarea { min-height: 72px; resize: vertical; }
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
    .error { margin-top: 16px; color: #b91c1c; font-size: 14px; text-align: center; }
    nav { margin-top: 28px; font-size: 14px; }
    nav a { color: #4a7c59; text-decoration: none; margin: 0 8px; }
  </style>
</head>
<body>
  <h1>CareSage</h1>
  <p class="lead">Enter your vitals and symptoms to get a likely condition and care advice.<br>
    Not a substitute for professional medical advice.</p>

  <form id="consult-form">
    <label for="name">Name (optional)</label>
    <input id="name" name="name" type="text" placeholder="Anonymous">

    <label for="age">Age</label>
    <input id="age" name="age" type="number" min="0" max="130" required>

    <label for="gender">Gender</label>
    <select id="gender" name="gender" required>
      <option value="M">Male</option>
      <option value="F">Female</option>
    </select>

    <label for="bp">Blood pressure (systolic)</label>
    <input id="bp" name="bp" type="number" step="0.1" required>

    <label for="temp">Temperature (&deg;F)</label>
    <input id="temp" name="temp" type="number" step="0.1" required>

    <label for="symptom">Main symptom</label>
    <input id="symptom" name="symptom" type="text" placeholder="fever">

    <label for="symptom_desc">Or describe how you feel</label>
    <textarea id="symptom_desc" name="symptom_desc"
      placeholder="e.g. feverish since last night with a pounding headache"></textarea>

    <button type="submit" id="submit-btn">Get advice</button>
  </form>

  <div id="results"></div>

  <nav>
    <a href="/records">History</a> &middot;
    <a href="/upload_medicine">Identify a medicine</a>
  </nav>

  <script>
    const form = document.getElementById('consult-form');
    const btn = document.getElementById('submit-btn');
    const results = document.getElementById('results');

    form.addEventListener('submit', async (ev) => {
      ev.preventDefault();
      btn.disabled = true;
      results.innerHTML = '';
      try {
        const resp = await fetch('/', {
          method: 'POST',
          body: new URLSearchParams(new FormData(form)),
        });
        const data = await resp.json();
        if (!resp.ok) {
          showError(data.error ? data.error.message : 'Request failed');
          return;
        }
        for (const r of data.results) {
          const card = document.createElement('div');
          card.className = 'card';
          card.innerHTML = '<h2></h2><div></div><div></div><div></div>';
          card.querySelector('h2').textContent = r.disease;
          const rows = card.querySelectorAll('div');
          rows[0].textContent = 'Symptom: ' + r.symptom;
          rows[1].textContent = 'Advice: ' + r.suggestion;
          rows[2].textContent = 'Medication: ' + r.tablet;
          results.appendChild(card);
        }
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
      results.appendChild(div);
    }
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_field_parses_trimmed_values() {
        let age: i64 = numeric_field("age", " 42 ").unwrap();
        assert_eq!(age, 42);
        let bp: f64 = numeric_field("bp", "120.5").unwrap();
        assert_eq!(bp, 120.5);
    }

    #[test]
    fn numeric_field_rejects_garbage() {
        let err = numeric_field::<i64>("age", "forty").unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert!(err.to_string().contains("age"));
        assert!(err.to_string().contains("forty"));
    }

    #[test]
    fn numeric_field_rejects_blank() {
        let err = numeric_field::<f64>("temp", "   ").unwrap_err();
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn blank_strings_become_none() {
        assert_eq!(none_if_blank("  "), None);
        assert_eq!(none_if_blank(""), None);
        assert_eq!(none_if_blank(" fever "), Some("fever"));
    }

    #[test]
    fn page_posts_back_to_root() {
        assert!(CONSULT_PAGE_HTML.contains("fetch('/'"));
        assert!(CONSULT_PAGE_HTML.contains("name=\"symptom_desc\""));
    }
}
