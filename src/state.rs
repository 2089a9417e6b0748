//! Shared application state: everything loaded once at startup.

use std::path::PathBuf;

use rusqlite::Connection;
use thiserror::Error;

use crate::config;
use crate::db::{self, DatabaseError};
use crate::model::{DiseasePredictor, ModelError};
use crate::ocr::{HttpOcrEngine, OcrEngine};
use crate::reference::{ReferenceData, ReferenceError};
use crate::symptoms::SymptomNormalizer;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Reference data error: {0}")]
    Reference(#[from] ReferenceError),

    #[error("Model artifact error: {0}")]
    Model(#[from] ModelError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Cannot create data directory {dir}: {reason}")]
    DataDir { dir: String, reason: String },
}

/// Immutable context shared by all request handlers.
///
/// Wrapped in `Arc` at startup; nothing here mutates after load. The
/// record store is reached through fresh per-call connections instead
/// of a held handle.
pub struct AppState {
    pub reference: ReferenceData,
    pub predictor: DiseasePredictor,
    pub normalizer: SymptomNormalizer,
    pub ocr: Box<dyn OcrEngine>,
    pub db_path: PathBuf,
}

impl AppState {
    /// Load reference tables and model artifacts from the configured
    /// directories, and make sure the record store is migrated.
    pub fn load() -> Result<Self, StateError> {
        let data_dir = config::app_data_dir();
        std::fs::create_dir_all(&data_dir).map_err(|e| StateError::DataDir {
            dir: data_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let reference = ReferenceData::load(&config::reference_dir())?;
        let predictor = DiseasePredictor::load(&config::model_dir())?;
        let ocr: Box<dyn OcrEngine> = Box::new(HttpOcrEngine::new(
            &config::ocr_base_url(),
            config::OCR_MODEL,
            config::OCR_TIMEOUT_SECS,
        ));

        let state = Self {
            reference,
            predictor,
            normalizer: SymptomNormalizer::new(),
            ocr,
            db_path: config::database_path(),
        };

        // Surface storage problems at startup, not on the first request
        state.open_db()?;

        tracing::info!(
            diseases = state.reference.diseases.len(),
            medicines = state.reference.medicines.len(),
            disease_classes = state.predictor.disease_class_count(),
            db = %state.db_path.display(),
            "Application state loaded"
        );

        Ok(state)
    }

    /// State over fixtures and a caller-chosen database path (tests).
    pub fn load_test(db_path: PathBuf, ocr: Box<dyn OcrEngine>) -> Result<Self, StateError> {
        let state = Self {
            reference: ReferenceData::load_test(),
            predictor: DiseasePredictor::load_test(),
            normalizer: SymptomNormalizer::new(),
            ocr,
            db_path,
        };
        state.open_db()?;
        Ok(state)
    }

    /// Open a fresh connection to the record store. Pending migrations
    /// run on open; the connection closes when dropped.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.db_path)
    }
}
