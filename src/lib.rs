pub mod api; // HTTP surface: routes, handlers, typed error boundary
pub mod config;
pub mod db; // Record store: migrations + repository
pub mod model; // Encoders, decision-tree classifier, prediction adapter
pub mod ocr; // Medicine-label recognition behind the OCR seam
pub mod reference;
pub mod state; // Immutable per-process AppState
pub mod symptoms; // Free-text symptom normalizer
