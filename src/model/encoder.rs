use std::path::Path;

use serde::Deserialize;

use super::ModelError;

#[derive(Debug, Clone, Deserialize)]
struct ClassesFile {
    classes: Vec<String>,
}

/// Bidirectional category/code mapping for one categorical field.
///
/// The class list ships sorted from training; a code is the index of
/// its class, so encode is an exact-match position lookup and decode
/// is plain indexing.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    field: &'static str,
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Load a class-list artifact for the named field.
    pub fn load(path: &Path, field: &'static str) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ModelError::ArtifactLoad(path.display().to_string(), e.to_string()))?;
        let parsed: ClassesFile = serde_json::from_str(&json)
            .map_err(|e| ModelError::ArtifactParse(path.display().to_string(), e.to_string()))?;
        Ok(Self {
            field,
            classes: parsed.classes,
        })
    }

    /// Build an encoder from a literal class list (tests, fixtures).
    pub fn from_classes(field: &'static str, classes: &[&str]) -> Self {
        Self {
            field,
            classes: classes.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether the value is in the training vocabulary.
    pub fn contains(&self, value: &str) -> bool {
        self.classes.iter().any(|c| c == value)
    }

    /// Category string to its integer code.
    pub fn encode(&self, value: &str) -> Result<i64, ModelError> {
        self.classes
            .iter()
            .position(|c| c == value)
            .map(|i| i as i64)
            .ok_or_else(|| ModelError::UnknownCategory {
                field: self.field,
                value: value.to_string(),
                valid: self.classes.clone(),
            })
    }

    /// Integer code back to its category string.
    pub fn decode(&self, code: i64) -> Result<&str, ModelError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(|s| s.as_str())
            .ok_or(ModelError::LabelOutOfRange {
                field: self.field,
                code,
            })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}
