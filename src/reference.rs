//! Static reference tables: disease advice and the medicine directory.
//!
//! Loaded once at startup from CSV; read-only afterwards.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Failed to read {0}: {1}")]
    Load(String, String),

    #[error("Failed to parse {0}: {1}")]
    Parse(String, String),
}

/// Care suggestion and medication for one predicted disease.
#[derive(Debug, Clone, Deserialize)]
pub struct DiseaseAdviceEntry {
    #[serde(rename = "target_disease")]
    pub disease: String,
    pub suggestion: String,
    pub tablet: String,
}

/// One entry of the medicine directory (label lookup target).
#[derive(Debug, Clone, Deserialize)]
pub struct MedicineEntry {
    #[serde(rename = "medicine")]
    pub name: String,
    #[serde(rename = "use")]
    pub usage: String,
    pub side_effects: String,
}

/// Loaded reference tables.
#[derive(Debug)]
pub struct ReferenceData {
    pub diseases: Vec<DiseaseAdviceEntry>,
    pub medicines: Vec<MedicineEntry>,
}

impl ReferenceData {
    /// Load both tables from the reference directory.
    pub fn load(reference_dir: &Path) -> Result<Self, ReferenceError> {
        let advice_path = reference_dir.join("medical_advice.csv");
        let mut advice_reader = csv::Reader::from_path(&advice_path).map_err(|e| {
            ReferenceError::Load(advice_path.display().to_string(), e.to_string())
        })?;
        let mut diseases = Vec::new();
        for row in advice_reader.deserialize() {
            let entry: DiseaseAdviceEntry = row.map_err(|e| {
                ReferenceError::Parse("medical_advice.csv".into(), e.to_string())
            })?;
            diseases.push(entry);
        }

        let medicines_path = reference_dir.join("medicines.csv");
        let mut medicine_reader = csv::Reader::from_path(&medicines_path).map_err(|e| {
            ReferenceError::Load(medicines_path.display().to_string(), e.to_string())
        })?;
        let mut medicines = Vec::new();
        for row in medicine_reader.deserialize() {
            let entry: MedicineEntry = row.map_err(|e| {
                ReferenceError::Parse("medicines.csv".into(), e.to_string())
            })?;
            medicines.push(entry);
        }

        Ok(Self { diseases, medicines })
    }

    /// Create reference data for tests (no file I/O).
    pub fn load_test() -> Self {
        Self {
            diseases: vec![
                DiseaseAdviceEntry {
                    disease: "Common Cold".into(),
                    suggestion: "Stay warm and drink warm fluids".into(),
                    tablet: "Cetirizine".into(),
                },
                DiseaseAdviceEntry {
                    disease: "Flu".into(),
                    suggestion: "Rest and fluids".into(),
                    tablet: "Paracetamol".into(),
                },
                DiseaseAdviceEntry {
                    disease: "Migraine".into(),
                    suggestion: "Rest in a dark quiet room and stay hydrated".into(),
                    tablet: "Sumatriptan".into(),
                },
            ],
            medicines: vec![
                MedicineEntry {
                    name: "Paracetamol".into(),
                    usage: "Relieves fever and mild pain".into(),
                    side_effects: "Nausea and rash in rare cases".into(),
                },
                MedicineEntry {
                    name: "Ibuprofen".into(),
                    usage: "Reduces inflammation pain and fever".into(),
                    side_effects: "Stomach upset and heartburn".into(),
                },
                MedicineEntry {
                    name: "Cetirizine".into(),
                    usage: "Relieves allergy symptoms and runny nose".into(),
                    side_effects: "Drowsiness and dry mouth".into(),
                },
            ],
        }
    }

    /// Look up advice for a predicted disease name.
    pub fn advice_for(&self, disease: &str) -> Option<&DiseaseAdviceEntry> {
        let lower = disease.to_lowercase();
        self.diseases
            .iter()
            .find(|d| d.disease.to_lowercase() == lower)
    }

    /// First medicine whose name occurs in the given text, case-insensitive.
    pub fn match_medicine(&self, text: &str) -> Option<&MedicineEntry> {
        let lower = text.to_lowercase();
        self.medicines
            .iter()
            .find(|m| lower.contains(&m.name.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn advice_for_known_disease() {
        let ref_data = ReferenceData::load_test();
        let entry = ref_data.advice_for("Flu").unwrap();
        assert_eq!(entry.suggestion, "Rest and fluids");
        assert_eq!(entry.tablet, "Paracetamol");
    }

    #[test]
    fn advice_for_case_insensitive() {
        let ref_data = ReferenceData::load_test();
        assert!(ref_data.advice_for("flu").is_some());
        assert!(ref_data.advice_for("COMMON COLD").is_some());
    }

    #[test]
    fn advice_for_unknown() {
        let ref_data = ReferenceData::load_test();
        assert!(ref_data.advice_for("Dragon Pox").is_none());
    }

    #[test]
    fn match_medicine_in_label_text() {
        let ref_data = ReferenceData::load_test();
        let entry = ref_data.match_medicine("paracetamol 500mg tablets").unwrap();
        assert_eq!(entry.name, "Paracetamol");
    }

    #[test]
    fn match_medicine_no_hit() {
        let ref_data = ReferenceData::load_test();
        assert!(ref_data.match_medicine("vitamin c chewables").is_none());
    }

    #[test]
    fn match_medicine_first_entry_wins() {
        let ref_data = ReferenceData::load_test();
        let entry = ref_data
            .match_medicine("pack contains ibuprofen and paracetamol")
            .unwrap();
        // Table order decides ties
        assert_eq!(entry.name, "Paracetamol");
    }

    #[test]
    fn load_reads_csv_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut advice = std::fs::File::create(dir.path().join("medical_advice.csv")).unwrap();
        writeln!(advice, "target_disease,suggestion,tablet").unwrap();
        writeln!(advice, "Flu,Rest and fluids,Paracetamol").unwrap();
        let mut medicines = std::fs::File::create(dir.path().join("medicines.csv")).unwrap();
        writeln!(medicines, "medicine,use,side_effects").unwrap();
        writeln!(medicines, "Paracetamol,Relieves fever,Rash in rare cases").unwrap();

        let ref_data = ReferenceData::load(dir.path()).unwrap();
        assert_eq!(ref_data.diseases.len(), 1);
        assert_eq!(ref_data.medicines.len(), 1);
        assert_eq!(ref_data.medicines[0].usage, "Relieves fever");
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReferenceData::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("medical_advice.csv"));
    }
}
