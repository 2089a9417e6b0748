use std::path::Path;

use super::{DecisionTreeModel, LabelEncoder, ModelError};
use crate::reference::ReferenceData;

/// Patient features for one prediction, already normalized at the boundary.
#[derive(Debug, Clone)]
pub struct PredictionInput<'a> {
    pub age: i64,
    pub gender: &'a str,
    pub bp: f64,
    pub temp: f64,
    pub symptom: &'a str,
}

/// One successful prediction joined with its reference advice.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub symptom: String,
    pub disease: String,
    pub suggestion: String,
    pub tablet: String,
}

/// The pre-trained model as one immutable unit: three encoders plus the
/// classifier. Pure computation; persistence stays with the caller.
pub struct DiseasePredictor {
    gender_encoder: LabelEncoder,
    symptom_encoder: LabelEncoder,
    disease_encoder: LabelEncoder,
    model: DecisionTreeModel,
}

impl DiseasePredictor {
    pub fn new(
        gender_encoder: LabelEncoder,
        symptom_encoder: LabelEncoder,
        disease_encoder: LabelEncoder,
        model: DecisionTreeModel,
    ) -> Self {
        Self {
            gender_encoder,
            symptom_encoder,
            disease_encoder,
            model,
        }
    }

    /// Load all four artifacts from the model directory.
    pub fn load(model_dir: &Path) -> Result<Self, ModelError> {
        Ok(Self {
            gender_encoder: LabelEncoder::load(&model_dir.join("gender_classes.json"), "gender")?,
            symptom_encoder: LabelEncoder::load(
                &model_dir.join("symptom_classes.json"),
                "symptom",
            )?,
            disease_encoder: LabelEncoder::load(
                &model_dir.join("disease_classes.json"),
                "disease",
            )?,
            model: DecisionTreeModel::load(&model_dir.join("disease_model.json"))?,
        })
    }

    /// Fixture predictor matching `ReferenceData::load_test()`:
    /// cough → Common Cold, fever → Flu, headache → Migraine.
    pub fn load_test() -> Self {
        Self {
            gender_encoder: LabelEncoder::from_classes("gender", &["F", "M"]),
            symptom_encoder: LabelEncoder::from_classes(
                "symptom",
                &["cough", "fever", "headache"],
            ),
            disease_encoder: LabelEncoder::from_classes(
                "disease",
                &["Common Cold", "Flu", "Migraine"],
            ),
            model: DecisionTreeModel::load_test(),
        }
    }

    /// Reject genders outside the encoder vocabulary before any other work.
    pub fn validate_gender(&self, gender: &str) -> Result<(), ModelError> {
        self.gender_encoder.encode(gender).map(|_| ())
    }

    pub fn knows_symptom(&self, symptom: &str) -> bool {
        self.symptom_encoder.contains(symptom)
    }

    pub fn symptom_classes(&self) -> &[String] {
        self.symptom_encoder.classes()
    }

    pub fn gender_classes(&self) -> &[String] {
        self.gender_encoder.classes()
    }

    pub fn disease_class_count(&self) -> usize {
        self.disease_encoder.class_count()
    }

    /// Encode → classify → decode → join advice.
    pub fn predict(
        &self,
        input: &PredictionInput<'_>,
        reference: &ReferenceData,
    ) -> Result<Prediction, ModelError> {
        let gender_code = self.gender_encoder.encode(input.gender)?;
        let symptom_code = self.symptom_encoder.encode(input.symptom)?;

        let features = [
            input.age as f64,
            gender_code as f64,
            input.bp,
            input.temp,
            symptom_code as f64,
        ];
        let label = self.model.predict(&features)?;
        let disease = self.disease_encoder.decode(label)?;

        // Encoder and advice table ship together, but nothing enforces that
        let entry = reference
            .advice_for(disease)
            .ok_or_else(|| ModelError::UnknownDisease(disease.to_string()))?;

        Ok(Prediction {
            symptom: input.symptom.to_string(),
            disease: entry.disease.clone(),
            suggestion: entry.suggestion.clone(),
            tablet: entry.tablet.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_input<'a>(symptom: &'a str, gender: &'a str) -> PredictionInput<'a> {
        PredictionInput {
            age: 30,
            gender,
            bp: 120.0,
            temp: 98.6,
            symptom,
        }
    }

    #[test]
    fn fever_predicts_flu_with_advice() {
        let predictor = DiseasePredictor::load_test();
        let reference = ReferenceData::load_test();

        let prediction = predictor
            .predict(&fixture_input("fever", "M"), &reference)
            .unwrap();
        assert_eq!(prediction.disease, "Flu");
        assert_eq!(prediction.suggestion, "Rest and fluids");
        assert_eq!(prediction.tablet, "Paracetamol");
    }

    #[test]
    fn every_known_symptom_maps_to_a_reference_disease() {
        let predictor = DiseasePredictor::load_test();
        let reference = ReferenceData::load_test();

        for symptom in predictor.symptom_classes().to_vec() {
            for gender in ["F", "M"] {
                let prediction = predictor
                    .predict(&fixture_input(&symptom, gender), &reference)
                    .unwrap();
                assert!(
                    reference.advice_for(&prediction.disease).is_some(),
                    "{symptom}/{gender} predicted {} without advice",
                    prediction.disease
                );
            }
        }
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let predictor = DiseasePredictor::load_test();
        let reference = ReferenceData::load_test();

        let err = predictor
            .predict(&fixture_input("fever", "X"), &reference)
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownCategory { field: "gender", .. }));
    }

    #[test]
    fn unknown_symptom_is_rejected() {
        let predictor = DiseasePredictor::load_test();
        let reference = ReferenceData::load_test();

        let err = predictor
            .predict(&fixture_input("hiccups", "F"), &reference)
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownCategory { field: "symptom", .. }));
    }

    #[test]
    fn validate_gender_checks_vocabulary() {
        let predictor = DiseasePredictor::load_test();
        assert!(predictor.validate_gender("F").is_ok());
        assert!(predictor.validate_gender("X").is_err());
    }

    #[test]
    fn predicted_disease_without_advice_is_defended() {
        // Decoder knows a disease the advice table does not carry
        let predictor = DiseasePredictor::new(
            LabelEncoder::from_classes("gender", &["F", "M"]),
            LabelEncoder::from_classes("symptom", &["cough", "fever", "headache"]),
            LabelEncoder::from_classes("disease", &["Dengue", "Dragon Pox", "Scurvy"]),
            DecisionTreeModel::load_test(),
        );
        let reference = ReferenceData::load_test();

        let err = predictor
            .predict(&fixture_input("fever", "M"), &reference)
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownDisease(d) if d == "Dragon Pox"));
    }

    #[test]
    fn shipped_artifacts_are_consistent() {
        // The resources/ tree must satisfy the same closure property
        let predictor = DiseasePredictor::load(std::path::Path::new("resources/model")).unwrap();
        let reference =
            ReferenceData::load(std::path::Path::new("resources/reference")).unwrap();

        assert_eq!(predictor.disease_class_count(), reference.diseases.len());
        for symptom in predictor.symptom_classes().to_vec() {
            let prediction = predictor
                .predict(&fixture_input(&symptom, "F"), &reference)
                .unwrap();
            assert!(reference.advice_for(&prediction.disease).is_some());
        }
    }

    #[test]
    fn shipped_scenario_fever_is_flu() {
        let predictor = DiseasePredictor::load(std::path::Path::new("resources/model")).unwrap();
        let reference =
            ReferenceData::load(std::path::Path::new("resources/reference")).unwrap();

        let prediction = predictor
            .predict(&fixture_input("fever", "M"), &reference)
            .unwrap();
        assert_eq!(prediction.disease, "Flu");
        assert_eq!(prediction.suggestion, "Rest and fluids");
        assert_eq!(prediction.tablet, "Paracetamol");
    }
}
