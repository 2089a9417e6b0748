use super::{OcrEngine, OcrError};
use crate::reference::ReferenceData;

/// A medicine identified on an uploaded label image.
#[derive(Debug, Clone)]
pub struct LabelMatch {
    pub name: String,
    pub usage: String,
    pub side_effects: String,
    pub extracted_text: String,
}

/// Run OCR on the image and match the text against the medicine table.
///
/// Distinguishes "the engine could not be reached" from "the engine read
/// nothing" from "the text matched no known medicine".
pub fn recognize_medicine(
    engine: &dyn OcrEngine,
    reference: &ReferenceData,
    image_bytes: &[u8],
) -> Result<LabelMatch, OcrError> {
    let raw = engine.extract_text(image_bytes)?;
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return Err(OcrError::EmptyExtraction);
    }

    tracing::debug!(text_len = text.len(), "Label text extracted");

    let entry = reference.match_medicine(&text).ok_or(OcrError::NoMatch)?;
    Ok(LabelMatch {
        name: entry.name.clone(),
        usage: entry.usage.clone(),
        side_effects: entry.side_effects.clone(),
        extracted_text: text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::engine::{MockOcrEngine, UnavailableOcrEngine};

    #[test]
    fn label_text_matches_medicine() {
        let engine = MockOcrEngine::new("Paracetamol 500mg Tablets");
        let reference = ReferenceData::load_test();

        let found = recognize_medicine(&engine, &reference, b"label-image").unwrap();
        assert_eq!(found.name, "Paracetamol");
        assert_eq!(found.usage, "Relieves fever and mild pain");
        assert_eq!(found.extracted_text, "paracetamol 500mg tablets");
    }

    #[test]
    fn match_is_case_insensitive() {
        let engine = MockOcrEngine::new("IBUPROFEN 200 MG");
        let reference = ReferenceData::load_test();

        let found = recognize_medicine(&engine, &reference, b"label-image").unwrap();
        assert_eq!(found.name, "Ibuprofen");
    }

    #[test]
    fn empty_extraction_is_its_own_failure() {
        let engine = MockOcrEngine::new("");
        let reference = ReferenceData::load_test();

        let err = recognize_medicine(&engine, &reference, b"blank-image").unwrap_err();
        assert!(matches!(err, OcrError::EmptyExtraction));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let engine = MockOcrEngine::new("  \n\t ");
        let reference = ReferenceData::load_test();

        let err = recognize_medicine(&engine, &reference, b"blank-image").unwrap_err();
        assert!(matches!(err, OcrError::EmptyExtraction));
    }

    #[test]
    fn unknown_label_reports_no_match() {
        let engine = MockOcrEngine::new("Windscreen washer fluid 5L");
        let reference = ReferenceData::load_test();

        let err = recognize_medicine(&engine, &reference, b"not-a-medicine").unwrap_err();
        assert!(matches!(err, OcrError::NoMatch));
    }

    #[test]
    fn unreachable_engine_propagates_unavailable() {
        let reference = ReferenceData::load_test();
        let err =
            recognize_medicine(&UnavailableOcrEngine, &reference, b"label-image").unwrap_err();
        assert!(matches!(err, OcrError::Unavailable(_)));
    }
}
