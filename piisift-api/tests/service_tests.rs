//! Service-level tests for piisift-api

use piisift_api::*;
use piisift_core::{Category, DetectorError, LexiconDetector, RawSpan, SpanDetector};
use std::io::Write;

fn lexicon() -> LexiconDetector {
    LexiconDetector::default()
        .with_terms("person", &["Anna de Vries"])
        .unwrap()
        .with_terms("organization", &["Philips"])
        .unwrap()
}

/// Returns one span per call that always reaches past the chunk
struct BrokenDetector;

impl SpanDetector for BrokenDetector {
    fn predict(
        &self,
        text: &str,
        _labels: &[String],
        _threshold: f64,
    ) -> std::result::Result<Vec<RawSpan>, DetectorError> {
        let len = text.chars().count();
        Ok(vec![RawSpan {
            label: "person".into(),
            text: String::new(),
            start: 0,
            end: len + 5,
            score: 0.9,
        }])
    }
}

#[test]
fn test_detect_request() {
    let service = PiiService::new(lexicon()).unwrap();
    let response = service
        .detect(DetectRequest::new(
            "Anna de Vries werkt bij Philips. Bel 0201234567.",
        ))
        .unwrap();

    let labels: Vec<_> = response.entities.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["person", "organization", "phone"]);
    assert_eq!(response.entity_count, 3);

    let categorized = response.categorized.unwrap();
    assert!(categorized.get(Category::Names).contains("Anna de Vries"));
    assert!(categorized.get(Category::Organizations).contains("Philips"));
    assert!(categorized.get(Category::Phones).contains("0201234567"));
}

#[test]
fn test_anonymize_request() {
    let service = PiiService::new(lexicon()).unwrap();
    let text = "Anna de Vries werkt bij Philips.";
    let response = service.anonymize(AnonymizeRequest::new(text)).unwrap();

    assert_eq!(response.anonymized_text, "[NAME] werkt bij [REDACTED].");
    assert_eq!(response.entity_count, 2);
    assert_eq!(response.replacements.get("person").map(|r| r.len()), Some(1));
    assert_eq!(
        response.replacements.restore(&response.anonymized_text).unwrap(),
        text
    );
    assert!(response.pii_detected.get(Category::Names).contains("Anna de Vries"));
}

#[test]
fn test_malformed_detector_output_is_server_error() {
    let service = PiiService::new(BrokenDetector).unwrap();
    let err = service
        .detect(DetectRequest::new("Some text here."))
        .unwrap_err();
    assert!(matches!(err, ApiError::Pipeline(_)));
    assert_eq!(err.status_code(), 500);
}

#[test]
fn test_file_input() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "Contact: anna@philips.com").unwrap();

    let service = PiiService::new(lexicon()).unwrap();
    let response = service
        .anonymize_input(Input::from_file(file.path()))
        .unwrap();
    assert_eq!(response.anonymized_text, "Contact: [EMAIL]");
}

#[test]
fn test_missing_file_is_io_error() {
    let service = PiiService::new(lexicon()).unwrap();
    let err = service
        .detect_input(Input::from_file("/nonexistent/cv.txt"))
        .unwrap_err();
    assert!(matches!(err, ApiError::Io(_)));
}

#[test]
fn test_response_json_shape() {
    let service = PiiService::new(lexicon()).unwrap();
    let response = service
        .anonymize(AnonymizeRequest::new("Anna de Vries"))
        .unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["anonymized_text"], "[NAME]");
    assert_eq!(json["pii_detected"]["names"][0], "Anna de Vries");
    assert_eq!(json["replacements"]["person"][0]["placeholder"], "[NAME]");
    assert_eq!(json["entity_count"], 1);
}

#[test]
fn test_configured_labels_restrict_detection() {
    let config = Config::builder().labels(["organization"]).build().unwrap();
    let service = PiiService::with_config(lexicon(), config).unwrap();
    let response = service
        .detect(DetectRequest::new("Anna de Vries werkt bij Philips."))
        .unwrap();
    assert_eq!(response.entity_count, 1);
    assert_eq!(response.entities[0].text, "Philips");
}
