//! Basic usage example for piisift-api

use piisift_api::{AnonymizeRequest, Config, DetectRequest, PiiService};
use piisift_core::LexiconDetector;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = "Jan Jansen\nHoofdstraat 123, 1234 AB Amsterdam\nEmail: jan@example.nl";

    let detector = LexiconDetector::default()
        .with_terms("person", &["Jan Jansen"])?
        .with_terms("location", &["Amsterdam"])?;

    // Example 1: detection with default settings
    let service = PiiService::new(detector.clone())?;
    let response = service.detect(DetectRequest::new(text))?;
    println!("Found {} entities:", response.entity_count);
    for span in &response.entities {
        println!("  {:>3}..{:<3} {:<12} {}", span.start, span.end, span.label, span.text);
    }

    // Example 2: anonymization
    let response = service.anonymize(AnonymizeRequest::new(text))?;
    println!("\nAnonymized:\n{}", response.anonymized_text);

    // Example 3: custom configuration
    let config = Config::builder()
        .threshold(0.5)
        .max_length(256)
        .labels(["person"])
        .build()?;
    let service = PiiService::with_config(detector, config)?;
    let response = service.detect(DetectRequest::new(text))?;
    println!("\nWith only person labels: {} entities", response.entity_count);

    Ok(())
}
