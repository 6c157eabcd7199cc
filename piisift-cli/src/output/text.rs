//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use piisift_api::{AnonymizeResponse, DetectResponse};
use std::io::Write;

/// Plain text formatter - one span per line, or the anonymized text as is
pub struct TextFormatter<W: Write> {
    writer: W,
    show_source: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter; `show_source` prefixes each file with a header
    pub fn new(writer: W, show_source: bool) -> Self {
        Self {
            writer,
            show_source,
        }
    }

    fn header(&mut self, source: &str) -> Result<()> {
        if self.show_source {
            writeln!(self.writer, "==> {} <==", source)?;
        }
        Ok(())
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn write_detection(&mut self, source: &str, response: &DetectResponse) -> Result<()> {
        self.header(source)?;
        for span in &response.entities {
            writeln!(
                self.writer,
                "{:>6}..{:<6} {:<14} {:.2}  {}",
                span.start,
                span.end,
                span.label,
                span.score,
                span.text.escape_debug()
            )?;
        }

        if let Some(categorized) = &response.categorized {
            for (category, texts) in categorized.iter().filter(|(_, t)| !t.is_empty()) {
                let texts: Vec<String> = texts.iter().map(|t| t.escape_debug().to_string()).collect();
                writeln!(self.writer, "{}: {}", category, texts.join(", "))?;
            }
        }
        Ok(())
    }

    fn write_anonymized(&mut self, source: &str, response: &AnonymizeResponse) -> Result<()> {
        self.header(source)?;
        write!(self.writer, "{}", response.anonymized_text)?;
        if !response.anonymized_text.ends_with('\n') {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use piisift_api::{AnonymizeRequest, DetectRequest, PiiService};
    use piisift_core::NoopDetector;

    #[test]
    fn test_detection_lines() {
        let service = PiiService::new(NoopDetector).unwrap();
        let response = service
            .detect(DetectRequest::new("Bel 0612345678"))
            .unwrap();

        let mut buffer = Vec::new();
        let mut formatter = TextFormatter::new(&mut buffer, true);
        formatter.write_detection("cv.txt", &response).unwrap();
        formatter.finish().unwrap();

        let out = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "==> cv.txt <==");
        assert!(lines[1].contains("phone"));
        assert!(lines[1].ends_with("0612345678"));
        assert_eq!(lines[2], "phones: 0612345678");
    }

    #[test]
    fn test_anonymized_text_ends_with_newline() {
        let service = PiiService::new(NoopDetector).unwrap();
        let response = service
            .anonymize(AnonymizeRequest::new("mail a@b.nl"))
            .unwrap();

        let mut buffer = Vec::new();
        let mut formatter = TextFormatter::new(&mut buffer, false);
        formatter.write_anonymized("cv.txt", &response).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "mail [EMAIL]\n");
    }
}
