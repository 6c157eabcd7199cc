//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use piisift_api::{AnonymizeResponse, DetectResponse};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

/// JSON formatter - outputs one response object per file as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    entries: Vec<Value>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            entries: Vec::new(),
        }
    }

    fn push<T: Serialize>(&mut self, source: &str, response: &T) -> Result<()> {
        let mut entry = serde_json::to_value(response)?;
        if let Value::Object(map) = &mut entry {
            map.insert("file".to_string(), Value::String(source.to_string()));
        }
        self.entries.push(entry);
        Ok(())
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn write_detection(&mut self, source: &str, response: &DetectResponse) -> Result<()> {
        self.push(source, response)
    }

    fn write_anonymized(&mut self, source: &str, response: &AnonymizeResponse) -> Result<()> {
        self.push(source, response)
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.entries)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.entries)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
