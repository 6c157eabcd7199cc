//! Anonymize command implementation

use super::run::RunArgs;
use anyhow::Result;
use clap::Args;
use piisift_api::AnonymizeRequest;

/// Arguments for the anonymize command
#[derive(Debug, Args)]
pub struct AnonymizeArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub fn execute(&self) -> Result<()> {
        let session = self.run.prepare()?;

        let results = self.run.process(&session, |service, text| {
            let config = service.config();
            service.anonymize(AnonymizeRequest {
                text,
                threshold: config.threshold,
                max_length: config.max_length,
            })
        })?;

        let mut formatter = self.run.formatter(&session)?;
        let mut total = 0;
        for (path, response) in &results {
            total += response.entity_count;
            formatter.write_anonymized(&path.display().to_string(), response)?;
        }
        formatter.finish()?;

        log::info!("Replaced {} span(s) in {} file(s)", total, results.len());
        Ok(())
    }
}
