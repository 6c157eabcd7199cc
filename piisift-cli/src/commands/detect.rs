//! Detect command implementation

use super::run::RunArgs;
use anyhow::Result;
use clap::Args;
use piisift_api::DetectRequest;

/// Arguments for the detect command
#[derive(Debug, Args)]
pub struct DetectArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Leave out the per-category summary
    #[arg(long)]
    pub no_categorize: bool,
}

impl DetectArgs {
    /// Execute the detect command
    pub fn execute(&self) -> Result<()> {
        let session = self.run.prepare()?;
        let categorize = session.config.output.categorize && !self.no_categorize;

        let results = self.run.process(&session, |service, text| {
            let config = service.config();
            service.detect(DetectRequest {
                text,
                threshold: config.threshold,
                max_length: config.max_length,
                categorize,
            })
        })?;

        let mut formatter = self.run.formatter(&session)?;
        let mut total = 0;
        for (path, response) in &results {
            total += response.entity_count;
            formatter.write_detection(&path.display().to_string(), response)?;
        }
        formatter.finish()?;

        log::info!("Detected {} span(s) in {} file(s)", total, results.len());
        Ok(())
    }
}
