//! Arguments and file processing shared by `detect` and `anonymize`

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{create_formatter, OutputFormat, OutputFormatter};
use crate::progress::ProgressReporter;
use anyhow::Result;
use clap::Args;
use piisift_api::{ApiError, PiiService};
use piisift_core::LexiconDetector;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Arguments common to the processing commands
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Minimum confidence for detected spans
    #[arg(short, long, value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Maximum chunk length in characters
    #[arg(short, long, value_name = "CHARS")]
    pub max_length: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "PIISIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Force parallel processing even for few files
    #[arg(short, long)]
    pub parallel: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Everything a processing command needs once arguments are resolved
pub struct Session {
    /// Effective configuration, command-line overrides applied
    pub config: CliConfig,
    /// Service around the configured lexicon detector
    pub service: PiiService<LexiconDetector>,
    /// Input files, sorted
    pub files: Vec<PathBuf>,
}

impl RunArgs {
    /// Initialize logging, load configuration and resolve inputs
    pub fn prepare(&self) -> Result<Session> {
        super::init_logging(self.verbose, self.quiet)?;
        log::debug!("Arguments: {:?}", self);

        let mut config = CliConfig::load_or_default(self.config.as_deref())?;
        if let Some(threshold) = self.threshold {
            config.detection.threshold = threshold;
        }
        if let Some(max_length) = self.max_length {
            config.detection.max_length = max_length;
        }

        let service = PiiService::with_config(config.lexicon_detector()?, config.service_config()?)?;
        let files = resolve_patterns(&self.input)?;

        Ok(Session {
            config,
            service,
            files,
        })
    }

    /// Output format from the flag, else from the config file
    pub fn output_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        OutputFormat::from_name(&config.output.default_format).ok_or_else(|| {
            CliError::ConfigError(format!(
                "unknown output format '{}'",
                config.output.default_format
            ))
            .into()
        })
    }

    /// Formatter for the resolved format and destination
    pub fn formatter(&self, session: &Session) -> Result<Box<dyn OutputFormatter>> {
        create_formatter(
            self.output_format(&session.config)?,
            self.output.as_deref(),
            session.files.len() > 1,
            session.config.output.pretty_json,
        )
    }

    /// Run `job` over every non-blank input file
    ///
    /// Results keep the input order whether or not files are processed in
    /// parallel. The first failing file aborts the command.
    pub fn process<T, F>(&self, session: &Session, job: F) -> Result<Vec<(PathBuf, T)>>
    where
        T: Send,
        F: Fn(&PiiService<LexiconDetector>, String) -> piisift_api::error::Result<T> + Sync,
    {
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(session.files.len() as u64);
        let results = self.process_with(session, &progress, job)?;
        progress.finish();
        Ok(results)
    }

    /// [`RunArgs::process`] reporting to an existing progress reporter
    ///
    /// Skipped blank files count as completed.
    pub fn process_with<T, F>(
        &self,
        session: &Session,
        progress: &ProgressReporter,
        job: F,
    ) -> Result<Vec<(PathBuf, T)>>
    where
        T: Send,
        F: Fn(&PiiService<LexiconDetector>, String) -> piisift_api::error::Result<T> + Sync,
    {
        let process_one = |path: &PathBuf| -> Result<Option<(PathBuf, T)>> {
            let name = path.display().to_string();
            let Some(text) = FileReader::read_non_blank(path)? else {
                progress.file_completed(&name);
                return Ok(None);
            };
            let result = job(&session.service, text).map_err(|e| processing_error(path, e))?;
            progress.file_completed(&name);
            Ok(Some((path.clone(), result)))
        };

        let performance = &session.config.performance;
        let parallel = self.parallel || session.files.len() >= performance.parallel_min_files;

        let results: Vec<Option<(PathBuf, T)>> = if parallel {
            let threads = performance.threads();
            log::info!(
                "Processing {} file(s) on {} thread(s)",
                session.files.len(),
                threads
            );
            let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
            pool.install(|| session.files.par_iter().map(process_one).collect::<Result<_>>())?
        } else {
            log::info!("Processing {} file(s)", session.files.len());
            session
                .files
                .iter()
                .map(process_one)
                .collect::<Result<_>>()?
        };

        Ok(results.into_iter().flatten().collect())
    }
}

fn processing_error(path: &Path, error: ApiError) -> CliError {
    CliError::ProcessingError {
        file: path.display().to_string(),
        message: error.to_string(),
    }
}
