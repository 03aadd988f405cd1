use crate::config::layout::LayoutConfig;
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::{self, Validate};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "css-split")]
#[command(about = "Split a monolithic stylesheet into modules and generate an aggregator")]
pub struct CliConfig {
    /// Monolithic stylesheet containing START/END section markers
    #[arg(short, long, default_value = "style.css")]
    pub source: PathBuf,

    /// Directory the source and all outputs are resolved against
    #[arg(short, long, default_value = ".")]
    pub workdir: PathBuf,

    /// TOML layout file; the built-in layout is used when omitted
    #[arg(short, long)]
    pub layout: Option<PathBuf>,

    /// Validate markers and extract in memory without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the effective layout as TOML and exit
    #[arg(long)]
    pub print_layout: bool,

    /// Print the run report as JSON instead of the text summary
    #[arg(long)]
    pub json: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    /// The layout file if one was given, otherwise the built-in layout. Always validated.
    pub fn load_layout(&self) -> Result<LayoutConfig> {
        let layout = match &self.layout {
            Some(path) => {
                tracing::info!("Loading layout from: {}", path.display());
                LayoutConfig::from_file(path).map_err(|e| match e {
                    SplitError::IoError(io) => SplitError::config(format!(
                        "cannot read layout file '{}': {}",
                        path.display(),
                        io
                    )),
                    other => other,
                })?
            }
            None => LayoutConfig::default(),
        };

        layout.validate()?;

        for section in layout.unimported_sections() {
            tracing::warn!(
                "Section '{}' ({}) is not imported by the aggregator",
                section.name,
                section.path
            );
        }

        Ok(layout)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("source", &self.source.to_string_lossy())?;
        validation::validate_path("workdir", &self.workdir.to_string_lossy())?;

        if !self.workdir.is_dir() {
            return Err(SplitError::InvalidConfigValueError {
                field: "workdir".to_string(),
                value: self.workdir.display().to_string(),
                reason: "Not an existing directory".to_string(),
            });
        }

        Ok(())
    }
}
