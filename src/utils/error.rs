use crate::domain::model::{MarkerReport, VerificationReport, WriteReport};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Source file not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Failed to read source '{}': {source}", .path.display())]
    SourceReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Layout parsing error: {0}")]
    LayoutParseError(#[from] toml::de::Error),

    #[error("Layout serialization error: {0}")]
    LayoutSerializeError(#[from] toml::ser::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("{} marker(s) missing from the source", .report.missing.len())]
    MissingMarkers { report: MarkerReport },

    #[error("{} of {} section(s) could not be extracted", .report.failure_count(), .report.outcomes.len())]
    SectionFailures { report: WriteReport },

    #[error("Failed to write aggregator '{}': {source}", .path.display())]
    AggregatorWriteError {
        path: PathBuf,
        #[source]
        source: Box<SplitError>,
    },

    #[error("{} expected file(s) missing after the run", .report.missing.len())]
    VerificationFailed { report: VerificationReport },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Processing,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SplitError {
    pub fn config(message: impl Into<String>) -> Self {
        SplitError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SplitError::ConfigError { .. }
            | SplitError::InvalidConfigValueError { .. }
            | SplitError::MissingConfigError { .. }
            | SplitError::LayoutParseError(_)
            | SplitError::LayoutSerializeError(_) => ErrorCategory::Configuration,
            SplitError::SourceNotFound { .. }
            | SplitError::SourceReadError { .. }
            | SplitError::MissingMarkers { .. } => ErrorCategory::Input,
            SplitError::SectionFailures { .. } => ErrorCategory::Processing,
            SplitError::AggregatorWriteError { .. } | SplitError::VerificationFailed { .. } => {
                ErrorCategory::Output
            }
            SplitError::IoError(_) | SplitError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Processing | ErrorCategory::Output => {
                match self {
                    SplitError::SourceNotFound { .. } | SplitError::SourceReadError { .. } => {
                        ErrorSeverity::Critical
                    }
                    _ => ErrorSeverity::High,
                }
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for this failure. Never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SplitError::SourceNotFound { path } => format!(
                "Run the tool from the directory containing '{}' or pass --source/--workdir",
                path.display()
            ),
            SplitError::SourceReadError { path, .. } => format!(
                "Make sure '{}' is a readable UTF-8 text file",
                path.display()
            ),
            SplitError::MissingMarkers { .. } => {
                "Add the missing START/END markers to the source stylesheet before running again"
                    .to_string()
            }
            SplitError::SectionFailures { .. } => {
                "Check the failed sections above: empty regions, misplaced END markers or unwritable paths"
                    .to_string()
            }
            SplitError::AggregatorWriteError { path, .. } => format!(
                "Make sure '{}' is writable and not a directory",
                path.display()
            ),
            SplitError::VerificationFailed { .. } => {
                "Something removed or redirected the generated files; re-run and inspect the output tree"
                    .to_string()
            }
            SplitError::LayoutParseError(_) => {
                "Make sure the layout file is valid TOML (see --print-layout for a template)".to_string()
            }
            SplitError::ConfigError { .. }
            | SplitError::InvalidConfigValueError { .. }
            | SplitError::MissingConfigError { .. }
            | SplitError::LayoutSerializeError(_) => {
                "Fix the layout configuration and try again".to_string()
            }
            SplitError::IoError(_) | SplitError::SerializationError(_) => {
                "Check file permissions and available disk space".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SplitError::SourceNotFound { path } => {
                format!("The stylesheet '{}' was not found", path.display())
            }
            SplitError::MissingMarkers { report } => {
                let mut message = format!("{} marker(s) are missing:", report.missing.len());
                for missing in &report.missing {
                    message.push_str(&format!("\n  - {}", missing.marker));
                }
                message
            }
            SplitError::SectionFailures { report } => {
                let mut message = format!(
                    "{} section(s) written, {} failed:",
                    report.success_count(),
                    report.failure_count()
                );
                for outcome in report.failures() {
                    message.push_str(&format!(
                        "\n  - {} -> {}: {}",
                        outcome.section,
                        outcome.path.display(),
                        outcome.status
                    ));
                }
                message
            }
            SplitError::VerificationFailed { report } => {
                let mut message = "Expected files are missing:".to_string();
                for path in &report.missing {
                    message.push_str(&format!("\n  - {}", path.display()));
                }
                message
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitError>;
