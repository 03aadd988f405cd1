use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One Section Table entry with its output path already resolved against the layout root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    pub output_path: PathBuf,
}

impl SectionSpec {
    pub fn new(name: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            output_path: output_path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Start,
    End,
}

impl MarkerKind {
    /// Literal comment bounding a section, e.g. `/* START: Base */`.
    pub fn render(self, section: &str) -> String {
        match self {
            MarkerKind::Start => format!("/* START: {} */", section),
            MarkerKind::End => format!("/* END: {} */", section),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingMarker {
    pub section: String,
    pub kind: MarkerKind,
    pub marker: String,
}

impl MissingMarker {
    pub fn new(section: &str, kind: MarkerKind) -> Self {
        Self {
            section: section.to_string(),
            kind,
            marker: kind.render(section),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MarkerReport {
    /// Number of sections checked.
    pub checked: usize,
    pub missing: Vec<MissingMarker>,
    /// Sections whose start marker occurs more than once; only the first pair is extracted.
    pub duplicated: Vec<String>,
}

impl MarkerReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionStatus {
    Written { lines: usize, bytes: usize },
    Planned { lines: usize, bytes: usize },
    NotFound,
    Empty,
    DirectoryFailed { message: String },
    WriteFailed { message: String },
}

impl SectionStatus {
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            SectionStatus::Written { .. } | SectionStatus::Planned { .. }
        )
    }
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionStatus::Written { lines, .. } => write!(f, "written ({} lines)", lines),
            SectionStatus::Planned { lines, .. } => write!(f, "would write {} lines", lines),
            SectionStatus::NotFound => write!(f, "no END marker after the START marker"),
            SectionStatus::Empty => write!(f, "section is empty"),
            SectionStatus::DirectoryFailed { message } => {
                write!(f, "could not create directory: {}", message)
            }
            SectionStatus::WriteFailed { message } => write!(f, "could not write file: {}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionOutcome {
    pub section: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: SectionStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WriteReport {
    pub dry_run: bool,
    pub created_dirs: Vec<PathBuf>,
    pub outcomes: Vec<SectionOutcome>,
}

impl WriteReport {
    pub fn success_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.status.is_failure())
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &SectionOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status.is_failure())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregatorReport {
    pub path: PathBuf,
    pub imports: usize,
    pub categories: Vec<String>,
    pub bytes: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VerificationReport {
    pub expected: usize,
    pub missing: Vec<PathBuf>,
}

impl VerificationReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub path: PathBuf,
    pub bytes: usize,
    pub lines: usize,
}

/// Everything one run did, stage by stage.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub dry_run: bool,
    pub source: SourceSummary,
    pub markers: MarkerReport,
    pub sections: WriteReport,
    pub aggregator: Option<AggregatorReport>,
    pub verification: Option<VerificationReport>,
}
