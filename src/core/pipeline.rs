use crate::core::aggregator::{category_runs, render_aggregator};
use crate::core::markers::{extract_region, validate_markers};
use crate::core::{LayoutProvider, Pipeline, Storage};
use crate::domain::model::{
    AggregatorReport, MarkerReport, SectionOutcome, SectionStatus, VerificationReport,
    WriteReport,
};
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::normalize_path;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Splits one stylesheet according to a layout, through a [`Storage`].
pub struct SplitPipeline<S: Storage, L: LayoutProvider> {
    storage: S,
    layout: L,
    source_path: PathBuf,
}

impl<S: Storage, L: LayoutProvider> SplitPipeline<S, L> {
    pub fn new(storage: S, layout: L, source_path: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            layout,
            source_path: source_path.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    fn ensure_parent_dir(&self, path: &Path, created_dirs: &mut Vec<PathBuf>) -> Result<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        if self.storage.create_dir_all(parent)? {
            tracing::info!("Created directory: {}", parent.display());
            created_dirs.push(parent.to_path_buf());
        }
        Ok(())
    }

    /// No section file or aggregator may land on the stylesheet being split.
    fn ensure_source_is_not_an_output(&self) -> Result<()> {
        let source = normalize_path(&self.source_path);

        let outputs = self
            .layout
            .sections()
            .into_iter()
            .map(|section| ("sections.path", section.output_path))
            .chain(std::iter::once((
                "aggregator.path",
                self.layout.aggregator_path(),
            )));

        for (field, output) in outputs {
            if normalize_path(&output) == source {
                return Err(SplitError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: output.display().to_string(),
                    reason: "Output would overwrite the source stylesheet".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl<S: Storage, L: LayoutProvider> Pipeline for SplitPipeline<S, L> {
    fn source_path(&self) -> &Path {
        &self.source_path
    }

    fn load_source(&self) -> Result<String> {
        self.ensure_source_is_not_an_output()?;

        match self.storage.read_to_string(&self.source_path) {
            Ok(content) => {
                tracing::debug!(
                    "Read {} bytes from '{}'",
                    content.len(),
                    self.source_path.display()
                );
                Ok(content)
            }
            Err(SplitError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                Err(SplitError::SourceNotFound {
                    path: self.source_path.clone(),
                })
            }
            Err(SplitError::IoError(e)) => Err(SplitError::SourceReadError {
                path: self.source_path.clone(),
                source: e,
            }),
            Err(e) => Err(e),
        }
    }

    fn check_markers(&self, content: &str) -> MarkerReport {
        let report = validate_markers(content, &self.layout.sections());

        for missing in &report.missing {
            tracing::error!("Marker not found: {}", missing.marker);
        }
        for section in &report.duplicated {
            tracing::warn!(
                "Section '{}' has more than one START marker; only the first block is used",
                section
            );
        }
        report
    }

    fn extract_sections(&self, content: &str, dry_run: bool) -> WriteReport {
        let mut report = WriteReport {
            dry_run,
            ..WriteReport::default()
        };

        for section in self.layout.sections() {
            let status = match extract_region(content, &section.name) {
                None => SectionStatus::NotFound,
                Some("") => SectionStatus::Empty,
                Some(block) => {
                    let lines = block.lines().count();
                    let bytes = block.len();

                    if dry_run {
                        SectionStatus::Planned { lines, bytes }
                    } else if let Err(e) =
                        self.ensure_parent_dir(&section.output_path, &mut report.created_dirs)
                    {
                        SectionStatus::DirectoryFailed {
                            message: e.to_string(),
                        }
                    } else {
                        match self.storage.write_file(&section.output_path, block.as_bytes()) {
                            Ok(()) => SectionStatus::Written { lines, bytes },
                            Err(e) => SectionStatus::WriteFailed {
                                message: e.to_string(),
                            },
                        }
                    }
                }
            };

            if status.is_failure() {
                tracing::error!(
                    "Section '{}' -> '{}': {}",
                    section.name,
                    section.output_path.display(),
                    status
                );
            } else {
                tracing::info!("'{}' {}", section.output_path.display(), status);
            }

            report.outcomes.push(SectionOutcome {
                section: section.name,
                path: section.output_path,
                status,
            });
        }

        report
    }

    fn write_aggregator(&self) -> Result<AggregatorReport> {
        let path = self.layout.aggregator_path();
        let imports = self.layout.imports();
        let content = render_aggregator(self.layout.aggregator_header(), imports);

        let write = || -> Result<()> {
            let mut created_dirs = Vec::new();
            self.ensure_parent_dir(&path, &mut created_dirs)?;
            self.storage.write_file(&path, content.as_bytes())
        };

        write().map_err(|e| SplitError::AggregatorWriteError {
            path: path.clone(),
            source: Box::new(e),
        })?;

        tracing::info!(
            "Aggregator '{}' written with {} imports",
            path.display(),
            imports.len()
        );

        Ok(AggregatorReport {
            path,
            imports: imports.len(),
            categories: category_runs(imports),
            bytes: content.len(),
        })
    }

    fn verify_outputs(&self) -> VerificationReport {
        let mut expected: Vec<PathBuf> = self
            .layout
            .sections()
            .into_iter()
            .map(|section| section.output_path)
            .collect();
        expected.push(self.layout.aggregator_path());

        let missing: Vec<PathBuf> = expected
            .iter()
            .filter(|path| !self.storage.exists(path))
            .cloned()
            .collect();

        for path in &missing {
            tracing::error!("Expected file not found: {}", path.display());
        }

        VerificationReport {
            expected: expected.len(),
            missing,
        }
    }
}
