use crate::core::{Pipeline, RunReport};
use crate::domain::model::SourceSummary;
use crate::utils::error::{Result, SplitError};
use chrono::Utc;

/// Drives a [`Pipeline`] through its stages and stops at the first fatal one.
pub struct SplitEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> SplitEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            dry_run: false,
        }
    }

    /// Validate and extract in memory only: no directory, section or aggregator is written.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run(&self) -> Result<RunReport> {
        let started_at = Utc::now();
        let source_path = self.pipeline.source_path().to_path_buf();
        tracing::info!("Starting split of '{}'", source_path.display());

        // Step 1: load
        let content = self.pipeline.load_source()?;
        tracing::info!("Step 1: read '{}'", source_path.display());
        let source = SourceSummary {
            path: source_path,
            bytes: content.len(),
            lines: content.lines().count(),
        };

        // Step 2: marker gate, nothing has touched the output tree yet
        let markers = self.pipeline.check_markers(&content);
        if !markers.is_ok() {
            return Err(SplitError::MissingMarkers { report: markers });
        }
        tracing::info!("Step 2: all {} marker pairs found", markers.checked);

        // Step 3: extract and write
        let sections = self.pipeline.extract_sections(&content, self.dry_run);
        tracing::info!(
            "Step 3: {} section(s) ok, {} failed",
            sections.success_count(),
            sections.failure_count()
        );
        if sections.has_failures() {
            return Err(SplitError::SectionFailures { report: sections });
        }

        if self.dry_run {
            tracing::info!("Dry run: skipping aggregator and verification");
            return Ok(RunReport {
                started_at,
                dry_run: true,
                source,
                markers,
                sections,
                aggregator: None,
                verification: None,
            });
        }

        // Step 4: aggregator
        let aggregator = self.pipeline.write_aggregator()?;
        tracing::info!("Step 4: '{}' generated", aggregator.path.display());

        // Step 5: verification
        let verification = self.pipeline.verify_outputs();
        if !verification.is_ok() {
            return Err(SplitError::VerificationFailed {
                report: verification,
            });
        }
        tracing::info!("Step 5: all {} expected files present", verification.expected);

        Ok(RunReport {
            started_at,
            dry_run: false,
            source,
            markers,
            sections,
            aggregator: Some(aggregator),
            verification: Some(verification),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        AggregatorReport, MarkerKind, MarkerReport, MissingMarker, SectionOutcome,
        SectionStatus, VerificationReport, WriteReport,
    };
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    #[derive(Default)]
    struct MockPipeline {
        source: Option<String>,
        missing_marker: bool,
        failing_section: bool,
        missing_output: bool,
        calls: RefCell<Vec<&'static str>>,
    }

    impl MockPipeline {
        fn with_source(source: &str) -> Self {
            Self {
                source: Some(source.to_string()),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.borrow().clone()
        }
    }

    impl Pipeline for MockPipeline {
        fn source_path(&self) -> &Path {
            Path::new("style.css")
        }

        fn load_source(&self) -> Result<String> {
            self.calls.borrow_mut().push("load");
            self.source.clone().ok_or_else(|| SplitError::SourceNotFound {
                path: PathBuf::from("style.css"),
            })
        }

        fn check_markers(&self, _content: &str) -> MarkerReport {
            self.calls.borrow_mut().push("markers");
            let mut report = MarkerReport {
                checked: 1,
                ..MarkerReport::default()
            };
            if self.missing_marker {
                report
                    .missing
                    .push(MissingMarker::new("Base", MarkerKind::End));
            }
            report
        }

        fn extract_sections(&self, _content: &str, dry_run: bool) -> WriteReport {
            self.calls.borrow_mut().push("extract");
            let status = if self.failing_section {
                SectionStatus::WriteFailed {
                    message: "permission denied".to_string(),
                }
            } else if dry_run {
                SectionStatus::Planned { lines: 1, bytes: 4 }
            } else {
                SectionStatus::Written { lines: 1, bytes: 4 }
            };
            WriteReport {
                dry_run,
                created_dirs: Vec::new(),
                outcomes: vec![SectionOutcome {
                    section: "Base".to_string(),
                    path: PathBuf::from("css/base/_base.css"),
                    status,
                }],
            }
        }

        fn write_aggregator(&self) -> Result<AggregatorReport> {
            self.calls.borrow_mut().push("aggregator");
            Ok(AggregatorReport {
                path: PathBuf::from("css/main.css"),
                imports: 1,
                categories: vec!["base".to_string()],
                bytes: 64,
            })
        }

        fn verify_outputs(&self) -> VerificationReport {
            self.calls.borrow_mut().push("verify");
            VerificationReport {
                expected: 2,
                missing: if self.missing_output {
                    vec![PathBuf::from("css/main.css")]
                } else {
                    Vec::new()
                },
            }
        }
    }

    #[test]
    fn test_full_run_calls_every_stage_in_order() {
        let engine = SplitEngine::new(MockPipeline::with_source("body{}\n"));

        let report = engine.run().unwrap();

        assert_eq!(
            engine.pipeline().calls(),
            vec!["load", "markers", "extract", "aggregator", "verify"]
        );
        assert!(!report.dry_run);
        assert_eq!(report.source.lines, 1);
        assert!(report.aggregator.is_some());
        assert!(report.verification.unwrap().is_ok());
    }

    #[test]
    fn test_missing_source_stops_immediately() {
        let engine = SplitEngine::new(MockPipeline::default());

        let err = engine.run().unwrap_err();

        assert!(matches!(err, SplitError::SourceNotFound { .. }));
        assert_eq!(engine.pipeline().calls(), vec!["load"]);
    }

    #[test]
    fn test_missing_marker_stops_before_extraction() {
        let pipeline = MockPipeline {
            missing_marker: true,
            ..MockPipeline::with_source("x")
        };
        let engine = SplitEngine::new(pipeline);

        let err = engine.run().unwrap_err();

        assert!(matches!(err, SplitError::MissingMarkers { .. }));
        assert_eq!(engine.pipeline().calls(), vec!["load", "markers"]);
    }

    #[test]
    fn test_section_failure_skips_aggregator() {
        let pipeline = MockPipeline {
            failing_section: true,
            ..MockPipeline::with_source("x")
        };
        let engine = SplitEngine::new(pipeline);

        match engine.run() {
            Err(SplitError::SectionFailures { report }) => assert_eq!(report.failure_count(), 1),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
        assert_eq!(engine.pipeline().calls(), vec!["load", "markers", "extract"]);
    }

    #[test]
    fn test_missing_output_fails_the_run() {
        let pipeline = MockPipeline {
            missing_output: true,
            ..MockPipeline::with_source("x")
        };
        let engine = SplitEngine::new(pipeline);

        let err = engine.run().unwrap_err();

        assert!(matches!(err, SplitError::VerificationFailed { .. }));
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_dry_run_stops_after_extraction() {
        let engine = SplitEngine::new(MockPipeline::with_source("x")).with_dry_run(true);

        let report = engine.run().unwrap();

        assert!(report.dry_run);
        assert!(report.aggregator.is_none());
        assert!(report.verification.is_none());
        assert_eq!(engine.pipeline().calls(), vec!["load", "markers", "extract"]);
    }
}
