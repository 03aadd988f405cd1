//! Console rendering of run reports. Nothing here touches the file system.

use crate::domain::model::{RunReport, SectionStatus};
use crate::utils::error::Result;

pub fn render_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    let source = report.source.path.display();

    out.push_str(&format!("Source '{}': {} lines, {} sections checked\n",
        source, report.source.lines, report.markers.checked));
    for section in &report.markers.duplicated {
        out.push_str(&format!("  [WARN] '{}' appears more than once, first block used\n", section));
    }

    for dir in &report.sections.created_dirs {
        out.push_str(&format!("  created {}\n", dir.display()));
    }
    for outcome in &report.sections.outcomes {
        let tag = match outcome.status {
            SectionStatus::Written { .. } => "[OK]",
            SectionStatus::Planned { .. } => "[PLAN]",
            _ => "[FAIL]",
        };
        out.push_str(&format!("  {} {} <- {}: {}\n",
            tag,
            outcome.path.display(),
            outcome.section,
            outcome.status));
    }

    out.push_str(&format!("Sections: {} ok, {} failed\n",
        report.sections.success_count(),
        report.sections.failure_count()));

    if report.dry_run {
        out.push_str("Dry run: nothing was written.\n");
        return out;
    }

    if let Some(aggregator) = &report.aggregator {
        out.push_str(&format!("Aggregator: {} ({} imports, categories: {})\n",
            aggregator.path.display(),
            aggregator.imports,
            aggregator.categories.join(", ")));

        if let Some(verification) = &report.verification {
            out.push_str(&format!("Verification: {}/{} files present\n",
                verification.expected - verification.missing.len(),
                verification.expected));
        }

        out.push('\n');
        out.push_str("Next steps:\n");
        out.push_str(&format!("  1. In index.html replace <link rel=\"stylesheet\" href=\"{}\">\n",
            source));
        out.push_str(&format!("     with <link rel=\"stylesheet\" href=\"{}\">\n",
            aggregator.path.display()));
        out.push_str("  2. Test the application in the browser.\n");
        out.push_str(&format!("  3. Once everything works, delete '{}'.\n", source));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        AggregatorReport, MarkerReport, SectionOutcome, SourceSummary, VerificationReport,
        WriteReport,
    };
    use chrono::Utc;
    use std::path::PathBuf;

    fn report(dry_run: bool) -> RunReport {
        let status = if dry_run {
            SectionStatus::Planned { lines: 3, bytes: 40 }
        } else {
            SectionStatus::Written { lines: 3, bytes: 40 }
        };
        RunReport {
            started_at: Utc::now(),
            dry_run,
            source: SourceSummary {
                path: PathBuf::from("style.css"),
                bytes: 120,
                lines: 9,
            },
            markers: MarkerReport {
                checked: 1,
                ..MarkerReport::default()
            },
            sections: WriteReport {
                dry_run,
                created_dirs: if dry_run {
                    Vec::new()
                } else {
                    vec![PathBuf::from("css/base")]
                },
                outcomes: vec![SectionOutcome {
                    section: "Base".to_string(),
                    path: PathBuf::from("css/base/_base.css"),
                    status,
                }],
            },
            aggregator: (!dry_run).then(|| AggregatorReport {
                path: PathBuf::from("css/main.css"),
                imports: 1,
                categories: vec!["base".to_string()],
                bytes: 80,
            }),
            verification: (!dry_run).then(|| VerificationReport {
                expected: 2,
                missing: Vec::new(),
            }),
        }
    }

    #[test]
    fn test_text_summary_with_next_steps() {
        let text = render_text(&report(false));

        assert!(text.contains("[OK] css/base/_base.css <- Base: written (3 lines)"));
        assert!(text.contains("created css/base"));
        assert!(text.contains("Sections: 1 ok, 0 failed"));
        assert!(text.contains("Verification: 2/2 files present"));
        assert!(text.contains("href=\"css/main.css\""));
        assert!(text.contains("delete 'style.css'"));
        assert!(text.ends_with("delete 'style.css'.\n"));
    }

    #[test]
    fn test_dry_run_summary() {
        let text = render_text(&report(true));

        assert!(text.contains("[PLAN]"));
        assert!(text.contains("Dry run: nothing was written."));
        assert!(!text.contains("Next steps"));
    }

    #[test]
    fn test_json_report() {
        let json = render_json(&report(false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["source"]["lines"], 9);
        assert_eq!(value["sections"]["outcomes"][0]["status"], "written");
        assert_eq!(value["sections"]["outcomes"][0]["lines"], 3);
        assert_eq!(value["aggregator"]["path"], "css/main.css");
    }
}
