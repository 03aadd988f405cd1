//! Marker lookup over the monolithic stylesheet.
//!
//! A section named `Base` is delimited by the literal comments
//! `/* START: Base */` and `/* END: Base */`. Matching is plain substring
//! search: no escaping and no nesting.

use crate::domain::model::{MarkerKind, MarkerReport, MissingMarker, SectionSpec};

pub fn start_marker(section: &str) -> String {
    MarkerKind::Start.render(section)
}

pub fn end_marker(section: &str) -> String {
    MarkerKind::End.render(section)
}

/// Checks that every section has both markers somewhere in `content`.
///
/// Collects every missing marker instead of stopping at the first one.
pub fn validate_markers(content: &str, sections: &[SectionSpec]) -> MarkerReport {
    let mut report = MarkerReport {
        checked: sections.len(),
        ..MarkerReport::default()
    };

    for section in sections {
        let start = start_marker(&section.name);
        let occurrences = content.matches(start.as_str()).count();

        if occurrences == 0 {
            tracing::debug!("Missing start marker: {}", start);
            report
                .missing
                .push(MissingMarker::new(&section.name, MarkerKind::Start));
        } else if occurrences > 1 {
            report.duplicated.push(section.name.clone());
        }

        if !content.contains(end_marker(&section.name).as_str()) {
            tracing::debug!("Missing end marker: {}", end_marker(&section.name));
            report
                .missing
                .push(MissingMarker::new(&section.name, MarkerKind::End));
        }
    }

    report
}

/// Returns the trimmed text between the first start marker of `section` and
/// the nearest end marker after it, or `None` when no such pair exists.
pub fn extract_region<'a>(content: &'a str, section: &str) -> Option<&'a str> {
    let start = start_marker(section);
    let end = end_marker(section);

    let body_start = content.find(start.as_str())? + start.len();
    let body_len = content[body_start..].find(end.as_str())?;

    Some(content[body_start..body_start + body_len].trim())
}
