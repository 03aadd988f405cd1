/// Header written at the top of the aggregator when the layout does not set one.
pub const DEFAULT_HEADER: &str =
    "/* Main stylesheet - imports every CSS module in cascade order */";

/// First path segment of an import, e.g. `base` for `base/_variables.css`.
pub fn category_of(import_path: &str) -> &str {
    import_path.split('/').next().unwrap_or(import_path)
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Categories in import order, one entry per contiguous run.
pub fn category_runs(imports: &[String]) -> Vec<String> {
    let mut runs: Vec<String> = Vec::new();
    for import_path in imports {
        let category = category_of(import_path);
        if runs.last().map(String::as_str) != Some(category) {
            runs.push(category.to_string());
        }
    }
    runs
}

pub fn render_aggregator(header: &str, imports: &[String]) -> String {
    let mut output = format!("{}\n\n", header);
    let mut current_category: Option<&str> = None;

    for import_path in imports {
        let category = category_of(import_path);
        if current_category != Some(category) {
            if current_category.is_some() {
                output.push('\n');
            }
            output.push_str(&format!("/* --- {} --- */\n", capitalize(category)));
            current_category = Some(category);
        }
        output.push_str(&format!("@import url(\"{}\");\n", import_path));
    }

    output
}
