use crate::core::aggregator::DEFAULT_HEADER;
use crate::domain::model::SectionSpec;
use crate::domain::ports::LayoutProvider;
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Section Table of the stock layout: `(path under root, section name)`.
const DEFAULT_SECTIONS: &[(&str, &str)] = &[
    ("base/_variables.css", "Variables"),
    ("base/_base.css", "Base"),
    ("base/_typography.css", "Typography"),
    ("themes/_dark-mode.css", "DarkMode"),
    ("layout/_container.css", "Container"),
    ("layout/_layout.css", "Layout"),
    ("layout/_matrix.css", "Matrix"),
    ("components/_buttons.css", "Buttons"),
    ("components/_cards.css", "Card"),
    ("components/_forms.css", "Forms"),
    ("components/_modal.css", "Modal"),
    ("components/_sheet.css", "SheetMenu"),
    ("components/_task-card.css", "TaskCard"),
    ("components/_task-list.css", "TaskList"),
    ("components/_add-task-button.css", "AddTaskButton"),
    ("components/_task-input.css", "TaskInput"),
    ("components/_subtask-form.css", "SubtaskForm"),
    ("components/_archive-modal.css", "ArchiveModal"),
    ("components/_navigation.css", "MainNavigation"),
    ("components/_toast.css", "Toast"),
    ("components/_planned-task-card.css", "PlannedTaskCard"),
    ("components/_project-card.css", "ProjectCard"),
    ("components/_badges.css", "ProjectBadge"),
    ("utils/_animations.css", "Animations"),
    ("utils/_helpers.css", "Utils"),
    ("utils/_accessibility.css", "Accessibility"),
    ("utils/_loading.css", "LoadingState"),
    ("responsive/_tablet.css", "MediaTablet"),
    ("responsive/_desktop.css", "MediaDesktop"),
    ("responsive/_small-screen.css", "MediaSmallScreen"),
    ("responsive/_touch.css", "MediaTouch"),
    ("responsive/_reduced-motion.css", "MediaReducedMotion"),
];

/// Cascade order of the stock aggregator. Differs from the extraction order.
const DEFAULT_IMPORTS: &[&str] = &[
    "base/_variables.css",
    "base/_base.css",
    "base/_typography.css",
    "themes/_dark-mode.css",
    "layout/_container.css",
    "layout/_layout.css",
    "layout/_matrix.css",
    "components/_buttons.css",
    "components/_cards.css",
    "components/_forms.css",
    "components/_modal.css",
    "components/_sheet.css",
    "components/_toast.css",
    "components/_task-list.css",
    "components/_task-card.css",
    "components/_add-task-button.css",
    "components/_task-input.css",
    "components/_subtask-form.css",
    "components/_planned-task-card.css",
    "components/_project-card.css",
    "components/_archive-modal.css",
    "components/_navigation.css",
    "components/_badges.css",
    "utils/_animations.css",
    "utils/_helpers.css",
    "utils/_accessibility.css",
    "utils/_loading.css",
    "responsive/_tablet.css",
    "responsive/_desktop.css",
    "responsive/_small-screen.css",
    "responsive/_touch.css",
    "responsive/_reduced-motion.css",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Directory holding every generated file, relative to the working directory.
    pub root: String,
    /// Import Order Table, paths relative to `root`.
    pub imports: Vec<String>,
    pub aggregator: AggregatorConfig,
    pub sections: Vec<SectionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub name: String,
    pub path: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root: "css".to_string(),
            imports: DEFAULT_IMPORTS.iter().map(|p| p.to_string()).collect(),
            aggregator: AggregatorConfig {
                path: "main.css".to_string(),
                header: None,
            },
            sections: DEFAULT_SECTIONS
                .iter()
                .map(|(path, name)| SectionEntry {
                    name: name.to_string(),
                    path: path.to_string(),
                })
                .collect(),
        }
    }
}

impl LayoutConfig {
    /// Reads and parses a TOML layout file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SplitError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// Section entries that never appear in the import list.
    pub fn unimported_sections(&self) -> Vec<&SectionEntry> {
        let imported: HashSet<&str> = self.imports.iter().map(String::as_str).collect();
        self.sections
            .iter()
            .filter(|section| !imported.contains(section.path.as_str()))
            .collect()
    }

    /// Every file a complete run leaves behind: section outputs, then the aggregator.
    pub fn expected_outputs(&self) -> Vec<PathBuf> {
        let mut outputs: Vec<PathBuf> = self
            .sections()
            .into_iter()
            .map(|section| section.output_path)
            .collect();
        outputs.push(self.aggregator_path());
        outputs
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_relative_path("root", &self.root)?;
        validation::validate_file_name("aggregator.path", &self.aggregator.path)?;
        validation::validate_non_empty_list("sections", &self.sections)?;

        for section in &self.sections {
            validation::validate_non_empty_string("sections.name", &section.name)?;
            if section.name.contains("*/") || section.name.trim() != section.name {
                return Err(SplitError::InvalidConfigValueError {
                    field: "sections.name".to_string(),
                    value: section.name.clone(),
                    reason: "Section names cannot contain '*/' or surrounding whitespace"
                        .to_string(),
                });
            }
            validation::validate_relative_path("sections.path", &section.path)?;
        }

        validation::validate_unique(
            "sections.name",
            self.sections.iter().map(|s| s.name.as_str()),
        )?;
        validation::validate_unique(
            "sections.path",
            self.sections.iter().map(|s| s.path.as_str()),
        )?;

        if self
            .sections
            .iter()
            .any(|section| section.path == self.aggregator.path)
        {
            return Err(SplitError::InvalidConfigValueError {
                field: "aggregator.path".to_string(),
                value: self.aggregator.path.clone(),
                reason: "Aggregator would overwrite a section file".to_string(),
            });
        }

        let section_paths: HashSet<&str> =
            self.sections.iter().map(|s| s.path.as_str()).collect();
        for import_path in &self.imports {
            validation::validate_relative_path("imports", import_path)?;
            if !section_paths.contains(import_path.as_str()) {
                return Err(SplitError::InvalidConfigValueError {
                    field: "imports".to_string(),
                    value: import_path.clone(),
                    reason: "No section writes this path".to_string(),
                });
            }
        }
        validation::validate_unique("imports", self.imports.iter().map(String::as_str))?;

        Ok(())
    }
}

impl LayoutProvider for LayoutConfig {
    fn sections(&self) -> Vec<SectionSpec> {
        let root = Path::new(&self.root);
        self.sections
            .iter()
            .map(|entry| SectionSpec::new(entry.name.clone(), root.join(&entry.path)))
            .collect()
    }

    fn imports(&self) -> &[String] {
        &self.imports
    }

    fn aggregator_path(&self) -> PathBuf {
        Path::new(&self.root).join(&self.aggregator.path)
    }

    fn aggregator_header(&self) -> &str {
        self.aggregator.header.as_deref().unwrap_or(DEFAULT_HEADER)
    }
}

impl Validate for LayoutConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
