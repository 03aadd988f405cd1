use crate::domain::model::{
    AggregatorReport, MarkerReport, SectionSpec, VerificationReport, WriteReport,
};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// File system seam. Paths are relative to whatever root the implementation owns.
pub trait Storage {
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Creates `path` and all missing ancestors. Returns `true` if anything was created.
    fn create_dir_all(&self, path: &Path) -> Result<bool>;

    /// Replaces the file at `path` with `data`.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

pub trait LayoutProvider {
    fn sections(&self) -> Vec<SectionSpec>;
    fn imports(&self) -> &[String];
    fn aggregator_path(&self) -> PathBuf;
    fn aggregator_header(&self) -> &str;
}

/// The stages of one split run, in the order the engine calls them.
pub trait Pipeline {
    fn source_path(&self) -> &Path;
    fn load_source(&self) -> Result<String>;
    fn check_markers(&self, content: &str) -> MarkerReport;
    /// Extracts every section and writes it unless `dry_run` is set.
    fn extract_sections(&self, content: &str, dry_run: bool) -> WriteReport;
    fn write_aggregator(&self) -> Result<AggregatorReport>;
    fn verify_outputs(&self) -> VerificationReport;
}
