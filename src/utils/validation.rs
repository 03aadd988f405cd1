use crate::utils::error::{Result, SplitError};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A path that stays inside the directory it is joined to.
pub fn validate_relative_path(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    let invalid = |reason: &str| SplitError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: path.to_string(),
        reason: reason.to_string(),
    };

    if path.starts_with('/') || path.starts_with('\\') || Path::new(path).is_absolute() {
        return Err(invalid("Path must be relative"));
    }

    // one spelling per path, so string comparison of layout paths is exact
    if path != "." && path.split(['/', '\\']).any(|seg| seg.is_empty() || seg == ".") {
        return Err(invalid("Path must not contain '.' or empty segments"));
    }

    for component in Path::new(path).components() {
        match component {
            Component::ParentDir => return Err(invalid("Path must not contain '..'")),
            Component::Prefix(_) | Component::RootDir => {
                return Err(invalid("Path must be relative"))
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}

/// Drops `.` components so `./css/main.css` and `css/main.css` compare equal.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// A single file name with no directory part.
pub fn validate_file_name(field_name: &str, path: &str) -> Result<()> {
    validate_relative_path(field_name, path)?;

    if path.contains('/') || path.contains('\\') {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Must be a bare file name without directories".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SplitError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(SplitError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// Fails on the first value seen twice.
pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(SplitError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}
