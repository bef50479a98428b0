//! Reading command input from flags, files and the environment.

use std::{fs, path::PathBuf};

use crate::application::error::AppError;

/// Prefer the contents of `file` over the inline value.
pub fn read_value(
    val: Option<String>,
    file: Option<PathBuf>,
    name: &str,
) -> Result<String, AppError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| AppError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        Ok(data)
    } else if let Some(v) = val {
        Ok(v)
    } else {
        Err(AppError::invalid_input(format!("{name} is required")))
    }
}

/// Like [`read_value`], but a single trailing line break from the file is
/// dropped so `echo secret > file` works.
pub fn read_secret(
    env_value: Option<String>,
    file: Option<PathBuf>,
    name: &str,
) -> Result<String, AppError> {
    let from_file = file.is_some();
    let mut value = read_value(env_value, file, name)?;
    if from_file {
        if value.ends_with('\n') {
            value.pop();
        }
        if value.ends_with('\r') {
            value.pop();
        }
    }
    if value.is_empty() {
        return Err(AppError::invalid_input(format!("{name} must not be empty")));
    }
    Ok(value)
}
