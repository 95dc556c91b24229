use super::error::FileSystemError;
use glob::Pattern;
use log::{error, warn};
use std::{fs::read, path::Path};

/// Suffix of the merged timeline written by a previous run
pub(crate) const COMBINED_SUFFIX: &str = "_combined_output.csv";

/// Check if path is a file
pub(crate) fn is_file(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Check if path is a directory
pub(crate) fn is_directory(path: &str) -> bool {
    Path::new(path).is_dir()
}

/// Get the filename component of a path
pub(crate) fn get_filename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Read a whole file into memory
pub(crate) fn read_file(path: &str) -> Result<Vec<u8>, FileSystemError> {
    if !is_file(path) {
        return Err(FileSystemError::NotFile);
    }

    match read(path) {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[core] Failed to read file {path}: {err:?}");
            Err(FileSystemError::ReadFile)
        }
    }
}

/// List the filenames of all `.csv` files directly inside a directory, sorted by name
/// Combined timelines from earlier runs are skipped so they are never merged into themselves
pub(crate) fn list_csv_files(directory: &str) -> Result<Vec<String>, FileSystemError> {
    if !is_directory(directory) {
        return Err(FileSystemError::NotDirectory);
    }

    let glob_pattern = format!("{}/*.csv", Pattern::escape(directory));
    let paths = match glob::glob(&glob_pattern) {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Could not glob {glob_pattern}: {err:?}");
            return Err(FileSystemError::BadGlob);
        }
    };

    let mut files = Vec::new();
    for entry in paths {
        let path = match entry {
            Ok(result) => result,
            Err(err) => {
                warn!("[core] Could not read glob entry: {err:?}");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }

        let filename = get_filename(&path.display().to_string());
        if filename.ends_with(COMBINED_SUFFIX) {
            continue;
        }
        files.push(filename);
    }

    files.sort();
    Ok(files)
}
