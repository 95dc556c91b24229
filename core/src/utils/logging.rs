use super::error::CoreError;
use log::{error, LevelFilter};
use std::fs::{create_dir_all, File};
use uuid::Uuid;

/// Create a log file in the output directory and pick the log level from the configuration
pub(crate) fn create_log_file(
    directory: &str,
    logging: &Option<String>,
) -> Result<(File, LevelFilter), CoreError> {
    if let Err(err) = create_dir_all(directory) {
        error!("[core] Failed to create logging output directory for {directory}. Error: {err:?}");
        return Err(CoreError::CreateDirectory);
    }

    let output_result = File::create(format!("{directory}/{}.log", Uuid::new_v4()));
    let log_file = match output_result {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Failed to create log file at {directory}. Error: {err:?}");
            return Err(CoreError::LogFile);
        }
    };

    Ok((log_file, log_level(logging)))
}

fn log_level(logging: &Option<String>) -> LevelFilter {
    let level = match logging {
        Some(result) => result.to_lowercase(),
        None => return LevelFilter::Warn,
    };

    match level.as_str() {
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        _ => LevelFilter::Warn,
    }
}
