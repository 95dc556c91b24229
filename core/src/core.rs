use crate::{
    filesystem::files::read_file,
    pipeline::stages::{run_pipeline, Stage},
    structs::toml::{MergeToml, RunConfig},
    utils::{error::CoreError, logging::create_log_file},
};
use common::merge::{RunSummary, ToolChoice};
use log::{error, info, LevelFilter};
use simplelog::{Config, WriteLogger};
use std::fs::create_dir_all;

/// Parse a TOML file at provided path and run the parsers it selects
pub fn parse_toml_file(path: &str) -> Result<RunSummary, CoreError> {
    let buffer = match read_file(path) {
        Ok(results) => results,
        Err(err) => {
            error!("[core] Could not read TOML file {path}: {err:?}");
            return Err(CoreError::NoFile);
        }
    };

    parse_toml_data(&buffer)
}

/// Parse an already read TOML file and run the parsers it selects
pub fn parse_toml_data(data: &[u8]) -> Result<RunSummary, CoreError> {
    let merge_toml = MergeToml::parse_merge_toml(data)?;
    let config = RunConfig::from_toml(&merge_toml);
    run_collection(&config)
}

/// Run the selected parsers, then normalize and merge whatever CSV files they produced
pub fn run_collection(config: &RunConfig) -> Result<RunSummary, CoreError> {
    prepare_output(config)?;

    let summary = run_pipeline(config, Stage::Invoke)?;
    info!(
        "[core] {} run finished. {} CSV files, {} normalized",
        config.choice.as_str(),
        summary.csv_files.len(),
        summary.normalized
    );
    Ok(summary)
}

/// Normalize and merge CSV files already sitting in `directory` without running any parser
pub fn merge_directory(directory: &str, choice: ToolChoice) -> Result<RunSummary, CoreError> {
    let mut config = RunConfig::with_defaults(choice);
    config.output_directory = directory.to_string();
    config.open_directory = false;
    prepare_output(&config)?;

    run_pipeline(&config, Stage::Normalize)
}

/// Create the output directory and start logging into it if nothing is logging yet
fn prepare_output(config: &RunConfig) -> Result<(), CoreError> {
    if let Err(err) = create_dir_all(&config.output_directory) {
        error!(
            "[core] Could not create output directory {}: {err:?}",
            config.output_directory
        );
        return Err(CoreError::CreateDirectory);
    }

    if log::max_level() != LevelFilter::Off {
        return Ok(());
    }
    if let Ok((log_file, level)) = create_log_file(&config.output_directory, &config.logging) {
        let _ = WriteLogger::init(level, Config::default(), log_file);
    }
    Ok(())
}
