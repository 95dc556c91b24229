use super::report::report_output;
use crate::{
    filesystem::files::list_csv_files,
    merge::{
        aggregate::combine_and_sort,
        families::FamilyMatch,
        normalize::{normalize_files, NormalizedTable},
    },
    parsers::command::{run_parser, ParserInvocation, ParserKind},
    structs::toml::RunConfig,
    utils::error::CoreError,
};
use common::merge::RunSummary;
use log::{error, info, warn};
use std::path::Path;

/**
 * The non-interactive half of a run. Tool selection and path configuration happen before
 * this point and arrive as a `RunConfig`
 *
 * Invoke -> Normalize -> Aggregate -> Report -> Done
 * Invoke and Normalize skip straight to Report when there is nothing to merge
 */
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Stage {
    Invoke,
    Normalize,
    Aggregate,
    Report,
    Done,
}

struct RunState<'a> {
    config: &'a RunConfig,
    summary: RunSummary,
    tables: Vec<NormalizedTable>,
}

/// Drive a run from `start` until it is done
pub(crate) fn run_pipeline(config: &RunConfig, start: Stage) -> Result<RunSummary, CoreError> {
    let mut state = RunState {
        config,
        summary: RunSummary {
            output_directory: config.output_directory.clone(),
            ..Default::default()
        },
        tables: Vec::new(),
    };

    let mut stage = start;
    while stage != Stage::Done {
        info!("[core] Entering stage {stage:?}");
        stage = match stage {
            Stage::Invoke => invoke(&mut state),
            Stage::Normalize => normalize(&mut state)?,
            Stage::Aggregate => aggregate(&mut state)?,
            Stage::Report => {
                report_output(&config.output_directory, config.open_directory);
                Stage::Done
            }
            Stage::Done => Stage::Done,
        };
    }

    Ok(state.summary)
}

/// Run each selected parser in turn. Nothing here is fatal
fn invoke(state: &mut RunState) -> Stage {
    let config = state.config;

    if config.choice.runs_appcompatcache() {
        let invocation = ParserInvocation {
            kind: ParserKind::AppCompatCache,
            executable: config.appcompatcache_parser.clone(),
            database: None,
            output_directory: config.output_directory.clone(),
        };
        record(state, &invocation, run_parser(&invocation));
    }

    if config.choice.runs_amcache() {
        let invocation = ParserInvocation {
            kind: ParserKind::Amcache,
            executable: config.amcache_parser.clone(),
            database: Some(config.amcache_database.clone()),
            output_directory: config.output_directory.clone(),
        };

        record(state, &invocation, run_parser(&invocation));
    }

    if state.summary.parsers_succeeded.is_empty() {
        println!("No CSV files generated.");
        return Stage::Report;
    }
    Stage::Normalize
}

fn record(state: &mut RunState, invocation: &ParserInvocation, success: bool) {
    let name = invocation.kind.name().to_string();
    if success {
        state.summary.parsers_succeeded.push(name);
    } else {
        state.summary.parsers_failed.push(name);
    }
}

/// Discover the parser output and normalize it in place
fn normalize(state: &mut RunState) -> Result<Stage, CoreError> {
    let directory = &state.config.output_directory;
    let csv_files = match list_csv_files(directory) {
        Ok(result) => result,
        Err(err) => {
            warn!("[core] Could not list CSV files in {directory}: {err:?}");
            Vec::new()
        }
    };

    if csv_files.is_empty() {
        println!("No CSV files generated.");
        return Ok(Stage::Report);
    }

    println!("CSV files generated:");
    for csv_file in &csv_files {
        println!("- {csv_file}");
    }

    let tables = match normalize_files(&csv_files, directory) {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Failed to normalize CSV files in {directory}: {err:?}");
            return Err(CoreError::Merge);
        }
    };

    for entry in &tables {
        if let FamilyMatch::Family(schema) = &entry.family {
            state.summary.normalized += 1;
            info!("[core] {} is {} output", entry.filename, schema.identifier);
        } else {
            info!("[core] {} is not parser output, merging as is", entry.filename);
        }
    }
    state.summary.csv_files = csv_files;
    state.tables = tables;
    Ok(Stage::Aggregate)
}

/// Write the combined timeline
fn aggregate(state: &mut RunState) -> Result<Stage, CoreError> {
    let output_file = Path::new(&state.config.output_directory)
        .join(state.config.choice.combined_filename())
        .display()
        .to_string();

    let tables: Vec<_> = state.tables.iter().map(|entry| &entry.table).collect();
    let rows = match combine_and_sort(&tables, &output_file) {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Failed to write combined output {output_file}: {err:?}");
            println!("ERROR: Could not write {output_file}: {err}");
            return Err(CoreError::Merge);
        }
    };

    if let Some(count) = rows {
        println!("Combined and sorted CSV saved to {output_file}");
        state.summary.combined_output = Some(output_file);
        state.summary.combined_rows = count;
    }
    Ok(Stage::Report)
}
