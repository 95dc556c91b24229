use base64::{engine::general_purpose, Engine};
use clap::Parser;
use common::merge::{RunSummary, ToolChoice};
use log::info;
use shimamcache_core::core::{merge_directory, parse_toml_data, parse_toml_file, run_collection};
use std::io::{stdin, stdout};

mod prompt;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Full path to TOML run configuration
    #[clap(short, long, value_parser)]
    toml: Option<String>,

    /// Base64 encoded TOML run configuration
    #[clap(short, long, value_parser)]
    data: Option<String>,

    /// Merge CSV files already in this directory without running any parser
    #[clap(short, long, value_parser)]
    merge: Option<String>,

    /// Tool name used for the combined output filename when merging. appcomcache, amcache or both
    #[clap(long, default_value_t = String::from("both"))]
    choice: String,
}

fn main() {
    let args = Args::parse();
    println!("[shimamcache] Welcome!");

    if let Some(toml) = args.toml {
        report(parse_toml_file(&toml));
    } else if let Some(data) = args.data {
        let toml_data = match general_purpose::STANDARD.decode(&data) {
            Ok(results) => results,
            Err(err) => {
                println!("[shimamcache] Failed to base64 decode TOML config {data}, error: {err:?}");
                return;
            }
        };
        report(parse_toml_data(&toml_data));
    } else if let Some(directory) = args.merge {
        let choice = match ToolChoice::from_choice(&args.choice) {
            Some(result) => result,
            None => {
                println!("[shimamcache] Invalid choice {}", args.choice);
                return;
            }
        };
        report(merge_directory(&directory, choice));
    } else {
        let mut reader = stdin().lock();
        let mut writer = stdout();
        while let Some(config) = prompt::next_config(&mut reader, &mut writer) {
            report(run_collection(&config));
        }
    }
}

fn report<E: std::fmt::Debug>(result: Result<RunSummary, E>) {
    match result {
        Ok(summary) => info!(
            "[shimamcache] Run finished. Combined output: {:?}",
            summary.combined_output
        ),
        Err(err) => println!("{}", failure_message(&err)),
    }
}

fn failure_message<E: std::fmt::Debug>(err: &E) -> String {
    format!("[shimamcache] Run failed: {err:?}")
}

#[cfg(test)]
mod tests {
    use super::failure_message;
    use shimamcache_core::utils::error::CoreError;

    #[test]
    fn test_failure_message() {
        assert_eq!(
            failure_message(&CoreError::Merge),
            "[shimamcache] Run failed: Merge"
        );
    }
}
