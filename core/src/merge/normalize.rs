use super::{
    error::MergeError,
    families::{match_family, FamilyMatch, SchemaFamily},
    table::CsvTable,
};
use crate::utils::time::{format_timestamp, parse_timestamp};
use log::{error, info};
use std::path::Path;

pub(crate) const SOURCE_FILE: &str = "Source File";
pub(crate) const SOURCE_DIRECTORY: &str = "SourceDirectory";
pub(crate) const TIMESTAMP_UTC: &str = "Timestamp UTC+0";

#[derive(Debug)]
pub(crate) struct NormalizedTable {
    pub(crate) filename: String,
    pub(crate) family: FamilyMatch,
    pub(crate) table: CsvTable,
}

/// Read every CSV file, add provenance columns to the ones we recognize and write those back in place
/// Tables are returned in the order they were processed. Any unreadable file aborts the whole batch
pub(crate) fn normalize_files(
    csv_files: &[String],
    directory: &str,
) -> Result<Vec<NormalizedTable>, MergeError> {
    let mut tables = Vec::new();
    for filename in csv_files {
        let path = source_path(directory, filename);
        match normalize_file(filename, &path) {
            Ok(result) => tables.push(result),
            Err(err) => {
                println!("ERROR: Could not process {path}: {err}");
                return Err(err);
            }
        }
    }

    Ok(tables)
}

fn normalize_file(filename: &str, path: &str) -> Result<NormalizedTable, MergeError> {
    let table = CsvTable::read_csv(path)?;

    let normalized = normalize_table(table, filename, path)?;
    if let FamilyMatch::Family(_) = normalized.family {
        write_back(&normalized.table, path)?;
    }
    Ok(normalized)
}

/// Transform a table already in memory. Nothing is written to disk
pub(crate) fn normalize_table(
    mut table: CsvTable,
    filename: &str,
    path: &str,
) -> Result<NormalizedTable, MergeError> {
    let family = match_family(filename);
    if let FamilyMatch::Family(schema) = &family {
        let timestamps = timestamp_column(&table, schema, filename)?;
        let rows = table.rows.len();

        table.insert_column(0, SOURCE_FILE, vec![filename.to_string(); rows]);
        table.insert_column(1, SOURCE_DIRECTORY, vec![path.to_string(); rows]);
        table.insert_column(2, TIMESTAMP_UTC, timestamps);
        info!(
            "[merge] Normalized {filename} using {} ({})",
            schema.identifier, schema.timestamp_column
        );
    }

    Ok(NormalizedTable {
        filename: filename.to_string(),
        family,
        table,
    })
}

/// Overwrite the parser output with the normalized table. The file is rewritten as plain UTF8 without a BOM
pub(crate) fn write_back(table: &CsvTable, path: &str) -> Result<(), MergeError> {
    table.write_csv(path)
}

/// Parse the family timestamp column into UTC. Unparseable cells become empty
fn timestamp_column(
    table: &CsvTable,
    schema: &SchemaFamily,
    filename: &str,
) -> Result<Vec<String>, MergeError> {
    let index = match table.column_index(schema.timestamp_column) {
        Some(result) => result,
        None => {
            error!(
                "[merge] {filename} matched {} but has no {} column",
                schema.identifier, schema.timestamp_column
            );
            return Err(MergeError::MissingColumn);
        }
    };

    let values = table
        .rows
        .iter()
        .map(|row| {
            row.get(index)
                .and_then(|value| parse_timestamp(value))
                .map(|timestamp| format_timestamp(&timestamp))
                .unwrap_or_default()
        })
        .collect();
    Ok(values)
}

fn source_path(directory: &str, filename: &str) -> String {
    Path::new(directory).join(filename).display().to_string()
}
