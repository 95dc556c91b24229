use super::{
    error::MergeError,
    normalize::TIMESTAMP_UTC,
    table::{unique_headers, CsvTable},
};
use crate::utils::time::parse_timestamp;
use log::{info, warn};
use std::{cmp::Ordering, collections::HashMap};

/// Row-wise union of all tables. Columns keep the order they first appear in,
/// cells for columns a table does not have are left empty.
/// Repeated names within one table are renamed (`Name.1`) so no cell is dropped
pub(crate) fn combine_tables(tables: &[&CsvTable]) -> CsvTable {
    let mut combined = CsvTable::default();
    let mut positions: HashMap<String, usize> = HashMap::new();

    let table_headers: Vec<Vec<String>> = tables
        .iter()
        .map(|table| unique_headers(&table.headers))
        .collect();
    for headers in &table_headers {
        for header in headers {
            if positions.contains_key(header) {
                continue;
            }
            positions.insert(header.clone(), combined.headers.len());
            combined.headers.push(header.clone());
        }
    }

    for (table, headers) in tables.iter().zip(&table_headers) {
        let mapping: Vec<Option<usize>> = headers
            .iter()
            .map(|header| positions.get(header).copied())
            .collect();

        for row in &table.rows {
            let mut combined_row = vec![String::new(); combined.headers.len()];
            for (value, target) in row.iter().zip(&mapping) {
                if let Some(position) = target {
                    combined_row[*position] = value.clone();
                }
            }
            combined.rows.push(combined_row);
        }
    }

    combined
}

/// Sort newest first by `Timestamp UTC+0`. Rows without a usable timestamp go last
/// Returns false, leaving the table untouched, when there is no timestamp column
pub(crate) fn sort_by_timestamp(table: &mut CsvTable) -> bool {
    let index = match table.column_index(TIMESTAMP_UTC) {
        Some(result) => result,
        None => return false,
    };

    let mut keyed: Vec<_> = table
        .rows
        .drain(..)
        .map(|row| {
            let key = row.get(index).and_then(|value| parse_timestamp(value));
            (key, row)
        })
        .collect();

    keyed.sort_by(|(left, _), (right, _)| match (left, right) {
        (Some(left), Some(right)) => right.cmp(left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    table.rows = keyed.into_iter().map(|(_, row)| row).collect();
    true
}

/// Merge all tables and write the sorted timeline to `output_file`
/// Nothing is written if no table was normalized. Returns the number of rows written
pub(crate) fn combine_and_sort(
    tables: &[&CsvTable],
    output_file: &str,
) -> Result<Option<usize>, MergeError> {
    let mut combined = combine_tables(tables);
    if !sort_by_timestamp(&mut combined) {
        warn!("[merge] No CSV file matched a known parser output. Skipping combined output");
        return Ok(None);
    }

    combined.write_csv(output_file)?;
    info!(
        "[merge] Wrote {} rows to {output_file}",
        combined.rows.len()
    );
    Ok(Some(combined.rows.len()))
}
