use super::error::MergeError;
use csv::{ReaderBuilder, WriterBuilder};
use log::error;
use std::collections::HashSet;

/// A fully materialized CSV file. Cells are kept as the original strings
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct CsvTable {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Read a CSV file with a header row
    /// Short rows are padded with empty cells, rows longer than the header are an error
    pub(crate) fn read_csv(path: &str) -> Result<CsvTable, MergeError> {
        let mut reader = match ReaderBuilder::new().flexible(true).from_path(path) {
            Ok(result) => result,
            Err(err) => {
                error!("[merge] Could not create reader for {path}: {err:?}");
                return Err(MergeError::ReadCsv);
            }
        };

        let headers = match reader.headers() {
            Ok(result) => result.clone(),
            Err(err) => {
                error!("[merge] Could not get headers for {path}: {err:?}");
                return Err(MergeError::ReadCsv);
            }
        };
        if headers.is_empty() {
            error!("[merge] No headers found in {path}");
            return Err(MergeError::NoHeaders);
        }

        let mut names: Vec<String> = headers.iter().map(str::to_string).collect();
        // Parser output is usually written with a UTF8 BOM
        if let Some(first) = names.first_mut() {
            if let Some(stripped) = first.strip_prefix('\u{feff}') {
                *first = stripped.to_string();
            }
        }
        let mut table = CsvTable {
            headers: unique_headers(&names),
            rows: Vec::new(),
        };

        for record_result in reader.records() {
            let record = match record_result {
                Ok(result) => result,
                Err(err) => {
                    error!("[merge] Could not read row in {path}: {err:?}");
                    return Err(MergeError::ReadCsv);
                }
            };

            if record.len() > table.headers.len() {
                error!(
                    "[merge] Row in {path} has {} fields, expected {}",
                    record.len(),
                    table.headers.len()
                );
                return Err(MergeError::TooManyFields);
            }

            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(table.headers.len(), String::new());
            table.rows.push(row);
        }

        Ok(table)
    }

    /// Write the table, headers first, to a CSV file. Overwrites any existing file
    pub(crate) fn write_csv(&self, path: &str) -> Result<(), MergeError> {
        let mut writer = match WriterBuilder::new().from_path(path) {
            Ok(result) => result,
            Err(err) => {
                error!("[merge] Could not create writer for {path}: {err:?}");
                return Err(MergeError::WriteCsv);
            }
        };

        if let Err(err) = writer.write_record(&self.headers) {
            error!("[merge] Could not write headers to {path}: {err:?}");
            return Err(MergeError::WriteCsv);
        }
        for row in &self.rows {
            if let Err(err) = writer.write_record(row) {
                error!("[merge] Could not write row to {path}: {err:?}");
                return Err(MergeError::WriteCsv);
            }
        }

        if let Err(err) = writer.flush() {
            error!("[merge] Could not flush {path}: {err:?}");
            return Err(MergeError::WriteCsv);
        }
        Ok(())
    }

    /// Index of the first column with this name
    pub(crate) fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Insert a column at `index`. `values` must hold one cell per row
    pub(crate) fn insert_column(&mut self, index: usize, name: &str, values: Vec<String>) {
        self.headers.insert(index, name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(index, value);
        }
    }

    #[cfg(test)]
    /// Cell lookup by column name. Absent columns read as `None`
    pub(crate) fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let index = self.column_index(name)?;
        self.rows
            .get(row)
            .and_then(|values| values.get(index))
            .map(String::as_str)
    }
}

/// Rename repeated column names to `Name.1`, `Name.2`, ... so every column keeps its own name
pub(crate) fn unique_headers(headers: &[String]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(headers.len());

    for header in headers {
        let mut name = header.clone();
        let mut suffix = 1;
        while used.contains(&name) {
            name = format!("{header}.{suffix}");
            suffix += 1;
        }
        used.insert(name.clone());
        unique.push(name);
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::{unique_headers, CsvTable};
    use std::{
        fs::{create_dir_all, read_to_string, write},
        path::PathBuf,
    };

    #[test]
    fn test_read_csv() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/csv/20240101_SYSTEM_AppCompatCache.csv");

        let table = CsvTable::read_csv(&test_location.display().to_string()).unwrap();
        assert_eq!(table.headers[0], "ControlSet");
        assert_eq!(table.column_index("LastModifiedTimeUTC"), Some(3));
        assert_eq!(table.rows.len(), 3);
        assert_eq!(
            table.cell(0, "Path"),
            Some("C:\\Windows\\system32\\cmd.exe")
        );
        assert_eq!(table.cell(0, "Missing"), None);
    }

    #[test]
    fn test_read_csv_bom_and_short_rows() {
        let dir = "./tmp/table_bom";
        create_dir_all(dir).unwrap();
        let path = format!("{dir}/bom.csv");
        write(&path, "\u{feff}Name,Value,Other\nfirst,1\nsecond,2,3\n").unwrap();

        let table = CsvTable::read_csv(&path).unwrap();
        assert_eq!(table.headers, vec!["Name", "Value", "Other"]);
        assert_eq!(table.rows[0], vec!["first", "1", ""]);
        assert_eq!(table.rows[1], vec!["second", "2", "3"]);
    }

    #[test]
    fn test_read_csv_repeated_headers() {
        let dir = "./tmp/table_repeated";
        create_dir_all(dir).unwrap();
        let path = format!("{dir}/repeated.csv");
        write(&path, "Name,KeyLastWriteTimestamp,Name\nfirst,2020-01-01,second\n").unwrap();

        let table = CsvTable::read_csv(&path).unwrap();
        assert_eq!(table.headers, vec!["Name", "KeyLastWriteTimestamp", "Name.1"]);
        assert_eq!(table.cell(0, "Name"), Some("first"));
        assert_eq!(table.cell(0, "Name.1"), Some("second"));
    }

    #[test]
    fn test_unique_headers() {
        let headers: Vec<String> = ["A", "A", "A.1", "B", "A"]
            .iter()
            .map(|value| value.to_string())
            .collect();
        assert_eq!(
            unique_headers(&headers),
            vec!["A", "A.1", "A.1.1", "B", "A.2"]
        );
    }

    #[test]
    #[should_panic(expected = "TooManyFields")]
    fn test_read_csv_too_many_fields() {
        let dir = "./tmp/table_malformed";
        create_dir_all(dir).unwrap();
        let path = format!("{dir}/bad.csv");
        write(&path, "Name,Value\nfirst,1,extra\n").unwrap();

        let _ = CsvTable::read_csv(&path).unwrap();
    }

    #[test]
    #[should_panic(expected = "NoHeaders")]
    fn test_read_csv_empty() {
        let dir = "./tmp/table_empty";
        create_dir_all(dir).unwrap();
        let path = format!("{dir}/empty.csv");
        write(&path, "").unwrap();

        let _ = CsvTable::read_csv(&path).unwrap();
    }

    #[test]
    #[should_panic(expected = "ReadCsv")]
    fn test_read_csv_missing_file() {
        let _ = CsvTable::read_csv("./tmp/table_missing/nothing.csv").unwrap();
    }

    #[test]
    fn test_write_csv_quotes() {
        let dir = "./tmp/table_write";
        create_dir_all(dir).unwrap();
        let path = format!("{dir}/out.csv");

        let mut table = CsvTable {
            headers: vec![String::from("Path"), String::from("Size")],
            rows: vec![vec![String::from("C:\\a, b.exe"), String::from("10")]],
        };
        table.insert_column(0, "Source File", vec![String::from("out.csv")]);
        table.write_csv(&path).unwrap();

        let text = read_to_string(&path).unwrap();
        assert_eq!(text, "Source File,Path,Size\nout.csv,\"C:\\a, b.exe\",10\n");

        let reread = CsvTable::read_csv(&path).unwrap();
        assert_eq!(reread, table);
    }
}
