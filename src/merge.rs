//! Concatenates the extracted csv files into one dataset.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1250;
use regex::Regex;

use crate::cli::create_progress_bar;

/// A merged dataset: rows stacked from many same-width files, with optional
/// column labels. Values stay as text since the source files are untyped
/// delimited text.
#[derive(Debug)]
pub struct DataTable {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Stacks every matching `*.csv` under `dir` into one table, in sorted name
/// order. Files are read as headerless windows-1250 comma-separated text and
/// must all share one column count; `headers`, when given, must match that
/// count exactly. Zero matching files is an error, not an empty table.
pub fn merge_csv_files(
    dir: &Path,
    headers: Option<&[String]>,
    name_filter: Option<&Regex>,
) -> Result<DataTable> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if name.ends_with(".csv") && matches_at_start(&name, name_filter) {
            names.push(name);
        }
    }
    names.sort();

    if names.is_empty() {
        bail!("no csv files to merge in {}", dir.display());
    }

    let pb = create_progress_bar(names.len() as u64, "Merging csv files...".to_string());
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut width: Option<usize> = None;

    for name in &names {
        let path = dir.join(name);
        let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let (text, _, _) = WINDOWS_1250.decode(&bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(text.as_bytes());

        for record in reader.records() {
            let record = record.with_context(|| format!("parsing {}", path.display()))?;
            let row: Vec<String> = record.iter().map(str::to_string).collect();

            match width {
                None => width = Some(row.len()),
                Some(expected) if expected != row.len() => bail!(
                    "column count mismatch in {}: expected {}, found {}",
                    path.display(),
                    expected,
                    row.len()
                ),
                Some(_) => {}
            }

            rows.push(row);
        }
        pb.inc(1);
    }

    pb.finish_with_message("Files merged");

    let width = width.unwrap_or(0);
    if let Some(headers) = headers {
        if headers.len() != width {
            bail!(
                "{} headers supplied for {} columns",
                headers.len(),
                width
            );
        }
    }

    Ok(DataTable {
        headers: headers.map(<[String]>::to_vec),
        rows,
    })
}

/// Writes the dataset to a single csv file, header row first when labels
/// exist. Output is UTF-8; the legacy encoding is an input-side concern.
pub fn write_csv(table: &DataTable, path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;

    if let Some(headers) = &table.headers {
        writer.write_record(headers)?;
    }
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(())
}

fn matches_at_start(name: &str, filter: Option<&Regex>) -> bool {
    match filter {
        Some(pattern) => pattern.find(name).is_some_and(|m| m.start() == 0),
        None => true,
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    fn write_rows(dir: &Path, name: &str, rows: usize) {
        let mut content = String::new();
        for i in 0..rows {
            content.push_str(&format!("{i},{}\n", i * 10));
        }
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn should_stack_all_rows() {
        let dir = TempDir::new().unwrap();
        write_rows(dir.path(), "k_m_d_1991.csv", 10);
        write_rows(dir.path(), "k_m_d_1992.csv", 5);
        write_rows(dir.path(), "k_m_d_1993.csv", 7);

        let table = merge_csv_files(dir.path(), None, None).unwrap();

        assert_eq!(table.row_count(), 22);
        assert_eq!(table.column_count(), 2);
        assert!(table.headers.is_none());
    }

    #[test]
    fn should_apply_headers_without_altering_rows() {
        let dir = TempDir::new().unwrap();
        write_rows(dir.path(), "k_m_d_1991.csv", 3);
        let headers = vec!["a".to_string(), "b".to_string()];

        let table = merge_csv_files(dir.path(), Some(headers.as_slice()), None).unwrap();

        assert_eq!(table.headers, Some(headers));
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows[2], vec!["2", "20"]);
    }

    #[test]
    fn should_filter_names_at_the_start() {
        let dir = TempDir::new().unwrap();
        write_rows(dir.path(), "k_d_1991.csv", 2);
        write_rows(dir.path(), "k_d_t_1991.csv", 4);
        let filter = Regex::new(r"k_d_\d").unwrap();

        let table = merge_csv_files(dir.path(), None, Some(&filter)).unwrap();

        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn should_ignore_matches_past_the_start() {
        let dir = TempDir::new().unwrap();
        write_rows(dir.path(), "old_k_d_1991.csv", 2);
        let filter = Regex::new(r"k_d").unwrap();

        let result = merge_csv_files(dir.path(), None, Some(&filter));

        assert!(result.is_err());
    }

    #[test]
    fn should_fail_with_zero_matching_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let result = merge_csv_files(dir.path(), None, None);

        assert!(result.is_err());
    }

    #[test]
    fn should_fail_on_header_count_mismatch() {
        let dir = TempDir::new().unwrap();
        write_rows(dir.path(), "k_m_d_1991.csv", 2);
        let headers = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let result = merge_csv_files(dir.path(), Some(headers.as_slice()), None);

        assert!(result.is_err());
    }

    #[test]
    fn should_fail_on_differing_file_widths() {
        let dir = TempDir::new().unwrap();
        write_rows(dir.path(), "k_m_d_1991.csv", 2);
        fs::write(dir.path().join("k_m_d_1992.csv"), "1,2,3\n").unwrap();

        let result = merge_csv_files(dir.path(), None, None);

        assert!(result.is_err());
    }

    #[test]
    fn should_decode_legacy_encoded_values() {
        let dir = TempDir::new().unwrap();
        let (bytes, _, _) = WINDOWS_1250.encode("249180010,BIAŁYSTOK,-0.5\n");
        fs::write(dir.path().join("k_m_d_1991.csv"), bytes).unwrap();

        let table = merge_csv_files(dir.path(), None, None).unwrap();

        assert_eq!(table.rows[0][1], "BIAŁYSTOK");
    }

    #[test]
    fn should_write_headers_then_rows() {
        let dir = TempDir::new().unwrap();
        let table = DataTable {
            headers: Some(vec!["Kod stacji".to_string(), "Rok".to_string()]),
            rows: vec![vec!["249180010".to_string(), "1991".to_string()]],
        };
        let path = dir.path().join("merged.csv");

        write_csv(&table, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Kod stacji,Rok\n249180010,1991\n");
    }
}
