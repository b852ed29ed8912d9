//! Recovers column header names from an IMGW info file.
//!
//! An info file opens with a blank line, lists one column description per
//! line, and closes with a footer of licensing notes separated by a blank
//! line. The format is assumed, not negotiated: a file with no separator, or
//! with a description line neither pattern accepts, stops the run. Header
//! order must match the column order of the data files; there is no
//! skip-and-continue path.

use std::{fs, path::Path, sync::LazyLock};

use anyhow::{anyhow, Context, Result};
use encoding_rs::WINDOWS_1250;
use regex::Regex;

/// A description line bounded by an uppercase Latin/Polish letter at the
/// start and a letter, `%`, `°`, `|`, or `]` at the end. Trailing column
/// numbers and whitespace fall outside the match.
static UPPER_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-ZĄĆĘŁŃÓŚŹŻ].*[A-ZĄĆĘŁŃÓŚŹŻa-ząćęłńóśźż%°|\]]")
        .expect("upper header regex is valid")
});

/// Fallback for lines opening with punctuation or whitespace: any non-word
/// character or uppercase letter at the start, a Latin/Polish letter at the
/// end.
static LOOSE_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\WA-Z].*[A-ZĄĆĘŁŃÓŚŹŻa-ząćęłńóśźż]").expect("loose header regex is valid")
});

/// Reads a windows-1250 info file and returns the column headers in file
/// order, one per header-block line.
pub fn extract_headers(path: &Path) -> Result<Vec<String>> {
    let bytes =
        fs::read(path).with_context(|| format!("reading info file {}", path.display()))?;
    let (text, _, _) = WINDOWS_1250.decode(&bytes);

    let lines: Vec<&str> = text.lines().collect();
    // The first line of every info file is blank and carries no description.
    let lines = lines.get(1..).unwrap_or_default();

    let separator = lines
        .iter()
        .position(|line| line.trim().is_empty())
        .ok_or_else(|| {
            anyhow!(
                "info file {} has no blank line separating the footer",
                path.display()
            )
        })?;

    lines[..separator]
        .iter()
        .map(|line| {
            capture_header(line).map(str::to_string).ok_or_else(|| {
                anyhow!(
                    "unrecognised header line in {}: {:?}",
                    path.display(),
                    line
                )
            })
        })
        .collect()
}

/// The first matching pattern wins; its whole match is the header text.
fn capture_header(line: &str) -> Option<&str> {
    for pattern in [&*UPPER_LINE_PATTERN, &*LOOSE_LINE_PATTERN] {
        if let Some(found) = pattern.find(line) {
            return Some(found.as_str());
        }
    }

    None
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_info_file(dir: &Path, content: &str) -> PathBuf {
        let (bytes, _, _) = WINDOWS_1250.encode(content);
        let path = dir.join("format.txt");
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn should_extract_headers_in_order() {
        let dir = TempDir::new().unwrap();
        let path = write_info_file(dir.path(), "\nTEMP °C\nDATE\n\nlicense footer\n");

        let headers = extract_headers(&path).unwrap();

        assert_eq!(headers, vec!["TEMP °C", "DATE"]);
    }

    #[test]
    fn should_decode_polish_descriptions() {
        let dir = TempDir::new().unwrap();
        let content = "\nKod stacji\nNazwa stacji\nŚrednia temperatura [°C]\nSuma opadów [mm]\n\nDane IMGW-PIB\n";
        let path = write_info_file(dir.path(), content);

        let headers = extract_headers(&path).unwrap();

        assert_eq!(
            headers,
            vec![
                "Kod stacji",
                "Nazwa stacji",
                "Średnia temperatura [°C]",
                "Suma opadów [mm]"
            ]
        );
    }

    #[test]
    fn should_drop_trailing_column_numbers() {
        let dir = TempDir::new().unwrap();
        let path = write_info_file(dir.path(), "\nKod stacji  9\n\nfooter\n");

        let headers = extract_headers(&path).unwrap();

        assert_eq!(headers, vec!["Kod stacji"]);
    }

    #[test]
    fn should_capture_lines_opening_with_punctuation() {
        let line = "  Status pomiaru";

        assert_eq!(capture_header(line), Some("  Status pomiaru"));
    }

    #[test]
    fn should_reject_unrecognised_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_info_file(dir.path(), "\n1234\n\nfooter\n");

        let result = extract_headers(&path);

        assert!(result.is_err());
    }

    #[test]
    fn should_fail_without_a_footer_separator() {
        let dir = TempDir::new().unwrap();
        let path = write_info_file(dir.path(), "\nKod stacji\nNazwa stacji\n");

        let result = extract_headers(&path);

        assert!(result.is_err());
    }

    #[test]
    fn should_treat_whitespace_only_lines_as_separator() {
        let dir = TempDir::new().unwrap();
        let path = write_info_file(dir.path(), "\nKod stacji\n   \nfooter\n");

        let headers = extract_headers(&path).unwrap();

        assert_eq!(headers, vec!["Kod stacji"]);
    }
}
