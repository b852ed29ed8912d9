//! Parses the portal's HTML directory listing.
//!
//! Each dataset family page carries one table whose links name either a
//! date directory (`1991/`, `1951_1955/`) holding that period's archives,
//! or a `.txt` info file describing the column layout.

use std::sync::LazyLock;

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};

/// Link text of a calendar-year or year-range data directory.
static DATE_DIR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}/$|^\d{4}_\d{4}/$").expect("date directory regex is valid")
});

/// Link text of a plain-text metadata file.
static INFO_FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.txt$").expect("info file regex is valid"));

#[derive(Debug, Clone, PartialEq)]
pub enum EntryRole {
    DateDirectory,
    InfoFile,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    pub role: EntryRole,
    pub name: String,
}

/// Classifies one link text. The date-directory pattern is tried first and
/// wins; the trailing slash is stripped from the stored name.
pub fn classify(text: &str) -> ListingEntry {
    let name = text.trim_end_matches('/').to_string();

    let role = if DATE_DIR_PATTERN.is_match(text) {
        EntryRole::DateDirectory
    } else if INFO_FILE_PATTERN.is_match(text) {
        EntryRole::InfoFile
    } else {
        EntryRole::Other
    };

    ListingEntry { role, name }
}

/// The link texts of the first `<table>` on a listing page, in document
/// order.
#[derive(Debug)]
pub struct ListingTable {
    link_texts: Vec<String>,
}

impl ListingTable {
    pub fn parse(html: &str) -> Result<Self> {
        let table_selector = Selector::parse("table").expect("table selector is valid");
        let link_selector = Selector::parse("a").expect("link selector is valid");

        let document = Html::parse_document(html);
        let table = document
            .select(&table_selector)
            .next()
            .ok_or_else(|| anyhow!("listing page contains no table"))?;

        let link_texts = table
            .select(&link_selector)
            .map(|link| link.text().collect::<String>())
            .collect();

        Ok(ListingTable { link_texts })
    }

    /// Date directory names in table order, duplicates kept.
    pub fn date_directories(&self) -> Vec<String> {
        self.names_with_role(EntryRole::DateDirectory)
    }

    /// Info file names in table order.
    pub fn info_file_names(&self) -> Vec<String> {
        self.names_with_role(EntryRole::InfoFile)
    }

    fn names_with_role(&self, role: EntryRole) -> Vec<String> {
        self.link_texts
            .iter()
            .map(|text| classify(text))
            .filter(|entry| entry.role == role)
            .map(|entry| entry.name)
            .collect()
    }
}

/// Fetches a listing page and parses its first table.
pub async fn fetch_table(client: &Client, url: &str) -> Result<ListingTable> {
    let html = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting listing {url}"))?
        .error_for_status()?
        .text()
        .await?;

    ListingTable::parse(&html)
}

// -- Tests -------------------------------------------------------------------
