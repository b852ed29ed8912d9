pub mod daily;
pub mod monthly;
pub mod precipitation;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use chrono::{Datelike, Local};
use regex::Regex;
use reqwest::Client;

pub use daily::daily;
pub use monthly::monthly;
pub use precipitation::precipitation;

use crate::{
    cli::create_spinner,
    download::{self, DownloadOutcome, DownloadResult, ARCHIVE_EXT},
    extract, headers, listing, merge,
    workspace::Workspace,
};

/// Remote layout and file naming of one IMGW dataset family.
pub struct DatasetFamily {
    pub slug: &'static str,
    /// Directory listing page; also the base for info file and archive URLs.
    pub listing_url: &'static str,
    /// Archive names are `<date directory><suffix>.zip`.
    pub archive_suffix: &'static str,
    /// The info file whose header block describes the merged columns.
    pub info_file: &'static str,
    /// Keeps the family's csv files; archives may pack other tables too.
    pub file_filter: &'static str,
}

/// Runs the whole pipeline for one family: reset the workspace, discover the
/// listing, download info files and archives, extract, derive headers, merge,
/// and save the dataset.
pub async fn run(family: &DatasetFamily, workspace_root: &Path) -> Result<PathBuf> {
    fs::create_dir_all(workspace_root)?;
    let workspace = Workspace::new(workspace_root);
    workspace.reset()?;

    let client = Client::new();

    let spinner = create_spinner(format!("Fetching {} listing...", family.slug));
    let table = listing::fetch_table(&client, family.listing_url).await?;
    let date_dirs = table.date_directories();
    let info_files = table.info_file_names();
    spinner.finish_with_message(format!(
        "Found {} date directories and {} info files",
        date_dirs.len(),
        info_files.len()
    ));

    let info_results =
        download::download_info_files(&client, family.listing_url, &info_files, &workspace.info)
            .await?;
    report_failures(&info_results);

    let archive_results = download::download_archives(
        &client,
        family.listing_url,
        &date_dirs,
        family.archive_suffix,
        ARCHIVE_EXT,
        &workspace.archives,
    )
    .await?;
    report_failures(&archive_results);

    let extracted = extract::unzip_all(&workspace.archives, &workspace.extracted)?;
    println!("Extracted {extracted} archives");

    let column_headers = headers::extract_headers(&workspace.info.join(family.info_file))?;
    let name_filter = Regex::new(family.file_filter)?;
    let dataset = merge::merge_csv_files(
        &workspace.extracted,
        Some(column_headers.as_slice()),
        Some(&name_filter),
    )?;
    println!(
        "Merged dataset: {} rows, {} columns",
        dataset.row_count(),
        dataset.column_count()
    );

    let output = make_output_file_name(family.slug);
    merge::write_csv(&dataset, &output)?;

    Ok(output)
}

fn report_failures(results: &[DownloadResult]) {
    let failed = results
        .iter()
        .filter(|result| !result.outcome.is_completed())
        .count();
    if failed == 0 {
        return;
    }

    eprintln!("{} of {} downloads failed:", failed, results.len());
    for result in results {
        match &result.outcome {
            DownloadOutcome::Completed => {}
            DownloadOutcome::BadStatus(status) => eprintln!("  {} ({status})", result.url),
            DownloadOutcome::WriteError(error) => {
                eprintln!("  {} ({error}, partial file at {})", result.url, result.path.display())
            }
        }
    }
}

pub fn make_output_file_name(slug: &str) -> PathBuf {
    let today = Local::now();
    let file_name = format!(
        "imgw-{}-{}-{:02}-{:02}.csv",
        slug,
        today.year(),
        today.month(),
        today.day()
    );

    dirs::home_dir().unwrap().join(file_name)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn should_make_output_file_name() {
        let path = make_output_file_name("monthly");
        let name = path.file_name().unwrap().to_string_lossy();

        assert!(name.starts_with("imgw-monthly-"));
        assert!(name.ends_with(".csv"));
    }
}
