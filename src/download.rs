//! Single-file and batch downloads from the data portal.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::cli::create_progress_bar;

/// Every IMGW dataset family publishes its archives as zip files.
pub const ARCHIVE_EXT: &str = ".zip";

#[derive(Debug)]
pub enum DownloadOutcome {
    Completed,
    /// The server answered with a non-success status; nothing was written.
    BadStatus(StatusCode),
    /// Reading or writing the body failed part way; a truncated file may
    /// remain at the destination.
    WriteError(String),
}

impl DownloadOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, DownloadOutcome::Completed)
    }
}

/// What happened to one requested file, inspectable by the caller instead of
/// only printed.
#[derive(Debug)]
pub struct DownloadResult {
    pub url: String,
    pub path: PathBuf,
    pub outcome: DownloadOutcome,
}

/// Streams `url` into `dest`. Non-success statuses and mid-stream IO
/// failures are reported in the outcome so batch callers keep going;
/// connection-level failures propagate.
pub async fn download_file(client: &Client, url: &Url, dest: &Path) -> Result<DownloadOutcome> {
    let response = client
        .get(url.as_str())
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?;

    if !response.status().is_success() {
        println!(
            "File does not exist ({}). Is URL {} proper? Unable to download the file.",
            response.status(),
            url
        );
        return Ok(DownloadOutcome::BadStatus(response.status()));
    }

    match write_body(response, dest).await {
        Ok(()) => Ok(DownloadOutcome::Completed),
        Err(e) => {
            println!("Unable to download the file: {e}");
            Ok(DownloadOutcome::WriteError(e.to_string()))
        }
    }
}

async fn write_body(response: reqwest::Response, dest: &Path) -> Result<()> {
    let mut file = File::create(dest)?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?)?;
    }

    Ok(())
}

/// Downloads each named info file from directly under `base_url`,
/// sequentially. One failed name never stops the rest.
pub async fn download_info_files(
    client: &Client,
    base_url: &str,
    names: &[String],
    dest_dir: &Path,
) -> Result<Vec<DownloadResult>> {
    let base = Url::parse(base_url)?;
    let mut results = Vec::with_capacity(names.len());

    for name in names {
        let url = base
            .join(name)
            .with_context(|| format!("joining {name} to {base_url}"))?;
        let path = dest_dir.join(name);
        let outcome = download_file(client, &url, &path).await?;

        results.push(DownloadResult {
            url: url.to_string(),
            path,
            outcome,
        });
    }

    Ok(results)
}

/// The archive file name convention: date directory + family suffix +
/// extension, e.g. `1991` + `_m_k` + `.zip`.
pub fn archive_file_name(date_dir: &str, name_pattern: &str, ext: &str) -> String {
    format!("{date_dir}{name_pattern}{ext}")
}

/// Downloads one archive per date directory, sequentially. The remote path
/// is `base_url` + `<date_dir>/<archive_file_name>`.
pub async fn download_archives(
    client: &Client,
    base_url: &str,
    date_dirs: &[String],
    name_pattern: &str,
    ext: &str,
    dest_dir: &Path,
) -> Result<Vec<DownloadResult>> {
    let base = Url::parse(base_url)?;
    let pb = create_progress_bar(date_dirs.len() as u64, "Downloading archives...".to_string());
    let mut results = Vec::with_capacity(date_dirs.len());

    for date_dir in date_dirs {
        let file_name = archive_file_name(date_dir, name_pattern, ext);
        let url = base
            .join(&format!("{date_dir}/{file_name}"))
            .with_context(|| format!("joining {date_dir}/{file_name} to {base_url}"))?;
        let path = dest_dir.join(&file_name);
        let outcome = download_file(client, &url, &path).await?;

        results.push(DownloadResult {
            url: url.to_string(),
            path,
            outcome,
        });
        pb.inc(1);
    }

    pb.finish_with_message("Archives downloaded");

    Ok(results)
}

// -- Tests -------------------------------------------------------------------
