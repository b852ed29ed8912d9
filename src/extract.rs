//! Expands downloaded archives into the extraction directory.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use zip::ZipArchive;

use crate::cli::create_progress_bar;

/// Extracts the full contents of every `*.zip` in `zip_dir` into
/// `extract_dir`. Other entries are silently skipped. A corrupt archive
/// aborts the whole pass. Returns the number of archives extracted.
pub fn unzip_all(zip_dir: &Path, extract_dir: &Path) -> Result<usize> {
    let mut paths: Vec<_> = zip_dir
        .read_dir()?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();

    let pb = create_progress_bar(paths.len() as u64, "Extracting archives...".to_string());
    let mut extracted = 0;

    for path in paths {
        if path.extension().is_some_and(|ext| ext == "zip") {
            let file = File::open(&path)?;
            let mut archive = ZipArchive::new(file)
                .with_context(|| format!("opening archive {}", path.display()))?;
            archive
                .extract(extract_dir)
                .with_context(|| format!("extracting {}", path.display()))?;
            extracted += 1;
        }
        pb.inc(1);
    }

    pb.finish_with_message("Archives extracted");

    Ok(extracted)
}

// -- Tests -------------------------------------------------------------------
