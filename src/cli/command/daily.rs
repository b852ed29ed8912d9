//! Daily climate records (`dobowe/klimat`).
//!
//! The daily archives pack both the per-day station files (`k_d_*`) and the
//! observation-time files (`k_d_t_*`); the filter keeps only the former,
//! matching the `k_d format.txt` column layout.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{run, DatasetFamily};

const DAILY_CLIMATE: DatasetFamily = DatasetFamily {
    slug: "daily-climate",
    listing_url:
        "https://danepubliczne.imgw.pl/data/dane_pomiarowo_obserwacyjne/dane_meteorologiczne/dobowe/klimat/",
    archive_suffix: "_k",
    info_file: "k_d format.txt",
    file_filter: r"k_d_\d",
};

pub async fn daily(workspace_root: &Path) -> Result<PathBuf> {
    run(&DAILY_CLIMATE, workspace_root).await
}

// -- Tests -------------------------------------------------------------------
