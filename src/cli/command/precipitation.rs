//! Daily precipitation records (`dobowe/opad`).

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{run, DatasetFamily};

const DAILY_PRECIPITATION: DatasetFamily = DatasetFamily {
    slug: "daily-precipitation",
    listing_url:
        "https://danepubliczne.imgw.pl/data/dane_pomiarowo_obserwacyjne/dane_meteorologiczne/dobowe/opad/",
    archive_suffix: "_o",
    info_file: "o_d format.txt",
    file_filter: r"o_d",
};

pub async fn precipitation(workspace_root: &Path) -> Result<PathBuf> {
    run(&DAILY_PRECIPITATION, workspace_root).await
}

// -- Tests -------------------------------------------------------------------
