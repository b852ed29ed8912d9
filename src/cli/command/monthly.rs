//! Monthly climate records (`miesieczne/klimat`).

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{run, DatasetFamily};

const MONTHLY_CLIMATE: DatasetFamily = DatasetFamily {
    slug: "monthly-climate",
    listing_url:
        "https://danepubliczne.imgw.pl/data/dane_pomiarowo_obserwacyjne/dane_meteorologiczne/miesieczne/klimat/",
    archive_suffix: "_m_k",
    info_file: "k_m_d format.txt",
    file_filter: r"k_m_d",
};

pub async fn monthly(workspace_root: &Path) -> Result<PathBuf> {
    run(&MONTHLY_CLIMATE, workspace_root).await
}

// -- Tests -------------------------------------------------------------------
