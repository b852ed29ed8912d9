//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{command, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get monthly climate data
    Monthly {
        /// Working directory for downloaded and extracted files
        #[arg(long, default_value = "imgw-data")]
        workspace: PathBuf,
    },
    /// Get daily climate data
    Daily {
        /// Working directory for downloaded and extracted files
        #[arg(long, default_value = "imgw-data")]
        workspace: PathBuf,
    },
    /// Get daily precipitation data
    Precipitation {
        /// Working directory for downloaded and extracted files
        #[arg(long, default_value = "imgw-data")]
        workspace: PathBuf,
    },
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    )
}
