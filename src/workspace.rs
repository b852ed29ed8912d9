//! Local working directories for one pipeline run.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;

pub const ARCHIVES_DIR: &str = "archives";
pub const EXTRACTED_DIR: &str = "extracted";
pub const INFO_DIR: &str = "info";

/// The directory layout a pipeline run works in: downloaded archives,
/// extracted csv files, and info files each get their own subdirectory
/// under one root.
#[derive(Debug)]
pub struct Workspace {
    pub root: PathBuf,
    pub archives: PathBuf,
    pub extracted: PathBuf,
    pub info: PathBuf,
}

impl Workspace {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();

        Workspace {
            archives: root.join(ARCHIVES_DIR),
            extracted: root.join(EXTRACTED_DIR),
            info: root.join(INFO_DIR),
            root,
        }
    }

    /// Empties the root and recreates the subdirectories.
    pub fn reset(&self) -> Result<()> {
        clean(&self.root)?;
        create(&self.root, &[ARCHIVES_DIR, EXTRACTED_DIR, INFO_DIR])
    }
}

/// Removes all files and then all now-empty subdirectories of `dir`,
/// leaving `dir` itself intact. A missing directory is reported and
/// left alone.
pub fn clean(dir: &Path) -> Result<()> {
    if !dir.exists() {
        println!(
            "Path {} doesn't exist. This folder has to be created manually.",
            dir.display()
        );
        return Ok(());
    }

    println!("Path exists - removing contents of {}", dir.display());
    remove_contents(dir)
}

fn remove_contents(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            remove_contents(&path)?;
            fs::remove_dir(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }

    Ok(())
}

/// Creates each named subdirectory directly under `root`. A missing root is
/// reported and nothing is created; an already-existing name propagates the
/// filesystem error.
pub fn create(root: &Path, names: &[&str]) -> Result<()> {
    if !root.exists() {
        println!("Root directory {} doesn't exist. Aborting.", root.display());
        return Ok(());
    }

    for name in names {
        println!("Creating {} directory", name);
        fs::create_dir(root.join(name))?;
    }

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn should_clean_nested_contents() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("file.csv"), "1,2").unwrap();
        fs::write(dir.path().join("top.txt"), "x").unwrap();

        clean(dir.path()).unwrap();

        assert!(dir.path().exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn should_ignore_missing_directory_on_clean() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        clean(&missing).unwrap();

        assert!(!missing.exists());
    }

    #[test]
    fn should_create_subdirectories() {
        let dir = TempDir::new().unwrap();

        create(dir.path(), &["zip", "csv"]).unwrap();

        assert!(dir.path().join("zip").is_dir());
        assert!(dir.path().join("csv").is_dir());
    }

    #[test]
    fn should_create_nothing_under_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        create(&missing, &["zip"]).unwrap();

        assert!(!missing.exists());
    }

    #[test]
    fn should_fail_on_existing_subdirectory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("zip")).unwrap();

        let result = create(dir.path(), &["zip"]);

        assert!(result.is_err());
    }

    #[test]
    fn should_reset_workspace() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stale.zip"), "x").unwrap();

        let workspace = Workspace::new(dir.path());
        workspace.reset().unwrap();

        assert!(workspace.archives.is_dir());
        assert!(workspace.extracted.is_dir());
        assert!(workspace.info.is_dir());
        assert!(!dir.path().join("stale.zip").exists());
    }
}
