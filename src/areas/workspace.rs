//! Working directory operations
//!
//! The workspace is the flat file listing of the repository root, excluding
//! the `.gitlet` metadata directory. Subdirectories are neither tracked nor
//! walked into.

use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::path::Path;

/// Paths never considered part of the working tree
const IGNORED_PATHS: [&str; 3] = [".gitlet", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the plain files in the working root, sorted by name
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to list working directory {:?}", self.path))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                (!IGNORED_PATHS.contains(&name.as_str())).then_some(name)
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.path.join(file_name).is_file()
    }

    pub fn read_file(&self, file_name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_name);
        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read working file {:?}", file_path))?;

        Ok(content.into())
    }

    /// Read a working file into a blob
    pub fn parse_blob(&self, file_name: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_name)?))
    }

    /// Overwrite a working file with the given bytes, creating it if absent
    pub fn write_file(&self, file_name: &str, data: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(file_name);
        std::fs::write(&file_path, data)
            .with_context(|| format!("Unable to write working file {:?}", file_path))
    }

    /// Delete a working file if it exists
    pub fn remove_file(&self, file_name: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(file_name);
        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Unable to delete working file {:?}", file_path))?;
        }

        Ok(())
    }
}
