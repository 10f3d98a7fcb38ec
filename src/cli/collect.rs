//! Input file discovery

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::DecoderRegistry;

/// Supported audio files under `path`, sorted.
///
/// A file path is kept if the registry supports its extension; a directory
/// is walked recursively. Unreadable directory entries are skipped.
pub fn collect_audio_files(path: &Path, registry: &DecoderRegistry) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        bail!("path does not exist: {}", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|p| registry.supports(p))
        .collect();

    files.sort();
    log::debug!("Collected {} audio files under {}", files.len(), path.display());
    Ok(files)
}
