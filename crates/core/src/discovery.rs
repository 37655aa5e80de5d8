//! Discovery of candidate base names in a working directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while scanning a directory.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The directory could not be listed.
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Lists base names of regular files in `dir` whose extension matches
/// `audio_ext`, ignoring case.
///
/// The scan is not recursive. Names are returned in directory listing order,
/// each once. An empty result is not an error.
pub async fn discover(dir: &Path, audio_ext: &str) -> Result<Vec<String>, DiscoveryError> {
    let read_dir_error = |source| DiscoveryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_dir_error)?;
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                warn!("Ignoring file with non UTF-8 name: {:?}", name);
                continue;
            }
        };

        let Some(base_name) = base_name(&file_name, audio_ext) else {
            continue;
        };

        // Follows symlinks, a linked audio file counts
        let is_file = tokio::fs::metadata(entry.path())
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);

        if !is_file {
            debug!("Ignoring non-file entry {}", file_name);
            continue;
        }

        if seen.insert(base_name.to_string()) {
            names.push(base_name.to_string());
        }
    }

    debug!("Discovered {} candidate(s) in {}", names.len(), dir.display());
    Ok(names)
}

/// Returns the file name without its extension if the extension matches.
fn base_name<'a>(file_name: &'a str, ext: &str) -> Option<&'a str> {
    let path = Path::new(file_name);
    let matches = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext));

    if !matches {
        return None;
    }

    path.file_stem().and_then(|s| s.to_str())
}
