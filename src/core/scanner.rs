use crate::domain::model::Candidate;
use crate::utils::error::{IngestError, Result};
use std::path::Path;

/// Extension a file must carry to be uploaded.
pub const CANDIDATE_EXTENSION: &str = "xml";

/// True when `file_name` has exactly the `.xml` extension.
///
/// Dotfiles such as `.xml` have no extension and are rejected.
pub fn has_candidate_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == CANDIDATE_EXTENSION)
}

/// Lists `dir` (without recursion) and returns its `.xml` files sorted by name.
pub fn scan_directory(dir: &Path) -> Result<Vec<Candidate>> {
    let scan_error = |source: std::io::Error| IngestError::ScanError {
        path: dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        let path = entry.path();

        let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::debug!("Skipping non UTF-8 entry {}", path.display());
            continue;
        };

        if !has_candidate_extension(&file_name) {
            continue;
        }

        if !path.is_file() {
            tracing::debug!("Skipping {}: not a regular file", path.display());
            continue;
        }

        candidates.push(Candidate::new(file_name, path));
    }

    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    tracing::debug!(
        "Found {} candidate(s) in {}",
        candidates.len(),
        dir.display()
    );
    Ok(candidates)
}
