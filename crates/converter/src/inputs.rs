//! Input file discovery.

use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files and directories named on the command line.
#[derive(Debug, Clone, Default)]
pub struct InputSelection {
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
    /// Descend into subdirectories of `dirs`.
    pub recursive: bool,
}

/// Resolve the selection into a sorted, deduplicated list of export files.
///
/// Explicit files are taken as given when they exist. Directories contribute
/// their `*.json` files. Missing paths are skipped with a warning.
pub fn discover_inputs(selection: &InputSelection) -> Vec<PathBuf> {
    let mut found = BTreeSet::new();

    for file in &selection.files {
        if file.is_file() {
            found.insert(file.clone());
        } else {
            warn!("Input file {} does not exist, skipping", file.display());
        }
    }

    for dir in &selection.dirs {
        if !dir.is_dir() {
            warn!("Input directory {} does not exist, skipping", dir.display());
            continue;
        }

        let max_depth = if selection.recursive { usize::MAX } else { 1 };
        for entry in WalkDir::new(dir)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if is_json(entry.path()) {
                found.insert(entry.into_path());
            }
        }
    }

    debug!("Discovered {} input file(s)", found.len());
    found.into_iter().collect()
}

fn is_json(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
