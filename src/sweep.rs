//! Broken symlink sweep - find (and optionally remove) links whose target is gone.

use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, ensure_dir};
use crate::paths::resolve_link_target;

/// Every symlink under `root` whose resolved target does not exist.
///
/// Unless `dry_run`, each one is unlinked as it is found. A link that cannot be removed
/// is left out of the result.
pub fn find_broken_symlinks(root: &Path, dry_run: bool) -> Result<Vec<PathBuf>> {
    ensure_dir(root)?;

    let mut broken = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).into_iter().filter_map(|e| e.ok()) {
        if !entry.path_is_symlink() {
            continue;
        }
        let link = entry.path();
        let raw = match fs::read_link(link) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("Skipping symlink {}: {}", link.display(), e);
                continue;
            }
        };
        if resolve_link_target(link, &raw).exists() {
            continue;
        }

        if !dry_run {
            if let Err(e) = fs::remove_file(link) {
                warn!("Failed to remove broken symlink {}: {}", link.display(), e);
                continue;
            }
        }
        broken.push(link.to_path_buf());
    }

    info!("Found {} broken symlinks under {}", broken.len(), root.display());
    Ok(broken)
}
