//! Link index - every symlink target found under the destination tree.

use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, ensure_dir};
use crate::paths::resolve_link_target;

/// Deduplicated set of resolved symlink targets.
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    targets: HashSet<PathBuf>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `destination` and collect the resolved target of every symlink in it.
    ///
    /// Links are read, never followed, so dangling targets are indexed too. Entries that
    /// fail to list or read are skipped.
    pub fn build(destination: &Path) -> Result<Self> {
        ensure_dir(destination)?;

        let mut index = Self::new();
        for entry in WalkDir::new(destination).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry under {}: {}", destination.display(), e);
                    continue;
                }
            };
            if !entry.path_is_symlink() {
                continue;
            }
            match fs::read_link(entry.path()) {
                Ok(raw) => index.insert(resolve_link_target(entry.path(), &raw)),
                Err(e) => debug!("Skipping symlink {}: {}", entry.path().display(), e),
            }
        }

        info!("Indexed {} link targets under {}", index.len(), destination.display());
        Ok(index)
    }

    pub fn insert(&mut self, target: PathBuf) {
        self.targets.insert(target);
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.targets.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl FromIterator<PathBuf> for LinkIndex {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    #[test]
    fn test_build_indexes_absolute_target_verbatim() {
        let dst = TempDir::new().unwrap();
        symlink("/data/remote/showA/ep1.mkv", dst.path().join("showA.mkv")).unwrap();

        let index = LinkIndex::build(dst.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.contains(Path::new("/data/remote/showA/ep1.mkv")));
    }

    #[test]
    fn test_build_resolves_relative_target_against_link_dir() {
        let dst = TempDir::new().unwrap();
        let nested = dst.path().join("tv").join("Show");
        fs::create_dir_all(&nested).unwrap();
        symlink("../../remote/ep1.mkv", nested.join("ep1.mkv")).unwrap();

        let index = LinkIndex::build(dst.path()).unwrap();
        let expected = dst.path().join("remote").join("ep1.mkv");
        assert!(index.contains(&expected));
        assert!(index.iter().all(|t| t.is_absolute()));
    }

    #[test]
    fn test_build_deduplicates_targets() {
        let dst = TempDir::new().unwrap();
        symlink("/data/remote/a.mkv", dst.path().join("one")).unwrap();
        symlink("/data/remote/a.mkv", dst.path().join("two")).unwrap();

        let index = LinkIndex::build(dst.path()).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_build_ignores_regular_files() {
        let dst = TempDir::new().unwrap();
        fs::write(dst.path().join("poster.jpg"), "img").unwrap();

        let index = LinkIndex::build(dst.path()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_build_missing_root_fails() {
        let dst = TempDir::new().unwrap();
        let result = LinkIndex::build(&dst.path().join("nope"));
        assert!(result.is_err());
    }
}
