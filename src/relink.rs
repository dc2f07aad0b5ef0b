//! Symlink rewriter - swap a mount prefix inside existing link targets.
//!
//! Targets are compared and rewritten as raw bytes, so link targets that are not valid
//! UTF-8 keep every byte outside the replaced prefix.

use colored::*;
use log::{info, warn};
use std::ffi::OsString;
use std::fs;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, ensure_dir};

/// One link whose target was (or would be) rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub link: PathBuf,
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Rewrite every symlink under `root` whose raw target starts with `old_prefix`.
///
/// The leading prefix is replaced by `new_prefix` and the link is recreated in place.
/// Links that cannot be read or recreated are reported and skipped.
pub fn rewrite_symlinks(root: &Path, old_prefix: &str, new_prefix: &str, dry_run: bool) -> Result<Vec<Rewrite>> {
    ensure_dir(root)?;

    let mut rewrites = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).into_iter().filter_map(|e| e.ok()) {
        if !entry.path_is_symlink() {
            continue;
        }
        let link = entry.path();
        let target = match fs::read_link(link) {
            Ok(target) => target,
            Err(e) => {
                println!("{} {}", "Error reading symlink:".red(), link.display());
                warn!("Failed to read symlink {}: {}", link.display(), e);
                continue;
            }
        };
        let Some(updated) = replace_prefix(&target, old_prefix, new_prefix) else {
            continue;
        };

        if dry_run {
            println!("Would update symlink: {} -> {}", target.display(), updated.display());
        } else {
            if let Err(e) = relink(link, &updated) {
                println!("{} {}", "Error updating symlink:".red(), link.display());
                warn!("Failed to recreate symlink {}: {}", link.display(), e);
                continue;
            }
            let shown = updated.display().to_string();
            println!("Updated symlink: {} -> {}", target.display(), shown.as_str().green());
        }

        rewrites.push(Rewrite {
            link: link.to_path_buf(),
            from: target,
            to: updated,
        });
    }

    info!("Rewrote {} symlinks under {} (dry_run: {})", rewrites.len(), root.display(), dry_run);
    Ok(rewrites)
}

/// Swap a leading `old_prefix` for `new_prefix`, byte for byte; None when it does not lead.
fn replace_prefix(target: &Path, old_prefix: &str, new_prefix: &str) -> Option<PathBuf> {
    let rest = target.as_os_str().as_bytes().strip_prefix(old_prefix.as_bytes())?;
    let mut bytes = Vec::with_capacity(new_prefix.len() + rest.len());
    bytes.extend_from_slice(new_prefix.as_bytes());
    bytes.extend_from_slice(rest);
    Some(PathBuf::from(OsString::from_vec(bytes)))
}

fn relink(link: &Path, target: &Path) -> std::io::Result<()> {
    fs::remove_file(link)?;
    symlink(target, link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use tempfile::TempDir;

    #[test]
    fn test_rewrites_matching_prefix() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("ep1.mkv");
        symlink("/mnt/old/show/ep1.mkv", &link).unwrap();

        let rewrites = rewrite_symlinks(dir.path(), "/mnt/old", "/data/remote", false).unwrap();

        assert_eq!(rewrites.len(), 1);
        assert_eq!(rewrites[0].from, PathBuf::from("/mnt/old/show/ep1.mkv"));
        assert_eq!(rewrites[0].to, PathBuf::from("/data/remote/show/ep1.mkv"));
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("/data/remote/show/ep1.mkv"));
    }

    #[test]
    fn test_dry_run_leaves_link_alone() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("ep1.mkv");
        symlink("/mnt/old/show/ep1.mkv", &link).unwrap();

        let rewrites = rewrite_symlinks(dir.path(), "/mnt/old", "/data/remote", true).unwrap();

        assert_eq!(rewrites.len(), 1);
        assert_eq!(fs::read_link(&link).unwrap(), PathBuf::from("/mnt/old/show/ep1.mkv"));
    }

    #[test]
    fn test_other_prefixes_untouched() {
        let dir = TempDir::new().unwrap();
        symlink("/elsewhere/mnt/old/x.mkv", dir.path().join("x.mkv")).unwrap();

        let rewrites = rewrite_symlinks(dir.path(), "/mnt/old", "/data/remote", false).unwrap();
        assert!(rewrites.is_empty());
    }

    #[test]
    fn test_only_leading_prefix_replaced() {
        let dir = TempDir::new().unwrap();
        symlink("/a/b/a/c.mkv", dir.path().join("c.mkv")).unwrap();

        let rewrites = rewrite_symlinks(dir.path(), "/a", "/z", true).unwrap();
        assert_eq!(rewrites[0].to, PathBuf::from("/z/b/a/c.mkv"));
    }

    #[test]
    fn test_non_utf8_target_keeps_its_bytes() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("ep1.mkv");
        let target = OsStr::from_bytes(b"/mnt/old/show\xff/ep1.mkv");
        symlink(target, &link).unwrap();

        let rewrites = rewrite_symlinks(dir.path(), "/mnt/old", "/data/remote", false).unwrap();

        assert_eq!(rewrites.len(), 1);
        let rewritten = fs::read_link(&link).unwrap();
        assert_eq!(rewritten.as_os_str().as_bytes(), b"/data/remote/show\xff/ep1.mkv");
        assert_eq!(rewrites[0].to, rewritten);
    }

    #[test]
    fn test_replace_prefix_requires_leading_match() {
        assert_eq!(
            replace_prefix(Path::new("/mnt/old/x"), "/mnt/old", "/new"),
            Some(PathBuf::from("/new/x"))
        );
        assert_eq!(replace_prefix(Path::new("/x/mnt/old"), "/mnt/old", "/new"), None);
    }
}
