//! Usage classifier - walks the source tree and decides which directories are in use.
//!
//! Only directories that directly contain at least one file get a verdict. A directory
//! holding nothing but subdirectories is never classified at its own level, even when
//! everything under it is orphaned; its children are judged individually.

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, ensure_dir};
use crate::index::LinkIndex;
use crate::matcher::{Candidate, LinkMatch, match_files};

/// A source directory that directly contains files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDirectory {
    pub path: PathBuf,
    /// Path relative to the source root, `.` for the root itself
    pub relative: PathBuf,
    /// Non-directory entries directly inside `path`
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    InUse(LinkMatch),
    Unused,
}

impl Verdict {
    pub fn in_use(&self) -> bool {
        matches!(self, Verdict::InUse(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub dir: SourceDirectory,
    pub verdict: Verdict,
}

/// Classify every non-empty directory under `source` against a complete `index`.
///
/// Directories come back parents first with siblings in name order.
pub fn classify(source: &Path, index: &LinkIndex) -> Result<Vec<Classified>> {
    ensure_dir(source)?;

    let mut classified = Vec::new();
    let walker = WalkDir::new(source)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry under {}: {}", source.display(), e);
                None
            }
        });

    for entry in walker {
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(dir) = read_source_directory(source, entry.path()) else {
            continue;
        };

        let verdict = {
            let candidates: Vec<Candidate<'_>> = dir
                .files
                .iter()
                .map(|path| Candidate {
                    path,
                    relative: path.strip_prefix(source).unwrap_or(path),
                })
                .collect();
            match match_files(&candidates, index) {
                Some(kind) => Verdict::InUse(kind),
                None => Verdict::Unused,
            }
        };
        debug!("{} -> {:?}", dir.relative.display(), verdict);
        classified.push(Classified { dir, verdict });
    }

    let unused = classified.iter().filter(|c| !c.verdict.in_use()).count();
    info!(
        "Classified {} directories under {} ({} unused)",
        classified.len(),
        source.display(),
        unused
    );
    Ok(classified)
}

/// List the files directly inside `path`. `None` when it has none or cannot be read.
fn read_source_directory(root: &Path, path: &Path) -> Option<SourceDirectory> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Skipping unreadable directory {}: {}", path.display(), e);
            return None;
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| is_file_entry(e))
        .map(|e| e.path())
        .collect();
    if files.is_empty() {
        return None;
    }
    files.sort();

    let relative = match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
        Ok(rel) => rel.to_path_buf(),
        Err(_) => path.to_path_buf(),
    };

    Some(SourceDirectory {
        path: path.to_path_buf(),
        relative,
        files,
    })
}

/// Anything that is not a directory counts as a file; symlinks to directories do not.
fn is_file_entry(entry: &fs::DirEntry) -> bool {
    match entry.file_type() {
        Ok(ft) if ft.is_dir() => false,
        Ok(ft) if ft.is_symlink() => !entry.path().is_dir(),
        Ok(_) => true,
        Err(_) => false,
    }
}
