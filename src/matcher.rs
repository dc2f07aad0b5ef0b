//! Matching source files against the link index.
//!
//! Exact matching is a set lookup. The suffix heuristic is approximate: it exists for
//! setups where the scanner sees the source tree under one mount prefix
//! (`/mnt/src/...`) and the links were written under another (`/data/remote/...`).
//! Two unrelated files that share the same relative path will match each other. That
//! false positive keeps a directory alive; it never causes a deletion.

use std::path::Path;

use crate::index::LinkIndex;
use crate::paths::named_components;

/// How a directory was found to be in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMatch {
    /// A file path is literally present in the index
    Exact,
    /// A file path and a link target share a path suffix
    Suffix,
}

/// A file as seen by the matcher: its full path and its path relative to the source root.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub path: &'a Path,
    pub relative: &'a Path,
}

/// Suffix heuristic between one source file and one link target.
///
/// Matches when `file` ends with `target`, `target` ends with `file`, or `target` ends
/// with the file's source-relative path. Comparison is by path component with roots
/// ignored, so `showB/ep1.mkv` never matches `xshowB/ep1.mkv`.
pub fn is_suffix_match(file: &Path, relative: &Path, target: &Path) -> bool {
    let file = named_components(file);
    let relative = named_components(relative);
    let target = named_components(target);

    if target.is_empty() {
        return false;
    }
    (!file.is_empty() && (file.ends_with(&target) || target.ends_with(&file)))
        || (!relative.is_empty() && target.ends_with(&relative))
}

/// Decide whether any of `files` is referenced by the index.
///
/// Every file is tried for an exact match before the heuristic scans the index.
pub fn match_files(files: &[Candidate<'_>], index: &LinkIndex) -> Option<LinkMatch> {
    if files.iter().any(|f| index.contains(f.path)) {
        return Some(LinkMatch::Exact);
    }
    files
        .iter()
        .any(|f| index.iter().any(|target| is_suffix_match(f.path, f.relative, target)))
        .then_some(LinkMatch::Suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn index(targets: &[&str]) -> LinkIndex {
        targets.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_suffix_file_longer_than_target() {
        assert!(is_suffix_match(
            Path::new("/mediacenter/data/remote/rd/showB/ep1.mkv"),
            Path::new("showB/ep1.mkv"),
            Path::new("/data/remote/rd/showB/ep1.mkv"),
        ));
    }

    #[test]
    fn test_suffix_target_longer_than_file() {
        assert!(is_suffix_match(
            Path::new("/remote/showB/ep1.mkv"),
            Path::new("showB/ep1.mkv"),
            Path::new("/data/remote/showB/ep1.mkv"),
        ));
    }

    #[test]
    fn test_suffix_different_prefix_shared_relative_path() {
        assert!(is_suffix_match(
            Path::new("/mnt/src/showB/ep1.mkv"),
            Path::new("showB/ep1.mkv"),
            Path::new("/data/remote/showB/ep1.mkv"),
        ));
    }

    #[test]
    fn test_suffix_is_component_wise() {
        assert!(!is_suffix_match(
            Path::new("/mnt/src/showB/ep1.mkv"),
            Path::new("showB/ep1.mkv"),
            Path::new("/data/remote/xshowB/ep1.mkv"),
        ));
    }

    #[test]
    fn test_suffix_different_file() {
        assert!(!is_suffix_match(
            Path::new("/mnt/src/showB/ep2.mkv"),
            Path::new("showB/ep2.mkv"),
            Path::new("/data/remote/showB/ep1.mkv"),
        ));
    }

    #[test]
    fn test_suffix_empty_target_never_matches() {
        assert!(!is_suffix_match(Path::new("/a/b"), Path::new("b"), Path::new("/")));
    }

    #[test]
    fn test_match_files_exact_wins() {
        let idx = index(&["/src/show/ep1.mkv", "/other/show/ep2.mkv"]);
        let files = [
            Candidate { path: Path::new("/src/show/ep2.mkv"), relative: Path::new("show/ep2.mkv") },
            Candidate { path: Path::new("/src/show/ep1.mkv"), relative: Path::new("show/ep1.mkv") },
        ];
        assert_eq!(match_files(&files, &idx), Some(LinkMatch::Exact));
    }

    #[test]
    fn test_match_files_falls_back_to_suffix() {
        let idx = index(&["/data/remote/show/ep1.mkv"]);
        let files = [
            Candidate { path: Path::new("/mnt/src/show/extra.nfo"), relative: Path::new("show/extra.nfo") },
            Candidate { path: Path::new("/mnt/src/show/ep1.mkv"), relative: Path::new("show/ep1.mkv") },
        ];
        assert_eq!(match_files(&files, &idx), Some(LinkMatch::Suffix));
    }

    #[test]
    fn test_match_files_none() {
        let idx = index(&["/data/remote/other/ep1.mkv"]);
        let files = [Candidate { path: Path::new("/mnt/src/show/ep1.mkv"), relative: Path::new("show/ep1.mkv") }];
        assert_eq!(match_files(&files, &idx), None);
    }
}
