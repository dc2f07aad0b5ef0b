//! Path helpers shared by the index builder, the sweep and the rewriter.
//!
//! Everything here is lexical: no function touches the filesystem, so a link target
//! that only exists inside another mount namespace still resolves to a usable path.

use std::path::{Component, Path, PathBuf};

/// Resolve the raw target stored in the symlink at `link`.
///
/// Absolute targets are returned verbatim. Relative targets are joined onto the
/// link's parent directory and normalized.
pub fn resolve_link_target(link: &Path, raw: &Path) -> PathBuf {
    if raw.is_absolute() {
        return raw.to_path_buf();
    }
    let parent = link.parent().unwrap_or_else(|| Path::new(""));
    normalize(&parent.join(raw))
}

/// Fold `.` and `..` components without consulting the filesystem.
///
/// `..` at the root is dropped; leading `..` on a relative path is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// The named components of `path`, with any root or drive prefix stripped.
pub(crate) fn named_components(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_) | Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_target_verbatim() {
        let resolved = resolve_link_target(
            Path::new("/data/plex/tv/showA.mkv"),
            Path::new("/data/remote/showA/ep1.mkv"),
        );
        assert_eq!(resolved, PathBuf::from("/data/remote/showA/ep1.mkv"));
    }

    #[test]
    fn test_relative_target_uses_link_parent() {
        let resolved = resolve_link_target(
            Path::new("/data/plex/tv/showA.mkv"),
            Path::new("../../remote/showA/ep1.mkv"),
        );
        assert_eq!(resolved, PathBuf::from("/data/remote/showA/ep1.mkv"));
    }

    #[test]
    fn test_relative_target_sibling() {
        let resolved = resolve_link_target(Path::new("/media/a/link"), Path::new("./b/file.mkv"));
        assert_eq!(resolved, PathBuf::from("/media/a/b/file.mkv"));
    }

    #[test]
    fn test_normalize_parent_at_root() {
        assert_eq!(normalize(Path::new("/../a/./b")), PathBuf::from("/a/b"));
    }

    #[test]
    fn test_normalize_relative_leading_parent() {
        assert_eq!(normalize(Path::new("../a/../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn test_named_components_strip_root() {
        let names = named_components(Path::new("/data/remote/x.mkv"));
        assert_eq!(names.len(), 3);
        assert_eq!(names[0], Component::Normal("data".as_ref()));
    }
}
