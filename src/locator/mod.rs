//! Local directory artifact lookup
//!
//! Used when the package ships (or the operator provides) a library directory
//! instead of resolving from remote repositories. A missing artifact is not an
//! error here: it is logged and skipped, and whatever later needs a symbol from
//! it fails at that point.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::artifact::ResolvedArtifact;
use crate::descriptor::DependencyCoordinate;

/// Default library directory name
pub const DEFAULT_LIBRARY_PATH: &str = "libs";

/// Find `file_name` under `root_dir`
///
/// Checks `root_dir/file_name` first, then scans the subtree depth-first for a
/// file whose name matches exactly. When several files match, the first one in
/// directory-listing order wins, which is platform dependent.
pub fn locate(root_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let direct = root_dir.join(file_name);
    if direct.is_file() {
        return Some(direct);
    }

    if !root_dir.is_dir() {
        return None;
    }

    WalkDir::new(root_dir)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|e| e.file_type().is_file() && e.file_name() == OsStr::new(file_name))
        .map(walkdir::DirEntry::into_path)
}

/// Locate every coordinate under `root_dir`, skipping the ones that are missing
pub fn acquire(
    root_dir: &Path,
    coordinates: &[DependencyCoordinate],
    extension: &str,
) -> Vec<ResolvedArtifact> {
    if coordinates.is_empty() {
        return Vec::new();
    }

    if !root_dir.is_dir() {
        tracing::warn!(
            path = %root_dir.display(),
            "library path not found, continuing without {} dependencies",
            coordinates.len()
        );
        return Vec::new();
    }

    let mut artifacts = Vec::with_capacity(coordinates.len());
    for coord in coordinates {
        let file_name = coord.file_name(extension);
        match locate(root_dir, &file_name) {
            Some(path) => {
                tracing::info!(artifact = %file_name, path = %path.display(), "loaded");
                artifacts.push(ResolvedArtifact::new(Some(coord.clone()), path));
            }
            None => {
                tracing::warn!(coordinate = %coord, artifact = %file_name, "library not found");
            }
        }
    }

    tracing::info!(
        "total {} of {} libraries found in {}",
        artifacts.len(),
        coordinates.len(),
        root_dir.display()
    );
    artifacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{create_temp_dir, touch};

    #[test]
    fn test_locate_direct() {
        let temp = create_temp_dir();
        let file = touch(temp.path(), "lib-1.0.0.jar");
        assert_eq!(locate(temp.path(), "lib-1.0.0.jar"), Some(file));
    }

    #[test]
    fn test_locate_at_any_depth() {
        for depth in 0..5 {
            let temp = create_temp_dir();
            let mut dir = temp.path().to_path_buf();
            for level in 0..depth {
                dir = dir.join(format!("level{level}"));
            }
            let file = touch(&dir, "X");
            touch(temp.path(), "unrelated.jar");
            assert_eq!(locate(temp.path(), "X"), Some(file), "depth {depth}");
        }
    }

    #[test]
    fn test_locate_not_found() {
        for depth in 0..4 {
            let temp = create_temp_dir();
            let mut dir = temp.path().to_path_buf();
            for level in 0..depth {
                dir = dir.join(format!("level{level}"));
            }
            touch(&dir, "other-1.0.jar");
            assert_eq!(locate(temp.path(), "X"), None, "depth {depth}");
        }
    }

    #[test]
    fn test_locate_missing_root() {
        let temp = create_temp_dir();
        assert_eq!(locate(&temp.path().join("does-not-exist"), "X"), None);
    }

    #[test]
    fn test_locate_exact_name_only() {
        let temp = create_temp_dir();
        touch(temp.path(), "lib-1.0.0.jar.bak");
        touch(temp.path(), "lib-1.0.0-sources.jar");
        touch(&temp.path().join("lib-1.0.0.jar"), "placeholder");
        // A directory named like the artifact does not match
        assert_eq!(locate(temp.path(), "lib-1.0.0.jar"), None);
    }

    #[test]
    fn test_acquire_skips_missing() {
        let temp = create_temp_dir();
        let present = touch(&temp.path().join("a").join("b"), "lib-1.0.0.jar");
        let coords = vec![
            DependencyCoordinate::new("com.example", "lib", "1.0.0"),
            DependencyCoordinate::new("com.example", "gone", "2.0.0"),
        ];

        let artifacts = acquire(temp.path(), &coords, "jar");
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].location, present);
        assert_eq!(artifacts[0].coordinate.as_ref(), Some(&coords[0]));
    }

    #[test]
    fn test_acquire_preserves_descriptor_order() {
        let temp = create_temp_dir();
        let second = touch(temp.path(), "b-1.jar");
        let first = touch(&temp.path().join("nested"), "a-1.jar");
        let coords = vec![
            DependencyCoordinate::new("g", "a", "1"),
            DependencyCoordinate::new("g", "b", "1"),
        ];

        let artifacts = acquire(temp.path(), &coords, "jar");
        let found: Vec<_> = artifacts.into_iter().map(|a| a.location).collect();
        assert_eq!(found, vec![first, second]);
    }

    #[test]
    fn test_acquire_missing_root() {
        let temp = create_temp_dir();
        let coords = vec![DependencyCoordinate::new("g", "a", "1")];
        assert!(acquire(&temp.path().join("libs"), &coords, "jar").is_empty());
        assert!(acquire(&temp.path().join("libs"), &[], "jar").is_empty());
    }
}
