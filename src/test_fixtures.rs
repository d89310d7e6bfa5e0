//! Test fixtures shared by the unit tests.
//!
//! ```ignore
//! use crate::test_fixtures::{create_temp_dir, touch};
//!
//! let temp = create_temp_dir();
//! let jar = touch(&temp.path().join("libs/nested"), "lib-1.0.0.jar");
//! ```

#![allow(clippy::expect_used)]

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Absolute base for temporary directories, so they never land under the
/// current working directory (e.g. when `TMPDIR=tmp`).
fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// Create `dir/name` (and its parent directories) with placeholder content.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    write_file(dir, name, name.as_bytes())
}

/// Create `dir/name` (and its parent directories) with the given content.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    std::fs::create_dir_all(dir).expect("Failed to create directory");
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write file");
    path
}
