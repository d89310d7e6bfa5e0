//! Common test utilities for rtdep integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Variables that would leak configuration from the developer's shell
const CONFIG_VARS: &[&str] = &[
    "RUNTIME_DEPENDENCY_ENTRY_POINT",
    "RUNTIME_DEPENDENCY_LIBRARY_PATH",
    "RUNTIME_DEPENDENCY_CACHE_DIR",
    "RUNTIME_DEPENDENCY_MODE",
    "RUNTIME_DEPENDENCY_EXTENSION",
    "RUNTIME_DEPENDENCY_PACKAGE",
    "RUST_LOG",
];

/// A packaged application laid out in a temporary directory
pub struct TestPackage {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Package root (contains META-INF)
    pub path: PathBuf,
}

impl TestPackage {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file relative to the package root
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    #[allow(dead_code)]
    pub fn write_manifest(&self, content: &str) {
        self.write_file("META-INF/MANIFEST.MF", content);
    }

    #[allow(dead_code)]
    pub fn write_descriptor(&self, content: &str) {
        self.write_file("META-INF/runtime-dependencies.txt", content);
    }

    /// `rtdep` with a clean environment, pointed at this package
    pub fn rtdep(&self) -> Command {
        let mut cmd = rtdep_cmd();
        cmd.arg("--package").arg(&self.path);
        cmd
    }
}

/// `rtdep` with none of the configuration variables inherited
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn rtdep_cmd() -> Command {
    let mut cmd = Command::cargo_bin("rtdep").expect("rtdep binary");
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Compile `tests/fixtures/demo_entry.rs` into `dir` as `demo-1.0.0.<dll ext>`
#[allow(dead_code)]
pub fn build_demo_library(dir: &Path) -> PathBuf {
    std::fs::create_dir_all(dir).expect("Failed to create library directory");
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/demo_entry.rs");
    let output = dir.join(format!("demo-1.0.0.{}", std::env::consts::DLL_EXTENSION));
    let rustc = std::env::var_os("RUSTC").unwrap_or_else(|| "rustc".into());

    let status = std::process::Command::new(rustc)
        .args(["--crate-type", "cdylib", "--crate-name", "demo_entry", "--edition", "2021"])
        .arg("-o")
        .arg(&output)
        .arg(&source)
        .status()
        .expect("Failed to run rustc");
    assert!(status.success(), "Failed to build {}", source.display());
    output
}

/// `file://` URL of a local directory, usable as a repository URL
#[allow(dead_code)]
pub fn file_url(dir: &Path) -> String {
    url::Url::from_directory_path(dir)
        .expect("absolute directory path")
        .to_string()
}
