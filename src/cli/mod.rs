//! CLI definitions using clap derive API
//!
//! Global options are the bootstrap overrides; each one can also be given
//! through its `RUNTIME_DEPENDENCY_*` environment variable.
//!
//! This module is organized into submodules for each command's argument types:
//! - run: Run command arguments
//! - describe: Describe command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DependencyMode, Overrides};

pub mod describe;
pub mod run;

pub use describe::DescribeArgs;
pub use run::RunArgs;

/// rtdep - runtime dependency bootstrapper
///
/// Acquire a packaged application's runtime libraries, then hand control to its entry point.
#[derive(Parser, Debug)]
#[command(
    name = "rtdep",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Runtime dependency bootstrapper",
    long_about = "rtdep reads the runtime dependency descriptor packaged with an application, \
                  acquires the listed artifacts from a local library directory or from remote \
                  repositories, and starts the application's entry point with the acquired \
                  artifacts taking precedence over the host's own symbols.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  rtdep run -- --port 8080                 \x1b[90m# Bootstrap and pass arguments through\x1b[0m\n   \
                  rtdep --mode remote run                  \x1b[90m# Resolve from repositories\x1b[0m\n   \
                  rtdep --entry-point demo::main run       \x1b[90m# Override the manifest entry point\x1b[0m\n   \
                  rtdep describe                           \x1b[90m# Show what would be acquired\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Entry point to hand control to (overrides Original-Entry-Point)
    #[arg(long, global = true, env = "RUNTIME_DEPENDENCY_ENTRY_POINT", value_name = "NAME")]
    pub entry_point: Option<String>,

    /// Local library directory (overrides Library-Path, default: libs)
    #[arg(long, global = true, env = "RUNTIME_DEPENDENCY_LIBRARY_PATH", value_name = "DIR")]
    pub library_path: Option<PathBuf>,

    /// Remote artifact cache (overrides Cache-Dir, default: ~/.runtime-dependencies)
    #[arg(long, global = true, env = "RUNTIME_DEPENDENCY_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Dependency mode (overrides Dependency-Mode, default: local)
    #[arg(long, global = true, env = "RUNTIME_DEPENDENCY_MODE", value_enum)]
    pub mode: Option<DependencyMode>,

    /// Artifact file extension (overrides Artifact-Extension)
    #[arg(long, global = true, env = "RUNTIME_DEPENDENCY_EXTENSION", value_name = "EXT")]
    pub extension: Option<String>,

    /// Package root containing META-INF (defaults to the executable's directory)
    #[arg(long, global = true, env = "RUNTIME_DEPENDENCY_PACKAGE", value_name = "DIR")]
    pub package: Option<PathBuf>,

    /// Do not append Maven Central to the descriptor's repositories
    #[arg(long, global = true)]
    pub no_default_repository: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The override layer of the bootstrap configuration
    pub fn overrides(&self) -> Overrides {
        Overrides {
            entry_point: self.entry_point.clone(),
            library_path: self.library_path.clone(),
            cache_dir: self.cache_dir.clone(),
            mode: self.mode,
            extension: self.extension.clone(),
            no_default_repository: self.no_default_repository,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Acquire dependencies and start the entry point
    Run(RunArgs),

    /// Show the descriptor and effective configuration without acquiring anything
    Describe(DescribeArgs),

    /// Show version information
    #[command(hide = true)]
    Version,
}
