//! Command implementations for the rtdep CLI

pub mod describe;
pub mod run;
pub mod version;

use crate::bootstrap::Package;
use crate::cli::Cli;
use crate::config::BootstrapConfig;
use crate::error::Result;

/// Package selected on the command line, or the executable's own directory
pub(crate) fn open_package(cli: &Cli) -> Result<Package> {
    match &cli.package {
        Some(root) => Ok(Package::new(root)),
        None => Package::current(),
    }
}

/// Effective configuration: command line over manifest over defaults
pub(crate) fn load_config(cli: &Cli, package: &Package) -> Result<BootstrapConfig> {
    let manifest = package.manifest()?;
    BootstrapConfig::resolve(&cli.overrides(), &manifest)
}
