//! Run command implementation

use std::sync::Arc;

use crate::bootstrap::{BootstrapContext, Bootstrapper};
use crate::cli::{Cli, RunArgs};
use crate::error::Result;
use crate::remote::{MavenResolver, ProcessEnv, UrlTransport};
use crate::scope::{DylibLoader, HostScope, SymbolTable};

/// Run the bootstrap for the selected package
///
/// The rtdep binary exposes no host symbols of its own, so the entry point
/// must come from an acquired artifact.
pub fn run(cli: &Cli, args: &RunArgs) -> Result<()> {
    run_with_host(cli, args, Arc::new(SymbolTable::new()))
}

/// Run the bootstrap with `host` as the fallback layer
///
/// For applications that embed rtdep and register their own symbols.
pub fn run_with_host(cli: &Cli, args: &RunArgs, host: Arc<dyn HostScope>) -> Result<()> {
    let package = super::open_package(cli)?;
    let config = super::load_config(cli, &package)?;
    let entry_point = config.entry_point.clone();

    let context = BootstrapContext {
        config,
        host,
        loader: Arc::new(DylibLoader),
        env: Box::new(ProcessEnv),
        resolver: Box::new(MavenResolver::new(UrlTransport::new()?)),
    };

    Bootstrapper::new(context)
        .with_descriptor(package.descriptor_text()?)
        .run(entry_point.as_deref(), &args.args)
}
