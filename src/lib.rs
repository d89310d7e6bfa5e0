//! rtdep - runtime dependency bootstrapper
//!
//! A launcher that, before the hosted application starts, reads a packaged
//! dependency descriptor, acquires the listed artifacts from a local library
//! directory or from remote repositories, and resolves the application's entry
//! point through a child-first [`scope::OverrideScope`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rtdep::bootstrap::{BootstrapContext, Bootstrapper};
//! use rtdep::config::BootstrapConfig;
//! use rtdep::remote::{MavenResolver, ProcessEnv, UrlTransport};
//! use rtdep::scope::{DylibLoader, SymbolTable};
//!
//! # fn main() -> rtdep::error::Result<()> {
//! let mut host = SymbolTable::new();
//! host.register_entry("app::main", |_scope, args| {
//!     println!("started with {args:?}");
//!     Ok(())
//! });
//!
//! let context = BootstrapContext {
//!     config: BootstrapConfig::default(),
//!     host: Arc::new(host),
//!     loader: Arc::new(DylibLoader),
//!     env: Box::new(ProcessEnv),
//!     resolver: Box::new(MavenResolver::new(UrlTransport::new()?)),
//! };
//! Bootstrapper::new(context)
//!     .with_descriptor(Some("DEP:com.example:lib:1.0.0\n".to_string()))
//!     .run(Some("app::main"), &[])?;
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod locator;
pub mod logging;
pub mod remote;
pub mod scope;

#[cfg(test)]
mod test_fixtures;
