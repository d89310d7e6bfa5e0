//! Default locations

use std::path::PathBuf;

use crate::error::{Result, resolve as resolve_error};

/// Cache directory name under the user's home directory
pub const CACHE_DIR: &str = ".runtime-dependencies";

/// Get the default cache directory path: `$HOME/.runtime-dependencies`
pub fn default_cache_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| resolve_error::cache_failed("Could not determine home directory"))?;
    Ok(home.join(CACHE_DIR))
}

/// Dynamic library extension of the running platform (`so`, `dylib`, `dll`)
pub fn default_extension() -> &'static str {
    std::env::consts::DLL_EXTENSION
}
