//! Own layer: modules opened from acquired artifact files
//!
//! Two loaders are provided:
//! - [`DylibLoader`] opens each artifact as a dynamic library and looks up
//!   C ABI entry symbols.
//! - [`StaticLoader`] serves exports the hosted application linked in
//!   statically, keyed by artifact file name, so an artifact's presence on
//!   disk decides whether its implementation shadows the host's.

use std::collections::HashMap;
use std::ffi::{CString, c_char, c_int};
use std::path::Path;
use std::sync::Arc;

use libloading::Library;

use super::OverrideScope;
use super::symbol::{EntryError, Export};
use crate::error::{RtdepError, Result};

/// Symbols exported by one acquired artifact
pub trait ArtifactModule: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Export>;
}

/// Opens artifact files as modules
pub trait ArtifactLoader: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be opened as a module.
    fn load(&self, path: &Path) -> Result<Box<dyn ArtifactModule>>;
}

/// C ABI of an entry symbol exported by a dynamic library
pub type CEntryFn = unsafe extern "C" fn(argc: c_int, argv: *const *const c_char) -> c_int;

/// Map a symbol path to its exported C name: `a::b::c` becomes `a__b__c`
pub fn mangle(name: &str) -> String {
    name.replace("::", "__").replace(['.', '-'], "_")
}

/// Loads artifacts as dynamic libraries
#[derive(Debug, Default, Clone, Copy)]
pub struct DylibLoader;

struct DylibModule {
    library: Arc<Library>,
}

impl ArtifactLoader for DylibLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn ArtifactModule>> {
        // SAFETY: loading a library runs its initializers; acquired artifacts
        // are trusted to the same degree as the hosted application itself.
        let library = unsafe { Library::new(path) }.map_err(|e| RtdepError::ArtifactLoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Box::new(DylibModule {
            library: Arc::new(library),
        }))
    }
}

impl ArtifactModule for DylibModule {
    fn lookup(&self, name: &str) -> Option<Export> {
        let symbol = CString::new(mangle(name)).ok()?;
        // SAFETY: exported entry symbols are required to have the `CEntryFn`
        // signature. The fn pointer stays valid while `library` is alive, and
        // the closure below keeps its own reference to it.
        let entry: CEntryFn = unsafe {
            *self
                .library
                .get::<CEntryFn>(symbol.as_bytes_with_nul())
                .ok()?
        };
        let library = Arc::clone(&self.library);
        let program = name.to_string();

        Some(Export::entry(move |_: &OverrideScope, args: &[String]| {
            let _library = &library;
            call_c_entry(entry, &program, args)
        }))
    }
}

fn call_c_entry(entry: CEntryFn, program: &str, args: &[String]) -> std::result::Result<(), EntryError> {
    let owned: Vec<CString> = std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(CString::new)
        .collect::<std::result::Result<_, _>>()?;
    let mut argv: Vec<*const c_char> = owned.iter().map(|s| s.as_ptr()).collect();
    argv.push(std::ptr::null());
    let argc = c_int::try_from(owned.len())?;

    // SAFETY: `argv` is a null-terminated array of valid C strings that
    // outlive the call.
    let status = unsafe { entry(argc, argv.as_ptr()) };
    if status == 0 {
        Ok(())
    } else {
        Err(format!("exit status {status}").into())
    }
}

/// Statically linked artifact contents, keyed by artifact file name
#[derive(Default)]
pub struct StaticLoader {
    modules: HashMap<String, Arc<StaticModule>>,
}

/// Exports of one statically registered artifact
#[derive(Default)]
pub struct StaticModule {
    exports: HashMap<String, Export>,
}

impl StaticModule {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, export: Export) -> Self {
        self.exports.insert(name.into(), export);
        self
    }
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the exports of the artifact named `file_name`
    pub fn register(&mut self, file_name: impl Into<String>, module: StaticModule) -> &mut Self {
        self.modules.insert(file_name.into(), Arc::new(module));
        self
    }
}

struct SharedStaticModule(Arc<StaticModule>);

impl ArtifactModule for SharedStaticModule {
    fn lookup(&self, name: &str) -> Option<Export> {
        self.0.exports.get(name).cloned()
    }
}

impl ArtifactLoader for StaticLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn ArtifactModule>> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let module = self
            .modules
            .get(&file_name)
            .ok_or_else(|| RtdepError::ArtifactLoadFailed {
                path: path.display().to_string(),
                reason: "no statically linked module registered for this artifact".to_string(),
            })?;
        Ok(Box::new(SharedStaticModule(Arc::clone(module))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{create_temp_dir, touch};

    #[test]
    fn test_mangle() {
        assert_eq!(mangle("demo_app::main"), "demo_app__main");
        assert_eq!(mangle("com.example.App"), "com_example_App");
        assert_eq!(mangle("my-lib::entry"), "my_lib__entry");
    }

    #[test]
    fn test_static_loader_by_file_name() {
        let temp = create_temp_dir();
        let path = touch(&temp.path().join("nested"), "lib-1.0.0.so");
        let mut loader = StaticLoader::new();
        loader.register(
            "lib-1.0.0.so",
            StaticModule::new().with("lib::VERSION", Export::value("1.0.0")),
        );

        let module = loader.load(&path).unwrap();
        assert!(module.lookup("lib::VERSION").is_some());
        assert!(module.lookup("lib::other").is_none());
    }

    #[test]
    fn test_static_loader_unknown_artifact() {
        let temp = create_temp_dir();
        let path = touch(temp.path(), "unknown-2.0.so");
        let result = StaticLoader::new().load(&path);
        assert!(matches!(
            result,
            Err(RtdepError::ArtifactLoadFailed { .. })
        ));
    }

    #[test]
    fn test_dylib_loader_rejects_non_library() {
        let temp = create_temp_dir();
        let path = touch(temp.path(), "not-a-library-1.0.so");
        let result = DylibLoader.load(&path);
        assert!(matches!(
            result,
            Err(RtdepError::ArtifactLoadFailed { .. })
        ));
    }

    #[test]
    fn test_call_c_entry_passes_arguments() {
        unsafe extern "C" fn count_args(argc: c_int, _argv: *const *const c_char) -> c_int {
            argc - 3
        }
        // program name + two args
        call_c_entry(count_args, "demo::main", &["a".to_string(), "b".to_string()]).unwrap();
        let err = call_c_entry(count_args, "demo::main", &[]).unwrap_err();
        assert!(err.to_string().contains("exit status -2"));
    }

    #[test]
    fn test_call_c_entry_rejects_interior_nul() {
        unsafe extern "C" fn ok(_argc: c_int, _argv: *const *const c_char) -> c_int {
            0
        }
        assert!(call_c_entry(ok, "demo", &["bad\0arg".to_string()]).is_err());
    }
}
