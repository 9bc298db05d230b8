//! Loading the symbol table of a compiled package.
//!
//! A package is described by a TOML manifest listing its package level objects,
//! its named types and the named types of the packages it imports. The generator
//! only ever sees the resulting [`SymbolTable`], so other providers can be plugged
//! in through the [`Provider`] trait.

use std::fs;
use std::path::{Path, PathBuf};

use hoist_symbols::SymbolTable;

mod build;
mod lexer;
pub mod manifest;
mod result;
mod type_expr;

pub use build::build_symbol_table;
pub use manifest::Manifest;
pub use result::*;
pub use type_expr::{SyntaxError, TypeExpr, parse_type};

/// File name of the manifest when a directory is given as package.
pub const MANIFEST_FILE: &str = "symbols.toml";

/// Something that can produce the symbol table of a package given its pattern.
pub trait Provider {
    fn load(&self, package: &str) -> LoadResult<SymbolTable>;
}

/// Loads packages from manifest files on disk.
///
/// The package pattern is a path to either a manifest or a directory containing
/// a `symbols.toml`. Relative paths are resolved against `root`.
#[derive(Debug, Clone, Default)]
pub struct ManifestProvider {
    root: Option<PathBuf>,
}

impl ManifestProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        ManifestProvider { root: Some(root.into()) }
    }

    /// The manifest file a package pattern refers to.
    pub fn manifest_path(&self, package: &str) -> PathBuf {
        let path = match &self.root {
            Some(root) => root.join(package),
            None => PathBuf::from(package),
        };
        if path.is_dir() { path.join(MANIFEST_FILE) } else { path }
    }
}

impl Provider for ManifestProvider {
    fn load(&self, package: &str) -> LoadResult<SymbolTable> {
        let path = self.manifest_path(package);
        log::debug!("Loading package {package} from {}", path.display());
        load_manifest(&path)
    }
}

/// Read, parse and resolve a manifest file.
pub fn load_manifest(path: &Path) -> LoadResult<SymbolTable> {
    let text = fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_owned(), source })?;
    let manifest = parse_manifest(path, &text)?;
    build_symbol_table(&manifest)
}

/// Parse the text of a manifest without resolving any names.
pub fn parse_manifest(path: &Path, text: &str) -> LoadResult<Manifest> {
    toml::from_str(text)
        .map_err(|err| LoadError::Manifest { path: path.to_owned(), message: err.to_string() })
}
