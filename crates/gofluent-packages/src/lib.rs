//! Type-checked Go packages as seen by `gofluent`.
//!
//! The generator never parses Go itself. It consumes [`Package`] manifests
//! produced by a type checker, loads them through a [`PackageLoader`], and asks
//! the resulting [`PackageSet`] structural questions about them.

mod loader;
pub mod methods;
mod model;
mod universe;

pub use loader::{LoadError, MANIFEST_FILE, ManifestLoader, PackageLoader, StaticLoader};
pub use model::{
  FieldDecl, MethodDecl, MethodSig, Package, Signature, TypeDecl, TypeExpr, Underlying, is_exported, is_internal_path,
  last_segment,
};
pub use universe::PackageSet;
