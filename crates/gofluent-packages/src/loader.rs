use std::path::PathBuf;

use fmmap::{MmapFile, MmapFileExt};
use indexmap::IndexMap;

use crate::model::Package;

/// File name of a package manifest inside its import-path directory.
pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
  #[error("package {id} not found (looked for {})", path.display())]
  NotFound { id: String, path: PathBuf },

  #[error("failed to read manifest for package {id}: {source}")]
  Read {
    id: String,
    #[source]
    source: fmmap::error::Error,
  },

  #[error("invalid manifest for package {id}: {source}")]
  Parse {
    id: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("manifest at {} declares package {found}, expected {id}", path.display())]
  IdMismatch { id: String, found: String, path: PathBuf },

  #[error("package {0} is not available")]
  Unknown(String),
}

/// Source of type-checked packages.
///
/// Implementations are called repeatedly: once with the packages requested on
/// the command line and again, one package at a time, whenever extraction
/// reaches a type declared in a package that is not loaded yet.
pub trait PackageLoader {
  fn load(&mut self, ids: &[String]) -> Result<Vec<Package>, LoadError>;
}

/// Reads manifests from `<root>/<import path>/package.json`.
#[derive(Debug, Clone)]
pub struct ManifestLoader {
  root: PathBuf,
}

impl ManifestLoader {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  #[must_use]
  pub fn manifest_path(&self, id: &str) -> PathBuf {
    id.split('/')
      .fold(self.root.clone(), |path, segment| path.join(segment))
      .join(MANIFEST_FILE)
  }

  fn load_one(&self, id: &str) -> Result<Package, LoadError> {
    let path = self.manifest_path(id);
    if !path.is_file() {
      return Err(LoadError::NotFound { id: id.to_string(), path });
    }

    let file = MmapFile::open(&path).map_err(|source| LoadError::Read {
      id: id.to_string(),
      source,
    })?;
    let package: Package = serde_json::from_slice(file.as_slice()).map_err(|source| LoadError::Parse {
      id: id.to_string(),
      source,
    })?;

    if package.id != id {
      return Err(LoadError::IdMismatch {
        id: id.to_string(),
        found: package.id,
        path,
      });
    }
    Ok(package)
  }
}

impl PackageLoader for ManifestLoader {
  fn load(&mut self, ids: &[String]) -> Result<Vec<Package>, LoadError> {
    ids.iter().map(|id| self.load_one(id)).collect()
  }
}

/// Serves packages held in memory, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
  packages: IndexMap<String, Package>,
  requests: Vec<String>,
}

impl StaticLoader {
  pub fn new(packages: impl IntoIterator<Item = Package>) -> Self {
    Self {
      packages: packages.into_iter().map(|package| (package.id.clone(), package)).collect(),
      requests: vec![],
    }
  }

  /// Every id requested so far, in request order.
  #[must_use]
  pub fn requests(&self) -> &[String] {
    &self.requests
  }
}

impl PackageLoader for StaticLoader {
  fn load(&mut self, ids: &[String]) -> Result<Vec<Package>, LoadError> {
    self.requests.extend(ids.iter().cloned());
    ids
      .iter()
      .map(|id| self.packages.get(id).cloned().ok_or_else(|| LoadError::Unknown(id.clone())))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;

  const MODELS: &str = r#"{ "id": "example.com/shop/models", "name": "models", "types": [] }"#;

  fn write_manifest(root: &Path, id: &str, body: &str) {
    let dir = id.split('/').fold(root.to_path_buf(), |path, segment| path.join(segment));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(MANIFEST_FILE), body).unwrap();
  }

  #[test]
  fn test_manifest_path_follows_import_path() {
    let loader = ManifestLoader::new("/manifests");
    assert_eq!(
      loader.manifest_path("example.com/shop/models"),
      PathBuf::from("/manifests/example.com/shop/models/package.json")
    );
  }

  #[test]
  fn test_manifest_loader_reads_package() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "example.com/shop/models", MODELS);

    let mut loader = ManifestLoader::new(dir.path());
    let packages = loader.load(&["example.com/shop/models".to_string()]).unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].name, "models");
  }

  #[test]
  fn test_manifest_loader_missing_package() {
    let dir = tempfile::tempdir().unwrap();
    let mut loader = ManifestLoader::new(dir.path());

    let err = loader.load(&["example.com/missing".to_string()]).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
    assert!(err.to_string().contains("example.com/missing"));
  }

  #[test]
  fn test_manifest_loader_rejects_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "example.com/broken", "{ not json");

    let mut loader = ManifestLoader::new(dir.path());
    let err = loader.load(&["example.com/broken".to_string()]).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
  }

  #[test]
  fn test_manifest_loader_rejects_mismatched_id() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "example.com/other", MODELS);

    let mut loader = ManifestLoader::new(dir.path());
    let err = loader.load(&["example.com/other".to_string()]).unwrap_err();
    assert!(matches!(err, LoadError::IdMismatch { .. }));
  }

  #[test]
  fn test_static_loader_records_requests() {
    let package: Package = serde_json::from_str(MODELS).unwrap();
    let mut loader = StaticLoader::new([package]);

    loader.load(&["example.com/shop/models".to_string()]).unwrap();
    assert!(loader.load(&["example.com/nope".to_string()]).is_err());
    assert_eq!(loader.requests(), ["example.com/shop/models", "example.com/nope"]);
  }
}
