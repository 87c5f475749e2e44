use anyhow::Context as _;
use gofluent_packages::{PackageLoader, PackageSet};
use itertools::Itertools;

use super::{attrs::TypeKey, warnings::GenerationWarning};

/// State shared by every step of one extraction run.
///
/// Owns the loaded package set and the cycle guard, and borrows the loader so
/// that new packages can be pulled in while fields are being extracted.
pub(crate) struct TraversalContext<'a> {
  loader: &'a mut dyn PackageLoader,
  pub(crate) packages: PackageSet,
  /// Named types being expanded on the active recursion path.
  in_progress: Vec<TypeKey>,
  pub(crate) warnings: Vec<GenerationWarning>,
}

impl<'a> TraversalContext<'a> {
  pub(crate) fn new(loader: &'a mut dyn PackageLoader) -> Self {
    Self {
      loader,
      packages: PackageSet::new(),
      in_progress: vec![],
      warnings: vec![],
    }
  }

  /// Loads the packages requested by the caller. Returns their ids in request
  /// order with duplicates removed.
  pub(crate) fn load_targets(&mut self, ids: &[String]) -> anyhow::Result<Vec<String>> {
    self
      .packages
      .load(&mut *self.loader, ids)
      .with_context(|| format!("failed to load packages {}", ids.join(", ")))?;
    Ok(
      ids
        .iter()
        .unique()
        .filter(|id| self.packages.contains(id))
        .cloned()
        .collect(),
    )
  }

  /// Loads `id` unless it is already present.
  pub(crate) fn ensure_loaded(&mut self, id: &str) -> anyhow::Result<()> {
    if self.packages.contains(id) {
      return Ok(());
    }
    self
      .packages
      .load(&mut *self.loader, &[id.to_string()])
      .with_context(|| format!("failed to load package {id}"))?;
    Ok(())
  }

  pub(crate) fn is_in_progress(&self, key: &TypeKey) -> bool {
    self.in_progress.contains(key)
  }

  pub(crate) fn enter(&mut self, key: TypeKey) {
    self.in_progress.push(key);
  }

  pub(crate) fn leave(&mut self) {
    self.in_progress.pop();
  }

  pub(crate) fn warn(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }
}
