use indexmap::IndexMap;

use crate::{
  loader::{LoadError, PackageLoader},
  methods,
  model::{MethodSig, Package, TypeDecl},
};

/// The set of packages loaded during one run, in load order.
///
/// This is the type-information side of the generator: it answers "what is
/// declared as `pkg.Name`" and "does `pkg.Name` satisfy this interface".
#[derive(Debug, Default)]
pub struct PackageSet {
  packages: IndexMap<String, Package>,
}

impl PackageSet {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Loads the given packages, skipping ids that are already present.
  /// Returns the ids that were newly added.
  pub fn load(&mut self, loader: &mut dyn PackageLoader, ids: &[String]) -> Result<Vec<String>, LoadError> {
    let missing: Vec<String> = ids.iter().filter(|id| !self.contains(id)).cloned().collect();
    if missing.is_empty() {
      return Ok(vec![]);
    }

    let mut added = vec![];
    for package in loader.load(&missing)? {
      if !self.packages.contains_key(&package.id) {
        added.push(package.id.clone());
        self.packages.insert(package.id.clone(), package);
      }
    }
    Ok(added)
  }

  #[must_use]
  pub fn contains(&self, id: &str) -> bool {
    self.packages.contains_key(id)
  }

  #[must_use]
  pub fn get(&self, id: &str) -> Option<&Package> {
    self.packages.get(id)
  }

  #[must_use]
  pub fn lookup(&self, package: &str, name: &str) -> Option<&TypeDecl> {
    self.packages.get(package)?.lookup(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Package> {
    self.packages.values()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.packages.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.packages.is_empty()
  }

  /// Capability test: does `package.name`, as a value or through a pointer,
  /// provide every method in `required`?
  #[must_use]
  pub fn satisfies(
    &self,
    package: &str,
    name: &str,
    pointer: bool,
    required: &[MethodSig],
    interface_package: Option<&str>,
  ) -> bool {
    self
      .lookup(package, name)
      .is_some_and(|decl| methods::satisfies(decl, package, pointer, required, interface_package))
  }
}
