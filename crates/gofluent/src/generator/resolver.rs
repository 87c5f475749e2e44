use gofluent_packages::{MethodSig, is_internal_path};

use super::{attrs::TypeAttribute, context::TraversalContext, discover::discover_structs};

impl TraversalContext<'_> {
  /// Finds every exported struct in the loaded packages that satisfies the
  /// interface with method set `required`, declared in `interface_package`.
  ///
  /// Each candidate is recorded at most once. Value shape wins when both
  /// shapes satisfy, since the pointer shape then satisfies as well.
  pub(crate) fn resolve_implementations(&self, required: &[MethodSig], interface_package: &str) -> Vec<TypeAttribute> {
    let candidates = discover_structs(self.packages.iter().filter(|package| !is_internal_path(&package.id)));

    candidates
      .into_iter()
      .filter_map(|candidate| {
        let satisfies = |pointer: bool| {
          self.packages.satisfies(
            &candidate.package.id,
            &candidate.name,
            pointer,
            required,
            Some(interface_package),
          )
        };

        let pointers = if satisfies(false) {
          0
        } else if satisfies(true) {
          1
        } else {
          return None;
        };

        let mut implementation = TypeAttribute::structure(candidate.package.clone(), &candidate.name);
        implementation.pointers = pointers;
        Some(implementation)
      })
      .collect()
  }
}
