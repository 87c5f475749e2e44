//! Structural interface satisfaction.
//!
//! Go types implement interfaces implicitly: a type satisfies an interface
//! when its method set contains every method the interface requires, with an
//! identical signature. The method set of a value type `T` holds only the
//! value-receiver methods, while `*T` also holds the pointer-receiver ones.

use crate::model::{MethodDecl, MethodSig, TypeDecl, is_exported};

/// Returns the methods of `decl` callable through a value (`pointer == false`)
/// or through a pointer (`pointer == true`).
pub fn method_set(decl: &TypeDecl, pointer: bool) -> impl Iterator<Item = &MethodDecl> {
  decl
    .methods
    .iter()
    .filter(move |method| pointer || !method.pointer_receiver)
}

/// Whether `decl` (declared in `decl_package`) satisfies the interface with
/// flattened method set `required`, declared in `interface_package`.
///
/// Non-exported method names are package-qualified, so they only match when
/// both types live in the same package.
#[must_use]
pub fn satisfies(
  decl: &TypeDecl,
  decl_package: &str,
  pointer: bool,
  required: &[MethodSig],
  interface_package: Option<&str>,
) -> bool {
  required.iter().all(|wanted| {
    if !is_exported(&wanted.name) && interface_package != Some(decl_package) {
      return false;
    }
    method_set(decl, pointer).any(|have| have.name == wanted.name && have.signature == wanted.signature)
  })
}
