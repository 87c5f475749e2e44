use gofluent_packages::{FieldDecl, Package};

use super::attrs::PackageRef;

/// An exported struct found at package scope, before its fields are extracted.
#[derive(Debug, Clone)]
pub(crate) struct StructAttribute {
  pub package: PackageRef,
  pub name: String,
  pub fields: Vec<FieldDecl>,
}

/// Every exported, non-alias struct declared in `packages`, in package order
/// then declaration order. No usage filtering happens here.
pub(crate) fn discover_structs<'a>(packages: impl IntoIterator<Item = &'a Package>) -> Vec<StructAttribute> {
  packages
    .into_iter()
    .flat_map(|package| {
      let package_ref = PackageRef {
        id: package.id.clone(),
        name: package.name.clone(),
      };
      package.exported_structs().map(move |(decl, fields)| StructAttribute {
        package: package_ref.clone(),
        name: decl.name.clone(),
        fields: fields.to_vec(),
      })
    })
    .collect()
}
