use std::collections::HashMap;

use strum::Display;

use crate::generator::{
  attrs::{FieldAttribute, TypeAttribute},
  imports::ImportTable,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum SetterKind {
  With,
  Add,
  Put,
}

/// One method to generate on a builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SetterPlan {
  pub name: String,
  pub kind: SetterKind,
  /// The field variation being set. For interface fields `field.ty` is the
  /// implementation, not the interface.
  pub field: FieldAttribute,
}

/// Every setter of `structure`, in field order: `With` first, then `Add` or
/// `Put` for containers.
pub(crate) fn plan_setters(structure: &TypeAttribute, imports: &ImportTable) -> Vec<SetterPlan> {
  let mut setters = vec![];
  for field in &structure.fields {
    for variation in qualified_variations(field, imports) {
      setters.push(SetterPlan {
        name: format!("With{}{}", variation.field_name, variation.suffix.as_deref().unwrap_or_default()),
        kind: SetterKind::With,
        field: variation,
      });
    }

    if !is_container(&field.ty) {
      continue;
    }
    let kind = if field.ty.is_slice() { SetterKind::Add } else { SetterKind::Put };
    setters.push(SetterPlan {
      name: format!("{kind}{}", field.field_name),
      kind,
      field: field.clone(),
    });
  }
  setters
}

/// Slice or map fields that constructors must initialise.
pub(crate) fn container_fields(structure: &TypeAttribute) -> impl Iterator<Item = &FieldAttribute> {
  structure.fields.iter().filter(|field| is_container(&field.ty))
}

/// Appending or inserting needs the container reachable through at most one
/// pointer, which is also the depth constructors initialise.
fn is_container(ty: &TypeAttribute) -> bool {
  !ty.is_interface() && ty.pointers <= 1 && (ty.is_slice() || ty.is_map())
}

/// Field variations with implementation names that appear more than once
/// qualified by their package alias: `_models_Card` instead of `_Card`.
fn qualified_variations(field: &FieldAttribute, imports: &ImportTable) -> Vec<FieldAttribute> {
  let mut variations = field.variations();
  if !field.ty.is_interface() {
    return variations;
  }

  let mut counts: HashMap<String, usize> = HashMap::new();
  for variation in &variations {
    *counts.entry(variation.ty.type_name.clone()).or_default() += 1;
  }

  for variation in &mut variations {
    if counts.get(&variation.ty.type_name).copied().unwrap_or_default() < 2 {
      continue;
    }
    if let Some(package) = &variation.ty.package {
      let alias = imports.alias(&package.id).unwrap_or(&package.name);
      variation.suffix = Some(format!("_{alias}_{}", variation.ty.type_name));
    }
  }
  variations
}
