//! The type forest extracted from loaded packages.

use std::fmt;

use indexmap::IndexMap;

/// Identity of a declared type: its package import path plus its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct TypeKey {
  pub package: String,
  pub name: String,
}

impl TypeKey {
  pub(crate) fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      package: package.into(),
      name: name.into(),
    }
  }
}

impl fmt::Display for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.package, self.name)
  }
}

/// The package a named type is declared in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PackageRef {
  /// Import path.
  pub id: String,
  /// Name from the package clause.
  pub name: String,
}

/// What a named node's declaration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum DeclKind {
  /// Predeclared type such as `string` or `error`, or an unnamed composite.
  #[default]
  Builtin,
  Struct,
  Interface,
  /// Any other defined type, e.g. `type Tags map[string]string`.
  Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum Shape {
  #[default]
  Named,
  Slice(Box<TypeAttribute>),
  Map {
    key: Box<TypeAttribute>,
    value: Box<TypeAttribute>,
  },
  Func {
    params: Vec<TypeAttribute>,
    results: Vec<TypeAttribute>,
    variadic: bool,
  },
}

/// One occurrence of a type inside a declaration.
///
/// Unnamed composites (`[]T`, `map[K]V`, `func(A) B`) have an empty
/// `type_name`. Named composites keep both their name, used when the type is
/// written out, and the shape of their underlying representation, used to
/// decide which setters exist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct TypeAttribute {
  pub type_name: String,
  pub package: Option<PackageRef>,
  pub kind: DeclKind,
  /// Number of `*` in front of the type.
  pub pointers: usize,
  pub shape: Shape,
  pub has_builder: bool,
  /// Fields of a structure selected for generation.
  pub fields: Vec<FieldAttribute>,
  /// Structures satisfying an interface-typed node.
  pub implementations: Vec<TypeAttribute>,
}

impl TypeAttribute {
  pub(crate) fn structure(package: PackageRef, name: impl Into<String>) -> Self {
    Self {
      type_name: name.into(),
      package: Some(package),
      kind: DeclKind::Struct,
      ..Default::default()
    }
  }

  pub(crate) fn key(&self) -> Option<TypeKey> {
    let package = self.package.as_ref()?;
    Some(TypeKey::new(&package.id, &self.type_name))
  }

  pub(crate) fn is_pointer(&self) -> bool {
    self.pointers > 0
  }

  pub(crate) fn is_named(&self) -> bool {
    !self.type_name.is_empty()
  }

  pub(crate) fn is_slice(&self) -> bool {
    matches!(self.shape, Shape::Slice(_))
  }

  pub(crate) fn is_map(&self) -> bool {
    matches!(self.shape, Shape::Map { .. })
  }

  pub(crate) fn is_interface(&self) -> bool {
    self.kind == DeclKind::Interface
  }

  pub(crate) fn is_struct(&self) -> bool {
    self.kind == DeclKind::Struct
  }

  /// Slice element, if this is a slice.
  pub(crate) fn elem(&self) -> Option<&TypeAttribute> {
    match &self.shape {
      Shape::Slice(elem) => Some(elem),
      _ => None,
    }
  }

  /// Map key and value, if this is a map.
  pub(crate) fn key_value(&self) -> Option<(&TypeAttribute, &TypeAttribute)> {
    match &self.shape {
      Shape::Map { key, value } => Some((key, value)),
      _ => None,
    }
  }

  /// Direct children: shape children, structure fields, then implementations.
  pub(crate) fn children(&self) -> Vec<&TypeAttribute> {
    let mut children: Vec<&TypeAttribute> = match &self.shape {
      Shape::Named => vec![],
      Shape::Slice(elem) => vec![elem.as_ref()],
      Shape::Map { key, value } => vec![key.as_ref(), value.as_ref()],
      Shape::Func { params, results, .. } => params.iter().chain(results).collect(),
    };
    children.extend(self.fields.iter().map(|field| &field.ty));
    children.extend(&self.implementations);
    children
  }

  pub(crate) fn children_mut(&mut self) -> Vec<&mut TypeAttribute> {
    let mut children: Vec<&mut TypeAttribute> = match &mut self.shape {
      Shape::Named => vec![],
      Shape::Slice(elem) => vec![elem.as_mut()],
      Shape::Map { key, value } => vec![key.as_mut(), value.as_mut()],
      Shape::Func { params, results, .. } => params.iter_mut().chain(results.iter_mut()).collect(),
    };
    children.extend(self.fields.iter_mut().map(|field| &mut field.ty));
    children.extend(self.implementations.iter_mut());
    children
  }
}

/// A field of a generated structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldAttribute {
  pub field_name: String,
  /// Disambiguates interface-implementation variants, e.g. `_CreditCard`.
  pub suffix: Option<String>,
  pub ty: TypeAttribute,
}

impl FieldAttribute {
  /// One entry per implementation for interface-typed fields, otherwise the
  /// field itself.
  pub(crate) fn variations(&self) -> Vec<FieldAttribute> {
    if !self.ty.is_interface() {
      return vec![self.clone()];
    }

    self
      .ty
      .implementations
      .iter()
      .map(|implementation| FieldAttribute {
        field_name: self.field_name.clone(),
        suffix: Some(format!("_{}", implementation.type_name)),
        ty: implementation.clone(),
      })
      .collect()
  }
}

/// Structures of one source package selected for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GenerationUnit {
  pub package: PackageRef,
  pub structs: Vec<TypeAttribute>,
}

/// Every generation unit of a run, keyed by package import path in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct GenerationSet {
  pub units: IndexMap<String, GenerationUnit>,
}

impl GenerationSet {
  pub(crate) fn push(&mut self, structure: TypeAttribute) {
    let Some(package) = structure.package.clone() else {
      return;
    };
    self
      .units
      .entry(package.id.clone())
      .or_insert_with(|| GenerationUnit {
        package,
        structs: vec![],
      })
      .structs
      .push(structure);
  }

  pub(crate) fn structs(&self) -> impl Iterator<Item = &TypeAttribute> {
    self.units.values().flat_map(|unit| &unit.structs)
  }

  pub(crate) fn structs_mut(&mut self) -> impl Iterator<Item = &mut TypeAttribute> {
    self.units.values_mut().flat_map(|unit| &mut unit.structs)
  }
}
