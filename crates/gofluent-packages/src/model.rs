//! Serde model of a type-checked Go package.
//!
//! A [`Package`] is what a type checker knows about one Go package after
//! resolution: every package-scope type declaration, its underlying
//! representation and its complete method set. Type expressions carry the
//! *resolved* declaring package of every named type, so `models.Amount` written
//! inside another package is already `{"kind": "named", "name": "Amount",
//! "package": "example.com/shop/models"}`.

use serde::{Deserialize, Serialize};

/// One loaded package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
  /// Import path, e.g. `example.com/shop/models`.
  pub id: String,
  /// Name from the package clause.
  pub name: String,
  #[serde(default)]
  pub types: Vec<TypeDecl>,
}

impl Package {
  #[must_use]
  pub fn lookup(&self, name: &str) -> Option<&TypeDecl> {
    self.types.iter().find(|decl| decl.name == name)
  }

  /// Exported, non-alias struct declarations in declaration order.
  pub fn exported_structs(&self) -> impl Iterator<Item = (&TypeDecl, &[FieldDecl])> {
    self.types.iter().filter(|decl| !decl.alias && is_exported(&decl.name)).filter_map(|decl| {
      match &decl.underlying {
        Underlying::Struct { fields } => Some((decl, fields.as_slice())),
        _ => None,
      }
    })
  }
}

/// A package-scope `type` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
  pub name: String,
  /// Source file the declaration lives in, for diagnostics.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub file: Option<String>,
  /// `type A = B` declares an alias rather than a new type.
  #[serde(default)]
  pub alias: bool,
  pub underlying: Underlying,
  /// Complete method set, promoted methods included.
  #[serde(default)]
  pub methods: Vec<MethodDecl>,
}

impl TypeDecl {
  #[must_use]
  pub fn is_struct(&self) -> bool {
    matches!(self.underlying, Underlying::Struct { .. })
  }

  #[must_use]
  pub fn as_interface(&self) -> Option<&[MethodSig]> {
    match &self.underlying {
      Underlying::Interface { methods } => Some(methods),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Underlying {
  Struct {
    #[serde(default)]
    fields: Vec<FieldDecl>,
  },
  /// Flattened method set, embedded interfaces already expanded.
  Interface {
    #[serde(default)]
    methods: Vec<MethodSig>,
  },
  /// Any other representation, e.g. `type Tags map[string]string`.
  Type {
    #[serde(rename = "type")]
    expr: TypeExpr,
  },
}

/// A struct field declaration. An empty `names` list marks an embedded field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
  #[serde(default)]
  pub names: Vec<String>,
  #[serde(rename = "type")]
  pub ty: TypeExpr,
}

impl FieldDecl {
  #[must_use]
  pub fn is_embedded(&self) -> bool {
    self.names.is_empty()
  }
}

/// A method in a concrete type's method set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
  pub name: String,
  #[serde(default)]
  pub pointer_receiver: bool,
  #[serde(flatten)]
  pub signature: Signature,
}

/// A method required by an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
  pub name: String,
  #[serde(flatten)]
  pub signature: Signature,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
  #[serde(default)]
  pub params: Vec<TypeExpr>,
  #[serde(default)]
  pub results: Vec<TypeExpr>,
  #[serde(default)]
  pub variadic: bool,
}

/// A resolved type expression as written in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
  /// A named type. `package` is absent for predeclared types (`string`, `error`).
  Named {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package: Option<String>,
  },
  Pointer {
    elem: Box<TypeExpr>,
  },
  Slice {
    elem: Box<TypeExpr>,
  },
  Map {
    key: Box<TypeExpr>,
    value: Box<TypeExpr>,
  },
  Func {
    #[serde(default)]
    params: Vec<TypeExpr>,
    #[serde(default)]
    results: Vec<TypeExpr>,
    #[serde(default)]
    variadic: bool,
  },
  /// Channels, arrays and inline struct or interface literals, kept verbatim.
  Other {
    repr: String,
  },
}

impl TypeExpr {
  pub fn named(name: impl Into<String>, package: impl Into<String>) -> Self {
    Self::Named {
      name: name.into(),
      package: Some(package.into()),
    }
  }

  pub fn builtin(name: impl Into<String>) -> Self {
    Self::Named {
      name: name.into(),
      package: None,
    }
  }

  #[must_use]
  pub fn pointer(elem: TypeExpr) -> Self {
    Self::Pointer { elem: Box::new(elem) }
  }

  #[must_use]
  pub fn slice(elem: TypeExpr) -> Self {
    Self::Slice { elem: Box::new(elem) }
  }

  #[must_use]
  pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
    Self::Map {
      key: Box::new(key),
      value: Box::new(value),
    }
  }

  /// Name a field gets when this type is embedded: the base type name with
  /// pointers stripped.
  #[must_use]
  pub fn embedded_name(&self) -> Option<&str> {
    match self {
      Self::Named { name, .. } => Some(name),
      Self::Pointer { elem } => elem.embedded_name(),
      _ => None,
    }
  }
}

/// Go's export rule: the identifier starts with an upper-case letter.
#[must_use]
pub fn is_exported(name: &str) -> bool {
  name.chars().next().is_some_and(char::is_uppercase)
}

/// Packages below an `internal` path segment are importable only from their
/// parent tree, so generated code never references them.
#[must_use]
pub fn is_internal_path(path: &str) -> bool {
  path.split('/').any(|segment| segment == "internal")
}

/// Final path segment of an import path.
#[must_use]
pub fn last_segment(path: &str) -> &str {
  path.rsplit('/').next().unwrap_or(path)
}
