use std::fmt;

use super::attrs::TypeKey;

/// Why a field cannot be expressed in a generated builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SkipReason {
  /// The field's type is not exported from its package.
  Unexported { type_name: String },
  /// The type lives below an `internal` path segment.
  InternalPackage { package: String },
  /// No loaded structure satisfies the interface.
  NoImplementations { interface: String },
  PointerToInterface { interface: String },
  /// A non-exported interface nested in a slice, map or function.
  UnnameableInterface { interface: String },
  /// Declared in a loaded package that has no such type.
  UnknownType { package: String, type_name: String },
  /// Channel, array or inline type literal.
  Unsupported { repr: String },
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Unexported { type_name } => write!(f, "type {type_name} is not exported"),
      Self::InternalPackage { package } => write!(f, "package {package} is internal"),
      Self::NoImplementations { interface } => write!(f, "no loaded struct implements {interface}"),
      Self::PointerToInterface { interface } => write!(f, "pointer to interface {interface}"),
      Self::UnnameableInterface { interface } => {
        write!(f, "unexported interface {interface} cannot be named outside its package")
      }
      Self::UnknownType { package, type_name } => write!(f, "type {type_name} not declared in {package}"),
      Self::Unsupported { repr } => write!(f, "unsupported type {repr}"),
    }
  }
}

/// Non-fatal findings collected during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
  SkippedField {
    /// Import path of the package declaring the struct.
    package: String,
    struct_name: String,
    field_name: String,
    reason: String,
  },
  /// Two generated structures share a name; the later one got a prefixed builder.
  RenamedBuilder { type_name: String, builder: String },
}

impl GenerationWarning {
  pub(crate) fn skipped_field(owner: &TypeKey, field_name: &str, reason: &SkipReason) -> Self {
    Self::SkippedField {
      package: owner.package.clone(),
      struct_name: owner.name.clone(),
      field_name: field_name.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::SkippedField { .. })
  }
}

impl fmt::Display for GenerationWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::SkippedField {
        struct_name,
        field_name,
        reason,
        ..
      } => write!(f, "{struct_name}.{field_name}: {reason}"),
      Self::RenamedBuilder { type_name, builder } => {
        write!(f, "{type_name} is generated more than once, using {builder}")
      }
    }
  }
}
