//! Field type extraction.
//!
//! Turns the declared type of a struct field into a [`TypeAttribute`] tree.
//! Extraction never fails because a field is awkward to express: such fields
//! come back as [`Extraction::Unusable`] and are dropped by the caller. Only a
//! failed package load is an error.

use gofluent_packages::{TypeExpr, Underlying, is_exported, is_internal_path};

use super::{
  attrs::{DeclKind, FieldAttribute, PackageRef, Shape, TypeAttribute, TypeKey},
  context::TraversalContext,
  discover::StructAttribute,
  warnings::{GenerationWarning, SkipReason},
};

#[derive(Debug)]
pub(crate) enum Extraction {
  Usable(TypeAttribute),
  Unusable(SkipReason),
}

/// Where a type expression occurs. Interfaces directly in a field expand into
/// one setter per implementation; anywhere else they are plain named leaves
/// and must be nameable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
  Field,
  Nested,
}

type Fill = anyhow::Result<Option<SkipReason>>;

impl TraversalContext<'_> {
  /// Extracts every settable field of a discovered struct.
  pub(crate) fn extract_struct(&mut self, discovered: StructAttribute) -> anyhow::Result<TypeAttribute> {
    let StructAttribute { package, name, fields } = discovered;
    let owner = TypeKey::new(&package.id, &name);
    let mut structure = TypeAttribute::structure(package, &name);

    for decl in fields {
      let names = if decl.is_embedded() {
        decl.ty.embedded_name().map(str::to_string).into_iter().collect()
      } else {
        decl.names.clone()
      };
      let names: Vec<String> = names.into_iter().filter(|n| is_exported(n)).collect();
      if names.is_empty() {
        continue;
      }

      match self.extract_field_type(&decl.ty)? {
        Extraction::Usable(ty) => {
          structure.fields.extend(names.into_iter().map(|field_name| FieldAttribute {
            field_name,
            suffix: None,
            ty: ty.clone(),
          }));
        }
        Extraction::Unusable(reason) => {
          for field_name in names {
            self.warn(GenerationWarning::skipped_field(&owner, &field_name, &reason));
          }
        }
      }
    }

    Ok(structure)
  }

  /// Extracts the declared type of a struct field.
  pub(crate) fn extract_field_type(&mut self, expr: &TypeExpr) -> anyhow::Result<Extraction> {
    let mut node = TypeAttribute::default();
    if let Some(reason) = self.fill(expr, &mut node, Position::Field)? {
      return Ok(Extraction::Unusable(reason));
    }

    if node.is_interface() && node.is_pointer() {
      return Ok(Extraction::Unusable(SkipReason::PointerToInterface {
        interface: node.type_name,
      }));
    }
    Ok(Extraction::Usable(node))
  }

  fn fill(&mut self, expr: &TypeExpr, node: &mut TypeAttribute, position: Position) -> Fill {
    match expr {
      TypeExpr::Pointer { elem } => {
        node.pointers += 1;
        self.fill(elem, node, position)
      }
      TypeExpr::Slice { elem } => {
        let mut child = TypeAttribute::default();
        if let Some(reason) = self.fill(elem, &mut child, Position::Nested)? {
          return Ok(Some(reason));
        }
        node.shape = Shape::Slice(Box::new(child));
        Ok(None)
      }
      TypeExpr::Map { key, value } => {
        let mut key_node = TypeAttribute::default();
        if let Some(reason) = self.fill(key, &mut key_node, Position::Nested)? {
          return Ok(Some(reason));
        }
        let mut value_node = TypeAttribute::default();
        if let Some(reason) = self.fill(value, &mut value_node, Position::Nested)? {
          return Ok(Some(reason));
        }
        node.shape = Shape::Map {
          key: Box::new(key_node),
          value: Box::new(value_node),
        };
        Ok(None)
      }
      TypeExpr::Func {
        params,
        results,
        variadic,
      } => {
        let params = match self.fill_all(params)? {
          Ok(nodes) => nodes,
          Err(reason) => return Ok(Some(reason)),
        };
        let results = match self.fill_all(results)? {
          Ok(nodes) => nodes,
          Err(reason) => return Ok(Some(reason)),
        };
        node.shape = Shape::Func {
          params,
          results,
          variadic: *variadic,
        };
        Ok(None)
      }
      TypeExpr::Named { name, package: None } => {
        node.type_name.clone_from(name);
        Ok(None)
      }
      TypeExpr::Named {
        name,
        package: Some(package),
      } => self.fill_named(name, package, node, position),
      TypeExpr::Other { repr } => Ok(Some(SkipReason::Unsupported { repr: repr.clone() })),
    }
  }

  /// Extracts each expression in order, stopping at the first unusable one.
  fn fill_all(&mut self, exprs: &[TypeExpr]) -> anyhow::Result<Result<Vec<TypeAttribute>, SkipReason>> {
    let mut nodes = Vec::with_capacity(exprs.len());
    for expr in exprs {
      let mut node = TypeAttribute::default();
      if let Some(reason) = self.fill(expr, &mut node, Position::Nested)? {
        return Ok(Err(reason));
      }
      nodes.push(node);
    }
    Ok(Ok(nodes))
  }

  fn fill_named(&mut self, name: &str, package: &str, node: &mut TypeAttribute, position: Position) -> Fill {
    if is_internal_path(package) {
      return Ok(Some(SkipReason::InternalPackage {
        package: package.to_string(),
      }));
    }

    self.ensure_loaded(package)?;
    let Some(loaded) = self.packages.get(package) else {
      return Ok(Some(SkipReason::UnknownType {
        package: package.to_string(),
        type_name: name.to_string(),
      }));
    };
    let package_ref = PackageRef {
      id: loaded.id.clone(),
      name: loaded.name.clone(),
    };
    let Some(underlying) = loaded.lookup(name).map(|decl| decl.underlying.clone()) else {
      return Ok(Some(SkipReason::UnknownType {
        package: package.to_string(),
        type_name: name.to_string(),
      }));
    };

    node.type_name = name.to_string();
    node.package = Some(package_ref);

    match underlying {
      Underlying::Interface { methods } => {
        let qualified = format!("{}.{name}", last_package_name(node));
        node.kind = DeclKind::Interface;
        if position == Position::Nested {
          if !is_exported(name) {
            return Ok(Some(SkipReason::UnnameableInterface { interface: qualified }));
          }
          // Nested interfaces are written by name, never expanded.
          return Ok(None);
        }
        node.implementations = self.resolve_implementations(&methods, package);
        if node.implementations.is_empty() {
          return Ok(Some(SkipReason::NoImplementations { interface: qualified }));
        }
        Ok(None)
      }
      _ if !is_exported(name) => Ok(Some(SkipReason::Unexported {
        type_name: format!("{}.{name}", last_package_name(node)),
      })),
      Underlying::Struct { .. } => {
        node.kind = DeclKind::Struct;
        Ok(None)
      }
      Underlying::Type { expr } => {
        node.kind = DeclKind::Other;
        self.expand_named_composite(TypeKey::new(package, name), &expr, node)?;
        Ok(None)
      }
    }
  }

  /// Gives a named slice, map or function type the shape of its underlying
  /// representation. A type already being expanded on the current path stays
  /// an opaque reference, which is what breaks `type Tree map[string]Tree`.
  fn expand_named_composite(&mut self, key: TypeKey, underlying: &TypeExpr, node: &mut TypeAttribute) -> anyhow::Result<()> {
    if !matches!(
      underlying,
      TypeExpr::Slice { .. } | TypeExpr::Map { .. } | TypeExpr::Func { .. }
    ) || self.is_in_progress(&key)
    {
      return Ok(());
    }

    self.enter(key);
    let mut expanded = TypeAttribute::default();
    let outcome = self.fill(underlying, &mut expanded, Position::Nested);
    self.leave();

    if outcome?.is_none() {
      node.shape = expanded.shape;
    }
    Ok(())
  }
}

fn last_package_name(node: &TypeAttribute) -> &str {
  node.package.as_ref().map_or("", |package| package.name.as_str())
}
