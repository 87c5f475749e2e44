use std::collections::BTreeMap;

use super::names::BuilderNames;
use crate::generator::{
  attrs::{PackageRef, Shape, TypeAttribute},
  imports::ImportTable,
};

/// Naming context for one output file.
///
/// Owns the two questions templates cannot answer themselves: whether a type
/// is set through a generated builder, and how a type is spelled under the
/// file's import table. Every alias handed out is remembered so that only
/// referenced imports end up in the header.
pub(crate) struct RenderScope<'a> {
  imports: &'a ImportTable,
  builders: &'a BuilderNames,
  used: BTreeMap<String, String>,
}

impl<'a> RenderScope<'a> {
  pub(crate) fn new(imports: &'a ImportTable, builders: &'a BuilderNames) -> Self {
    Self {
      imports,
      builders,
      used: BTreeMap::new(),
    }
  }

  /// Builders finalise into `*T`, so only `T` and `*T` can take one.
  pub(crate) fn has_builder(&self, node: &TypeAttribute) -> bool {
    node.has_builder && node.pointers <= 1 && self.builders.base(node).is_some()
  }

  /// Base name of the builder generated for `structure`.
  pub(crate) fn builder_base(&self, structure: &TypeAttribute) -> String {
    self
      .builders
      .base(structure)
      .map_or_else(|| structure.type_name.clone(), str::to_string)
  }

  /// Builder type accepted in place of `node`, e.g. `OrderBuilder`.
  pub(crate) fn builder_type(&self, node: &TypeAttribute) -> Option<String> {
    if !self.has_builder(node) {
      return None;
    }
    self.builders.base(node).map(BuilderNames::builder_type)
  }

  /// The declared type of `node` as written in the output file, pointers included.
  pub(crate) fn qualified_name(&mut self, node: &TypeAttribute) -> String {
    format!("{}{}", "*".repeat(node.pointers), self.base_name(node))
  }

  /// Composite literal for an empty container; `&T{}` when the field is `*T`.
  pub(crate) fn empty_literal(&mut self, node: &TypeAttribute) -> String {
    let amp = if node.is_pointer() { "&" } else { "" };
    format!("{amp}{}{{}}", self.base_name(node))
  }

  /// Expression turning `expr` into a value assignable to `node`: builders
  /// are finalised, everything else passes through.
  pub(crate) fn finish(&self, expr: &str, node: &TypeAttribute) -> String {
    match (self.has_builder(node), node.pointers) {
      (true, 0) => format!("*{expr}.Build()"),
      (true, _) => format!("{expr}.Build()"),
      (false, _) => expr.to_string(),
    }
  }

  /// Parameter type for a value assigned to `node`.
  pub(crate) fn param_type(&mut self, node: &TypeAttribute) -> String {
    match self.builder_type(node) {
      Some(builder) => format!("*{builder}"),
      None => self.qualified_name(node),
    }
  }

  /// `(alias, path)` pairs referenced so far, sorted by path.
  pub(crate) fn into_used_imports(self) -> Vec<(String, String)> {
    self.used.into_iter().map(|(path, alias)| (alias, path)).collect()
  }

  fn base_name(&mut self, node: &TypeAttribute) -> String {
    if node.is_named() {
      return match &node.package {
        Some(package) => format!("{}.{}", self.alias(package), node.type_name),
        None => node.type_name.clone(),
      };
    }

    match &node.shape {
      Shape::Named => String::new(),
      Shape::Slice(elem) => format!("[]{}", self.qualified_name(elem)),
      Shape::Map { key, value } => {
        format!("map[{}]{}", self.qualified_name(key), self.qualified_name(value))
      }
      Shape::Func {
        params,
        results,
        variadic,
      } => self.func_type(params, results, *variadic),
    }
  }

  fn func_type(&mut self, params: &[TypeAttribute], results: &[TypeAttribute], variadic: bool) -> String {
    let last = params.len().saturating_sub(1);
    let params: Vec<String> = params
      .iter()
      .enumerate()
      .map(|(index, param)| match param.elem() {
        Some(elem) if variadic && index == last => format!("...{}", self.qualified_name(elem)),
        _ => self.qualified_name(param),
      })
      .collect();
    let results: Vec<String> = results.iter().map(|result| self.qualified_name(result)).collect();

    let results = match results.as_slice() {
      [] => String::new(),
      [single] => format!(" {single}"),
      many => format!(" ({})", many.join(", ")),
    };
    format!("func({}){results}", params.join(", "))
  }

  fn alias(&mut self, package: &PackageRef) -> String {
    let alias = self.imports.alias(&package.id).unwrap_or(&package.name).to_string();
    self.used.insert(package.id.clone(), alias.clone());
    alias
  }
}
