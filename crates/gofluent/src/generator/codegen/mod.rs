//! Go source emission.
//!
//! Each output file gets its own [`ImportTable`] and render scope; builder
//! names come from [`BuilderNames`], which spans the whole output package.

mod names;
mod plan;
mod scope;
mod templates;

pub(crate) use names::BuilderNames;
pub(crate) use plan::{SetterKind, SetterPlan, container_fields, plan_setters};
pub(crate) use templates::GENERATED_MARKER;

use self::{
  scope::RenderScope,
  templates::{BuilderView, FileView, ImportView, InitView, SetterView, Templates},
};
use super::{
  attrs::TypeAttribute,
  imports::{ImportTable, reconcile_imports},
};

/// One rendered Go file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderedFile {
  pub contents: String,
  pub builders: usize,
  pub setters: usize,
}

pub(crate) struct CodeEmitter {
  templates: Templates,
  output_package: String,
}

impl CodeEmitter {
  pub(crate) fn new(output_package: impl Into<String>) -> anyhow::Result<Self> {
    Ok(Self {
      templates: Templates::new()?,
      output_package: output_package.into(),
    })
  }

  /// Renders `structs` into a single file of the output package.
  pub(crate) fn render(&self, structs: &[&TypeAttribute], builders: &BuilderNames) -> anyhow::Result<RenderedFile> {
    let imports = reconcile_imports(structs.iter().copied());
    let mut scope = RenderScope::new(&imports, builders);

    let mut rendered = Vec::with_capacity(structs.len());
    let mut setters = 0;
    for structure in structs {
      let view = builder_view(structure, &imports, &mut scope);
      setters += view.setters.len();
      rendered.push(self.templates.render_builder(&view)?);
    }

    let view = FileView {
      marker: GENERATED_MARKER,
      package: self.output_package.clone(),
      imports: scope
        .into_used_imports()
        .into_iter()
        .map(|(alias, path)| ImportView { alias, path })
        .collect(),
      builders: rendered,
    };

    Ok(RenderedFile {
      contents: self.templates.render_file(&view)?,
      builders: structs.len(),
      setters,
    })
  }
}

fn builder_view(structure: &TypeAttribute, imports: &ImportTable, scope: &mut RenderScope<'_>) -> BuilderView {
  let base = scope.builder_base(structure);
  let qualified = scope.qualified_name(structure);

  let inits = container_fields(structure)
    .map(|field| InitView {
      field: field.field_name.clone(),
      literal: scope.empty_literal(&field.ty),
    })
    .collect();

  let setters = plan_setters(structure, imports)
    .iter()
    .map(|plan| setter_view(plan, scope))
    .collect();

  BuilderView {
    builder: BuilderNames::builder_type(&base),
    constructor: BuilderNames::constructor(&base),
    wrapper: BuilderNames::wrapper(&base),
    type_name: structure.type_name.clone(),
    qualified,
    inits,
    setters,
  }
}

fn setter_view(plan: &SetterPlan, scope: &mut RenderScope<'_>) -> SetterView {
  let ty = &plan.field.ty;
  let field = format!("b.s.{}", plan.field.field_name);
  let deref = if ty.is_pointer() { "*" } else { "" };

  let (params, statement) = match (plan.kind, ty.elem(), ty.key_value()) {
    (SetterKind::Add, Some(elem), _) => (
      format!("item {}", scope.param_type(elem)),
      format!("{deref}{field} = append({deref}{field}, {})", scope.finish("item", elem)),
    ),
    (SetterKind::Put, _, Some((key, value))) => {
      let target = if ty.is_pointer() { format!("(*{field})") } else { field.clone() };
      (
        format!("key {}, value {}", scope.param_type(key), scope.param_type(value)),
        format!(
          "{target}[{}] = {}",
          scope.finish("key", key),
          scope.finish("value", value)
        ),
      )
    }
    _ => (
      format!("value {}", scope.param_type(ty)),
      format!("{field} = {}", scope.finish("value", ty)),
    ),
  };

  SetterView {
    name: plan.name.clone(),
    params,
    statement,
  }
}
