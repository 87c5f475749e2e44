use anyhow::Context as _;
use handlebars::Handlebars;
use serde::Serialize;

pub(crate) const GENERATED_MARKER: &str = "// Code generated by gofluent. DO NOT EDIT.";

const FILE_TEMPLATE: &str = include_str!("templates/file.go.hbs");
const BUILDER_TEMPLATE: &str = include_str!("templates/builder.go.hbs");

#[derive(Debug, Serialize)]
pub(super) struct FileView {
  pub marker: &'static str,
  pub package: String,
  pub imports: Vec<ImportView>,
  pub builders: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ImportView {
  pub alias: String,
  pub path: String,
}

#[derive(Debug, Serialize)]
pub(super) struct BuilderView {
  pub builder: String,
  pub constructor: String,
  pub wrapper: String,
  pub type_name: String,
  pub qualified: String,
  pub inits: Vec<InitView>,
  pub setters: Vec<SetterView>,
}

#[derive(Debug, Serialize)]
pub(super) struct InitView {
  pub field: String,
  pub literal: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SetterView {
  pub name: String,
  pub params: String,
  pub statement: String,
}

/// The fixed template set. Views arrive fully computed, so the registry is a
/// plain substitution sink with escaping turned off.
pub(super) struct Templates {
  registry: Handlebars<'static>,
}

impl Templates {
  pub(super) fn new() -> anyhow::Result<Self> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry.set_strict_mode(true);
    registry
      .register_template_string("file", FILE_TEMPLATE)
      .context("invalid file template")?;
    registry
      .register_template_string("builder", BUILDER_TEMPLATE)
      .context("invalid builder template")?;
    Ok(Self { registry })
  }

  pub(super) fn render_file(&self, view: &FileView) -> anyhow::Result<String> {
    self
      .registry
      .render("file", view)
      .with_context(|| format!("failed to render file for package {}", view.package))
  }

  pub(super) fn render_builder(&self, view: &BuilderView) -> anyhow::Result<String> {
    let rendered = self
      .registry
      .render("builder", view)
      .with_context(|| format!("failed to render {}", view.builder))?;
    Ok(rendered.trim_end().to_string())
  }
}
