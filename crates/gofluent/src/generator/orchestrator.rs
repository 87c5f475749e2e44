//! Orchestration for the Go fluent-builder generation pipeline.
//!
//! The [`Orchestrator`] runs every stage in order: load the requested
//! packages, discover their exported structs, extract each field's type (lazily
//! loading whatever packages those types live in), mark builder references,
//! then render one file per package or one consolidated file.
//!
//! ```no_run
//! use gofluent_packages::ManifestLoader;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = GeneratorConfig::builder()
//!   .packages(vec!["example.com/shop/models".to_string()])
//!   .output_package("fluent")
//!   .build();
//! let mut loader = ManifestLoader::new("manifests");
//! let output = Orchestrator::new(config).generate(&mut loader)?;
//! for file in &output.files {
//!   std::fs::write(&file.file_name, &file.contents)?;
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use gofluent_packages::PackageLoader;
use strum::Display;

use super::{
  attrs::{GenerationSet, TypeAttribute, TypeKey},
  codegen::{BuilderNames, CodeEmitter, plan_setters},
  context::TraversalContext,
  discover::discover_structs,
  imports::reconcile_imports,
  metrics::GenerationStats,
  propagate::propagate_builders,
  warnings::GenerationWarning,
};

/// Suffix of generated file names in per-package mode.
pub const FILE_SUFFIX: &str = "_fluent.go";

#[derive(Debug, Clone, Default, PartialEq, Eq, Display)]
pub enum OutputMode {
  /// One `<package>_fluent.go` per requested package.
  #[default]
  #[strum(to_string = "one file per package")]
  PerPackage,
  /// Every builder in a single file.
  #[strum(to_string = "single file {file_name}")]
  Consolidated { file_name: String },
}

#[derive(Debug, Clone, bon::Builder)]
pub struct GeneratorConfig {
  /// Import paths of the packages whose structs get builders.
  pub packages: Vec<String>,
  /// Package clause of the generated files.
  #[builder(into)]
  pub output_package: String,
  #[builder(default)]
  pub mode: OutputMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
  pub file_name: String,
  pub contents: String,
}

#[derive(Debug, Clone)]
pub struct GeneratedOutput {
  pub files: Vec<GeneratedFile>,
  pub stats: GenerationStats,
}

/// What `generate` would produce for one struct, without rendering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructSummary {
  pub package: String,
  pub name: String,
  pub builder: String,
  pub setters: Vec<String>,
  pub skipped: Vec<String>,
}

struct Extracted {
  set: GenerationSet,
  stats: GenerationStats,
}

pub struct Orchestrator {
  config: GeneratorConfig,
}

impl Orchestrator {
  pub fn new(config: GeneratorConfig) -> Self {
    Self { config }
  }

  /// Runs the whole pipeline and returns the rendered files.
  ///
  /// # Errors
  ///
  /// Fails when a package cannot be loaded or a template fails to render.
  /// Fields that cannot be expressed are dropped and reported in
  /// `stats.warnings` instead.
  pub fn generate(&self, loader: &mut dyn PackageLoader) -> anyhow::Result<GeneratedOutput> {
    let Extracted { set, mut stats } = self.extract(loader)?;
    let (builders, renames) = BuilderNames::assign(&set);
    stats.record_warnings(renames);

    let emitter = CodeEmitter::new(&self.config.output_package)?;
    let mut files = vec![];

    match &self.config.mode {
      OutputMode::PerPackage => {
        let mut file_names = FileNames::default();
        for unit in set.units.values() {
          let structs: Vec<&TypeAttribute> = unit.structs.iter().collect();
          let rendered = emitter.render(&structs, &builders)?;
          stats.record_file(rendered.builders, rendered.setters);
          files.push(GeneratedFile {
            file_name: file_names.next(&unit.package.name),
            contents: rendered.contents,
          });
        }
      }
      OutputMode::Consolidated { file_name } => {
        let structs: Vec<&TypeAttribute> = set.structs().collect();
        if !structs.is_empty() {
          let rendered = emitter.render(&structs, &builders)?;
          stats.record_file(rendered.builders, rendered.setters);
          files.push(GeneratedFile {
            file_name: file_name.clone(),
            contents: rendered.contents,
          });
        }
      }
    }

    Ok(GeneratedOutput { files, stats })
  }

  /// Lists the builders `generate` would emit, with their setters and the
  /// fields that were skipped.
  ///
  /// # Errors
  ///
  /// Fails when a package cannot be loaded.
  pub fn analyze(&self, loader: &mut dyn PackageLoader) -> anyhow::Result<(Vec<StructSummary>, GenerationStats)> {
    let Extracted { set, mut stats } = self.extract(loader)?;
    let (builders, renames) = BuilderNames::assign(&set);
    stats.record_warnings(renames);

    let mut skipped: HashMap<TypeKey, Vec<String>> = HashMap::new();
    for warning in &stats.warnings {
      if let GenerationWarning::SkippedField {
        package,
        struct_name,
        field_name,
        reason,
      } = warning
      {
        skipped
          .entry(TypeKey::new(package, struct_name))
          .or_default()
          .push(format!("{field_name}: {reason}"));
      }
    }

    let mut summaries = vec![];
    for unit in set.units.values() {
      let imports = reconcile_imports(&unit.structs);
      for structure in &unit.structs {
        let base = builders
          .base(structure)
          .map_or_else(|| structure.type_name.clone(), str::to_string);
        summaries.push(StructSummary {
          package: unit.package.id.clone(),
          name: structure.type_name.clone(),
          builder: BuilderNames::builder_type(&base),
          setters: plan_setters(structure, &imports).into_iter().map(|plan| plan.name).collect(),
          skipped: structure
            .key()
            .and_then(|key| skipped.get(&key).cloned())
            .unwrap_or_default(),
        });
      }
    }

    Ok((summaries, stats))
  }

  fn extract(&self, loader: &mut dyn PackageLoader) -> anyhow::Result<Extracted> {
    let mut ctx = TraversalContext::new(loader);
    let targets = ctx.load_targets(&self.config.packages)?;
    let discovered = discover_structs(targets.iter().filter_map(|id| ctx.packages.get(id)));

    let mut set = GenerationSet::default();
    for structure in discovered {
      set.push(ctx.extract_struct(structure)?);
    }

    let mut stats = GenerationStats::default();
    stats.record_builder_references(propagate_builders(&mut set));
    stats.record_packages(targets.len(), ctx.packages.len());
    stats.record_warnings(ctx.warnings);
    Ok(Extracted { set, stats })
  }
}

/// Hands out `<name>_fluent.go`, then `<name>_1_fluent.go`, ... for packages
/// sharing a name.
#[derive(Debug, Default)]
struct FileNames {
  seen: HashMap<String, usize>,
}

impl FileNames {
  fn next(&mut self, package_name: &str) -> String {
    let count = self.seen.entry(package_name.to_string()).or_default();
    let name = if *count == 0 {
      format!("{package_name}{FILE_SUFFIX}")
    } else {
      format!("{package_name}_{count}{FILE_SUFFIX}")
    };
    *count += 1;
    name
  }
}
