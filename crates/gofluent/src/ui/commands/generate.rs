use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use gofluent_packages::ManifestLoader;
use itertools::Itertools;

use crate::{
  generator::{
    metrics::GenerationStats,
    orchestrator::{GeneratedFile, GeneratedOutput, GeneratorConfig, Orchestrator, OutputMode},
  },
  ui::{Colors, GenerateCommand, PackageSource, Tone},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub packages: Vec<String>,
  pub manifests: PathBuf,
  pub output: PathBuf,
  pub output_package: String,
  pub mode: OutputMode,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      source: PackageSource { packages, manifests },
      output,
      out_pkg,
      out_file,
      verbose,
      quiet,
    } = command;

    let packages = normalize_packages(packages)?;
    let output_package = match out_pkg {
      Some(name) => name,
      None => default_package_name(&output)?,
    };
    validate_package_name(&output_package)?;

    let mode = match out_file {
      None => OutputMode::PerPackage,
      Some(file_name) => {
        validate_file_name(&file_name)?;
        OutputMode::Consolidated { file_name }
      }
    };

    Ok(Self {
      packages,
      manifests,
      output,
      output_package,
      mode,
      verbose,
      quiet,
    })
  }

  fn generator_config(&self) -> GeneratorConfig {
    GeneratorConfig::builder()
      .packages(self.packages.clone())
      .output_package(self.output_package.clone())
      .mode(self.mode.clone())
      .build()
  }

  async fn run_generation(&self) -> anyhow::Result<GeneratedOutput> {
    let orchestrator = Orchestrator::new(self.generator_config());
    let mut loader = ManifestLoader::new(self.manifests.clone());
    tokio::task::spawn_blocking(move || orchestrator.generate(&mut loader))
      .await
      .context("generation task panicked")?
  }

  async fn write_files(&self, files: &[GeneratedFile]) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&self.output)
      .await
      .with_context(|| format!("failed to create {}", self.output.display()))?;
    for file in files {
      let path = self.output.join(&file.file_name);
      tokio::fs::write(&path, &file.contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
  }
}

/// Trims entries, drops empty ones and duplicates, keeping first-seen order.
pub(crate) fn normalize_packages(packages: Vec<String>) -> anyhow::Result<Vec<String>> {
  let packages: Vec<String> = packages
    .into_iter()
    .map(|package| package.trim().trim_end_matches('/').to_string())
    .filter(|package| !package.is_empty())
    .unique()
    .collect();
  if packages.is_empty() {
    anyhow::bail!("At least one package import path (-p) is required");
  }
  Ok(packages)
}

/// Go package name derived from the output directory's final component.
fn default_package_name(output: &Path) -> anyhow::Result<String> {
  let absolute = std::path::absolute(output).with_context(|| format!("invalid output path {}", output.display()))?;
  let name = absolute
    .file_name()
    .and_then(|name| name.to_str())
    .ok_or_else(|| anyhow::anyhow!("Cannot derive a package name from {}, pass --out-pkg", output.display()))?;

  Ok(
    name
      .chars()
      .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
      .collect(),
  )
}

fn validate_package_name(name: &str) -> anyhow::Result<()> {
  let mut chars = name.chars();
  let valid_start = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_');
  if !valid_start || !chars.all(|c| c.is_alphanumeric() || c == '_') {
    anyhow::bail!("Invalid Go package name '{name}'");
  }
  Ok(())
}

fn validate_file_name(file_name: &str) -> anyhow::Result<()> {
  if file_name.contains(['/', '\\']) {
    anyhow::bail!("--out-file takes a file name, not a path: '{file_name}'");
  }
  if !file_name.ends_with(".go") {
    anyhow::bail!("--out-file must end in .go: '{file_name}'");
  }
  Ok(())
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.tone(Tone::Timestamp)));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.tone(Tone::Label)),
        value.with(self.colors.tone(Tone::Value))
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!(
        "Loading {} from: {}",
        self.config.packages.join(", "),
        self.config.manifests.display()
      )
      .with(self.colors.tone(Tone::Primary))
      .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(
      &format!(
        "Generating package {} ({})...",
        self.config.output_package, self.config.mode
      )
      .with(self.colors.tone(Tone::Primary))
      .to_string(),
    );
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Packages loaded:", stats.packages_loaded.to_string());
    self.stat("", format!("{} requested", stats.packages_requested));
    self.stat("Builders generated:", stats.structs_generated.to_string());
    self.stat("Setters generated:", stats.setters_generated.to_string());
    if self.config.verbose {
      self.stat("Builder references:", stats.builder_references.to_string());
    }
    self.stat("Files generated:", stats.files_generated.to_string());

    let skipped = stats.skipped_fields();
    if skipped > 0 {
      self.stat("Fields skipped:", skipped.to_string());
    }
    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      if !warning.is_skipped_item() && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.tone(Tone::Accent)),
        warning.to_string().with(self.colors.tone(Tone::Primary))
      );
    }
  }

  fn log_writing(&self, files: &[GeneratedFile]) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.tone(Tone::Primary))
        .to_string(),
    );
    if self.config.verbose && !self.config.quiet {
      for file in files {
        println!("            {}", file.file_name.as_str().with(self.colors.tone(Tone::Muted)));
      }
    }
  }

  fn log_success(&self, files: usize) {
    if self.config.quiet {
      return;
    }
    let message = if files == 0 {
      "No exported structs found, nothing written".to_string()
    } else {
      format!("Successfully generated {files} file(s)")
    };
    println!();
    println!(
      "{} {}",
      format_timestamp().with(self.colors.tone(Tone::Timestamp)),
      message.with(self.colors.tone(Tone::Success))
    );
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  logger.log_generating();
  let output = config.run_generation().await?;
  logger.print_statistics(&output.stats);

  logger.log_writing(&output.files);
  config.write_files(&output.files).await?;

  logger.log_success(output.files.len());
  Ok(())
}
