use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "gofluent")]
#[command(author, version, about = "Fluent builder generator for Go structs")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List what would be generated
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate builders for the structs of one or more Go packages
  Generate(GenerateCommand),
}

/// Where packages come from.
#[derive(Args, Debug, Clone)]
pub struct PackageSource {
  /// Import paths of the packages to generate builders for (comma-separated)
  #[arg(short, long, value_name = "IMPORT_PATHS", value_delimiter = ',', required = true)]
  pub packages: Vec<String>,

  /// Directory holding `<import path>/package.json` manifests
  #[arg(short, long, value_name = "DIR", default_value = ".")]
  pub manifests: PathBuf,
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  #[command(flatten)]
  pub source: PackageSource,

  /// Directory the generated files are written to
  #[arg(short, long, value_name = "DIR")]
  pub output: PathBuf,

  /// Package clause of the generated files (default: name of the output directory)
  #[arg(long, value_name = "NAME")]
  pub out_pkg: Option<String>,

  /// Write every builder into this single file inside the output directory
  #[arg(long, value_name = "FILE")]
  pub out_file: Option<String>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List the structs that get builders, with their setters and skipped fields
  Structs(PackageSource),
}
