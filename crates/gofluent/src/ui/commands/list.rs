use anyhow::Context as _;
use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};
use gofluent_packages::ManifestLoader;

use super::generate::normalize_packages;
use crate::{
  generator::orchestrator::{GeneratorConfig, Orchestrator, StructSummary},
  ui::{Colors, PackageSource, Tone, term_width},
};

pub async fn list_structs(source: PackageSource, colors: &Colors) -> anyhow::Result<()> {
  let config = GeneratorConfig::builder()
    .packages(normalize_packages(source.packages)?)
    .output_package("fluent")
    .build();
  let orchestrator = Orchestrator::new(config);
  let mut loader = ManifestLoader::new(source.manifests);

  let (summaries, _) = tokio::task::spawn_blocking(move || orchestrator.analyze(&mut loader))
    .await
    .context("analysis task panicked")??;

  println!("{}", structs_table(&summaries, colors));
  Ok(())
}

fn structs_table(summaries: &[StructSummary], colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in ["PACKAGE", "STRUCT", "BUILDER", "SETTERS", "SKIPPED"] {
    row.add_cell(Cell::new(header).fg(colors.cell(Tone::Label)));
  }
  table.set_header(row);

  for summary in summaries {
    let mut row = Row::new();
    row.add_cell(Cell::new(&summary.package).fg(colors.cell(Tone::Muted)));
    row.add_cell(
      Cell::new(&summary.name)
        .fg(colors.cell(Tone::Value))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(&summary.builder).fg(colors.cell(Tone::Accent)));
    row.add_cell(Cell::new(summary.setters.join("\n")).fg(colors.cell(Tone::Primary)));
    row.add_cell(Cell::new(summary.skipped.join("\n")).fg(colors.cell(Tone::Muted)));
    table.add_row(row);
  }

  table
}
