use std::path::PathBuf;

use gofluent_packages::ManifestLoader;

use super::support::{MODELS, PAY, assert_contains, assert_not_contains, config};
use crate::generator::orchestrator::{GeneratedOutput, Orchestrator, OutputMode};

fn manifest_root() -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/manifests")
}

fn generate_shop() -> GeneratedOutput {
  let mut loader = ManifestLoader::new(manifest_root());
  Orchestrator::new(config(&[MODELS, PAY], OutputMode::PerPackage))
    .generate(&mut loader)
    .unwrap()
}

#[test]
fn test_shop_manifests_generate_both_packages() {
  let output = generate_shop();
  let names: Vec<_> = output.files.iter().map(|file| file.file_name.as_str()).collect();
  assert_eq!(names, vec!["models_fluent.go", "pay_fluent.go"]);
  assert_eq!(output.stats.packages_loaded, 3);
  assert_eq!(output.stats.structs_generated, 5);
}

#[test]
fn test_shop_models_file() {
  let output = generate_shop();
  let code = &output.files[0].contents;

  assert_contains(
    code,
    "import (\n\tmodels_1 \"example.com/billing/models\"\n\tmodels \"example.com/shop/models\"\n)",
    "imports",
  );
  assert_contains(code, "WithPayer_CreditCard(value *CreditCardBuilder)", "interface variant");
  assert_contains(code, "WithPayer_Cash(value *CashBuilder)", "interface variant");
  assert_contains(code, "WithInvoice(value models_1.Invoice)", "lazily loaded type");
  assert_contains(code, "WithQuantity(value int)", "grouped field names");
  assert_contains(code, "WithReserved(value int)", "grouped field names");
  assert_contains(code, "\ts.Labels = models.Labels{}\n", "named map");
  assert_not_contains(code, "Draft", "alias declarations");
  assert_not_contains(code, "Audit", "internal package");
  assert_not_contains(code, "Updates", "channel field");
}

#[test]
fn test_shop_skips_are_reported() {
  let output = generate_shop();
  let skipped: Vec<_> = output.stats.warnings.iter().map(ToString::to_string).collect();
  assert_eq!(
    skipped,
    vec![
      "Order.Audit: package example.com/shop/internal/audit is internal",
      "Order.Updates: unsupported type chan string",
    ]
  );
}

#[test]
fn test_missing_manifest_names_the_path() {
  let mut loader = ManifestLoader::new(manifest_root());
  let error = Orchestrator::new(config(&["example.com/shop/orders"], OutputMode::PerPackage))
    .generate(&mut loader)
    .unwrap_err();
  assert!(format!("{error:#}").contains("example.com/shop/orders/package.json"));
}
