use gofluent_packages::TypeExpr;

use super::support::{
  MODELS, PAY, assert_contains, assert_not_contains, builtin, field, generate, generate_code, interface_decl,
  models_package, named, package, pay_package, sig, struct_decl, type_decl,
};
use crate::generator::{codegen::GENERATED_MARKER, orchestrator::OutputMode};

#[test]
fn test_order_scenario() {
  let code = generate_code(vec![models_package(), pay_package()], &[MODELS, PAY]);

  for expected in [
    "func NewOrder() *OrderBuilder {",
    "func (b *OrderBuilder) WithID(value string) *OrderBuilder {",
    "func (b *OrderBuilder) AddItems(item *LineItemBuilder) *OrderBuilder {",
    "func (b *OrderBuilder) PutTags(key string, value string) *OrderBuilder {",
    "func (b *OrderBuilder) WithPayer_CreditCard(value *CreditCardBuilder) *OrderBuilder {",
    "func (b *OrderBuilder) WithPayer_Cash(value *CashBuilder) *OrderBuilder {",
    "func (b *OrderBuilder) Build() *models.Order {",
  ] {
    assert_contains(&code, expected, "order builder");
  }
  assert_not_contains(&code, "WithPayer(", "interface fields have no generic setter");
  assert_not_contains(&code, "Withnote", "unexported fields");
}

#[test]
fn test_constructor_initialises_containers() {
  let code = generate_code(vec![models_package(), pay_package()], &[MODELS, PAY]);

  assert_contains(
    &code,
    "func NewOrder() *OrderBuilder {\n\ts := &models.Order{}\n\ts.Items = []models.LineItem{}\n\ts.Tags = map[string]string{}\n\treturn &OrderBuilder{s: s}\n}",
    "zero-value constructor",
  );
  assert_contains(
    &code,
    "\tif s.Tags == nil {\n\t\ts.Tags = map[string]string{}\n\t}\n",
    "wrapping constructor",
  );
  assert_contains(&code, "func FromOrder(s *models.Order) *OrderBuilder {\n\tif s.Items == nil {", "wrapping constructor");
}

#[test]
fn test_builder_arguments_are_finalised() {
  let code = generate_code(vec![models_package(), pay_package()], &[MODELS, PAY]);

  assert_contains(&code, "\tb.s.Items = append(b.s.Items, *item.Build())\n", "value element");
  assert_contains(&code, "\tb.s.Payer = *value.Build()\n", "value-receiver implementation");
  assert_contains(&code, "\tb.s.Payer = value.Build()\n", "pointer-receiver implementation");
  assert_contains(
    &code,
    "func (b *OrderBuilder) WithCustomer(value *CustomerBuilder) *OrderBuilder {\n\tb.s.Customer = value.Build()\n",
    "pointer field",
  );
  assert_contains(&code, "\tb.s.Orders = append(b.s.Orders, item.Build())\n", "pointer element");
}

#[test]
fn test_plain_values_are_assigned_unchanged() {
  let code = generate_code(vec![models_package(), pay_package()], &[MODELS, PAY]);

  assert_contains(&code, "\tb.s.ID = value\n", "builtin field");
  assert_contains(&code, "\tb.s.Tags[key] = value\n", "map insert");
  assert_contains(
    &code,
    "func (b *OrderBuilder) WithItems(value []models.LineItem) *OrderBuilder {\n\tb.s.Items = value\n",
    "whole slice setter",
  );
}

#[test]
fn test_zero_implementations_drop_the_field() {
  let output = generate(vec![models_package(), pay_package()], &[MODELS], OutputMode::PerPackage);
  let code = &output.files[0].contents;

  assert_not_contains(code, "Payer", "field without implementations");
  assert_contains(code, "WithID", "remaining fields");
  assert_eq!(output.stats.skipped_fields(), 1);
  assert!(output.stats.warnings[0].to_string().starts_with("Order.Payer:"));
}

#[test]
fn test_shared_final_segment_is_aliased() {
  const BILLING: &str = "example.com/billing/models";
  let shop = package(
    MODELS,
    "models",
    vec![struct_decl("Invoice", vec![field("Account", named(BILLING, "Account"))])],
  );
  let billing = package(
    BILLING,
    "models",
    vec![struct_decl("Account", vec![field("IBAN", builtin("string"))])],
  );

  let code = generate_code(vec![shop, billing], &[MODELS]);
  assert_contains(
    &code,
    "import (\n\tmodels_1 \"example.com/billing/models\"\n\tmodels \"example.com/shop/models\"\n)",
    "sorted import block",
  );
  assert_contains(
    &code,
    "WithAccount(value models_1.Account) *InvoiceBuilder {\n\tb.s.Account = value\n",
    "foreign type without builder",
  );
}

#[test]
fn test_unreferenced_imports_are_omitted() {
  let output = generate(vec![models_package(), pay_package()], &[MODELS, PAY], OutputMode::PerPackage);
  let models = &output.files[0];

  assert_eq!(models.file_name, "models_fluent.go");
  assert_not_contains(&models.contents, "\"example.com/shop/pay\"", "implementations set through builders");
}

#[test]
fn test_header() {
  let output = generate(vec![pay_package()], &[PAY], OutputMode::PerPackage);
  assert!(
    output.files[0]
      .contents
      .starts_with(&format!("{GENERATED_MARKER}\n\npackage fluent\n\nimport (\n\tpay \"example.com/shop/pay\"\n)\n\n"))
  );
  assert!(output.files[0].contents.ends_with("\treturn b\n}\n"));
}

#[test]
fn test_named_and_pointer_containers() {
  let shop = package(
    MODELS,
    "models",
    vec![
      type_decl("Labels", TypeExpr::map(builtin("string"), builtin("string"))),
      type_decl("Tree", TypeExpr::map(builtin("string"), named(MODELS, "Tree"))),
      struct_decl(
        "Product",
        vec![
          field("Labels", named(MODELS, "Labels")),
          field("Notes", TypeExpr::pointer(TypeExpr::slice(builtin("string")))),
          field("Root", named(MODELS, "Tree")),
          field("Deep", TypeExpr::pointer(TypeExpr::pointer(TypeExpr::slice(builtin("int"))))),
        ],
      ),
    ],
  );
  let code = generate_code(vec![shop], &[MODELS]);

  assert_contains(&code, "\ts.Labels = models.Labels{}\n", "named map literal");
  assert_contains(&code, "PutLabels(key string, value string)", "named map insert");
  assert_contains(&code, "\ts.Notes = &[]string{}\n", "pointer slice literal");
  assert_contains(&code, "\t*b.s.Notes = append(*b.s.Notes, item)\n", "pointer slice append");
  assert_contains(&code, "PutRoot(key string, value models.Tree)", "recursive named map");
  assert_contains(&code, "WithDeep(value **[]int)", "deep pointer setter");
  assert_not_contains(&code, "AddDeep", "deep pointer container");
}

#[test]
fn test_func_fields_keep_their_signature() {
  let shop = package(
    MODELS,
    "models",
    vec![
      struct_decl("LineItem", vec![]),
      struct_decl(
        "Hooks",
        vec![field(
          "OnItem",
          TypeExpr::Func {
            params: vec![named(MODELS, "LineItem"), TypeExpr::slice(builtin("string"))],
            results: vec![builtin("error")],
            variadic: true,
          },
        )],
      ),
    ],
  );
  let code = generate_code(vec![shop], &[MODELS]);

  assert_contains(
    &code,
    "WithOnItem(value func(models.LineItem, ...string) error) *HooksBuilder {\n\tb.s.OnItem = value\n",
    "func parameters are never builders",
  );
}

#[test]
fn test_colliding_builder_names_are_prefixed() {
  const BILLING: &str = "example.com/billing";
  let shop = package(MODELS, "models", vec![struct_decl("Order", vec![])]);
  let billing = package(BILLING, "billing", vec![struct_decl("Order", vec![])]);

  let output = generate(vec![shop, billing], &[MODELS, BILLING], OutputMode::PerPackage);
  let code: String = output.files.iter().map(|file| file.contents.as_str()).collect();

  assert_contains(&code, "func NewOrder() *OrderBuilder {", "first structure");
  assert_contains(&code, "func NewBillingOrder() *BillingOrderBuilder {", "renamed structure");
  assert_contains(&code, "func FromBillingOrder(s *billing.Order) *BillingOrderBuilder {", "renamed wrapper");
  assert_eq!(output.stats.warnings.len(), 1);
  assert!(!output.stats.warnings[0].is_skipped_item());
}

#[test]
fn test_package_named_like_a_local_gets_a_suffixed_alias() {
  const VALUE: &str = "example.com/shop/value";
  let value = package(
    VALUE,
    "value",
    vec![
      struct_decl("Box", vec![field("Items", TypeExpr::slice(named(VALUE, "Item")))]),
      struct_decl("Item", vec![field("Name", builtin("string"))]),
    ],
  );
  let code = generate_code(vec![value], &[VALUE]);

  assert_contains(&code, "import (\n\tvalue_1 \"example.com/shop/value\"\n)", "import block");
  assert_contains(
    &code,
    "func FromBox(s *value_1.Box) *BoxBuilder {\n\tif s.Items == nil {\n\t\ts.Items = []value_1.Item{}\n",
    "wrapping constructor",
  );
  assert_contains(&code, "func (b *BoxBuilder) WithItems(value []value_1.Item) *BoxBuilder {", "slice setter");
  assert_not_contains(&code, " value.", "alias shadowed by parameter");
}

#[test]
fn test_nested_interfaces_are_written_by_name() {
  const CONTEXT: &str = "example.com/std/context";
  let context = package(
    CONTEXT,
    "context",
    vec![interface_decl("Context", vec![sig("Err", vec![], vec![builtin("error")])])],
  );
  let shop = package(
    MODELS,
    "models",
    vec![struct_decl(
      "Hooks",
      vec![
        field(
          "OnPay",
          TypeExpr::Func {
            params: vec![named(CONTEXT, "Context")],
            results: vec![builtin("error")],
            variadic: false,
          },
        ),
        field("Scopes", TypeExpr::slice(named(CONTEXT, "Context"))),
      ],
    )],
  );

  let output = generate(vec![shop, context], &[MODELS], OutputMode::PerPackage);
  let code = &output.files[0].contents;

  assert_contains(code, "WithOnPay(value func(context.Context) error) *HooksBuilder {", "func field");
  assert_contains(code, "AddScopes(item context.Context) *HooksBuilder {", "slice of interfaces");
  assert_contains(code, "\tcontext \"example.com/std/context\"\n", "interface package import");
  assert!(output.stats.warnings.is_empty());
}
