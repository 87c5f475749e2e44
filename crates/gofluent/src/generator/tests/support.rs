use gofluent_packages::{
  FieldDecl, MethodDecl, MethodSig, Package, Signature, StaticLoader, TypeDecl, TypeExpr, Underlying,
};

use crate::generator::orchestrator::{GeneratedOutput, GeneratorConfig, Orchestrator, OutputMode};

pub(crate) const MODELS: &str = "example.com/shop/models";
pub(crate) const PAY: &str = "example.com/shop/pay";

pub(crate) fn builtin(name: &str) -> TypeExpr {
  TypeExpr::builtin(name)
}

pub(crate) fn named(package: &str, name: &str) -> TypeExpr {
  TypeExpr::named(name, package)
}

pub(crate) fn field(name: &str, ty: TypeExpr) -> FieldDecl {
  FieldDecl {
    names: vec![name.to_string()],
    ty,
  }
}

fn decl(name: &str, underlying: Underlying) -> TypeDecl {
  TypeDecl {
    name: name.to_string(),
    file: None,
    alias: false,
    underlying,
    methods: vec![],
  }
}

pub(crate) fn struct_decl(name: &str, fields: Vec<FieldDecl>) -> TypeDecl {
  decl(name, Underlying::Struct { fields })
}

pub(crate) fn interface_decl(name: &str, methods: Vec<MethodSig>) -> TypeDecl {
  decl(name, Underlying::Interface { methods })
}

pub(crate) fn type_decl(name: &str, expr: TypeExpr) -> TypeDecl {
  decl(name, Underlying::Type { expr })
}

pub(crate) fn method(name: &str, pointer_receiver: bool, params: Vec<TypeExpr>, results: Vec<TypeExpr>) -> MethodDecl {
  MethodDecl {
    name: name.to_string(),
    pointer_receiver,
    signature: Signature {
      params,
      results,
      variadic: false,
    },
  }
}

pub(crate) fn sig(name: &str, params: Vec<TypeExpr>, results: Vec<TypeExpr>) -> MethodSig {
  MethodSig {
    name: name.to_string(),
    signature: Signature {
      params,
      results,
      variadic: false,
    },
  }
}

pub(crate) fn package(id: &str, name: &str, types: Vec<TypeDecl>) -> Package {
  Package {
    id: id.to_string(),
    name: name.to_string(),
    types,
  }
}

fn pay_method() -> MethodSig {
  sig("Pay", vec![builtin("int")], vec![builtin("error")])
}

/// `Order`, `LineItem` and `Customer` plus the `Payer` interfaces and a named map.
pub(crate) fn models_package() -> Package {
  package(
    MODELS,
    "models",
    vec![
      struct_decl(
        "Order",
        vec![
          field("ID", builtin("string")),
          field("Items", TypeExpr::slice(named(MODELS, "LineItem"))),
          field("Tags", TypeExpr::map(builtin("string"), builtin("string"))),
          field("Payer", named(MODELS, "Payer")),
          field("Customer", TypeExpr::pointer(named(MODELS, "Customer"))),
          field("note", builtin("string")),
        ],
      ),
      struct_decl(
        "LineItem",
        vec![field("SKU", builtin("string")), field("Quantity", builtin("int"))],
      ),
      struct_decl(
        "Customer",
        vec![
          field("Name", builtin("string")),
          field("Orders", TypeExpr::slice(TypeExpr::pointer(named(MODELS, "Order")))),
        ],
      ),
      interface_decl("Payer", vec![pay_method()]),
      interface_decl("payer", vec![pay_method()]),
      type_decl("Labels", TypeExpr::map(builtin("string"), builtin("string"))),
    ],
  )
}

/// `CreditCard` pays through a value receiver, `Cash` through a pointer receiver.
pub(crate) fn pay_package() -> Package {
  let mut card = struct_decl("CreditCard", vec![field("Number", builtin("string"))]);
  card
    .methods
    .push(method("Pay", false, vec![builtin("int")], vec![builtin("error")]));

  let mut cash = struct_decl("Cash", vec![field("Amount", builtin("int"))]);
  cash
    .methods
    .push(method("Pay", true, vec![builtin("int")], vec![builtin("error")]));

  package(PAY, "pay", vec![card, cash])
}

pub(crate) fn config(packages: &[&str], mode: OutputMode) -> GeneratorConfig {
  GeneratorConfig::builder()
    .packages(packages.iter().map(ToString::to_string).collect::<Vec<_>>())
    .output_package("fluent")
    .mode(mode)
    .build()
}

pub(crate) fn generate(loader_packages: Vec<Package>, packages: &[&str], mode: OutputMode) -> GeneratedOutput {
  let mut loader = StaticLoader::new(loader_packages);
  Orchestrator::new(config(packages, mode))
    .generate(&mut loader)
    .expect("generation should succeed")
}

/// Concatenated contents of every generated file.
pub(crate) fn generate_code(loader_packages: Vec<Package>, packages: &[&str]) -> String {
  generate(loader_packages, packages, OutputMode::PerPackage)
    .files
    .into_iter()
    .map(|file| file.contents)
    .collect()
}

pub(crate) fn assert_contains(code: &str, expected: &str, context: &str) {
  assert!(code.contains(expected), "{context}: expected `{expected}` in:\n{code}");
}

pub(crate) fn assert_not_contains(code: &str, unexpected: &str, context: &str) {
  assert!(
    !code.contains(unexpected),
    "{context}: did not expect `{unexpected}` in:\n{code}"
  );
}
