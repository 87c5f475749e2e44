use std::collections::{HashMap, HashSet};

use inflections::Inflect;

use crate::generator::{
  attrs::{GenerationSet, TypeAttribute, TypeKey},
  imports::alias_base,
  warnings::GenerationWarning,
};

/// Base names for generated builders, unique within the output package.
///
/// A base `Order` yields `OrderBuilder`, `NewOrder` and `FromOrder`. The first
/// structure with a given name keeps it; later ones are prefixed with their
/// package alias in PascalCase (`BillingOrder`).
#[derive(Debug, Clone, Default)]
pub(crate) struct BuilderNames {
  names: HashMap<TypeKey, String>,
}

impl BuilderNames {
  pub(crate) fn assign(set: &GenerationSet) -> (Self, Vec<GenerationWarning>) {
    let mut names = HashMap::new();
    let mut taken = HashSet::new();
    let mut warnings = vec![];

    for structure in set.structs() {
      let (Some(key), Some(package)) = (structure.key(), &structure.package) else {
        continue;
      };

      let base = if taken.contains(&structure.type_name) {
        let prefixed = format!("{}{}", alias_base(&package.id).to_pascal_case(), structure.type_name);
        let mut candidate = prefixed.clone();
        let mut counter = 1;
        while taken.contains(&candidate) {
          counter += 1;
          candidate = format!("{prefixed}{counter}");
        }
        warnings.push(GenerationWarning::RenamedBuilder {
          type_name: key.to_string(),
          builder: Self::builder_type(&candidate),
        });
        candidate
      } else {
        structure.type_name.clone()
      };

      taken.insert(base.clone());
      names.insert(key, base);
    }

    (Self { names }, warnings)
  }

  pub(crate) fn base(&self, node: &TypeAttribute) -> Option<&str> {
    self.names.get(&node.key()?).map(String::as_str)
  }

  pub(crate) fn builder_type(base: &str) -> String {
    format!("{base}Builder")
  }

  pub(crate) fn constructor(base: &str) -> String {
    format!("New{base}")
  }

  pub(crate) fn wrapper(base: &str) -> String {
    format!("From{base}")
  }
}
