use std::collections::HashSet;

use gofluent_packages::last_segment;
use indexmap::IndexMap;

use super::attrs::TypeAttribute;

/// Go keywords, which can never be an alias.
const KEYWORDS: &[&str] = &[
  "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough", "for", "func", "go", "goto",
  "if", "import", "interface", "map", "package", "range", "return", "select", "struct", "switch", "type", "var",
];

/// Identifiers generated code declares or refers to unqualified. An alias
/// equal to one of them would be shadowed inside builder methods.
const RESERVED: &[&str] = &[
  "b", "s", "value", "item", "key", "append", "nil", "any", "bool", "byte", "comparable", "complex64", "complex128",
  "error", "float32", "float64", "int", "int8", "int16", "int32", "int64", "rune", "string", "uint", "uint8", "uint16",
  "uint32", "uint64", "uintptr",
];

/// Import path to alias mapping for one output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ImportTable {
  aliases: IndexMap<String, String>,
}

impl ImportTable {
  pub(crate) fn alias(&self, path: &str) -> Option<&str> {
    self.aliases.get(path).map(String::as_str)
  }

  /// `(alias, path)` pairs in first-seen order.
  #[cfg(test)]
  pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .aliases
      .iter()
      .map(|(path, alias)| (alias.as_str(), path.as_str()))
  }

  #[cfg(test)]
  pub(crate) fn len(&self) -> usize {
    self.aliases.len()
  }

  fn insert(&mut self, path: &str, taken: &mut HashSet<String>) {
    if self.aliases.contains_key(path) {
      return;
    }

    let base = alias_base(path);
    let mut alias = base.clone();
    let mut suffix = 0;
    while taken.contains(&alias) {
      suffix += 1;
      alias = format!("{base}_{suffix}");
    }

    taken.insert(alias.clone());
    self.aliases.insert(path.to_string(), alias);
  }
}

/// Collects every package referenced by `structs` (the structures themselves,
/// nested children and interface implementations) and assigns aliases from
/// the final path segment. Later packages sharing a segment get `_1`, `_2`, ...
/// and so does a segment that is a keyword or a reserved identifier.
pub(crate) fn reconcile_imports<'a>(structs: impl IntoIterator<Item = &'a TypeAttribute>) -> ImportTable {
  let mut table = ImportTable::default();
  let mut taken: HashSet<String> = KEYWORDS.iter().chain(RESERVED).map(ToString::to_string).collect();
  for structure in structs {
    collect(structure, &mut table, &mut taken);
  }
  table
}

fn collect(node: &TypeAttribute, table: &mut ImportTable, taken: &mut HashSet<String>) {
  if let Some(package) = &node.package {
    table.insert(&package.id, taken);
  }
  for child in node.children() {
    collect(child, table, taken);
  }
}

/// Final path segment turned into a Go identifier.
pub(crate) fn alias_base(path: &str) -> String {
  let segment: String = last_segment(path)
    .chars()
    .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
    .collect();

  match segment.chars().next() {
    None => "pkg".to_string(),
    Some(first) if first.is_ascii_digit() => format!("_{segment}"),
    Some(_) => segment,
  }
}
