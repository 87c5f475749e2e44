use std::collections::HashSet;

use super::attrs::{GenerationSet, TypeAttribute, TypeKey};

/// Marks every node that names a structure receiving a builder in this run.
///
/// Runs once, after every structure of every package has been extracted:
/// whether `B` needs a builder-typed setter inside `A` depends on the complete
/// generation set, not on the order the structures were found in. Returns the
/// number of nodes marked.
pub(crate) fn propagate_builders(set: &mut GenerationSet) -> usize {
  let generated: HashSet<TypeKey> = set.structs().filter_map(TypeAttribute::key).collect();

  let mut marked = 0;
  for structure in set.structs_mut() {
    for field in &mut structure.fields {
      marked += mark(&mut field.ty, &generated);
    }
  }
  marked
}

fn mark(node: &mut TypeAttribute, generated: &HashSet<TypeKey>) -> usize {
  let mut marked = 0;
  if node.is_struct()
    && let Some(key) = node.key()
    && generated.contains(&key)
  {
    node.has_builder = true;
    marked += 1;
  }

  for child in node.children_mut() {
    marked += mark(child, generated);
  }
  marked
}
