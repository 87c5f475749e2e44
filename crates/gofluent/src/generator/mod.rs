pub(crate) mod attrs;
pub(crate) mod codegen;
pub(crate) mod context;
pub(crate) mod discover;
pub(crate) mod extract;
pub(crate) mod imports;
pub mod metrics;
pub mod orchestrator;
pub(crate) mod propagate;
pub(crate) mod resolver;
pub mod warnings;

#[cfg(test)]
mod tests;
