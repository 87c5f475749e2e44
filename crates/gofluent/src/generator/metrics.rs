use super::warnings::GenerationWarning;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub packages_requested: usize,
  /// Requested packages plus everything pulled in while extracting fields.
  pub packages_loaded: usize,
  pub structs_generated: usize,
  pub setters_generated: usize,
  pub files_generated: usize,
  pub builder_references: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_packages(&mut self, requested: usize, loaded: usize) {
    self.packages_requested = requested;
    self.packages_loaded = loaded;
  }

  pub fn record_file(&mut self, builders: usize, setters: usize) {
    self.files_generated += 1;
    self.structs_generated += builders;
    self.setters_generated += setters;
  }

  pub fn record_builder_references(&mut self, count: usize) {
    self.builder_references += count;
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }

  pub fn skipped_fields(&self) -> usize {
    self.warnings.iter().filter(|warning| warning.is_skipped_item()).count()
  }
}
