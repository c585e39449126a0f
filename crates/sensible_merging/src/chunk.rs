use hashlink::LinkedHashSet;
use sensible_merging_common::{ChunkId, ModuleId};

#[derive(Debug, Clone)]
pub struct Chunk {
  pub(crate) id: ChunkId,
  pub(crate) name: Option<String>,
  // The order is only to make the output stable.
  pub(crate) modules: LinkedHashSet<ModuleId>,
  pub(crate) entry_modules: LinkedHashSet<ModuleId>,
  /// The chunk is loaded by an entry point and its URL is fixed.
  pub(crate) is_initial: bool,
  pub(crate) has_runtime: bool,
  pub(crate) prevent_integration: bool,
}

impl Chunk {
  pub fn new(id: impl Into<ChunkId>) -> Self {
    Self {
      id: id.into(),
      name: None,
      modules: Default::default(),
      entry_modules: Default::default(),
      is_initial: false,
      has_runtime: false,
      prevent_integration: false,
    }
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  pub fn with_modules<M: Into<ModuleId>>(mut self, modules: impl IntoIterator<Item = M>) -> Self {
    for module in modules.into_iter().map(Into::into) {
      if !self.modules.contains(&module) {
        self.modules.insert(module);
      }
    }
    self
  }

  /// Marks `modules` as entry modules of this chunk. They are added to the chunk as well.
  pub fn with_entry_modules<M: Into<ModuleId>>(
    mut self,
    modules: impl IntoIterator<Item = M>,
  ) -> Self {
    for module in modules.into_iter().map(Into::into) {
      if !self.modules.contains(&module) {
        self.modules.insert(module.clone());
      }
      self.entry_modules.insert(module);
    }
    self
  }

  pub fn initial(mut self, is_initial: bool) -> Self {
    self.is_initial = is_initial;
    self
  }

  pub fn runtime(mut self, has_runtime: bool) -> Self {
    self.has_runtime = has_runtime;
    self
  }

  pub fn prevent_integration(mut self, prevent_integration: bool) -> Self {
    self.prevent_integration = prevent_integration;
    self
  }

  pub fn id(&self) -> &ChunkId {
    &self.id
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn modules(&self) -> impl Iterator<Item = &ModuleId> {
    self.modules.iter()
  }

  pub fn is_initial(&self) -> bool {
    self.is_initial
  }

  pub fn has_runtime(&self) -> bool {
    self.has_runtime
  }

  pub fn has_entry_modules(&self) -> bool {
    !self.entry_modules.is_empty()
  }

  /// Name the chunk should carry after `source` is integrated into `self`.
  ///
  /// The shorter name wins, ties are broken lexicographically. Between an entry chunk and a
  /// non-entry chunk, the entry chunk's name is kept.
  pub(crate) fn integrated_name(&self, source: &Chunk) -> Option<String> {
    match (&self.name, &source.name) {
      (Some(target_name), Some(source_name)) => {
        if self.has_entry_modules() == source.has_entry_modules() {
          if target_name.len() != source_name.len() {
            if target_name.len() < source_name.len() {
              Some(target_name.clone())
            } else {
              Some(source_name.clone())
            }
          } else {
            Some(target_name.min(source_name).clone())
          }
        } else if source.has_entry_modules() {
          Some(source_name.clone())
        } else {
          Some(target_name.clone())
        }
      }
      (None, Some(source_name)) => Some(source_name.clone()),
      (target_name, None) => target_name.clone(),
    }
  }
}
