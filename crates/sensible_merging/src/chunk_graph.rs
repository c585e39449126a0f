use hashlink::LinkedHashMap;
use rustc_hash::FxHashMap;
use sensible_merging_common::{ChunkId, ModuleId, ModuleRef};

use crate::{BuildError, BuildResult, Chunk, ChunkGraphPort, ChunkSizeOptions, Module};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkGraphOptions {
  pub chunk_overhead: f64,
  pub entry_chunk_multiplicator: f64,
}

impl Default for ChunkGraphOptions {
  fn default() -> Self {
    Self {
      chunk_overhead: 10000.0,
      entry_chunk_multiplicator: 10.0,
    }
  }
}

/// An in-memory chunk graph for hosts that don't bring their own.
#[derive(Debug, Default)]
pub struct ChunkGraph {
  pub(crate) options: ChunkGraphOptions,
  pub(crate) chunk_by_id: LinkedHashMap<ChunkId, Chunk>,
  pub(crate) module_by_id: FxHashMap<ModuleId, Module>,
}

impl ChunkGraph {
  pub fn new(options: ChunkGraphOptions) -> Self {
    Self {
      options,
      ..Default::default()
    }
  }

  pub fn add_module(&mut self, module: Module) {
    self.module_by_id.insert(module.id.clone(), module);
  }

  pub fn add_chunk(&mut self, chunk: Chunk) -> BuildResult<()> {
    if let Some(unknown) = chunk
      .modules
      .iter()
      .find(|id| !self.module_by_id.contains_key(*id))
    {
      return Err(BuildError::panic(format!(
        "Chunk \"{}\" references unknown module \"{}\"",
        chunk.id, unknown
      )));
    }
    self.chunk_by_id.replace(chunk.id.clone(), chunk);
    Ok(())
  }

  pub fn chunk(&self, id: &ChunkId) -> Option<&Chunk> {
    self.chunk_by_id.get(id)
  }

  pub fn module(&self, id: &ModuleId) -> Option<&Module> {
    self.module_by_id.get(id)
  }

  pub fn chunk_by_id(&self) -> impl Iterator<Item = &Chunk> {
    self.chunk_by_id.values()
  }

  fn get_chunk(&self, id: &ChunkId) -> BuildResult<&Chunk> {
    self
      .chunk_by_id
      .get(id)
      .ok_or_else(|| BuildError::chunk_not_found(id))
  }

  fn modules_size<'a>(&self, modules: impl Iterator<Item = &'a ModuleId>) -> f64 {
    modules
      .filter_map(|id| self.module_by_id.get(id))
      .map(|module| module.size)
      .sum()
  }

  fn overhead(&self, options: &ChunkSizeOptions, is_initial: bool) -> f64 {
    let chunk_overhead = options
      .chunk_overhead
      .unwrap_or(self.options.chunk_overhead);
    let entry_chunk_multiplicator = options
      .entry_chunk_multiplicator
      .unwrap_or(self.options.entry_chunk_multiplicator);
    if is_initial {
      chunk_overhead * entry_chunk_multiplicator
    } else {
      chunk_overhead
    }
  }
}

impl ChunkGraphPort for ChunkGraph {
  fn chunks(&self) -> Vec<ChunkId> {
    self.chunk_by_id.keys().cloned().collect()
  }

  fn chunk_name(&self, chunk: &ChunkId) -> Option<&str> {
    self.chunk_by_id.get(chunk).and_then(|chunk| chunk.name())
  }

  fn can_be_initial(&self, chunk: &ChunkId) -> bool {
    self
      .chunk_by_id
      .get(chunk)
      .map_or(false, |chunk| chunk.is_initial)
  }

  fn can_chunks_be_integrated(&self, a: &ChunkId, b: &ChunkId) -> bool {
    let (Some(a), Some(b)) = (self.chunk_by_id.get(a), self.chunk_by_id.get(b)) else {
      return false;
    };
    if a.prevent_integration || b.prevent_integration {
      return false;
    }
    // A runtime chunk can't be folded into a chunk that is loaded by someone else's runtime.
    if a.has_runtime != b.has_runtime {
      return false;
    }
    !a.has_entry_modules() && !b.has_entry_modules()
  }

  fn chunk_modules(&self, chunk: &ChunkId) -> BuildResult<Vec<ModuleRef<'_>>> {
    Ok(
      self
        .get_chunk(chunk)?
        .modules
        .iter()
        .filter_map(|id| self.module_by_id.get(id))
        .map(Module::as_module_ref)
        .collect(),
    )
  }

  fn chunk_size(&self, chunk: &ChunkId, options: &ChunkSizeOptions) -> BuildResult<f64> {
    let chunk = self.get_chunk(chunk)?;
    Ok(self.modules_size(chunk.modules.iter()) + self.overhead(options, chunk.is_initial))
  }

  fn integrated_chunks_size(
    &self,
    a: &ChunkId,
    b: &ChunkId,
    options: &ChunkSizeOptions,
  ) -> BuildResult<f64> {
    let a = self.get_chunk(a)?;
    let b = self.get_chunk(b)?;
    let modules = a
      .modules
      .iter()
      .chain(b.modules.iter().filter(|id| !a.modules.contains(*id)));
    Ok(self.modules_size(modules) + self.overhead(options, a.is_initial || b.is_initial))
  }

  fn integrate_chunks(&mut self, target: &ChunkId, source: &ChunkId) -> BuildResult<()> {
    if target == source || !self.can_chunks_be_integrated(target, source) {
      self.get_chunk(target)?;
      self.get_chunk(source)?;
      return Err(BuildError::integration_rejected(target, source));
    }

    let name = self.get_chunk(target)?.integrated_name(self.get_chunk(source)?);

    let source_chunk = self
      .chunk_by_id
      .get_mut(source)
      .ok_or_else(|| BuildError::chunk_not_found(source))?;
    let modules = std::mem::take(&mut source_chunk.modules);
    let entry_modules = std::mem::take(&mut source_chunk.entry_modules);
    let is_initial = source_chunk.is_initial;
    let has_runtime = source_chunk.has_runtime;

    let target_chunk = self
      .chunk_by_id
      .get_mut(target)
      .ok_or_else(|| BuildError::chunk_not_found(target))?;
    target_chunk.name = name;
    for module in modules {
      if !target_chunk.modules.contains(&module) {
        target_chunk.modules.insert(module);
      }
    }
    for module in entry_modules {
      if !target_chunk.entry_modules.contains(&module) {
        target_chunk.entry_modules.insert(module);
      }
    }
    target_chunk.is_initial |= is_initial;
    target_chunk.has_runtime |= has_runtime;

    tracing::trace!("Integrated chunk {} into {}", source, target);
    Ok(())
  }

  fn remove_chunk(&mut self, chunk: &ChunkId) -> BuildResult<()> {
    self
      .chunk_by_id
      .remove(chunk)
      .map(|_| ())
      .ok_or_else(|| BuildError::chunk_not_found(chunk))
  }
}
