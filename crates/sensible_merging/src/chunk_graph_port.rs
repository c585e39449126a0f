use sensible_merging_common::{ChunkId, ModuleRef};

use crate::BuildResult;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ChunkSizeOptions {
  /// Fixed cost of emitting a chunk. `None` uses the graph's own setting.
  pub chunk_overhead: Option<f64>,
  /// Multiplier applied to the overhead of initial chunks. `None` uses the graph's own setting.
  pub entry_chunk_multiplicator: Option<f64>,
}

impl ChunkSizeOptions {
  /// Measures content only, so ratios between sizes reflect shared modules rather than fixed costs.
  pub fn without_overhead() -> Self {
    Self {
      chunk_overhead: Some(0.0),
      entry_chunk_multiplicator: None,
    }
  }
}

/// The view of a host chunk graph that merging works against.
///
/// The host owns every chunk and module. Mutations only happen through [ChunkGraphPort::integrate_chunks]
/// and [ChunkGraphPort::remove_chunk], and their failures are propagated as-is.
pub trait ChunkGraphPort {
  /// Live chunks, in the order pairs should be enumerated.
  fn chunks(&self) -> Vec<ChunkId>;

  fn chunk_name(&self, chunk: &ChunkId) -> Option<&str>;

  /// Whether the chunk may be loaded directly by an entry point.
  fn can_be_initial(&self, chunk: &ChunkId) -> bool;

  fn can_chunks_be_integrated(&self, a: &ChunkId, b: &ChunkId) -> bool;

  fn chunk_modules(&self, chunk: &ChunkId) -> BuildResult<Vec<ModuleRef<'_>>>;

  fn chunk_size(&self, chunk: &ChunkId, options: &ChunkSizeOptions) -> BuildResult<f64>;

  /// Size of the chunk that would result from integrating `a` and `b`.
  fn integrated_chunks_size(
    &self,
    a: &ChunkId,
    b: &ChunkId,
    options: &ChunkSizeOptions,
  ) -> BuildResult<f64>;

  /// Moves everything from `source` into `target`. `source` is left empty but still alive.
  fn integrate_chunks(&mut self, target: &ChunkId, source: &ChunkId) -> BuildResult<()>;

  fn remove_chunk(&mut self, chunk: &ChunkId) -> BuildResult<()>;
}
