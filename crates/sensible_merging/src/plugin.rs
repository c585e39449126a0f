use std::{borrow::Cow, fmt::Debug};

use crate::{BuildResult, ChunkGraphPort};

pub type PluginName<'a> = Cow<'a, str>;

/// A plugin that takes part in the optimize-chunks stage.
pub trait OptimizeChunksPlugin: Debug + Send + Sync {
  fn name(&self) -> PluginName;

  /// Creates the state this plugin keeps for one optimization cycle.
  fn create_pass(&self) -> Box<dyn OptimizeChunksPass>;
}

pub trait OptimizeChunksPass {
  /// Returns `true` if the chunk graph changed, which makes the driver run every pass again.
  fn optimize_chunks(&mut self, graph: &mut dyn ChunkGraphPort) -> BuildResult<bool>;
}
