use itertools::Itertools;
use tracing::instrument;

use crate::{BuildResult, ChunkGraphPort, OptimizeChunksPlugin};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeStats {
  /// How many times the plugins were run over the graph, including the final stable round.
  pub rounds: usize,
  /// How many rounds ended with a change.
  pub changes: usize,
}

#[derive(Debug, Default)]
pub struct OptimizeChunksDriver {
  pub plugins: Vec<Box<dyn OptimizeChunksPlugin>>,
}

impl OptimizeChunksDriver {
  pub fn new(plugins: Vec<Box<dyn OptimizeChunksPlugin>>) -> Self {
    Self { plugins }
  }

  /// Runs one optimization cycle: the plugins are called in order, and whenever one of them reports
  /// a change, the round is restarted from the first plugin. The cycle ends once a whole round
  /// leaves the graph untouched.
  #[instrument(skip_all)]
  pub fn optimize(&self, graph: &mut dyn ChunkGraphPort) -> BuildResult<OptimizeStats> {
    let mut passes = self
      .plugins
      .iter()
      .map(|plugin| (plugin.name(), plugin.create_pass()))
      .collect_vec();
    let mut stats = OptimizeStats::default();

    loop {
      stats.rounds += 1;
      let mut changed = false;
      for (name, pass) in passes.iter_mut() {
        let optimized = pass
          .optimize_chunks(graph)
          .map_err(|err| err.context(format!("Plugin \"{name}\" failed to optimize chunks")))?;
        if optimized {
          tracing::debug!("Plugin \"{}\" changed the chunk graph", name);
          changed = true;
          break;
        }
      }
      if !changed {
        break;
      }
      stats.changes += 1;
    }

    tracing::debug!("Chunk graph is stable after {} rounds", stats.rounds);
    Ok(stats)
  }
}
