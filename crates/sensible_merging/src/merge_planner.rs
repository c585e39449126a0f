use derivative::Derivative;
use itertools::Itertools;
use sensible_merging_common::ChunkId;

use crate::{
  BuildResult, ChunkGraphPort, ChunkSizeOptions, InfoHandler, MergeSide, MergeStrategy,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
  /// The chunk that gets integrated and removed.
  pub a: ChunkId,
  /// The chunk that survives.
  pub b: ChunkId,
  pub improvement: f64,
}

/// Yields every unordered pair of `chunks` once: for each `a`, the `b`s that come before it.
pub fn enumerate_pairs<T: PartialEq>(chunks: &[T]) -> impl Iterator<Item = (&T, &T)> {
  chunks
    .iter()
    .flat_map(move |a| chunks.iter().take_while(move |b| *b != a).map(move |b| (a, b)))
}

/// Keeps the first of equally good candidates.
fn select_best(candidates: Vec<Candidate>) -> Option<Candidate> {
  candidates.into_iter().fold(None, |best, candidate| match best {
    Some(best) if best.improvement >= candidate.improvement => Some(best),
    _ => Some(candidate),
  })
}

/// Merges at most one pair of chunks per call. Call it again until it reports no change.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct MergePlanner {
  min_size_reduce: f64,
  #[derivative(Debug = "ignore")]
  merge_strategy: Option<Box<dyn MergeStrategy>>,
  #[derivative(Debug = "ignore")]
  on_info: InfoHandler,
}

impl MergePlanner {
  pub fn new(
    min_size_reduce: f64,
    merge_strategy: Option<Box<dyn MergeStrategy>>,
    on_info: InfoHandler,
  ) -> Self {
    Self {
      min_size_reduce,
      merge_strategy,
      on_info,
    }
  }

  /// Scores every pair that may be merged, in enumeration order.
  pub fn candidates(&mut self, graph: &dyn ChunkGraphPort) -> BuildResult<Vec<Candidate>> {
    let chunks = graph
      .chunks()
      .into_iter()
      .filter(|chunk| !graph.can_be_initial(chunk))
      .collect_vec();
    let size_options = ChunkSizeOptions::without_overhead();

    let mut candidates = vec![];
    for (a, b) in enumerate_pairs(&chunks) {
      if !graph.can_chunks_be_integrated(a, b) {
        continue;
      }

      if let Some(merge_strategy) = self.merge_strategy.as_mut() {
        let a_modules = graph.chunk_modules(a)?;
        let b_modules = graph.chunk_modules(b)?;
        let a_resources = a_modules.iter().filter_map(|m| m.resource()).collect_vec();
        let b_resources = b_modules.iter().filter_map(|m| m.resource()).collect_vec();

        if !a_resources.is_empty() && !b_resources.is_empty() {
          let decision = merge_strategy.evaluate(
            &MergeSide {
              chunk: a,
              name: graph.chunk_name(a),
              resources: &a_resources,
            },
            &MergeSide {
              chunk: b,
              name: graph.chunk_name(b),
              resources: &b_resources,
            },
          );
          if !decision.allow_merge {
            (self.on_info)(format!(
              "Preventing merge {}",
              decision.reason.unwrap_or_default()
            ));
            continue;
          }
        }
      }

      let a_size = graph.chunk_size(a, &size_options)?;
      let b_size = graph.chunk_size(b, &size_options)?;
      let ab_size = graph.integrated_chunks_size(b, a, &size_options)?;
      if ab_size <= 0.0 {
        tracing::trace!("Skip empty pair {} / {}", a, b);
        continue;
      }
      let improvement = (a_size + b_size) / ab_size;
      tracing::trace!("Candidate {} -> {}: {}", a, b, improvement);

      candidates.push(Candidate {
        a: a.clone(),
        b: b.clone(),
        improvement,
      });
    }
    Ok(candidates)
  }

  /// Returns whether a merge happened.
  pub fn plan_one_pass(&mut self, graph: &mut dyn ChunkGraphPort) -> BuildResult<bool> {
    let Some(best) = select_best(self.candidates(&*graph)?) else {
      return Ok(false);
    };
    if best.improvement < self.min_size_reduce {
      tracing::debug!(
        "Best candidate {} -> {} improves by {}, below {}",
        best.a,
        best.b,
        best.improvement,
        self.min_size_reduce
      );
      return Ok(false);
    }

    tracing::debug!(
      "Merging chunk {} into {} ({})",
      best.a,
      best.b,
      best.improvement
    );
    graph.integrate_chunks(&best.b, &best.a)?;
    graph.remove_chunk(&best.a)?;

    if let Some(merge_strategy) = self.merge_strategy.as_mut() {
      merge_strategy.invalidate(&best.a);
      merge_strategy.invalidate(&best.b);
    }
    Ok(true)
  }
}
