use std::sync::Arc;

use sensible_merging_common::ChunkId;

mod variant;
pub use variant::*;
mod platform_suffix;
pub use platform_suffix::*;

/// Creates the strategy for one optimization cycle.
///
/// Strategies may cache per-chunk data, so every cycle must start from a fresh instance.
pub type MergeStrategyFactory = Arc<dyn Fn() -> Box<dyn MergeStrategy> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeDecision {
  pub allow_merge: bool,
  pub reason: Option<String>,
}

impl MergeDecision {
  pub fn allow() -> Self {
    Self {
      allow_merge: true,
      reason: None,
    }
  }

  pub fn deny(reason: impl Into<String>) -> Self {
    Self {
      allow_merge: false,
      reason: Some(reason.into()),
    }
  }
}

/// One chunk of a candidate pair, as presented to a [MergeStrategy].
#[derive(Debug, Clone, Copy)]
pub struct MergeSide<'a> {
  pub chunk: &'a ChunkId,
  /// Display name of the chunk, for strategies that report or match on it.
  pub name: Option<&'a str>,
  /// Resource paths of the chunk's modules. Modules without a resource are not listed.
  pub resources: &'a [&'a str],
}

pub trait MergeStrategy {
  fn evaluate(&mut self, a: &MergeSide<'_>, b: &MergeSide<'_>) -> MergeDecision;

  /// Called once `chunk` changed or disappeared, so anything cached for it is stale.
  fn invalidate(&mut self, _chunk: &ChunkId) {}
}

/// Adapts a plain function over the two resource lists.
pub struct FnMergeStrategy<F> {
  f: Arc<F>,
}

impl<F> MergeStrategy for FnMergeStrategy<F>
where
  F: Fn(&[&str], &[&str]) -> MergeDecision,
{
  fn evaluate(&mut self, a: &MergeSide<'_>, b: &MergeSide<'_>) -> MergeDecision {
    (self.f)(a.resources, b.resources)
  }
}

pub fn merge_strategy_fn<F>(f: F) -> MergeStrategyFactory
where
  F: Fn(&[&str], &[&str]) -> MergeDecision + Send + Sync + 'static,
{
  let f = Arc::new(f);
  Arc::new(move || -> Box<dyn MergeStrategy> { Box::new(FnMergeStrategy { f: f.clone() }) })
}

pub fn variant_merge_strategy(
  extractor: Arc<dyn VariantExtractor>,
  policy: VariantPolicy,
) -> MergeStrategyFactory {
  Arc::new(move || -> Box<dyn MergeStrategy> {
    Box::new(VariantMergeStrategy::new(extractor.clone(), policy))
  })
}
