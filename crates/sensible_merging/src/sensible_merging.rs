use crate::{
  BuildResult, MergePlanner, OptimizeChunksPass, OptimizeChunksPlugin, PluginName,
  SensibleMergingOptions,
};

/// Greedily merges chunks that share enough content, one pair per pass.
#[derive(Debug)]
pub struct SensibleMerging {
  options: SensibleMergingOptions,
}

impl SensibleMerging {
  pub fn new(options: SensibleMergingOptions) -> BuildResult<Self> {
    sensible_merging_tracing::enable_tracing_on_demand();
    options.validate()?;
    Ok(Self { options })
  }

  pub fn new_boxed(options: SensibleMergingOptions) -> BuildResult<Box<dyn OptimizeChunksPlugin>> {
    Ok(Box::new(Self::new(options)?))
  }

  pub fn options(&self) -> &SensibleMergingOptions {
    &self.options
  }

  /// A planner with a fresh merge strategy, valid for one optimization cycle.
  pub fn planner(&self) -> MergePlanner {
    MergePlanner::new(
      self.options.min_size_reduce,
      self.options.merge_strategy.as_ref().map(|factory| factory()),
      self.options.on_info.clone(),
    )
  }
}

impl OptimizeChunksPlugin for SensibleMerging {
  fn name(&self) -> PluginName {
    "sensible_merging".into()
  }

  fn create_pass(&self) -> Box<dyn OptimizeChunksPass> {
    Box::new(self.planner())
  }
}

impl OptimizeChunksPass for MergePlanner {
  fn optimize_chunks(&mut self, graph: &mut dyn crate::ChunkGraphPort) -> BuildResult<bool> {
    self.plan_one_pass(graph)
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  };

  use super::*;
  use crate::{
    merge_strategy_fn, variant_merge_strategy, Chunk, ChunkGraph, ChunkGraphPort, ChunkId,
    MergeDecision, Module, OptimizeChunksDriver, PlatformSuffixExtractor, VariantPolicy,
  };

  /// Integrates `source` into `target` once, if `source` is still around.
  #[derive(Debug)]
  struct Absorb {
    target: &'static str,
    source: &'static str,
  }

  struct AbsorbPass {
    target: ChunkId,
    source: ChunkId,
  }

  impl OptimizeChunksPlugin for Absorb {
    fn name(&self) -> PluginName {
      "absorb".into()
    }

    fn create_pass(&self) -> Box<dyn OptimizeChunksPass> {
      Box::new(AbsorbPass {
        target: ChunkId::new(self.target),
        source: ChunkId::new(self.source),
      })
    }
  }

  impl OptimizeChunksPass for AbsorbPass {
    fn optimize_chunks(&mut self, graph: &mut dyn ChunkGraphPort) -> BuildResult<bool> {
      if !graph.chunks().contains(&self.source) {
        return Ok(false);
      }
      graph.integrate_chunks(&self.target, &self.source)?;
      graph.remove_chunk(&self.source)?;
      Ok(true)
    }
  }

  #[test]
  fn rejects_invalid_threshold() {
    for min_size_reduce in [0.0, -1.0, f64::NAN, f64::INFINITY] {
      let err = SensibleMerging::new(SensibleMergingOptions {
        min_size_reduce,
        ..Default::default()
      })
      .unwrap_err();
      assert_eq!(err.kind.code(), "INVALID_OPTIONS");
    }
  }

  #[test]
  fn every_cycle_gets_a_fresh_strategy() {
    let created = Arc::new(AtomicUsize::new(0));
    let counter = created.clone();
    let allow = merge_strategy_fn(|_, _| MergeDecision::allow());
    let plugin = SensibleMerging::new(SensibleMergingOptions {
      merge_strategy: Some(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        allow()
      })),
      ..Default::default()
    })
    .unwrap();
    let driver = OptimizeChunksDriver::new(vec![Box::new(plugin)]);

    let mut graph = ChunkGraph::default();
    graph.add_module(Module::new("shared", 20000.0).with_resource("src/shared.js"));
    for name in ["a", "b", "c"] {
      graph.add_module(Module::new(name, 1000.0).with_resource(format!("src/{name}.js")));
      graph
        .add_chunk(Chunk::new(name).with_modules(["shared", name]))
        .unwrap();
    }

    let stats = driver.optimize(&mut graph).unwrap();
    assert_eq!(stats.changes, 2);
    assert_eq!(graph.chunks(), vec![crate::ChunkId::new("a")]);
    assert_eq!(created.load(Ordering::SeqCst), 1);

    driver.optimize(&mut graph).unwrap();
    assert_eq!(created.load(Ordering::SeqCst), 2);
  }

  #[test]
  fn sees_content_integrated_by_other_plugins() {
    let logs = Arc::new(Mutex::new(vec![]));
    let sink = logs.clone();
    let plugin = SensibleMerging::new(SensibleMergingOptions {
      merge_strategy: Some(variant_merge_strategy(
        Arc::new(PlatformSuffixExtractor::new(["ios", "android"])),
        VariantPolicy::SameAsset,
      )),
      on_info: Arc::new(move |msg: String| sink.lock().unwrap().push(msg)),
      ..Default::default()
    })
    .unwrap();
    let driver = OptimizeChunksDriver::new(vec![
      Box::new(plugin),
      Box::new(Absorb {
        target: "A",
        source: "X",
      }),
    ]);

    let mut graph = ChunkGraph::default();
    graph.add_module(Module::new("theme", 3000.0).with_resource("src/theme.js"));
    graph.add_module(Module::new("android", 1000.0).with_resource("src/button.android.js"));
    graph.add_module(Module::new("ios", 1000.0).with_resource("src/button.ios.js"));
    graph.add_module(Module::new("pad", 9000.0).with_resource("src/pad.js"));
    graph
      .add_chunk(Chunk::new("A").with_modules(["theme"]))
      .unwrap();
    graph
      .add_chunk(Chunk::new("B").with_modules(["theme", "android", "pad"]))
      .unwrap();
    graph
      .add_chunk(Chunk::new("X").with_modules(["ios", "pad"]))
      .unwrap();

    // First round: A / B only reach (3 + 13) / 13, X / B is denied. Then A absorbs X, and A / B
    // would reach (13 + 13) / 14 if A were still judged by the variants it had before.
    let stats = driver.optimize(&mut graph).unwrap();
    assert_eq!(stats.changes, 1);
    assert_eq!(graph.chunks(), vec![ChunkId::new("A"), ChunkId::new("B")]);
    assert_eq!(
      *logs.lock().unwrap(),
      vec![
        "Preventing merge Same asset but differing variants: src/button.js - ios / android"
          .to_string(),
        "Preventing merge Same asset but differing variants: src/button.js - android / ios"
          .to_string(),
      ]
    );
  }
}
