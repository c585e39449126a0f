use std::{
  collections::BTreeMap,
  path::Path,
  sync::{Arc, Mutex},
};

use sensible_merging::{
  resolve_options, BuildResult, Chunk, ChunkGraph, ChunkGraphOptions, Module,
  OptimizeChunksDriver, OptimizeStats, SensibleMerging,
};

use crate::test_config::TestConfig;

pub struct Tester {
  pub config: TestConfig,
  pub logs: Arc<Mutex<Vec<String>>>,
}

pub struct TestOutput {
  pub graph: ChunkGraph,
  pub result: BuildResult<OptimizeStats>,
}

impl TestOutput {
  pub fn chunks(&self) -> BTreeMap<String, Vec<String>> {
    self
      .graph
      .chunk_by_id()
      .map(|chunk| {
        let mut modules = chunk
          .modules()
          .map(|module| module.to_string())
          .collect::<Vec<_>>();
        modules.sort();
        (chunk.id().to_string(), modules)
      })
      .collect()
  }
}

impl Tester {
  pub fn from_config_path(filepath: &Path) -> Self {
    Self {
      config: TestConfig::from_config_path(filepath),
      logs: Default::default(),
    }
  }

  pub fn chunk_graph(&self) -> BuildResult<ChunkGraph> {
    let mut graph = ChunkGraph::new(ChunkGraphOptions {
      chunk_overhead: self.config.graph.chunk_overhead,
      entry_chunk_multiplicator: self.config.graph.entry_chunk_multiplicator,
    });
    for module in &self.config.modules {
      let mut m = Module::new(module.id.as_str(), module.size);
      if let Some(resource) = &module.resource {
        m = m.with_resource(resource.as_str());
      }
      graph.add_module(m);
    }
    for chunk in &self.config.chunks {
      let mut c = Chunk::new(chunk.id.as_str())
        .with_modules(chunk.modules.iter().map(String::as_str))
        .with_entry_modules(chunk.entry_modules.iter().map(String::as_str))
        .initial(chunk.initial)
        .runtime(chunk.runtime)
        .prevent_integration(chunk.prevent_integration);
      if let Some(name) = &chunk.name {
        c = c.with_name(name.as_str());
      }
      graph.add_chunk(c)?;
    }
    Ok(graph)
  }

  pub fn plugin(&self) -> BuildResult<SensibleMerging> {
    let mut options = resolve_options(self.config.options.clone())?;
    let log_collector = self.logs.clone();
    options.on_info = Arc::new(move |msg: String| {
      log_collector.lock().unwrap().push(msg);
    });
    SensibleMerging::new(options)
  }

  pub fn run(&self) -> TestOutput {
    let mut graph = self.chunk_graph().expect("Invalid chunk graph in test config");
    let result = self.plugin().and_then(|plugin| {
      OptimizeChunksDriver::new(vec![Box::new(plugin)]).optimize(&mut graph)
    });
    TestOutput { graph, result }
  }
}
