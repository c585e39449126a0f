use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

fn chunk_overhead_default() -> f64 {
  10000.0
}

fn entry_chunk_multiplicator_default() -> f64 {
  10.0
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TestConfig {
  #[serde(default)]
  pub modules: Vec<ModuleConfig>,
  #[serde(default)]
  pub chunks: Vec<ChunkConfig>,
  #[serde(default)]
  pub graph: GraphConfig,
  /// Passed to `resolve_options` as-is, so invalid shapes can be tested too.
  #[serde(default)]
  pub options: serde_json::Value,
  #[serde(default)]
  pub expected: ExpectedConfig,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleConfig {
  pub id: String,
  #[serde(default)]
  pub resource: Option<String>,
  pub size: f64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChunkConfig {
  pub id: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub modules: Vec<String>,
  #[serde(default)]
  pub entry_modules: Vec<String>,
  #[serde(default)]
  pub initial: bool,
  #[serde(default)]
  pub runtime: bool,
  #[serde(default)]
  pub prevent_integration: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GraphConfig {
  #[serde(default = "chunk_overhead_default")]
  pub chunk_overhead: f64,
  #[serde(default = "entry_chunk_multiplicator_default")]
  pub entry_chunk_multiplicator: f64,
}

impl Default for GraphConfig {
  fn default() -> Self {
    Self {
      chunk_overhead: chunk_overhead_default(),
      entry_chunk_multiplicator: entry_chunk_multiplicator_default(),
    }
  }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpectedConfig {
  /// Chunk id to the sorted ids of its modules, after the graph is stable.
  pub chunks: Option<BTreeMap<String, Vec<String>>>,
  /// Chunk id to its name, for the chunks listed.
  #[serde(default)]
  pub names: BTreeMap<String, Option<String>>,
  pub merges: Option<usize>,
  #[serde(default)]
  pub logs: Vec<String>,
  pub error: Option<ExpectedError>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct ExpectedError {
  pub code: String,
  pub message: String,
}

impl TestConfig {
  pub fn from_config_path(filepath: &Path) -> Self {
    let content = std::fs::read_to_string(filepath)
      .unwrap_or_else(|_| panic!("Failed to read {}", filepath.display()));
    serde_json::from_str(&content)
      .unwrap_or_else(|err| panic!("Invalid test config {}: {err}", filepath.display()))
  }
}
