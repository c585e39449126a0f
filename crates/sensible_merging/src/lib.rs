mod chunk;
pub use chunk::*;
mod module;
pub use module::*;
mod chunk_graph;
pub use chunk_graph::*;
mod chunk_graph_port;
pub use chunk_graph_port::*;
mod merge_planner;
pub use merge_planner::*;
mod merge_strategy;
pub use merge_strategy::*;
mod options;
pub use options::*;
mod plugin;
pub use plugin::*;
mod plugin_driver;
pub use plugin_driver::*;
mod sensible_merging;
pub use sensible_merging::*;

pub use sensible_merging_common::{ChunkId, ModuleId, ModuleRef};

// public exports

pub type BuildResult<T> = sensible_merging_error::Result<T>;
pub type BuildError = sensible_merging_error::Error;
