use std::sync::Arc;

use derivative::Derivative;

use crate::{BuildError, BuildResult, MergeStrategyFactory};

mod raw_options;
pub use raw_options::*;

pub const DEFAULT_MIN_SIZE_REDUCE: f64 = 1.5;

pub type InfoHandler = Arc<dyn Fn(String) + Send + Sync>;

pub fn default_info_handler() -> InfoHandler {
  Arc::new(|msg: String| {
    tracing::info!(target: "sensible_merging", "{}", msg);
  })
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct SensibleMergingOptions {
  /// A pair is only merged if its combined size is at least this many times smaller than the sum
  /// of its parts.
  pub min_size_reduce: f64,
  #[derivative(Debug = "ignore")]
  pub merge_strategy: Option<MergeStrategyFactory>,
  #[derivative(Debug = "ignore")]
  pub on_info: InfoHandler,
}

impl SensibleMergingOptions {
  pub fn validate(&self) -> BuildResult<()> {
    if !self.min_size_reduce.is_finite() || self.min_size_reduce <= 0.0 {
      return Err(BuildError::invalid_options(format!(
        r#""minSizeReduce" must be a positive number, received {}."#,
        self.min_size_reduce
      )));
    }
    Ok(())
  }
}

impl Default for SensibleMergingOptions {
  fn default() -> Self {
    Self {
      min_size_reduce: DEFAULT_MIN_SIZE_REDUCE,
      merge_strategy: None,
      on_info: default_info_handler(),
    }
  }
}
