use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::{
  variant_merge_strategy, BuildError, BuildResult, PlatformSuffixExtractor,
  SensibleMergingOptions, VariantPolicy, DEFAULT_MIN_SIZE_REDUCE,
};

const NOT_AN_OBJECT: &str =
  "Argument should be an options object. To use defaults, pass in nothing.";

/// Options as a host passes them over a serialization boundary.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawSensibleMergingOptions {
  pub min_size_reduce: Option<f64>,
  pub variants: Option<RawVariantOptions>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawVariantOptions {
  #[serde(default)]
  pub policy: VariantPolicy,
  pub platforms: Vec<String>,
}

impl RawSensibleMergingOptions {
  pub fn into_options(self) -> BuildResult<SensibleMergingOptions> {
    let options = SensibleMergingOptions {
      // Zero is how hosts spell "unset".
      min_size_reduce: self
        .min_size_reduce
        .filter(|min_size_reduce| *min_size_reduce != 0.0 && !min_size_reduce.is_nan())
        .unwrap_or(DEFAULT_MIN_SIZE_REDUCE),
      merge_strategy: self.variants.map(|variants| {
        variant_merge_strategy(
          Arc::new(PlatformSuffixExtractor::new(variants.platforms)),
          variants.policy,
        )
      }),
      ..Default::default()
    };
    options.validate()?;
    Ok(options)
  }
}

/// `null` stands for "no options" and resolves to the defaults.
pub fn resolve_options(value: Value) -> BuildResult<SensibleMergingOptions> {
  match value {
    Value::Null => return Ok(Default::default()),
    Value::Object(_) => {}
    _ => return Err(BuildError::invalid_options(NOT_AN_OBJECT)),
  }
  let raw: RawSensibleMergingOptions =
    serde_json::from_value(value).map_err(|err| BuildError::invalid_options(err.to_string()))?;
  raw.into_options()
}
