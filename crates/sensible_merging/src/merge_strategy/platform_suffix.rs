use std::path::Path;

use crate::{Variant, VariantExtractor};

/// Reads platform variants from file name suffixes: `src/button.ios.js` is the `ios` variant of
/// `src/button.js`.
///
/// Resources without one of the configured suffixes carry no variant.
#[derive(Debug, Clone)]
pub struct PlatformSuffixExtractor {
  platforms: Vec<String>,
}

impl PlatformSuffixExtractor {
  pub fn new<P: Into<String>>(platforms: impl IntoIterator<Item = P>) -> Self {
    Self {
      platforms: platforms.into_iter().map(Into::into).collect(),
    }
  }

  fn extract_one(&self, resource: &str) -> Option<Variant> {
    let path = Path::new(resource);
    let ext = path.extension()?.to_str()?;
    let stem = path.file_stem()?.to_str()?;
    let (base, platform) = stem.rsplit_once('.')?;
    if base.is_empty() || !self.platforms.iter().any(|p| p == platform) {
      return None;
    }
    let logical_path = path.with_file_name(format!("{base}.{ext}"));
    Some(Variant::new(logical_path.to_string_lossy(), platform))
  }
}

impl VariantExtractor for PlatformSuffixExtractor {
  fn extract(&self, resources: &[&str]) -> Vec<Variant> {
    resources
      .iter()
      .filter_map(|resource| self.extract_one(resource))
      .collect()
  }
}
