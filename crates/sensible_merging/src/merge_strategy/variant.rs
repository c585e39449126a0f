use std::{fmt::Display, sync::Arc};

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use sensible_merging_common::ChunkId;
use serde::{Deserialize, Serialize};

use crate::{MergeDecision, MergeSide, MergeStrategy};

/// Which build variant of a logical asset a module belongs to, e.g. `src/button.js` built for `ios`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
  pub path: Option<String>,
  pub variant: Option<String>,
}

impl Variant {
  pub fn new(path: impl Into<String>, variant: impl Into<String>) -> Self {
    Self {
      path: Some(path.into()),
      variant: Some(variant.into()),
    }
  }
}

/// Maps the resource paths of a chunk's modules to the variants they carry.
pub trait VariantExtractor: Send + Sync {
  fn extract(&self, resources: &[&str]) -> Vec<Variant>;
}

impl<F> VariantExtractor for F
where
  F: Fn(&[&str]) -> Vec<Variant> + Send + Sync,
{
  fn extract(&self, resources: &[&str]) -> Vec<Variant> {
    self(resources)
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantPolicy {
  /// Deny when both chunks carry the same asset in different variants.
  #[default]
  #[serde(rename = "default")]
  SameAsset,
  /// Deny unless both chunks carry exactly the same variants.
  #[serde(rename = "strict")]
  Strict,
}

/// Collapses duplicated `(path, variant)` records, keeping the first occurrence in place.
pub fn unique_variants(variants: impl IntoIterator<Item = Variant>) -> Vec<Variant> {
  variants.into_iter().unique().collect()
}

struct OrNone<'a>(Option<&'a str>);

impl Display for OrNone<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.0.unwrap_or("(none)"))
  }
}

/// Variants extracted for a chunk, together with the resources they were extracted from.
struct CachedVariants {
  resources: Vec<String>,
  variants: Vec<Variant>,
}

pub struct VariantMergeStrategy {
  extractor: Arc<dyn VariantExtractor>,
  policy: VariantPolicy,
  variants_by_chunk: FxHashMap<ChunkId, CachedVariants>,
}

impl VariantMergeStrategy {
  pub fn new(extractor: Arc<dyn VariantExtractor>, policy: VariantPolicy) -> Self {
    Self {
      extractor,
      policy,
      variants_by_chunk: Default::default(),
    }
  }

  // An entry is only reused while the chunk still has the resources it was extracted from.
  fn cache_variants_of(&mut self, side: &MergeSide<'_>) {
    let is_fresh = self
      .variants_by_chunk
      .get(side.chunk)
      .map_or(false, |cached| cached.resources == side.resources);
    if is_fresh {
      return;
    }
    let variants = unique_variants(self.extractor.extract(side.resources));
    tracing::trace!(
      "Variants of chunk {} ({}): {:?}",
      side.chunk,
      OrNone(side.name),
      variants
    );
    self.variants_by_chunk.insert(
      side.chunk.clone(),
      CachedVariants {
        resources: side.resources.iter().map(|r| r.to_string()).collect(),
        variants,
      },
    );
  }
}

impl MergeStrategy for VariantMergeStrategy {
  fn evaluate(&mut self, a: &MergeSide<'_>, b: &MergeSide<'_>) -> MergeDecision {
    self.cache_variants_of(a);
    self.cache_variants_of(b);
    let variants_a = &self.variants_by_chunk[a.chunk].variants;
    let variants_b = &self.variants_by_chunk[b.chunk].variants;

    match self.policy {
      VariantPolicy::SameAsset => find_differing_variant(variants_a, variants_b),
      VariantPolicy::Strict => find_any_difference(variants_a, variants_b),
    }
  }

  fn invalidate(&mut self, chunk: &ChunkId) {
    self.variants_by_chunk.remove(chunk);
  }
}

fn find_differing_variant(variants_a: &[Variant], variants_b: &[Variant]) -> MergeDecision {
  for v_a in variants_a {
    for v_b in variants_b {
      if v_a.path == v_b.path && v_a.variant != v_b.variant {
        return MergeDecision::deny(format!(
          "Same asset but differing variants: {} - {} / {}",
          OrNone(v_a.path.as_deref()),
          OrNone(v_a.variant.as_deref()),
          OrNone(v_b.variant.as_deref()),
        ));
      }
    }
  }
  MergeDecision::allow()
}

fn variant_with_path<'a>(variants: &'a [Variant], path: &Option<String>) -> Option<&'a str> {
  variants
    .iter()
    .find(|v| &v.path == path)
    .and_then(|v| v.variant.as_deref())
}

fn find_any_difference(variants_a: &[Variant], variants_b: &[Variant]) -> MergeDecision {
  // A side without variants has nothing to conflict with.
  if variants_a.is_empty() || variants_b.is_empty() {
    return MergeDecision::allow();
  }

  let set_a = variants_a.iter().collect::<FxHashSet<_>>();
  let set_b = variants_b.iter().collect::<FxHashSet<_>>();

  let deny = |path: &Option<String>, variant_a: Option<&str>, variant_b: Option<&str>| {
    MergeDecision::deny(format!(
      "Preventing all differing variant merges: {} - {} / {}",
      OrNone(path.as_deref()),
      OrNone(variant_a),
      OrNone(variant_b),
    ))
  };

  if let Some(v_a) = variants_a.iter().find(|v| !set_b.contains(v)) {
    return deny(
      &v_a.path,
      v_a.variant.as_deref(),
      variant_with_path(variants_b, &v_a.path),
    );
  }
  if let Some(v_b) = variants_b.iter().find(|v| !set_a.contains(v)) {
    return deny(
      &v_b.path,
      variant_with_path(variants_a, &v_b.path),
      v_b.variant.as_deref(),
    );
  }
  MergeDecision::allow()
}
