use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(String);

impl ChunkId {
  pub fn new(value: impl Into<String>) -> Self {
    Self(value.into())
  }

  pub fn value(&self) -> &str {
    &self.0
  }
}

impl Display for ChunkId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<String> for ChunkId {
  fn from(value: String) -> Self {
    Self(value)
  }
}

impl From<&str> for ChunkId {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

impl AsRef<str> for ChunkId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl ModuleId {
  pub fn new(value: impl Into<String>) -> Self {
    Self(value.into())
  }

  pub fn id(&self) -> &str {
    &self.0
  }
}

impl From<String> for ModuleId {
  fn from(value: String) -> Self {
    Self(value)
  }
}

impl From<&str> for ModuleId {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

/// A module as seen by the merge engine: its identity plus the resource path it was loaded from.
///
/// Synthetic modules (runtime helpers, virtual modules) have no resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRef<'a> {
  pub id: &'a ModuleId,
  pub resource: Option<&'a str>,
}

impl<'a> ModuleRef<'a> {
  pub fn new(id: &'a ModuleId, resource: Option<&'a str>) -> Self {
    Self { id, resource }
  }

  /// The resource path, treating an empty string the same as a missing one.
  pub fn resource(&self) -> Option<&'a str> {
    self.resource.filter(|resource| !resource.is_empty())
  }
}
