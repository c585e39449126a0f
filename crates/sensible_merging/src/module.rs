use sensible_merging_common::{ModuleId, ModuleRef};

#[derive(Debug, Clone, PartialEq)]
pub struct Module {
  pub(crate) id: ModuleId,
  pub(crate) resource: Option<String>,
  pub(crate) size: f64,
}

impl Module {
  pub fn new(id: impl Into<ModuleId>, size: f64) -> Self {
    Self {
      id: id.into(),
      resource: None,
      size,
    }
  }

  pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
    self.resource = Some(resource.into());
    self
  }

  pub fn id(&self) -> &ModuleId {
    &self.id
  }

  pub fn resource(&self) -> Option<&str> {
    self.resource.as_deref()
  }

  pub fn size(&self) -> f64 {
    self.size
  }

  pub fn as_module_ref(&self) -> ModuleRef<'_> {
    ModuleRef::new(&self.id, self.resource.as_deref())
  }
}
