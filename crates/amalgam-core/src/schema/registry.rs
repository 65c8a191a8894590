use super::{MappingKind, MappingSet, Resource};
use crate::{Error, Result};

use indexmap::IndexMap;

/// All registered resources, by name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    resources: IndexMap<String, Resource>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Verifies and adds a resource.
    pub fn register(&mut self, resource: Resource) -> Result<()> {
        if self.resources.contains_key(&resource.name) {
            return Err(Error::invalid_mapping(format!(
                "resource `{}` is registered twice",
                resource.name
            )));
        }

        for (kind, set) in &resource.mappings {
            set.verify(&resource.name, *kind)?;
        }

        self.resources.insert(resource.name.clone(), resource);
        Ok(())
    }

    /// Returns the mapping set serving `kind` requests for `resource`.
    pub fn lookup(&self, resource: &str, kind: MappingKind) -> Option<&MappingSet> {
        self.resources.get(resource)?.get(kind)
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }
}
