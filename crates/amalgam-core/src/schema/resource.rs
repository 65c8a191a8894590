use super::{MappingKind, MappingSet};

use indexmap::IndexMap;

/// A logical resource and the mapping sets that compose it.
///
/// A kind with no mapping set is served by passing the request through to
/// the driver under the resource's own name.
#[derive(Debug, Clone)]
pub struct Resource {
    pub name: String,
    pub mappings: IndexMap<MappingKind, MappingSet>,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Resource {
        Resource {
            name: name.into(),
            mappings: IndexMap::new(),
        }
    }

    pub fn mapping(mut self, kind: MappingKind, set: MappingSet) -> Resource {
        self.mappings.insert(kind, set);
        self
    }

    pub fn list(self, set: MappingSet) -> Resource {
        self.mapping(MappingKind::List, set)
    }

    pub fn edit(self, set: MappingSet) -> Resource {
        self.mapping(MappingKind::Edit, set)
    }

    pub fn create(self, set: MappingSet) -> Resource {
        self.mapping(MappingKind::Create, set)
    }

    pub fn delete(self, set: MappingSet) -> Resource {
        self.mapping(MappingKind::Delete, set)
    }

    pub fn get(&self, kind: MappingKind) -> Option<&MappingSet> {
        self.mappings.get(&kind)
    }
}
