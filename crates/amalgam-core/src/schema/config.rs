//! Declarative resource configuration.
//!
//! Resources whose hooks are plain field lookups can be described in JSON:
//!
//! ```json
//! {
//!   "users_profiles": {
//!     "LIST": {
//!       "users": { "main": true, "fields": ["id", "username", "email"] },
//!       "profiles": {
//!         "fields": ["first_name", "last_name", "user_id"],
//!         "key": "user_id"
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Tables keep their declaration order. Closure hooks (`init_data`,
//! `params`, computed keys) can be attached afterwards through
//! [`Resource::mappings`].

use super::{FieldSpec, ForeignKeyFn, IdFn, KeyFn, MappingKind, MappingSet, Resource, TableMapping};
use crate::{record::ID, Error, Result};

use indexmap::IndexMap;
use serde::Deserialize;

/// Mapping sets of one resource, by kind, then by table name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ResourceConfig {
    pub mappings: IndexMap<MappingKind, IndexMap<String, TableConfig>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    #[serde(default)]
    pub main: bool,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    /// Physical column holding the join key; defaults to `id`
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub accumulate: bool,

    /// Physical column receiving the main identifier
    #[serde(default)]
    pub foreign_key: Option<String>,

    /// Logical field holding the identifiers to delete
    #[serde(default)]
    pub id: Option<String>,
}

impl Resource {
    pub fn from_config(name: impl Into<String>, config: ResourceConfig) -> Resource {
        config
            .mappings
            .into_iter()
            .fold(Resource::new(name), |resource, (kind, tables)| {
                let set = tables
                    .into_iter()
                    .map(|(table_name, table)| table.into_mapping(table_name))
                    .collect::<MappingSet>();
                resource.mapping(kind, set)
            })
    }

    /// Parses a JSON document mapping resource names to their configuration.
    pub fn from_json(json: &str) -> Result<Vec<Resource>> {
        let resources: IndexMap<String, ResourceConfig> = serde_json::from_str(json)
            .map_err(|err| Error::from(err).context("invalid resource configuration"))?;
        Ok(resources
            .into_iter()
            .map(|(name, config)| Resource::from_config(name, config))
            .collect())
    }
}

impl TableConfig {
    fn into_mapping(self, name: String) -> TableMapping {
        let mut table = if self.main {
            TableMapping::main(name)
        } else {
            TableMapping::secondary(name)
        };

        table.fields = self.fields;
        table.key = KeyFn::Field(self.key.unwrap_or_else(|| ID.to_string()));
        table.accumulate = self.accumulate;
        table.foreign_key = self.foreign_key.map(ForeignKeyFn::Field);
        table.id = self.id.map(IdFn::Field);
        table
    }
}
