mod engine;

pub mod provider;
pub use provider::{Builder, Provider};

pub use amalgam_core::{
    async_trait,
    driver::{self, Driver, Operation, Response},
    schema::{self, MappingKind, MappingSet, Registry, Resource, TableMapping},
    Error, JoinKey, Record, Result,
};
