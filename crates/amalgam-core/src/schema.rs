//! Mapping schema: how the tables behind a logical resource line up.
//!
//! A [`Resource`] holds one [`MappingSet`] per [`MappingKind`]. A mapping set
//! lists the physical tables that take part in that kind of request, in
//! declaration order, exactly one of them being the main table. Mappings are
//! immutable once registered; nothing request-specific is stored on them.

mod config;
pub use config::{ResourceConfig, TableConfig};

mod field;
pub use field::FieldSpec;

mod hook;
pub use hook::{ForeignKeyFn, IdFn, InitFn, KeyFn, ParamsFn};

mod mapping_set;
pub use mapping_set::{MappingKind, MappingSet};

mod registry;
pub use registry::Registry;

mod resource;
pub use resource::Resource;

mod table;
pub use table::{TableMapping, TableRows};

mod verify;
