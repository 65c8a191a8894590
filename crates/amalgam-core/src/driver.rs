mod response;
pub use response::Response;

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, Result};

use std::fmt::Debug;

/// The backing store that owns the physical tables.
///
/// Amalgam treats the store as an opaque capability: run one operation
/// against one table and report the result. Composite resources are served
/// entirely in terms of this trait, and requests for resources without a
/// mapping are forwarded to it unchanged.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute an operation against the named table (or logical resource,
    /// for passthrough requests).
    async fn exec(&self, table: &str, op: Operation) -> Result<Response>;
}

#[async_trait]
impl<T: Driver + ?Sized> Driver for std::sync::Arc<T> {
    async fn exec(&self, table: &str, op: Operation) -> Result<Response> {
        (**self).exec(table, op).await
    }
}

#[async_trait]
impl<T: Driver + ?Sized> Driver for Box<T> {
    async fn exec(&self, table: &str, op: Operation) -> Result<Response> {
        (**self).exec(table, op).await
    }
}
