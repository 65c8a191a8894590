pub mod driver;
pub use driver::Driver;

mod error;
pub use error::Error;

pub mod record;
pub use record::{JoinKey, Record};

pub mod schema;
pub use schema::Registry;

/// A Result type alias that uses Amalgam's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
