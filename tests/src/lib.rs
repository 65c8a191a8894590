pub use exec_log::ExecLog;


mod logging_driver;
pub use logging_driver::{DriverOp, Event, LoggingDriver};

use amalgam::{Builder, Provider, Record, Resource};
use amalgam_driver_memory::MemoryDriver;

pub use pretty_assertions::assert_eq;
pub use serde_json::{json, Value};

use std::sync::Arc;

/// A provider over an in-memory store, with every store call logged.
pub struct Test {
    pub provider: Provider,

    /// The store behind the logging driver, for seeding and inspection
    pub store: Arc<MemoryDriver>,

    pub log: ExecLog,
}

impl Test {
    pub fn new(resources: impl IntoIterator<Item = Resource>) -> Test {
        Test::build(resources, |_| {}, |driver| driver)
    }

    /// Like [`Test::new`], letting the caller configure the logging driver
    /// (for example to add latency to some tables).
    pub fn with_driver(
        resources: impl IntoIterator<Item = Resource>,
        configure: impl FnOnce(LoggingDriver) -> LoggingDriver,
    ) -> Test {
        Test::build(resources, |_| {}, configure)
    }

    /// Like [`Test::new`], letting the caller configure the provider builder.
    pub fn with_builder(
        resources: impl IntoIterator<Item = Resource>,
        configure: impl FnOnce(&mut Builder),
    ) -> Test {
        Test::build(resources, configure, |driver| driver)
    }

    fn build(
        resources: impl IntoIterator<Item = Resource>,
        configure_builder: impl FnOnce(&mut Builder),
        configure_driver: impl FnOnce(LoggingDriver) -> LoggingDriver,
    ) -> Test {
        let _ = env_logger::builder().is_test(true).try_init();

        let store = Arc::new(MemoryDriver::new());
        let driver = configure_driver(LoggingDriver::new(store.clone()));
        let log = ExecLog::new(driver.ops_log_handle(), driver.events_handle());

        let mut builder = Provider::builder();
        for resource in resources {
            builder.register(resource);
        }
        configure_builder(&mut builder);
        let provider = builder.build(driver).unwrap();

        Test {
            provider,
            store,
            log,
        }
    }

    /// Seeds `table` directly; seeding is not logged.
    pub fn seed(&self, table: &str, rows: Value) -> &Self {
        self.store.seed(table, rows_of(rows));
        self
    }
}

/// Converts a JSON object literal into a [`Record`].
///
/// # Panics
///
/// Panics if `value` is not an object.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(record) => record,
        other => panic!("expected an object, got {other}"),
    }
}

/// Converts a JSON array of object literals into rows.
pub fn rows_of(value: Value) -> Vec<Record> {
    match value {
        Value::Array(values) => values.into_iter().map(record).collect(),
        other => panic!("expected an array, got {other}"),
    }
}
