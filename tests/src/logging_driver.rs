use amalgam_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    Error, Result,
};

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

/// A driver wrapper that logs all operations for testing purposes
#[derive(Debug)]
pub struct LoggingDriver {
    /// The underlying driver that actually executes operations
    inner: Arc<dyn Driver>,

    /// Artificial latency per table, to make concurrent schedules
    /// observable
    delays: HashMap<String, Duration>,

    /// Tables whose operations fail with a driver error carrying this
    /// message, without reaching the underlying driver
    failures: HashMap<String, String>,

    /// Log of all operations executed through this driver
    /// Using Arc<Mutex> for thread-safe access from tests
    ops_log: Arc<Mutex<Vec<DriverOp>>>,

    /// Start and completion of every operation, in the order they happened
    events: Arc<Mutex<Vec<Event>>>,
}

#[derive(Debug)]
pub struct DriverOp {
    pub table: String,
    pub operation: Operation,

    /// `Ok` responses are cloned; errors are logged by their message
    pub response: core::result::Result<Response, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Begin { table: String, op: &'static str },
    End { table: String, op: &'static str },
}

impl LoggingDriver {
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            inner: driver,
            delays: HashMap::new(),
            failures: HashMap::new(),
            ops_log: Arc::new(Mutex::new(Vec::new())),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Delay every operation against `table` by `delay`.
    pub fn delay(mut self, table: &str, delay: Duration) -> Self {
        self.delays.insert(table.to_string(), delay);
        self
    }

    /// Fail every operation against `table` with a driver error.
    pub fn fail(mut self, table: &str, message: &str) -> Self {
        self.failures.insert(table.to_string(), message.to_string());
        self
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }

    pub fn events_handle(&self) -> Arc<Mutex<Vec<Event>>> {
        self.events.clone()
    }

    fn push_event(&self, event: Event) {
        self.events
            .lock()
            .expect("Failed to acquire events lock")
            .push(event);
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    async fn exec(&self, table: &str, operation: Operation) -> Result<Response> {
        let op = operation.name();
        self.push_event(Event::Begin {
            table: table.to_string(),
            op,
        });

        if let Some(delay) = self.delays.get(table) {
            tokio::time::sleep(*delay).await;
        }

        // Clone the operation for logging
        let operation_clone = operation.clone();

        // Execute the operation on the underlying driver
        let response = match self.failures.get(table) {
            Some(message) => Err(Error::driver(message.clone())),
            None => self.inner.exec(table, operation).await,
        };

        self.push_event(Event::End {
            table: table.to_string(),
            op,
        });

        let driver_op = DriverOp {
            table: table.to_string(),
            operation: operation_clone,
            response: match &response {
                Ok(response) => Ok(response.clone()),
                Err(err) => Err(err.to_string()),
            },
        };

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(driver_op);

        response
    }
}
