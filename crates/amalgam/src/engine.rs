mod aggregate;
mod context;
mod diff;
mod disaggregate;
mod exec;
mod handler;

use amalgam_core::Driver;

use std::sync::Arc;

/// Serves requests for composite resources by fanning them out over the
/// tables of a mapping set.
///
/// The engine holds no request state. Everything a request produces while it
/// is being served lives on that request's stack, so any number of requests
/// against the same mapping set can be in flight at once.
#[derive(Debug, Clone)]
pub(crate) struct Engine {
    driver: Arc<dyn Driver>,
}

impl Engine {
    pub(crate) fn new(driver: Arc<dyn Driver>) -> Engine {
        Engine { driver }
    }

    pub(crate) fn driver(&self) -> &dyn Driver {
        &*self.driver
    }
}
