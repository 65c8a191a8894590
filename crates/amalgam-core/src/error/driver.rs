use super::{Error, ErrorKind};

/// A failure reported by the backing store.
///
/// The engine passes these through untouched, so the message a caller of
/// `Provider::serve` sees is the one the driver produced.
#[derive(Debug)]
pub(super) struct DriverError {
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.source, f)
    }
}

impl Error {
    /// Wraps an error raised by a backing store.
    pub fn driver(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Error {
        Error::from(ErrorKind::Driver(DriverError { source: err.into() }))
    }

    pub fn is_driver(&self) -> bool {
        matches!(self.kind(), ErrorKind::Driver(_))
    }
}
