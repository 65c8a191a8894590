use super::Error;

/// Error when a resource mapping is invalid.
///
/// This occurs when:
/// - A mapping set has no main table, or more than one
/// - Two tables of one mapping set claim the same logical field
/// - The main table is marked as accumulate
/// - A dependent table lacks the foreign-key or id hook its operation needs
/// - A resource is registered twice
///
/// These errors are raised while the provider is being built, before any
/// request executes.
#[derive(Debug)]
pub(super) struct InvalidMapping {
    message: Box<str>,
}

impl std::error::Error for InvalidMapping {}

impl core::fmt::Display for InvalidMapping {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid mapping error.
    pub fn invalid_mapping(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidMapping(InvalidMapping {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid mapping error.
    pub fn is_invalid_mapping(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidMapping(_))
    }
}
