use super::Error;

/// Error when a request is missing something a handler needs.
///
/// For example, updating a dependent table requires the dependent row's
/// identifier to be part of the payload. These checks run before the first
/// backing-store write is issued.
#[derive(Debug)]
pub(super) struct InvalidRequest {
    message: Box<str>,
}

impl std::error::Error for InvalidRequest {}

impl core::fmt::Display for InvalidRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid request: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidRequest(InvalidRequest {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid request error.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidRequest(_))
    }
}
