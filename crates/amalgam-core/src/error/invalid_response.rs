use super::Error;

/// Error when a backing-store response has an unexpected shape.
///
/// This occurs when:
/// - A list read returns something other than an array of rows
/// - A list read omits `total`, which the fetch-all probe depends on
/// - A create returns a row without an `id`
#[derive(Debug)]
pub(super) struct InvalidResponse {
    message: Box<str>,
}

impl std::error::Error for InvalidResponse {}

impl core::fmt::Display for InvalidResponse {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid response: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResponse(InvalidResponse {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid response error.
    pub fn is_invalid_response(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidResponse(_))
    }
}
