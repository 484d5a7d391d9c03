//! Error handling for grblwire
//!
//! The encoders themselves are total; the only failures the protocol layer
//! produces are numeric decode failures and coordinate-frame read failures.
//! Both map onto the status code the host sees in its `error:` response.

use crate::status::StatusCode;
use thiserror::Error;

/// Numeric field decode error
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// No digit was found at the cursor position
    #[error("No numeric value at offset {position}")]
    NoDigits {
        /// Offset where decoding started.
        position: usize,
    },
}

impl DecodeError {
    /// Status code reported back to the host for this failure
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BadNumberFormat
    }
}

/// Coordinate frame read error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateReadError {
    /// Index does not name a stored frame
    #[error("Coordinate frame index {index} out of range")]
    OutOfRange {
        /// The requested frame index.
        index: u8,
    },

    /// The backing store could not produce the frame
    #[error("Coordinate frame {index} unreadable: {reason}")]
    Unreadable {
        /// The requested frame index.
        index: u8,
        /// Why the read failed.
        reason: String,
    },
}

impl CoordinateReadError {
    /// Status code reported back to the host for this failure
    pub fn status_code(&self) -> StatusCode {
        StatusCode::SettingReadFail
    }
}

/// Main error type for grblwire
///
/// Every variant carries the status code the host is acknowledged with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Numeric decode error
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Coordinate store error
    #[error(transparent)]
    CoordinateRead(#[from] CoordinateReadError),
}

impl Error {
    /// Status code to acknowledge the offending line with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Decode(e) => e.status_code(),
            Error::CoordinateRead(e) => e.status_code(),
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::NoDigits { position: 4 };
        assert_eq!(err.to_string(), "No numeric value at offset 4");
        assert_eq!(err.status_code(), StatusCode::BadNumberFormat);
    }

    #[test]
    fn test_coordinate_error_display() {
        let err = CoordinateReadError::Unreadable {
            index: 2,
            reason: "checksum mismatch".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Coordinate frame 2 unreadable: checksum mismatch"
        );
        assert_eq!(err.status_code().code(), 7);
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = DecodeError::NoDigits { position: 0 }.into();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(err.status_code(), StatusCode::BadNumberFormat);

        let err: Error = CoordinateReadError::OutOfRange { index: 9 }.into();
        assert_eq!(err.to_string(), "Coordinate frame index 9 out of range");
        assert_eq!(err.status_code(), StatusCode::SettingReadFail);
    }
}
