use thiserror::Error;

use crate::capability::RawPositionError;

/// Why a position could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationErrorKind {
    /// The user must act outside the app (settings change).
    PermissionDenied,
    /// Transient environmental failure, safe to retry.
    PositionUnavailable,
    /// The bounded wait elapsed, safe to retry.
    Timeout,
    /// Permanent for this device/browser; do not offer retry.
    Unsupported,
}

/// A normalized geolocation failure.
///
/// Raw platform error codes never leave the session; callers see only this
/// four-kind taxonomy with plain-language messages.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct GeolocationError {
    pub kind: GeolocationErrorKind,
    pub message: String,
}

impl GeolocationError {
    #[must_use]
    pub fn new(kind: GeolocationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Transient failures may be retried; the rest need user action or a
    /// different device.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            GeolocationErrorKind::Timeout | GeolocationErrorKind::PositionUnavailable
        )
    }

    /// Normalize a raw platform error (codes 1/2/3) into the public taxonomy.
    /// Unknown codes are treated as unavailability.
    pub(crate) fn from_raw(raw: &RawPositionError) -> Self {
        match raw.code {
            1 => Self::new(
                GeolocationErrorKind::PermissionDenied,
                "location access was denied",
            ),
            3 => Self::new(
                GeolocationErrorKind::Timeout,
                "finding your position took too long",
            ),
            _ => Self::new(
                GeolocationErrorKind::PositionUnavailable,
                "your position could not be determined",
            ),
        }
    }
}

/// Errors from the IP-approximate location provider.
#[derive(Debug, Error)]
pub enum ApproximateError {
    #[error("HTTP error from locate endpoint: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from locate endpoint")]
    HttpStatus { status: u16 },

    #[error("locate response did not parse: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("locate provider reported failure: {message}")]
    Provider { message: String },
}
