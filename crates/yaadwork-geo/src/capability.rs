//! The device geolocation capability behind an injectable seam.
//!
//! The platform API is ambient and global; sessions consume it through this
//! trait so tests pass in an in-memory implementation instead of
//! monkey-patching globals. Raw platform error codes stay on this side of
//! the boundary.

use std::time::Duration;

use tokio::sync::mpsc;

/// Platform permission state for the geolocation capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Undetermined,
    Granted,
    Denied,
}

/// Acquisition options passed through to the platform call.
#[derive(Debug, Clone, Copy)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// Upper bound on how long the platform may take to produce a fix.
    pub timeout: Duration,
    /// Maximum age of a cached platform fix that may be reused.
    pub max_age: Duration,
}

/// A raw position fix as delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: f64,
}

/// A raw platform failure: 1 = permission denied, 2 = position unavailable,
/// 3 = timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPositionError {
    pub code: u16,
    pub message: String,
}

/// Identifier for a registered continuous watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchId(pub u64);

/// Device geolocation capability as consumed by the session.
///
/// Implemented over the real platform bridge by the embedding application and
/// by in-memory fakes in tests.
#[allow(async_fn_in_trait)]
pub trait PositionSource: Send + Sync {
    /// Whether the platform exposes geolocation at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Query the current permission state without prompting the user.
    async fn query_permission(&self) -> PermissionState;

    /// Request a single position. May prompt the user.
    async fn request_position(&self, opts: PositionOptions)
        -> Result<RawFix, RawPositionError>;

    /// Register a continuous watch; fixes and failures are delivered through
    /// `updates` until [`PositionSource::clear_watch`] is called with the
    /// returned id.
    fn watch_position(
        &self,
        opts: PositionOptions,
        updates: mpsc::Sender<Result<RawFix, RawPositionError>>,
    ) -> WatchId;

    /// Unregister a watch. Unknown ids are ignored.
    fn clear_watch(&self, id: WatchId);
}
