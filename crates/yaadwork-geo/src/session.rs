//! Stateful acquisition of the device position.
//!
//! The platform geolocation capability is ambient and callback-driven; this
//! module isolates it behind a single-owner session with an explicit state
//! snapshot, so callers branch on state rather than on exceptions and tests
//! inject a fake capability instead of patching globals.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;

use yaadwork_core::Coordinate;

use crate::approximate::ApproximateSource;
use crate::capability::{
    PermissionState, PositionOptions, PositionSource, RawFix, RawPositionError, WatchId,
};
use crate::error::{GeolocationError, GeolocationErrorKind};

/// Where the session is in its acquisition lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Acquiring,
    Ready,
    Failed,
}

/// Point-in-time view of the session, cloned out to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub coordinate: Option<Coordinate>,
    pub status: SessionStatus,
    pub last_error: Option<GeolocationError>,
    pub permission: PermissionState,
}

/// Acquisition tuning; the env-driven values live in `AppConfig`.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Upper bound on a single acquisition.
    pub request_timeout: Duration,
    /// Max age of a reusable platform fix for one-shot requests.
    pub reuse_window: Duration,
    /// Shorter reuse window for continuous watches; callers expect freshness.
    pub watch_reuse_window: Duration,
    /// Implied accuracy of an IP-derived fix.
    pub approximate_accuracy_m: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            reuse_window: Duration::from_secs(300),
            watch_reuse_window: Duration::from_secs(60),
            approximate_accuracy_m: 25_000.0,
        }
    }
}

struct Shared {
    snapshot: SessionSnapshot,
    /// Sequence of the newest applied completion. Completions carrying an
    /// older sequence are from superseded requests and are dropped.
    applied_seq: u64,
}

enum Outcome {
    Fix {
        coordinate: Coordinate,
        grants_permission: bool,
    },
    Failure(GeolocationError),
}

fn lock_shared(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn apply_outcome(shared: &Mutex<Shared>, seq: u64, outcome: Outcome) -> SessionSnapshot {
    let mut guard = lock_shared(shared);
    if seq <= guard.applied_seq {
        tracing::debug!(
            seq,
            applied = guard.applied_seq,
            "discarding result from superseded position request"
        );
        return guard.snapshot.clone();
    }
    guard.applied_seq = seq;

    match outcome {
        Outcome::Fix {
            coordinate,
            grants_permission,
        } => {
            guard.snapshot.coordinate = Some(coordinate);
            guard.snapshot.status = SessionStatus::Ready;
            guard.snapshot.last_error = None;
            if grants_permission {
                guard.snapshot.permission = PermissionState::Granted;
            }
        }
        Outcome::Failure(error) => {
            if error.kind == GeolocationErrorKind::PermissionDenied {
                guard.snapshot.permission = PermissionState::Denied;
            }
            guard.snapshot.status = SessionStatus::Failed;
            guard.snapshot.last_error = Some(error);
        }
    }
    guard.snapshot.clone()
}

fn outcome_from_raw(result: Result<RawFix, RawPositionError>) -> Outcome {
    match result {
        Ok(fix) => match Coordinate::new(
            fix.latitude,
            fix.longitude,
            fix.accuracy_m,
            Utc::now(),
            false,
            None,
        ) {
            Ok(coordinate) => Outcome::Fix {
                coordinate,
                grants_permission: true,
            },
            Err(err) => Outcome::Failure(GeolocationError::new(
                GeolocationErrorKind::PositionUnavailable,
                format!("platform produced an invalid fix: {err}"),
            )),
        },
        Err(raw) => {
            tracing::debug!(code = raw.code, platform_message = %raw.message, "platform position error");
            Outcome::Failure(GeolocationError::from_raw(&raw))
        }
    }
}

/// Cancellation handle for a continuous watch.
///
/// The first `cancel` unregisters the platform watch; every later call is a
/// no-op. Safe to call any number of times.
pub struct WatchHandle<P> {
    cancelled: Arc<AtomicBool>,
    source: Arc<P>,
    id: WatchId,
}

impl<P: PositionSource> WatchHandle<P> {
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.source.clear_watch(self.id);
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Single-owner geolocation acquisition over an injected platform capability.
///
/// `request_once`/`watch` never return an error past this boundary; every
/// failure resolves to a normal state update with a normalized
/// [`GeolocationError`].
pub struct GeolocationSession<P> {
    source: Arc<P>,
    config: SessionConfig,
    shared: Arc<Mutex<Shared>>,
    next_seq: Arc<AtomicU64>,
}

impl<P: PositionSource> GeolocationSession<P> {
    pub fn new(source: P, config: SessionConfig) -> Self {
        Self {
            source: Arc::new(source),
            config,
            shared: Arc::new(Mutex::new(Shared {
                snapshot: SessionSnapshot {
                    coordinate: None,
                    status: SessionStatus::Idle,
                    last_error: None,
                    permission: PermissionState::Undetermined,
                },
                applied_seq: 0,
            })),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        lock_shared(&self.shared).snapshot.clone()
    }

    #[must_use]
    pub fn permission(&self) -> PermissionState {
        lock_shared(&self.shared).snapshot.permission
    }

    fn claim_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn begin_acquiring(&self) -> u64 {
        let seq = self.claim_seq();
        lock_shared(&self.shared).snapshot.status = SessionStatus::Acquiring;
        seq
    }

    fn fail_now(&self, kind: GeolocationErrorKind, message: &str) -> SessionSnapshot {
        let seq = self.claim_seq();
        apply_outcome(
            &self.shared,
            seq,
            Outcome::Failure(GeolocationError::new(kind, message)),
        )
    }

    /// Common gating for `request_once`/`watch`. Returns the failure snapshot
    /// when acquisition must not proceed.
    async fn permission_gate(&self) -> Option<SessionSnapshot> {
        if !self.source.is_supported() {
            return Some(self.fail_now(
                GeolocationErrorKind::Unsupported,
                "geolocation is not supported on this device",
            ));
        }
        // A remembered denial is terminal until the user acts in settings;
        // re-prompting at the platform level would only confuse.
        if self.permission() == PermissionState::Denied {
            return Some(self.fail_now(
                GeolocationErrorKind::PermissionDenied,
                "location access was denied",
            ));
        }
        let queried = self.source.query_permission().await;
        lock_shared(&self.shared).snapshot.permission = queried;
        if queried == PermissionState::Denied {
            return Some(self.fail_now(
                GeolocationErrorKind::PermissionDenied,
                "location access was denied",
            ));
        }
        None
    }

    /// Issue a single bounded position request.
    ///
    /// Resolves to the resulting snapshot; on success the coordinate is set,
    /// status is `Ready` and permission is `Granted`. Concurrent calls are
    /// safe, the result of a superseded request is discarded.
    pub async fn request_once(&self) -> SessionSnapshot {
        if let Some(failed) = self.permission_gate().await {
            return failed;
        }

        let seq = self.begin_acquiring();
        let opts = PositionOptions {
            high_accuracy: true,
            timeout: self.config.request_timeout,
            max_age: self.config.reuse_window,
        };

        // The platform is asked to honor `opts.timeout`; the outer timeout is
        // a backstop for implementations that ignore it.
        let result = match tokio::time::timeout(
            self.config.request_timeout,
            self.source.request_position(opts),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RawPositionError {
                code: 3,
                message: "bounded wait elapsed".to_string(),
            }),
        };

        apply_outcome(&self.shared, seq, outcome_from_raw(result))
    }

    /// Start a continuous watch. Updates keep flowing into the session state
    /// until the returned handle is cancelled.
    ///
    /// Returns `None` when acquisition is gated (unsupported platform or
    /// denied permission); the failure is recorded in the snapshot.
    pub async fn watch(&self) -> Option<WatchHandle<P>> {
        if self.permission_gate().await.is_some() {
            return None;
        }

        self.begin_acquiring();
        let opts = PositionOptions {
            high_accuracy: true,
            timeout: self.config.request_timeout,
            max_age: self.config.watch_reuse_window,
        };

        let (tx, mut rx) = mpsc::channel(16);
        let id = self.source.watch_position(opts, tx);

        let cancelled = Arc::new(AtomicBool::new(false));
        let shared = Arc::clone(&self.shared);
        let next_seq = Arc::clone(&self.next_seq);
        let task_cancelled = Arc::clone(&cancelled);
        tokio::spawn(async move {
            while let Some(update) = rx.recv().await {
                if task_cancelled.load(Ordering::SeqCst) {
                    break;
                }
                let seq = next_seq.fetch_add(1, Ordering::SeqCst) + 1;
                apply_outcome(&shared, seq, outcome_from_raw(update));
            }
        });

        Some(WatchHandle {
            cancelled,
            source: Arc::clone(&self.source),
            id,
        })
    }

    /// Forget the held coordinate. A user action, not a permission change, so
    /// `permission` is left untouched.
    pub fn clear(&self) -> SessionSnapshot {
        let seq = self.claim_seq();
        let mut guard = lock_shared(&self.shared);
        // In-flight completions issued before the clear must not resurrect
        // the forgotten coordinate.
        guard.applied_seq = guard.applied_seq.max(seq);
        guard.snapshot.coordinate = None;
        guard.snapshot.status = SessionStatus::Idle;
        guard.snapshot.last_error = None;
        guard.snapshot.clone()
    }

    /// Resolve a coarse position from network-level signals.
    ///
    /// The resulting coordinate is always flagged approximate and never
    /// grants (or revokes) platform permission. Provider failure is non-fatal
    /// and resolves to a transient unavailability.
    pub async fn approximate<A: ApproximateSource>(&self, provider: &A) -> SessionSnapshot {
        let seq = self.begin_acquiring();
        let outcome = match provider.locate().await {
            Ok(fix) => match Coordinate::new(
                fix.latitude,
                fix.longitude,
                self.config.approximate_accuracy_m,
                Utc::now(),
                true,
                fix.city,
            ) {
                Ok(coordinate) => Outcome::Fix {
                    coordinate,
                    grants_permission: false,
                },
                Err(err) => Outcome::Failure(GeolocationError::new(
                    GeolocationErrorKind::PositionUnavailable,
                    format!("provider returned an invalid position: {err}"),
                )),
            },
            Err(err) => {
                tracing::warn!(error = %err, "approximate location lookup failed");
                Outcome::Failure(GeolocationError::new(
                    GeolocationErrorKind::PositionUnavailable,
                    "could not approximate your location",
                ))
            }
        };
        apply_outcome(&self.shared, seq, outcome)
    }

    /// Platform-level permission change notification. The only path back to
    /// `Undetermined`.
    pub fn permission_changed(&self, state: PermissionState) {
        lock_shared(&self.shared).snapshot.permission = state;
    }
}
