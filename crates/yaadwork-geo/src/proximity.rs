//! Click-to-toggle control over the geolocation session.
//!
//! The mental model is "find me" / "forget me": the first activation
//! acquires a position, a second activation while one is held clears it.
//! Terminal state transitions surface exactly one user-visible notice each,
//! decoupling "what happened" (session state) from "tell the user once".

use std::collections::VecDeque;

use crate::capability::PositionSource;
use crate::error::GeolocationErrorKind;
use crate::session::{GeolocationSession, SessionSnapshot, SessionStatus, WatchHandle};

/// One-shot user-visible message, distinct from persistent state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Found {
        city_label: Option<String>,
        approximate: bool,
    },
    Cleared,
    Denied,
    Unavailable,
    TimedOut,
    Unsupported,
}

impl Notice {
    /// Plain-language toast copy. Denial additionally opens the persistent
    /// help panel (see `PermissionFlow`); this is only the transient part.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Notice::Found {
                city_label: Some(city),
                approximate: true,
            } => format!("Showing jobs around {city} (approximate)"),
            Notice::Found {
                city_label: Some(city),
                ..
            } => format!("Showing jobs near {city}"),
            Notice::Found { .. } => "Location found. Nearby jobs now appear first.".to_string(),
            Notice::Cleared => "Location cleared. Distance sorting is off.".to_string(),
            Notice::Denied => {
                "Location access is blocked. Allow it in your browser settings to see nearby jobs."
                    .to_string()
            }
            Notice::Unavailable => {
                "We couldn't pin down your location. Check your signal and try again.".to_string()
            }
            Notice::TimedOut => "Finding your location took too long. Try again.".to_string(),
            Notice::Unsupported => {
                "This browser can't share your location. Try searching by parish instead."
                    .to_string()
            }
        }
    }
}

/// Discriminant for suppressing repeat announcements of the same terminal
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Announced {
    Found,
    Cleared,
    Failed(GeolocationErrorKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityMode {
    /// One fix per activation.
    OneShot,
    /// Keep following the device until toggled off.
    Continuous,
}

pub struct ProximityControl<P: PositionSource> {
    session: GeolocationSession<P>,
    mode: ProximityMode,
    watch: Option<WatchHandle<P>>,
    notices: VecDeque<Notice>,
    last_announced: Option<Announced>,
}

impl<P: PositionSource> ProximityControl<P> {
    #[must_use]
    pub fn new(session: GeolocationSession<P>, mode: ProximityMode) -> Self {
        Self {
            session,
            mode,
            watch: None,
            notices: VecDeque::new(),
            last_announced: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &GeolocationSession<P> {
        &self.session
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// "Find me" / "forget me": acquire when no coordinate is held, clear
    /// when one is.
    pub async fn toggle(&mut self) -> SessionSnapshot {
        if self.session.snapshot().coordinate.is_some() {
            if let Some(watch) = self.watch.take() {
                watch.cancel();
            }
            let snap = self.session.clear();
            self.push(Announced::Cleared, Notice::Cleared);
            return snap;
        }

        match self.mode {
            ProximityMode::OneShot => {
                let snap = self.session.request_once().await;
                self.announce(&snap);
                snap
            }
            ProximityMode::Continuous => {
                self.watch = self.session.watch().await;
                let snap = self.session.snapshot();
                self.announce(&snap);
                snap
            }
        }
    }

    /// Drain pending notices, first folding in any terminal state the session
    /// reached since the last call. Each terminal transition yields exactly
    /// one notice no matter how often this is polled.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        let snap = self.session.snapshot();
        self.announce(&snap);
        self.notices.drain(..).collect()
    }

    fn announce(&mut self, snap: &SessionSnapshot) {
        match snap.status {
            SessionStatus::Ready => {
                if let Some(coordinate) = &snap.coordinate {
                    self.push(
                        Announced::Found,
                        Notice::Found {
                            city_label: coordinate.city_label.clone(),
                            approximate: coordinate.is_approximate,
                        },
                    );
                }
            }
            SessionStatus::Failed => {
                if let Some(error) = &snap.last_error {
                    let notice = match error.kind {
                        GeolocationErrorKind::PermissionDenied => Notice::Denied,
                        GeolocationErrorKind::PositionUnavailable => Notice::Unavailable,
                        GeolocationErrorKind::Timeout => Notice::TimedOut,
                        GeolocationErrorKind::Unsupported => Notice::Unsupported,
                    };
                    self.push(Announced::Failed(error.kind), notice);
                }
            }
            SessionStatus::Idle | SessionStatus::Acquiring => {}
        }
    }

    fn push(&mut self, key: Announced, notice: Notice) {
        if self.last_announced != Some(key) {
            self.last_announced = Some(key);
            self.notices.push_back(notice);
        }
    }
}
