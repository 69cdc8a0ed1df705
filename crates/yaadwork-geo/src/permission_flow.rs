//! Guided consent flow for location access.
//!
//! A four-stage sequence layered over the session: explain the benefits,
//! request, then either confirm or walk the user through re-enabling access
//! in their browser. The flow only observes session snapshots; it never
//! triggers acquisition itself and dismissing it leaves the session
//! untouched.

use chrono::{DateTime, Duration, Utc};

use crate::capability::PermissionState;
use crate::session::SessionSnapshot;

/// How long the confirmation stays on screen before the flow finishes.
const CONFIRMATION_DELAY_MS: i64 = 1_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    /// Why sharing a location helps, with an explicit opt-in.
    ExplainBenefits,
    /// Waiting on the platform prompt and the session's answer.
    Requesting,
    /// Access granted; auto-advances to `Done` after a short confirmation.
    Granted,
    /// Access denied; shows persistent, browser-specific recovery steps.
    DeniedWithHelp,
    Done,
}

/// Browser family for recovery instructions, sniffed best-effort from the
/// user-agent string. Inherently fragile, so every unknown falls back to
/// `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFamily {
    Chrome,
    Safari,
    Firefox,
    Edge,
    Other,
}

impl BrowserFamily {
    #[must_use]
    pub fn sniff(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        // Order matters: Edge and Chrome UAs both carry "safari", and Edge
        // carries "chrome".
        if ua.contains("edg/") || ua.contains("edge/") {
            BrowserFamily::Edge
        } else if ua.contains("firefox/") || ua.contains("fxios") {
            BrowserFamily::Firefox
        } else if ua.contains("chrome/") || ua.contains("crios") {
            BrowserFamily::Chrome
        } else if ua.contains("safari/") {
            BrowserFamily::Safari
        } else {
            BrowserFamily::Other
        }
    }

    /// Step-by-step settings instructions for re-enabling location access.
    #[must_use]
    pub fn recovery_steps(self) -> &'static [&'static str] {
        match self {
            BrowserFamily::Chrome => &[
                "Click the lock icon to the left of the address bar",
                "Select \"Site settings\"",
                "Change Location from \"Block\" to \"Allow\"",
                "Reload the page and try again",
            ],
            BrowserFamily::Safari => &[
                "Open Safari > Settings > Websites",
                "Select \"Location\" in the sidebar",
                "Set this site to \"Allow\"",
                "Reload the page and try again",
            ],
            BrowserFamily::Firefox => &[
                "Click the shield/permissions icon in the address bar",
                "Remove the blocked Location permission",
                "Reload the page and allow access when prompted",
            ],
            BrowserFamily::Edge => &[
                "Click the lock icon to the left of the address bar",
                "Select \"Permissions for this site\"",
                "Change Location to \"Allow\"",
                "Reload the page and try again",
            ],
            BrowserFamily::Other => &[
                "Open your browser's site or privacy settings",
                "Allow location access for this site",
                "Reload the page and try again",
            ],
        }
    }
}

/// The guided consent flow. Feed it session snapshots; it never mutates the
/// session.
#[derive(Debug)]
pub struct PermissionFlow {
    stage: FlowStage,
    browser: BrowserFamily,
    granted_at: Option<DateTime<Utc>>,
}

impl PermissionFlow {
    #[must_use]
    pub fn new(user_agent: &str) -> Self {
        Self {
            stage: FlowStage::ExplainBenefits,
            browser: BrowserFamily::sniff(user_agent),
            granted_at: None,
        }
    }

    #[must_use]
    pub fn stage(&self) -> FlowStage {
        self.stage
    }

    #[must_use]
    pub fn browser(&self) -> BrowserFamily {
        self.browser
    }

    /// The user accepted the pitch (or asked to retry after denial); the
    /// caller is expected to trigger acquisition on the session.
    pub fn begin_request(&mut self) {
        if matches!(
            self.stage,
            FlowStage::ExplainBenefits | FlowStage::DeniedWithHelp
        ) {
            self.stage = FlowStage::Requesting;
        }
    }

    /// Feed the latest session snapshot and the current time.
    ///
    /// Drives `Requesting` to `Granted`/`DeniedWithHelp` from the session's
    /// permission answer, and `Granted` to `Done` once the confirmation delay
    /// has elapsed.
    pub fn observe(&mut self, snapshot: &SessionSnapshot, now: DateTime<Utc>) {
        match self.stage {
            FlowStage::Requesting => match snapshot.permission {
                PermissionState::Granted => {
                    self.stage = FlowStage::Granted;
                    self.granted_at = Some(now);
                }
                PermissionState::Denied => {
                    self.stage = FlowStage::DeniedWithHelp;
                }
                PermissionState::Undetermined => {}
            },
            FlowStage::Granted => {
                if let Some(granted_at) = self.granted_at {
                    if now.signed_duration_since(granted_at)
                        >= Duration::milliseconds(CONFIRMATION_DELAY_MS)
                    {
                        self.stage = FlowStage::Done;
                    }
                }
            }
            _ => {}
        }
    }

    /// Close the flow at any stage. Never touches the session.
    pub fn dismiss(&mut self) {
        self.stage = FlowStage::Done;
    }

    /// Recovery instructions for the sniffed browser.
    #[must_use]
    pub fn recovery_steps(&self) -> &'static [&'static str] {
        self.browser.recovery_steps()
    }
}
