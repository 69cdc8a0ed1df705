pub mod approximate;
pub mod capability;
pub mod distance;
pub mod error;
pub mod permission_flow;
pub mod proximity;
pub mod session;

pub use approximate::{ApproximateFix, ApproximateSource, IpLocateClient};
pub use capability::{
    PermissionState, PositionOptions, PositionSource, RawFix, RawPositionError, WatchId,
};
pub use distance::{distance_km, format_distance, is_within_radius, sort_by_distance};
pub use error::{ApproximateError, GeolocationError, GeolocationErrorKind};
pub use permission_flow::{BrowserFamily, FlowStage, PermissionFlow};
pub use proximity::{Notice, ProximityControl, ProximityMode};
pub use session::{
    GeolocationSession, SessionConfig, SessionSnapshot, SessionStatus, WatchHandle,
};
