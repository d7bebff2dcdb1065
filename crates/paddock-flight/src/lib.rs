//! Map flight animation: eases a camera from a wide view down onto a
//! destination, with cancellation and a short landing settle.

pub mod animator;
pub mod controller;
pub mod error;
pub mod geo;
pub mod state;
pub mod surface;

pub use animator::{ease_in_out_cubic, frame_at, progress_fraction, settle_zoom, FlightPlan, Frame};
pub use controller::{Camera, FlightController, FlightSettings, StartOutcome};
pub use error::FlightError;
pub use geo::{
    locate_user, FixedPosition, GeolocationError, GeolocationProvider, UserLocation,
    DENIED_ADVISORY, UNSUPPORTED_ADVISORY,
};
pub use state::{FlightPhase, FlightState};
pub use surface::{FlightObserver, HeadlessSurface, MapSurface, NoopObserver, SurfaceCommand, ZoomListener};
