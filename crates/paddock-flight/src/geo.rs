//! Optional user location for the auxiliary map marker.
//!
//! A failed lookup never blocks the flight; it only turns into an advisory.

use paddock_core::types::Waypoint;
use serde::Serialize;
use tracing::{info, warn};

pub const DENIED_ADVISORY: &str = "Location access denied. Drone view will continue.";
pub const UNSUPPORTED_ADVISORY: &str = "Geolocation not supported. Drone view will continue.";

#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable: {0}")]
    Unavailable(String),
    #[error("Geolocation is not supported")]
    Unsupported,
}

/// Source of the user's current position.
pub trait GeolocationProvider: Send + Sync {
    fn current_position(&self) -> Result<Waypoint, GeolocationError>;
}

/// Provider that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Waypoint);

impl GeolocationProvider for FixedPosition {
    fn current_position(&self) -> Result<Waypoint, GeolocationError> {
        Ok(self.0)
    }
}

/// Outcome of a location lookup: a marker, or an advisory for the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserLocation {
    pub marker: Option<Waypoint>,
    pub advisory: Option<&'static str>,
}

pub fn locate_user(provider: Option<&dyn GeolocationProvider>) -> UserLocation {
    let Some(provider) = provider else {
        warn!("No geolocation provider");
        return UserLocation {
            marker: None,
            advisory: Some(UNSUPPORTED_ADVISORY),
        };
    };

    match provider.current_position() {
        Ok(position) => {
            info!(lat = position.lat, lng = position.lng, "User location found");
            UserLocation {
                marker: Some(position),
                advisory: None,
            }
        }
        Err(GeolocationError::Unsupported) => {
            warn!("Geolocation not supported");
            UserLocation {
                marker: None,
                advisory: Some(UNSUPPORTED_ADVISORY),
            }
        }
        Err(e) => {
            warn!(error = %e, "Geolocation failed");
            UserLocation {
                marker: None,
                advisory: Some(DENIED_ADVISORY),
            }
        }
    }
}
