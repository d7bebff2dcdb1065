//! Camera trajectory between two waypoints.
//!
//! Everything here is a pure function of a [`FlightPlan`] and an elapsed
//! time, so frames can be computed in any order (scrubbing, tests, replays).

use std::time::Duration;

use paddock_core::config::FlightConfig;
use paddock_core::types::Waypoint;
use serde::{Deserialize, Serialize};

use crate::error::FlightError;

/// Endpoints and timing of one camera flight. Immutable once started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub start: Waypoint,
    pub end: Waypoint,
    pub start_zoom: f64,
    pub end_zoom: f64,
    pub duration_ms: u64,
}

impl FlightPlan {
    /// The configured drone flight from the wide view to the destination.
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            start: config.source,
            end: config.destination,
            start_zoom: config.start_zoom,
            end_zoom: config.end_zoom,
            duration_ms: config.duration_ms,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Check coordinates are on the globe and zooms sit inside `[min_zoom, max_zoom]`.
    pub fn validate(&self, min_zoom: f64, max_zoom: f64) -> Result<(), FlightError> {
        for wp in [self.start, self.end] {
            if !(wp.lat.is_finite() && (-90.0..=90.0).contains(&wp.lat)) {
                return Err(FlightError::InvalidPlan(format!("latitude out of range: {}", wp.lat)));
            }
            if !(wp.lng.is_finite() && (-180.0..=180.0).contains(&wp.lng)) {
                return Err(FlightError::InvalidPlan(format!(
                    "longitude out of range: {}",
                    wp.lng
                )));
            }
        }
        for zoom in [self.start_zoom, self.end_zoom] {
            if !(zoom.is_finite() && (min_zoom..=max_zoom).contains(&zoom)) {
                return Err(FlightError::InvalidPlan(format!(
                    "zoom {zoom} outside [{min_zoom}, {max_zoom}]"
                )));
            }
        }
        Ok(())
    }
}

/// Camera state at one instant of a flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub position: Waypoint,
    pub zoom: f64,
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
}

impl Frame {
    pub fn percent(&self) -> f64 {
        self.progress * 100.0
    }

    /// Zoom as shown in the zoom badge.
    pub fn rounded_zoom(&self) -> i32 {
        self.zoom.round() as i32
    }
}

/// Cubic ease-in-out: slow start, fast middle, slow landing.
pub fn ease_in_out_cubic(f: f64) -> f64 {
    if f < 0.5 {
        4.0 * f * f * f
    } else {
        1.0 - (-2.0 * f + 2.0).powi(3) / 2.0
    }
}

/// Linear progress after `elapsed`, clamped to `[0, 1]`.
///
/// A zero-length plan is complete immediately.
pub fn progress_fraction(plan: &FlightPlan, elapsed: Duration) -> f64 {
    if plan.duration_ms == 0 {
        return 1.0;
    }
    (elapsed.as_secs_f64() / plan.duration().as_secs_f64()).min(1.0)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Camera frame `elapsed` into the flight.
///
/// Position and zoom share the same eased fraction so they land together;
/// the final frame is exactly the plan's end.
pub fn frame_at(plan: &FlightPlan, elapsed: Duration) -> Frame {
    let progress = progress_fraction(plan, elapsed);
    if progress >= 1.0 {
        return Frame {
            position: plan.end,
            zoom: plan.end_zoom,
            progress: 1.0,
        };
    }

    let eased = ease_in_out_cubic(progress);
    Frame {
        position: Waypoint::new(
            lerp(plan.start.lat, plan.end.lat, eased),
            lerp(plan.start.lng, plan.end.lng, eased),
        ),
        zoom: lerp(plan.start_zoom, plan.end_zoom, eased),
        progress,
    }
}

/// Zoom during the landing settle: a linear dip of `depth` over `leg`, then
/// back to `end_zoom` over another `leg`.
pub fn settle_zoom(plan: &FlightPlan, depth: f64, leg: Duration, elapsed: Duration) -> f64 {
    let leg_secs = leg.as_secs_f64();
    if leg_secs <= 0.0 {
        return plan.end_zoom;
    }
    let t = elapsed.as_secs_f64() / leg_secs;
    let dipped = plan.end_zoom - depth;
    if t < 1.0 {
        lerp(plan.end_zoom, dipped, t)
    } else if t < 2.0 {
        lerp(dipped, plan.end_zoom, t - 1.0)
    } else {
        plan.end_zoom
    }
}
