//! Error types for the flight controller.

use paddock_core::error::PaddockError;

use crate::state::FlightPhase;

/// Errors from flight planning and control.
#[derive(Debug, thiserror::Error)]
pub enum FlightError {
    #[error("Invalid flight plan: {0}")]
    InvalidPlan(String),
    #[error("Invalid state transition: {0} -> {1}")]
    InvalidTransition(FlightPhase, FlightPhase),
    #[error("A flight is in progress")]
    Busy,
    #[error("No flight has been started yet")]
    NoPlan,
    #[error("Camera position is unknown")]
    CameraUnknown,
}

impl From<FlightError> for PaddockError {
    fn from(err: FlightError) -> Self {
        PaddockError::Flight(err.to_string())
    }
}
