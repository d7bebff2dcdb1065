//! Flight lifecycle state machine.
//!
//! Valid transitions:
//! - Idle -> Running (start)
//! - Running -> Running (a new start supersedes the current run)
//! - Running -> Complete (final frame reached)
//! - Running -> Idle (cancel)
//! - Complete -> Idle (cancel, or the first half of a restart)

use std::fmt;

use tokio::time::Instant;

/// Current state of the flight controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightState {
    /// No flight in progress.
    Idle,
    /// Frames are being pushed to the map surface.
    Running {
        started_at: Instant,
        /// Linear progress of the most recent frame, in `[0, 1]`.
        progress: f64,
    },
    /// The camera reached the destination.
    Complete,
}

impl FlightState {
    pub fn phase(&self) -> FlightPhase {
        match self {
            FlightState::Idle => FlightPhase::Idle,
            FlightState::Running { .. } => FlightPhase::Running,
            FlightState::Complete => FlightPhase::Complete,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, FlightState::Running { .. })
    }

    /// Progress as a fraction: 0 when idle, 1 when complete.
    pub fn progress(&self) -> f64 {
        match self {
            FlightState::Idle => 0.0,
            FlightState::Running { progress, .. } => *progress,
            FlightState::Complete => 1.0,
        }
    }
}

impl fmt::Display for FlightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightState::Running { progress, .. } => {
                write!(f, "Running ({:.0}%)", progress * 100.0)
            }
            other => write!(f, "{}", other.phase()),
        }
    }
}

/// [`FlightState`] without its payload, used for transition checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlightPhase {
    Idle,
    Running,
    Complete,
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightPhase::Idle => write!(f, "Idle"),
            FlightPhase::Running => write!(f, "Running"),
            FlightPhase::Complete => write!(f, "Complete"),
        }
    }
}

impl FlightPhase {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &FlightPhase) -> bool {
        matches!(
            (self, target),
            (FlightPhase::Idle, FlightPhase::Running)
                | (FlightPhase::Running, FlightPhase::Running)
                | (FlightPhase::Running, FlightPhase::Complete)
                // Cancel / restart
                | (FlightPhase::Running, FlightPhase::Idle)
                | (FlightPhase::Complete, FlightPhase::Idle)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display() {
        assert_eq!(FlightPhase::Idle.to_string(), "Idle");
        assert_eq!(FlightPhase::Running.to_string(), "Running");
        assert_eq!(FlightPhase::Complete.to_string(), "Complete");
    }

    #[test]
    fn test_state_display() {
        assert_eq!(FlightState::Idle.to_string(), "Idle");
        assert_eq!(FlightState::Complete.to_string(), "Complete");
        let running = FlightState::Running {
            started_at: Instant::now(),
            progress: 0.42,
        };
        assert_eq!(running.to_string(), "Running (42%)");
    }

    #[test]
    fn test_state_progress() {
        assert_eq!(FlightState::Idle.progress(), 0.0);
        assert_eq!(FlightState::Complete.progress(), 1.0);
        let running = FlightState::Running {
            started_at: Instant::now(),
            progress: 0.3,
        };
        assert_eq!(running.progress(), 0.3);
        assert!(running.is_running());
        assert!(!FlightState::Complete.is_running());
    }

    #[test]
    fn test_valid_transitions() {
        assert!(FlightPhase::Idle.can_transition_to(&FlightPhase::Running));
        assert!(FlightPhase::Running.can_transition_to(&FlightPhase::Running));
        assert!(FlightPhase::Running.can_transition_to(&FlightPhase::Complete));
        assert!(FlightPhase::Running.can_transition_to(&FlightPhase::Idle));
        assert!(FlightPhase::Complete.can_transition_to(&FlightPhase::Idle));
    }

    #[test]
    fn test_invalid_transitions() {
        // Must pass through Running to complete.
        assert!(!FlightPhase::Idle.can_transition_to(&FlightPhase::Complete));
        // Restarting goes through Idle first.
        assert!(!FlightPhase::Complete.can_transition_to(&FlightPhase::Running));
        assert!(!FlightPhase::Idle.can_transition_to(&FlightPhase::Idle));
        assert!(!FlightPhase::Complete.can_transition_to(&FlightPhase::Complete));
    }

    #[test]
    fn test_all_valid_transitions_count() {
        let phases = [FlightPhase::Idle, FlightPhase::Running, FlightPhase::Complete];
        let count = phases
            .iter()
            .flat_map(|from| phases.iter().map(move |to| (from, to)))
            .filter(|(from, to)| from.can_transition_to(to))
            .count();
        assert_eq!(count, 5);
    }
}
