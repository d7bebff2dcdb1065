//! End-to-end flight lifecycle against a headless surface.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use paddock_core::config::FlightConfig;
use paddock_core::types::Waypoint;
use paddock_flight::{
    FlightController, FlightObserver, FlightPhase, FlightPlan, FlightSettings, FlightState,
    HeadlessSurface, StartOutcome,
};

#[derive(Default)]
struct ProgressLog {
    percents: Mutex<Vec<f64>>,
    zooms: Mutex<Vec<i32>>,
    phases: Mutex<Vec<FlightPhase>>,
}

impl FlightObserver for ProgressLog {
    fn on_progress(&self, percent: f64) {
        self.percents.lock().unwrap().push(percent);
    }

    fn on_zoom_change(&self, zoom: i32) {
        self.zooms.lock().unwrap().push(zoom);
    }

    fn on_state_change(&self, state: &FlightState) {
        self.phases.lock().unwrap().push(state.phase());
    }
}

fn fast_settings() -> FlightSettings {
    FlightSettings {
        frame_interval: Duration::from_millis(4),
        settle_leg: Duration::from_millis(20),
        ..FlightSettings::default()
    }
}

fn configured_plan(duration_ms: u64) -> FlightPlan {
    FlightPlan {
        duration_ms,
        ..FlightPlan::from_config(&FlightConfig::default())
    }
}

async fn wait(controller: &FlightController) {
    tokio::time::timeout(Duration::from_secs(3), controller.finished())
        .await
        .expect("flight did not finish in time");
}

#[tokio::test]
async fn configured_flight_lands_on_destination() {
    let surface = Arc::new(HeadlessSurface::ready());
    let log = Arc::new(ProgressLog::default());
    let controller = FlightController::new(surface.clone(), log.clone(), fast_settings());

    controller.start(configured_plan(80)).unwrap();
    wait(&controller).await;

    let destination = FlightConfig::default().destination;
    assert_eq!(surface.centers().last(), Some(&destination));
    assert_eq!(surface.zooms().last(), Some(&14.0));

    let percents = log.percents.lock().unwrap().clone();
    assert!(percents.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(percents.last(), Some(&100.0));

    // Zoom badge only climbs during the flight and ends on the target level.
    let zooms = log.zooms.lock().unwrap().clone();
    assert!(zooms.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(zooms.last(), Some(&14));
}

#[tokio::test]
async fn restart_storm_keeps_only_latest_flight() {
    let surface = Arc::new(HeadlessSurface::ready());
    let log = Arc::new(ProgressLog::default());
    let controller = FlightController::new(surface.clone(), log.clone(), fast_settings());

    let far_away = FlightPlan {
        start: Waypoint::new(-40.0, -70.0),
        end: Waypoint::new(-41.0, -71.0),
        ..configured_plan(2_000)
    };
    controller.start(far_away).unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!surface.centers().is_empty());

    for _ in 0..5 {
        controller.start(far_away).unwrap();
    }
    let before_last = surface.centers().len();
    let outcome = controller.start(configured_plan(60)).unwrap();
    assert_eq!(outcome, StartOutcome::Started { run_id: 7 });
    wait(&controller).await;

    let latest = surface.centers().split_off(before_last);
    assert!(!latest.is_empty());
    assert!(latest.iter().all(|c| c.lat > 0.0), "frame from superseded run");
    assert_eq!(controller.state(), FlightState::Complete);
}

#[tokio::test]
async fn queued_flight_starts_when_map_becomes_ready() {
    let surface = Arc::new(HeadlessSurface::default());
    let log = Arc::new(ProgressLog::default());
    let controller = FlightController::new(surface.clone(), log.clone(), fast_settings());

    assert_eq!(
        controller.start(configured_plan(40)).unwrap(),
        StartOutcome::Queued
    );
    assert!(log.phases.lock().unwrap().is_empty());

    surface.set_ready(true);
    controller.surface_ready().unwrap();
    wait(&controller).await;

    assert_eq!(
        log.phases.lock().unwrap().clone(),
        vec![FlightPhase::Running, FlightPhase::Complete]
    );
}

#[tokio::test]
async fn cancel_then_restart_replays_last_plan() {
    let surface = Arc::new(HeadlessSurface::ready());
    let log = Arc::new(ProgressLog::default());
    let controller = FlightController::new(surface.clone(), log.clone(), fast_settings());

    controller.start(configured_plan(5_000)).unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    controller.cancel();
    assert_eq!(controller.state(), FlightState::Idle);

    let outcome = controller.restart().unwrap();
    assert_eq!(outcome, StartOutcome::Started { run_id: 2 });
    assert_eq!(controller.plan(), Some(configured_plan(5_000)));
    controller.cancel();
    wait(&controller).await;

    assert_eq!(
        log.phases.lock().unwrap().clone(),
        vec![
            FlightPhase::Running,
            FlightPhase::Idle,
            FlightPhase::Running,
            FlightPhase::Idle
        ]
    );
}
