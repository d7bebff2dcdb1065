//! Flight controller: owns the animation lifecycle.
//!
//! Each started flight gets a fresh run id. The frame task checks its run id
//! under the state lock before every write, so once `start` or `cancel`
//! returns no frame from an earlier run can reach the surface or the
//! observer, even if that task was already scheduled.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use paddock_core::config::FlightConfig;
use paddock_core::types::{TileLayer, Waypoint};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::animator::{self, FlightPlan, Frame};
use crate::error::FlightError;
use crate::state::{FlightPhase, FlightState};
use crate::surface::{FlightObserver, MapSurface};

/// Timing and limits shared by every flight of one controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSettings {
    pub frame_interval: Duration,
    pub settle_depth: f64,
    pub settle_leg: Duration,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl FlightSettings {
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            frame_interval: Duration::from_millis(config.frame_interval_ms.max(1)),
            settle_depth: config.settle_depth,
            settle_leg: Duration::from_millis(config.settle_leg_ms),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }
}

impl Default for FlightSettings {
    fn default() -> Self {
        Self::from_config(&FlightConfig::default())
    }
}

/// Last center and zoom pushed to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub center: Waypoint,
    pub zoom: f64,
}

/// Result of asking the controller to start a flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { run_id: u64 },
    /// The surface is not ready; the plan starts on [`FlightController::surface_ready`].
    Queued,
}

/// A plan waiting for the surface, and whether it becomes the replay plan.
#[derive(Clone, Copy)]
struct QueuedPlan {
    plan: FlightPlan,
    replayable: bool,
}

struct Inner {
    state: FlightState,
    run_id: u64,
    /// Plan of the current or most recent run.
    plan: Option<FlightPlan>,
    /// Plan `restart` replays. Camera hops from `fly_to` never replace it.
    replay: Option<FlightPlan>,
    queued: Option<QueuedPlan>,
    task: Option<JoinHandle<()>>,
    camera: Option<Camera>,
    layer: TileLayer,
}

struct Shared {
    inner: Mutex<Inner>,
    surface: Arc<dyn MapSurface>,
    observer: Arc<dyn FlightObserver>,
    settings: FlightSettings,
    /// True while a frame task is moving the camera (flight or settle).
    driving: watch::Sender<bool>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, inner: &mut Inner, target: FlightState) -> Result<(), FlightError> {
        let from = inner.state.phase();
        let to = target.phase();
        if !from.can_transition_to(&to) {
            return Err(FlightError::InvalidTransition(from, to));
        }
        debug!("Flight state: {} -> {}", from, to);
        inner.state = target;
        self.observer.on_state_change(&inner.state);
        Ok(())
    }

    /// Abort the current frame task and invalidate its run id.
    fn supersede(&self, inner: &mut Inner) -> u64 {
        if let Some(task) = inner.task.take() {
            task.abort();
        }
        inner.run_id += 1;
        inner.run_id
    }

    /// Supersede the current run and settle back to Idle.
    fn halt(&self, inner: &mut Inner) -> u64 {
        let run_id = self.supersede(inner);
        if inner.state.phase() != FlightPhase::Idle {
            if let Err(e) = self.transition(inner, FlightState::Idle) {
                warn!(error = %e, "Halt transition rejected");
            }
        }
        self.driving.send_replace(false);
        run_id
    }

    fn launch(
        self: &Arc<Self>,
        plan: FlightPlan,
        replayable: bool,
    ) -> Result<StartOutcome, FlightError> {
        let mut inner = self.lock();
        if inner.state.phase() == FlightPhase::Complete {
            self.transition(&mut inner, FlightState::Idle)?;
        }
        let previous = inner.run_id;
        let run_id = self.supersede(&mut inner);
        let started_at = Instant::now();
        self.transition(
            &mut inner,
            FlightState::Running {
                started_at,
                progress: 0.0,
            },
        )?;
        inner.plan = Some(plan);
        if replayable {
            inner.replay = Some(plan);
        }
        inner.queued = None;
        self.driving.send_replace(true);
        inner.task = Some(tokio::spawn(run_flight(
            Arc::clone(self),
            run_id,
            plan,
            started_at,
        )));

        info!(
            run_id,
            superseded = previous,
            duration_ms = plan.duration_ms,
            "Flight started"
        );
        Ok(StartOutcome::Started { run_id })
    }

    fn push_frame(&self, inner: &mut Inner, frame: &Frame) {
        self.surface.set_center(frame.position);
        self.surface.set_zoom(frame.zoom);
        inner.camera = Some(Camera {
            center: frame.position,
            zoom: frame.zoom,
        });
        if let FlightState::Running { progress, .. } = &mut inner.state {
            *progress = frame.progress;
        }
        self.observer.on_progress(frame.percent());
        self.observer.on_zoom_change(frame.rounded_zoom());
    }
}

/// Frame loop for one run: the eased flight, then the landing settle.
async fn run_flight(shared: Arc<Shared>, run_id: u64, plan: FlightPlan, started_at: Instant) {
    let mut ticker = tokio::time::interval(shared.settings.frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let frame = animator::frame_at(&plan, started_at.elapsed());
        let mut inner = shared.lock();
        if inner.run_id != run_id {
            debug!(run_id, "Dropping frame from superseded flight");
            return;
        }
        shared.push_frame(&mut inner, &frame);
        if frame.progress >= 1.0 {
            if let Err(e) = shared.transition(&mut inner, FlightState::Complete) {
                warn!(run_id, error = %e, "Flight could not complete");
                return;
            }
            info!(run_id, "Flight complete");
            break;
        }
    }

    let settle_started = Instant::now();
    let settle_total = shared.settings.settle_leg * 2;
    loop {
        ticker.tick().await;
        let elapsed = settle_started.elapsed();
        let zoom = animator::settle_zoom(
            &plan,
            shared.settings.settle_depth,
            shared.settings.settle_leg,
            elapsed,
        );
        let mut inner = shared.lock();
        if inner.run_id != run_id {
            return;
        }
        shared.surface.set_zoom(zoom);
        if let Some(camera) = inner.camera.as_mut() {
            camera.zoom = zoom;
        }
        if elapsed >= settle_total {
            inner.task = None;
            shared.driving.send_replace(false);
            debug!(run_id, "Flight settled");
            break;
        }
    }
}

/// Owns the camera flight for one map surface.
///
/// Cloning yields another handle to the same controller. Methods that start
/// a flight spawn a Tokio task and must be called from within a runtime.
#[derive(Clone)]
pub struct FlightController {
    shared: Arc<Shared>,
}

impl FlightController {
    pub fn new(
        surface: Arc<dyn MapSurface>,
        observer: Arc<dyn FlightObserver>,
        settings: FlightSettings,
    ) -> Self {
        let (driving, _) = watch::channel(false);
        let shared = Arc::new(Shared {
            inner: Mutex::new(Inner {
                state: FlightState::Idle,
                run_id: 0,
                plan: None,
                replay: None,
                queued: None,
                task: None,
                camera: None,
                layer: TileLayer::default(),
            }),
            surface,
            observer,
            settings,
            driving,
        });

        // Zoom changes the controller did not make (user scroll) still reach the badge.
        let weak = Arc::downgrade(&shared);
        shared.surface.on_zoom_changed(Box::new(move |zoom| {
            if let Some(shared) = weak.upgrade() {
                if !*shared.driving.borrow() {
                    shared.observer.on_zoom_change(zoom.round() as i32);
                }
            }
        }));

        Self { shared }
    }

    /// Start `plan`, superseding any flight in progress.
    ///
    /// If the surface is not ready yet the current run is stopped and the
    /// plan is queued instead. `plan` becomes the one [`restart`](Self::restart)
    /// replays.
    pub fn start(&self, plan: FlightPlan) -> Result<StartOutcome, FlightError> {
        self.begin(QueuedPlan {
            plan,
            replayable: true,
        })
    }

    fn begin(&self, request: QueuedPlan) -> Result<StartOutcome, FlightError> {
        request
            .plan
            .validate(self.shared.settings.min_zoom, self.shared.settings.max_zoom)?;
        if !self.shared.surface.is_ready() {
            let mut inner = self.shared.lock();
            if inner.task.is_some() || inner.state.phase() != FlightPhase::Idle {
                let run_id = self.shared.halt(&mut inner);
                debug!(run_id, "Current flight stopped for queued plan");
            }
            inner.queued = Some(request);
            warn!("Map surface not ready, flight queued");
            return Ok(StartOutcome::Queued);
        }
        self.shared.launch(request.plan, request.replayable)
    }

    /// Start the queued plan, if any, now that the surface is ready.
    pub fn surface_ready(&self) -> Result<Option<StartOutcome>, FlightError> {
        let queued = self.shared.lock().queued.take();
        match queued {
            Some(request) => self.begin(request).map(Some),
            None => Ok(None),
        }
    }

    /// Stop any flight or settle motion and return to Idle.
    pub fn cancel(&self) {
        let mut inner = self.shared.lock();
        let run_id = self.shared.halt(&mut inner);
        inner.queued = None;
        info!(run_id, "Flight cancelled");
    }

    /// Replay the last plan given to [`start`](Self::start) from its source.
    pub fn restart(&self) -> Result<StartOutcome, FlightError> {
        let plan = {
            let inner = self.shared.lock();
            if inner.state.is_running() {
                return Err(FlightError::Busy);
            }
            inner.replay.ok_or(FlightError::NoPlan)?
        };
        self.start(plan)
    }

    /// Fly from the current camera to `target`.
    pub fn fly_to(
        &self,
        target: Waypoint,
        zoom: f64,
        duration_ms: u64,
    ) -> Result<StartOutcome, FlightError> {
        let camera = self.shared.lock().camera.ok_or(FlightError::CameraUnknown)?;
        self.begin(QueuedPlan {
            plan: FlightPlan {
                start: camera.center,
                end: target,
                start_zoom: camera.zoom,
                end_zoom: zoom,
                duration_ms,
            },
            replayable: false,
        })
    }

    /// Switch between satellite and street tiles. Not allowed mid-flight.
    pub fn toggle_view_mode(&self) -> Result<TileLayer, FlightError> {
        let mut inner = self.shared.lock();
        if inner.state.is_running() {
            return Err(FlightError::Busy);
        }
        inner.layer = inner.layer.toggled();
        self.shared.surface.set_tile_layer(inner.layer);
        info!(layer = %inner.layer, "View mode changed");
        Ok(inner.layer)
    }

    pub fn state(&self) -> FlightState {
        self.shared.lock().state
    }

    pub fn camera(&self) -> Option<Camera> {
        self.shared.lock().camera
    }

    pub fn view_mode(&self) -> TileLayer {
        self.shared.lock().layer
    }

    /// Plan of the current or most recent flight.
    pub fn plan(&self) -> Option<FlightPlan> {
        self.shared.lock().plan
    }

    /// Plan [`restart`](Self::restart) would replay.
    pub fn replay_plan(&self) -> Option<FlightPlan> {
        self.shared.lock().replay
    }

    pub fn run_id(&self) -> u64 {
        self.shared.lock().run_id
    }

    /// Resolves once no frame task is moving the camera.
    pub async fn finished(&self) {
        let mut rx = self.shared.driving.subscribe();
        let _ = rx.wait_for(|driving| !*driving).await;
    }
}

// =============================================================================
// Tests
// =============================================================================
