//! Seams between the flight controller and the outside world.
//!
//! The controller only ever writes camera commands to a [`MapSurface`] and
//! progress to a [`FlightObserver`]; tiles, markers and rendering belong to
//! the surface implementation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use paddock_core::types::{TileLayer, Waypoint};
use tracing::trace;

use crate::state::FlightState;

/// Callback invoked with the new (unrounded) zoom level.
pub type ZoomListener = Box<dyn Fn(f64) + Send + Sync>;

/// A map view that accepts camera commands.
pub trait MapSurface: Send + Sync {
    /// False until the underlying map has been initialized.
    fn is_ready(&self) -> bool;
    fn set_center(&self, center: Waypoint);
    fn set_zoom(&self, zoom: f64);
    fn set_tile_layer(&self, layer: TileLayer);
    /// Register a listener for zoom changes made on the surface itself.
    fn on_zoom_changed(&self, listener: ZoomListener);
}

/// Receives flight progress for display.
///
/// Callbacks run while the controller holds its state lock; implementations
/// must not call back into the controller.
pub trait FlightObserver: Send + Sync {
    fn on_progress(&self, _percent: f64) {}
    fn on_zoom_change(&self, _zoom: i32) {}
    fn on_state_change(&self, _state: &FlightState) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FlightObserver for NoopObserver {}

/// A camera command recorded by [`HeadlessSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCommand {
    Center(Waypoint),
    Zoom(f64),
    Layer(TileLayer),
}

#[derive(Default)]
struct HeadlessInner {
    ready: bool,
    commands: Vec<SurfaceCommand>,
    listeners: Vec<ZoomListener>,
}

/// A map surface with no rendering: records every command it receives.
///
/// Used by the command-line shell and by tests.
#[derive(Default)]
pub struct HeadlessSurface {
    inner: Mutex<HeadlessInner>,
}

impl HeadlessSurface {
    /// A surface that is ready immediately.
    pub fn ready() -> Self {
        let surface = Self::default();
        surface.set_ready(true);
        surface
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_ready(&self, ready: bool) {
        self.lock().ready = ready;
    }

    pub fn commands(&self) -> Vec<SurfaceCommand> {
        self.lock().commands.clone()
    }

    pub fn centers(&self) -> Vec<Waypoint> {
        self.lock()
            .commands
            .iter()
            .filter_map(|c| match c {
                SurfaceCommand::Center(wp) => Some(*wp),
                _ => None,
            })
            .collect()
    }

    pub fn zooms(&self) -> Vec<f64> {
        self.lock()
            .commands
            .iter()
            .filter_map(|c| match c {
                SurfaceCommand::Zoom(z) => Some(*z),
                _ => None,
            })
            .collect()
    }

    pub fn last_layer(&self) -> Option<TileLayer> {
        self.lock().commands.iter().rev().find_map(|c| match c {
            SurfaceCommand::Layer(layer) => Some(*layer),
            _ => None,
        })
    }

    /// Simulate the user zooming the map (scroll, pinch).
    ///
    /// Listeners run after the internal lock is released.
    pub fn user_zoom(&self, zoom: f64) {
        let listeners = std::mem::take(&mut self.lock().listeners);
        for listener in &listeners {
            listener(zoom);
        }
        let mut inner = self.lock();
        let added = std::mem::replace(&mut inner.listeners, listeners);
        inner.listeners.extend(added);
    }
}

impl MapSurface for HeadlessSurface {
    fn is_ready(&self) -> bool {
        self.lock().ready
    }

    fn set_center(&self, center: Waypoint) {
        trace!(lat = center.lat, lng = center.lng, "set_center");
        self.lock().commands.push(SurfaceCommand::Center(center));
    }

    fn set_zoom(&self, zoom: f64) {
        trace!(zoom, "set_zoom");
        self.lock().commands.push(SurfaceCommand::Zoom(zoom));
    }

    fn set_tile_layer(&self, layer: TileLayer) {
        trace!(%layer, "set_tile_layer");
        self.lock().commands.push(SurfaceCommand::Layer(layer));
    }

    fn on_zoom_changed(&self, listener: ZoomListener) {
        self.lock().listeners.push(listener);
    }
}
