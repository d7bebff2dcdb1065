use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Geography
// =============================================================================

/// A geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
}

impl Waypoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°N, {:.6}°E", self.lat, self.lng)
    }
}

/// Tile imagery shown by the map surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileLayer {
    #[default]
    Satellite,
    Street,
}

impl TileLayer {
    /// The other layer.
    pub fn toggled(self) -> Self {
        match self {
            TileLayer::Satellite => TileLayer::Street,
            TileLayer::Street => TileLayer::Satellite,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TileLayer::Satellite => "satellite",
            TileLayer::Street => "street",
        }
    }
}

impl fmt::Display for TileLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Chat
// =============================================================================

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_display() {
        let wp = Waypoint::new(26.1881, 91.6919);
        assert_eq!(wp.to_string(), "26.188100°N, 91.691900°E");
    }

    #[test]
    fn test_waypoint_serde_roundtrip() {
        let wp = Waypoint::new(25.5, 91.8);
        let json = serde_json::to_string(&wp).unwrap();
        assert_eq!(json, r#"{"lat":25.5,"lng":91.8}"#);
    }

    #[test]
    fn test_tile_layer_toggle() {
        assert_eq!(TileLayer::Satellite.toggled(), TileLayer::Street);
        assert_eq!(TileLayer::Street.toggled(), TileLayer::Satellite);
        assert_eq!(TileLayer::default(), TileLayer::Satellite);
    }

    #[test]
    fn test_tile_layer_names() {
        assert_eq!(TileLayer::Satellite.to_string(), "satellite");
        assert_eq!(
            serde_json::to_string(&TileLayer::Street).unwrap(),
            "\"street\""
        );
    }

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Bot.to_string(), "bot");
    }
}
