use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn interpolate(self, other: Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }
}

/// One instruction-bearing segment of a route. The instruction text is
/// stored as delivered by the routing provider, markup included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub instruction: String,
    pub distance_m: f64,
    pub duration_secs: f64,
    pub end_location: Coordinate,
}

/// A resolved route: dense polyline samples plus turn-by-turn steps,
/// in traversal order. Built once per origin/destination request and
/// treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub path: Vec<Coordinate>,
    pub steps: Vec<Step>,
    pub total_distance_m: f64,
    pub total_duration_secs: f64,
}

/// Center + span viewport descriptor for framing a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub lat_span: f64,
    pub lon_span: f64,
}
