use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct Waypoint {
    pub id: u32,
    /// Meters.
    pub altitude: f64,
    pub coordinates: Coordinates,
    pub action: String,
    /// Minutes spent at the waypoint.
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPath {
    pub id: u64,
    pub building: String,
    pub waypoints: Vec<Waypoint>,
    pub total_distance: f64,
    pub estimated_time: f64,
    pub altitude_profile: f64,
    pub safety_checks: BTreeMap<String, bool>,
}

impl FlightPath {
    pub fn cleared(&self) -> bool {
        self.safety_checks.values().all(|ok| *ok)
    }

    pub fn print(&self) {
        println!("flight path {} for {}", self.id, self.building);
        for w in self.waypoints.iter() {
            println!("  - {:?}", w);
        }
    }
}
