use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};
use skyclean_structs::{
    plan::{Coordinates, FlightPath, Waypoint},
    Building,
};

pub const SAFETY_CHECKS: [&str; 4] = [
    "noFlyZones",
    "weatherClearance",
    "airspaceAuthorization",
    "emergencyLanding",
];

/// Reference point the mock waypoints are laid out from.
const ORIGIN: Coordinates = Coordinates { lat: 40.7128, lng: -74.0060 };
const COORD_STEP: f64 = 0.0001;
const WAYPOINT_DWELL_MIN: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    #[default]
    Zigzag,
    Spiral,
    Grid,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathSettings {
    /// Meters above ground for the lowest waypoint.
    pub altitude: f64,
    /// m/s.
    pub speed: f64,
    pub pattern: Pattern,
    /// Percent overlap between passes.
    pub overlap: f64,
    /// Meters kept from the facade.
    pub safety_buffer: f64,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            altitude: 30.0,
            speed: 10.0,
            pattern: Pattern::Zigzag,
            overlap: 20.0,
            safety_buffer: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathSettingsError {
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl PathSettings {
    pub fn validate(&self) -> Result<(), PathSettingsError> {
        let limits = [
            ("altitude", self.altitude, 10.0, 120.0),
            ("speed", self.speed, 5.0, 25.0),
            ("overlap", self.overlap, 0.0, 50.0),
            ("safetyBuffer", self.safety_buffer, 2.0, 10.0),
        ];
        for (field, value, min, max) in limits {
            // NaN fails both comparisons, so test for containment.
            if !(min..=max).contains(&value) {
                return Err(PathSettingsError::OutOfRange { field, value, min, max });
            }
        }
        Ok(())
    }
}

/// One cleaning waypoint on every second floor, climbing from the
/// configured base altitude.
pub fn waypoints(building: &Building, settings: &PathSettings) -> Vec<Waypoint> {
    if building.floors == 0 {
        return Vec::new();
    }
    let floor_height = building.height / building.floors as f64;

    (0..building.floors)
        .step_by(2)
        .map(|i| {
            let offset = i as f64 * COORD_STEP;
            Waypoint {
                id: i + 1,
                altitude: settings.altitude + i as f64 * floor_height,
                coordinates: Coordinates {
                    lat: ORIGIN.lat + offset,
                    lng: ORIGIN.lng + offset,
                },
                action: "clean".to_string(),
                duration: WAYPOINT_DWELL_MIN,
            }
        })
        .collect()
}

pub fn generate(building: &Building, settings: &PathSettings, id: u64) -> Result<FlightPath, PathSettingsError> {
    settings.validate()?;

    let safety_checks = SAFETY_CHECKS
        .iter()
        .map(|name| (name.to_string(), true))
        .collect::<BTreeMap<_, _>>();

    let path = FlightPath {
        id,
        building: building.name.clone(),
        waypoints: waypoints(building, settings),
        total_distance: (building.height * 2.5).round(),
        estimated_time: (building.height / 8.0).round(),
        altitude_profile: settings.altitude,
        safety_checks,
    };
    debug!(
        "planned {} waypoints for {} ({:?} pattern)",
        path.waypoints.len(),
        building.name,
        settings.pattern
    );
    Ok(path)
}
