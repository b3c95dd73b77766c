use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod action;
pub mod plan;
pub mod state;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct DroneId(pub u32);

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BuildingId(pub u32);

/// Millisecond timestamp of the moment the task was created.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for DroneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DroneStatus {
    Available,
    Active,
    Maintenance,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Drone {
    pub id: DroneId,
    pub name: String,
    pub status: DroneStatus,
    pub battery: u8,
    pub location: String,
}

impl Drone {
    pub const LOW_BATTERY: u8 = 20;

    pub fn is_available(&self) -> bool {
        self.status == DroneStatus::Available
    }

    pub fn battery_low(&self) -> bool {
        self.battery <= Self::LOW_BATTERY
    }

    /// Field-wise patch: everything `update` leaves as `None` is kept.
    pub fn merge(&self, update: &DroneUpdate) -> Drone {
        Drone {
            id: self.id,
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            status: update.status.unwrap_or(self.status),
            battery: update.battery.map(|b| b.min(100)).unwrap_or(self.battery),
            location: update.location.clone().unwrap_or_else(|| self.location.clone()),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct DroneUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DroneStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl DroneUpdate {
    pub fn status(status: DroneStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub address: String,
    pub floors: u32,
    /// Meters.
    pub height: f64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    #[default]
    Medium,
    Heavy,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, Hash, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CleaningMode {
    #[default]
    Auto,
    SemiAuto,
    Manual,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Completed,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub building: String,
    pub drone_id: DroneId,
    pub area: String,
    pub intensity: Intensity,
    pub mode: CleaningMode,
    pub cleaning_solution: String,
    pub status: TaskStatus,
    pub progress: f64,
    pub start_time: DateTime<Utc>,
    /// Hours.
    pub estimated_duration: u32,
}

impl Task {
    /// The log record for this task stopped at `end_time`. Duration is whole
    /// minutes, rounded, never negative.
    pub fn complete(&self, end_time: DateTime<Utc>) -> CleaningLog {
        let millis = (end_time - self.start_time).num_milliseconds().max(0);
        let duration = (millis as f64 / 60_000.0).round() as u32;
        CleaningLog {
            task: Task {
                status: TaskStatus::Completed,
                ..self.clone()
            },
            end_time,
            duration,
        }
    }
}

/// A finished task as it appears in the cleaning log.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CleaningLog {
    #[serde(flatten)]
    pub task: Task,
    pub end_time: DateTime<Utc>,
    /// Minutes.
    pub duration: u32,
}

impl CleaningLog {
    pub fn id(&self) -> TaskId {
        self.task.id
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Telemetry {
    pub altitude: f64,
    pub speed: f64,
    pub heading: f64,
    pub pressure: f64,
    pub temperature: f64,
}

impl Telemetry {
    pub fn merge(&self, update: &TelemetryUpdate) -> Telemetry {
        Telemetry {
            altitude: update.altitude.unwrap_or(self.altitude),
            speed: update.speed.unwrap_or(self.speed),
            heading: update.heading.unwrap_or(self.heading),
            pressure: update.pressure.unwrap_or(self.pressure),
            temperature: update.temperature.unwrap_or(self.temperature),
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct TelemetryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub condition: String,
    pub wind_speed: f64,
    pub visibility: f64,
    pub temperature: f64,
    pub humidity: f64,
}

impl WeatherData {
    pub fn merge(&self, update: &WeatherUpdate) -> WeatherData {
        WeatherData {
            condition: update.condition.clone().unwrap_or_else(|| self.condition.clone()),
            wind_speed: update.wind_speed.unwrap_or(self.wind_speed),
            visibility: update.visibility.unwrap_or(self.visibility),
            temperature: update.temperature.unwrap_or(self.temperature),
            humidity: update.humidity.unwrap_or(self.humidity),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}
