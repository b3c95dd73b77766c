use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    plan::FlightPath, Building, CleaningLog, DroneId, DroneUpdate, Task, TaskId, TelemetryUpdate,
    WeatherUpdate,
};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct DroneStatusUpdate {
    pub id: DroneId,
    pub updates: DroneUpdate,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct TaskProgress {
    pub id: TaskId,
    pub progress: f64,
}

/// One state transition, carried in the `{"type": ..., "payload": ...}`
/// envelope.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SelectBuilding(Arc<Building>),
    StartTask(Arc<Task>),
    UpdateTelemetry(TelemetryUpdate),
    SetFlightPath(Arc<FlightPath>),
    UpdateDroneStatus(DroneStatusUpdate),
    TriggerEmergency(bool),
    UpdateWeather(WeatherUpdate),
    AddCleaningLog(Arc<CleaningLog>),
    CompleteTask(Arc<CleaningLog>),
    UpdateTaskProgress(TaskProgress),
    /// An envelope whose `type` is none of the above. Never serialized.
    #[serde(skip)]
    Unrecognized(String),
}

impl Action {
    pub const TYPES: [&'static str; 10] = [
        "SELECT_BUILDING",
        "START_TASK",
        "UPDATE_TELEMETRY",
        "SET_FLIGHT_PATH",
        "UPDATE_DRONE_STATUS",
        "TRIGGER_EMERGENCY",
        "UPDATE_WEATHER",
        "ADD_CLEANING_LOG",
        "COMPLETE_TASK",
        "UPDATE_TASK_PROGRESS",
    ];

    pub fn action_type(&self) -> &str {
        match self {
            Action::SelectBuilding(_) => "SELECT_BUILDING",
            Action::StartTask(_) => "START_TASK",
            Action::UpdateTelemetry(_) => "UPDATE_TELEMETRY",
            Action::SetFlightPath(_) => "SET_FLIGHT_PATH",
            Action::UpdateDroneStatus(_) => "UPDATE_DRONE_STATUS",
            Action::TriggerEmergency(_) => "TRIGGER_EMERGENCY",
            Action::UpdateWeather(_) => "UPDATE_WEATHER",
            Action::AddCleaningLog(_) => "ADD_CLEANING_LOG",
            Action::CompleteTask(_) => "COMPLETE_TASK",
            Action::UpdateTaskProgress(_) => "UPDATE_TASK_PROGRESS",
            Action::Unrecognized(kind) => kind,
        }
    }

    /// Any `type` that is not one of `TYPES`, string or not, becomes
    /// `Unrecognized`. A missing `type`, or a known type with a malformed
    /// payload, is an error.
    pub fn from_value(value: Value) -> Result<Action, serde_json::Error> {
        let unknown = match value.get("type") {
            Some(Value::String(kind)) if Self::TYPES.contains(&kind.as_str()) => None,
            Some(Value::String(kind)) => Some(kind.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        };

        match unknown {
            Some(kind) => Ok(Action::Unrecognized(kind)),
            None => serde_json::from_value(value),
        }
    }

    pub fn from_json(s: &str) -> Result<Action, serde_json::Error> {
        Self::from_value(serde_json::from_str(s)?)
    }
}
