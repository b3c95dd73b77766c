use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use skyclean_planner::{
    alerts::{self, Alert},
    flight_path, CleaningEstimate, PathSettings, PathSettingsError,
};
use skyclean_sim::WeatherSim;
use skyclean_structs::{
    action::{Action, DroneStatusUpdate},
    plan::FlightPath,
    state::{State, BASE_STATION},
    Building, BuildingId, CleaningLog, CleaningMode, DroneId, DroneStatus, DroneUpdate, Intensity,
    Task, TaskId, TaskStatus,
};

use crate::{
    clock::{Clock, SystemClock},
    store::{DispatchError, Store},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConsoleError {
    #[error("select a building first")]
    NoBuildingSelected,
    #[error("no building with id {0}")]
    UnknownBuilding(BuildingId),
    #[error("no drone with id {0}")]
    UnknownDrone(DroneId),
    #[error("drone {0} is not available")]
    DroneUnavailable(DroneId),
    #[error("invalid flight path settings: {0}")]
    InvalidPathSettings(#[from] PathSettingsError),
    #[error(transparent)]
    Rejected(#[from] DispatchError),
}

/// What the operator fills in to start a cleaning task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    pub drone_id: DroneId,
    /// Empty until the operator picks one; the form does not require it.
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default)]
    pub mode: CleaningMode,
    #[serde(default = "default_solution")]
    pub cleaning_solution: String,
}

fn default_solution() -> String {
    "standard".to_string()
}

impl TaskRequest {
    pub fn new(drone_id: DroneId) -> Self {
        Self {
            drone_id,
            area: String::new(),
            intensity: Intensity::default(),
            mode: CleaningMode::default(),
            cleaning_solution: default_solution(),
        }
    }
}

/// The operator-facing workflows. Each one checks what the screens check
/// before they dispatch, then dispatches the same actions they would.
pub struct Console<C: Clock = SystemClock> {
    store: Store,
    clock: C,
    last_id: u64,
}

impl Console<SystemClock> {
    pub fn new(store: Store) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<C: Clock> Console<C> {
    pub fn with_clock(store: Store, clock: C) -> Self {
        Self { store, clock, last_id: 0 }
    }

    pub fn state(&self) -> Arc<State> {
        self.store.state()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Millisecond timestamp, bumped when two ids are taken within the same
    /// millisecond.
    fn next_id(&mut self) -> u64 {
        let millis = self.clock.now().timestamp_millis().max(0) as u64;
        self.last_id = millis.max(self.last_id + 1);
        self.last_id
    }

    pub fn select_building(&mut self, id: BuildingId) -> Result<Arc<Building>, ConsoleError> {
        let building = self
            .state()
            .building(id)
            .cloned()
            .ok_or(ConsoleError::UnknownBuilding(id))?;
        self.store.dispatch(Action::SelectBuilding(building.clone()));
        Ok(building)
    }

    pub fn estimate(&self) -> Option<CleaningEstimate> {
        self.state()
            .selected_building
            .as_deref()
            .map(CleaningEstimate::for_building)
    }

    pub fn start_task(&mut self, request: TaskRequest) -> Result<Arc<Task>, ConsoleError> {
        let state = self.state();
        let building = state
            .selected_building
            .clone()
            .ok_or(ConsoleError::NoBuildingSelected)?;
        let drone = state
            .drone(request.drone_id)
            .ok_or(ConsoleError::UnknownDrone(request.drone_id))?;
        if !drone.is_available() {
            return Err(ConsoleError::DroneUnavailable(drone.id));
        }

        let id = TaskId(self.next_id());
        let task = Arc::new(Task {
            id,
            building: building.name.clone(),
            drone_id: drone.id,
            area: request.area,
            intensity: request.intensity,
            mode: request.mode,
            cleaning_solution: request.cleaning_solution,
            status: TaskStatus::Active,
            progress: 0.0,
            start_time: self.clock.now(),
            estimated_duration: CleaningEstimate::for_building(&building).hours,
        });

        self.store.dispatch(Action::StartTask(task.clone()));
        self.store.dispatch(Action::UpdateDroneStatus(DroneStatusUpdate {
            id: drone.id,
            updates: DroneUpdate::status(DroneStatus::Active).with_location(building.name.clone()),
        }));
        info!("task {} started: {} on {}", id, drone.name, building.name);
        Ok(task)
    }

    /// Completes the task and sends its drone back to base. Returns `None`
    /// when no active task has this id.
    pub fn stop_task(&mut self, id: TaskId) -> Option<Arc<CleaningLog>> {
        let state = self.state();
        let task = match state.active_task(id) {
            Some(t) => t,
            None => {
                warn!("stop requested for unknown task {}", id);
                return None;
            }
        };

        let log = Arc::new(task.complete(self.clock.now()));
        self.store.dispatch(Action::CompleteTask(log.clone()));
        self.store.dispatch(Action::UpdateDroneStatus(DroneStatusUpdate {
            id: task.drone_id,
            updates: DroneUpdate::status(DroneStatus::Available).with_location(BASE_STATION),
        }));
        info!("task {} completed after {} min", id, log.duration);
        Some(log)
    }

    pub fn generate_flight_path(&mut self, settings: &PathSettings) -> Result<Arc<FlightPath>, ConsoleError> {
        let building = self
            .state()
            .selected_building
            .clone()
            .ok_or(ConsoleError::NoBuildingSelected)?;
        let path = Arc::new(flight_path::generate(&building, settings, self.next_id())?);
        self.store.dispatch(Action::SetFlightPath(path.clone()));
        Ok(path)
    }

    pub fn set_drone_status(&mut self, id: DroneId, status: DroneStatus) -> Result<(), ConsoleError> {
        self.store.try_dispatch(Action::UpdateDroneStatus(DroneStatusUpdate {
            id,
            updates: DroneUpdate::status(status),
        }))?;
        Ok(())
    }

    pub fn schedule_maintenance(&mut self, id: DroneId) -> Result<(), ConsoleError> {
        self.set_drone_status(id, DroneStatus::Maintenance)?;
        info!("maintenance scheduled for drone {}", id);
        Ok(())
    }

    /// Raises the emergency flag. Drones and tasks are left as they are;
    /// recalling them is up to whoever watches the flag.
    pub fn trigger_emergency(&mut self) {
        warn!("emergency protocol activated");
        self.store.dispatch(Action::TriggerEmergency(true));
    }

    pub fn clear_emergency(&mut self) {
        info!("emergency protocol cleared");
        self.store.dispatch(Action::TriggerEmergency(false));
    }

    /// Pulls a new simulated forecast and returns the alerts it raises.
    pub fn refresh_weather(&mut self, sim: &mut WeatherSim) -> Vec<Alert> {
        self.store.dispatch(Action::UpdateWeather(sim.sample()));
        let alerts = self.weather_alerts();
        for alert in alerts.iter() {
            warn!("weather: {}", alert.message);
        }
        alerts
    }

    pub fn weather_alerts(&self) -> Vec<Alert> {
        alerts::weather_alerts(&self.state().weather_data)
    }

    pub fn flight_safe(&self) -> bool {
        alerts::flight_safe(&self.state().weather_data)
    }
}
