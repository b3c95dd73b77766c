use std::sync::Arc;

use log::{debug, trace};
use skyclean_structs::{
    action::{Action, DroneStatusUpdate, TaskProgress},
    state::State,
    BuildingId, DroneId, Task, TaskId,
};

/// Computes the state following `action`. `None` means the action changes
/// nothing and the caller keeps the current snapshot.
///
/// No validation happens here: an unknown drone id is a no-op, and
/// completing an unknown task still clears `current_task` and appends the
/// log entry.
pub fn reduce(state: &State, action: &Action) -> Option<State> {
    let mut next = match action {
        Action::Unrecognized(_) => return None,
        Action::UpdateDroneStatus(DroneStatusUpdate { id, .. }) if state.drone(*id).is_none() => return None,
        Action::UpdateTaskProgress(TaskProgress { id, .. }) if state.active_task(*id).is_none() => return None,
        _ => state.clone(),
    };

    match action {
        Action::SelectBuilding(building) => {
            next.selected_building = Some(building.clone());
        }
        Action::StartTask(task) => {
            next.current_task = Some(task.clone());
            next.active_tasks.push(task.clone());
        }
        Action::UpdateTelemetry(update) => {
            next.telemetry = state.telemetry.merge(update);
        }
        Action::SetFlightPath(path) => {
            next.flight_path = Some(path.clone());
        }
        Action::UpdateDroneStatus(DroneStatusUpdate { id, updates }) => {
            for drone in next.drones.iter_mut().filter(|d| d.id == *id) {
                *drone = Arc::new(drone.merge(updates));
            }
        }
        Action::TriggerEmergency(on) => {
            next.emergency_status = *on;
        }
        Action::UpdateWeather(update) => {
            next.weather_data = state.weather_data.merge(update);
        }
        Action::AddCleaningLog(log) => {
            next.cleaning_logs.push(log.clone());
        }
        Action::CompleteTask(log) => {
            next.current_task = None;
            next.active_tasks.retain(|t| t.id != log.id());
            next.cleaning_logs.push(log.clone());
        }
        Action::UpdateTaskProgress(TaskProgress { id, progress }) => {
            let progress = progress.clamp(0.0, 100.0);
            for task in next.active_tasks.iter_mut().filter(|t| t.id == *id) {
                *task = Arc::new(Task {
                    progress,
                    ..task.as_ref().clone()
                });
            }
            // Keep the current task pointing at the same record as the list.
            if next.current_task.as_ref().map(|t| t.id) == Some(*id) {
                next.current_task = next.active_task(*id).cloned();
            }
        }
        Action::Unrecognized(_) => return None,
    }

    Some(next)
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error("unrecognized action type {0:?}")]
    Unrecognized(String),
    #[error("no building with id {0}")]
    UnknownBuilding(BuildingId),
    #[error("no drone with id {0}")]
    UnknownDrone(DroneId),
    #[error("drone {0} is not available")]
    DroneUnavailable(DroneId),
    #[error("no active task with id {0}")]
    UnknownTask(TaskId),
    #[error("task {0} is already active")]
    DuplicateTask(TaskId),
    #[error("progress {0} is outside 0..=100")]
    ProgressOutOfRange(f64),
}

/// The checks `try_dispatch` runs before handing an action to the reducer.
pub fn validate(state: &State, action: &Action) -> Result<(), DispatchError> {
    match action {
        Action::Unrecognized(kind) => Err(DispatchError::Unrecognized(kind.clone())),
        Action::SelectBuilding(b) => match state.building(b.id) {
            Some(_) => Ok(()),
            None => Err(DispatchError::UnknownBuilding(b.id)),
        },
        Action::StartTask(task) => {
            let drone = state
                .drone(task.drone_id)
                .ok_or(DispatchError::UnknownDrone(task.drone_id))?;
            if !drone.is_available() {
                return Err(DispatchError::DroneUnavailable(drone.id));
            }
            if state.active_task(task.id).is_some() {
                return Err(DispatchError::DuplicateTask(task.id));
            }
            Ok(())
        }
        Action::UpdateDroneStatus(DroneStatusUpdate { id, .. }) => match state.drone(*id) {
            Some(_) => Ok(()),
            None => Err(DispatchError::UnknownDrone(*id)),
        },
        Action::CompleteTask(log) => match state.active_task(log.id()) {
            Some(_) => Ok(()),
            None => Err(DispatchError::UnknownTask(log.id())),
        },
        Action::UpdateTaskProgress(TaskProgress { id, progress }) => {
            if state.active_task(*id).is_none() {
                return Err(DispatchError::UnknownTask(*id));
            }
            if !(0.0..=100.0).contains(progress) {
                return Err(DispatchError::ProgressOutOfRange(*progress));
            }
            Ok(())
        }
        Action::UpdateTelemetry(_)
        | Action::SetFlightPath(_)
        | Action::TriggerEmergency(_)
        | Action::UpdateWeather(_)
        | Action::AddCleaningLog(_) => Ok(()),
    }
}

pub type Subscriber = Box<dyn FnMut(&State, &State)>;

/// Holds the current snapshot and applies actions to it, one at a time.
pub struct Store {
    state: Arc<State>,
    subscribers: Vec<Subscriber>,
    transitions: u64,
}

impl Store {
    pub fn new(initial: State) -> Self {
        Self {
            state: Arc::new(initial),
            subscribers: Vec::new(),
            transitions: 0,
        }
    }

    /// The current snapshot. Cheap; later dispatches do not affect it.
    pub fn state(&self) -> Arc<State> {
        self.state.clone()
    }

    /// Number of dispatches that produced a new snapshot.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// `callback(previous, next)` runs after every dispatch that changed the
    /// snapshot.
    pub fn subscribe(&mut self, callback: impl FnMut(&State, &State) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch {}", action.action_type());
        match reduce(&self.state, &action) {
            Some(next) => {
                let prev = std::mem::replace(&mut self.state, Arc::new(next));
                self.transitions += 1;
                for subscriber in self.subscribers.iter_mut() {
                    subscriber(&*prev, &*self.state);
                }
            }
            None => trace!("{} left the state unchanged", action.action_type()),
        }
    }

    /// Like `dispatch`, but refuses actions that reference missing drones or
    /// tasks. A refused action leaves the state untouched.
    pub fn try_dispatch(&mut self, action: Action) -> Result<(), DispatchError> {
        validate(&self.state, &action)?;
        self.dispatch(action);
        Ok(())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(State::default())
    }
}
