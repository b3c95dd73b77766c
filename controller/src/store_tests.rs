#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, sync::Arc};

    use chrono::{TimeZone, Utc};
    use skyclean_structs::{
        action::{Action, DroneStatusUpdate, TaskProgress},
        state::State,
        CleaningMode, DroneId, DroneStatus, DroneUpdate, Intensity, Task, TaskId, TaskStatus,
        TelemetryUpdate, WeatherUpdate,
    };

    use crate::store::{reduce, DispatchError, Store};

    fn task(id: u64, drone: u32) -> Arc<Task> {
        Arc::new(Task {
            id: TaskId(id),
            building: "Tech Tower".to_string(),
            drone_id: DroneId(drone),
            area: "full-building".to_string(),
            intensity: Intensity::Medium,
            mode: CleaningMode::Auto,
            cleaning_solution: "standard".to_string(),
            status: TaskStatus::Active,
            progress: 0.0,
            start_time: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
            estimated_duration: 15,
        })
    }

    fn telemetry(update: impl FnOnce(&mut TelemetryUpdate)) -> Action {
        let mut t = TelemetryUpdate::default();
        update(&mut t);
        Action::UpdateTelemetry(t)
    }

    #[test]
    fn unrecognized_action_is_identity() {
        let _ = env_logger::try_init();
        let mut store = Store::default();
        store.dispatch(Action::StartTask(task(1, 1)));
        let before = store.state();

        assert_eq!(reduce(&before, &Action::Unrecognized("NOPE".to_string())), None);

        let parsed = Action::from_json(r#"{"type": "RESET", "payload": null}"#).unwrap();
        store.dispatch(parsed);
        assert!(Arc::ptr_eq(&before, &store.state()));
        assert_eq!(store.transitions(), 1);
    }

    #[test]
    fn telemetry_updates_merge() {
        let mut store = Store::default();
        store.dispatch(telemetry(|t| t.temperature = Some(30.0)));
        store.dispatch(telemetry(|t| t.altitude = Some(50.0)));
        let t = store.state().telemetry;
        assert_eq!(t.temperature, 30.0);
        assert_eq!(t.altitude, 50.0);
        assert_eq!(t.speed, 0.0);
    }

    #[test]
    fn drone_update_touches_only_target() {
        let mut store = Store::default();
        let before = store.state();
        store.dispatch(Action::UpdateDroneStatus(DroneStatusUpdate {
            id: DroneId(2),
            updates: DroneUpdate::status(DroneStatus::Active).with_location("Tech Tower"),
        }));
        let after = store.state();

        assert!(Arc::ptr_eq(&before.drones[0], &after.drones[0]));
        assert!(Arc::ptr_eq(&before.drones[2], &after.drones[2]));
        assert!(!Arc::ptr_eq(&before.drones[1], &after.drones[1]));
        assert_eq!(after.drones[1].status, DroneStatus::Active);
        assert_eq!(after.drones[1].location, "Tech Tower");
        assert_eq!(after.drones[1].battery, before.drones[1].battery);
        assert_eq!(after.drones[1].name, before.drones[1].name);

        // untouched top-level entities are shared as well
        assert!(Arc::ptr_eq(&before.buildings[0], &after.buildings[0]));
        // the old snapshot never changes
        assert_eq!(before.drones[1].location, "Building A");
    }

    #[test]
    fn unknown_drone_is_noop() {
        let mut store = Store::default();
        let before = store.state();
        store.dispatch(Action::UpdateDroneStatus(DroneStatusUpdate {
            id: DroneId(42),
            updates: DroneUpdate::status(DroneStatus::Maintenance),
        }));
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn start_then_complete_moves_task_to_log() {
        let _ = env_logger::try_init();
        let mut store = Store::default();
        let t = task(1_700_000_000_000, 1);
        store.dispatch(Action::StartTask(t.clone()));
        store.dispatch(Action::StartTask(task(1_700_000_000_001, 2)));
        {
            let state = store.state();
            assert_eq!(state.active_tasks.len(), 2);
            assert_eq!(state.current_task.as_ref().unwrap().id, TaskId(1_700_000_000_001));
        }

        let done = Arc::new(t.complete(t.start_time + chrono::Duration::minutes(30)));
        store.dispatch(Action::CompleteTask(done));

        let state = store.state();
        assert!(state.active_tasks.iter().all(|a| a.id != t.id));
        assert_eq!(state.active_tasks.len(), 1);
        assert_eq!(state.cleaning_logs.iter().filter(|l| l.id() == t.id).count(), 1);
        assert_eq!(state.cleaning_logs[0].task.status, TaskStatus::Completed);
        assert_eq!(state.cleaning_logs[0].duration, 30);
        assert!(state.current_task.is_none());
    }

    #[test]
    fn completing_unknown_task_still_logs() {
        let mut store = Store::default();
        store.dispatch(Action::StartTask(task(1, 1)));
        let stray = task(99, 3);
        store.dispatch(Action::CompleteTask(Arc::new(stray.complete(stray.start_time))));

        let state = store.state();
        assert_eq!(state.active_tasks.len(), 1);
        assert_eq!(state.cleaning_logs.len(), 1);
        assert!(state.current_task.is_none());
    }

    #[test]
    fn selecting_same_building_twice() {
        let mut store = Store::default();
        let building = store.state().buildings[1].clone();
        store.dispatch(Action::SelectBuilding(building.clone()));
        store.dispatch(Action::SelectBuilding(building.clone()));
        let state = store.state();
        assert_eq!(state.selected_building.as_deref(), Some(building.as_ref()));
        assert_eq!(state.buildings.len(), 3);
    }

    #[test]
    fn emergency_does_not_cascade() {
        let mut store = Store::default();
        store.dispatch(Action::StartTask(task(5, 1)));
        let before = store.state();
        store.dispatch(Action::TriggerEmergency(true));
        let after = store.state();

        assert!(after.emergency_status);
        assert_eq!(after.drones, before.drones);
        assert_eq!(after.active_tasks, before.active_tasks);
        assert_eq!(after.current_task, before.current_task);

        store.dispatch(Action::TriggerEmergency(false));
        assert!(!store.state().emergency_status);
    }

    #[test]
    fn weather_merge_and_direct_log_entry() {
        let mut store = Store::default();
        store.dispatch(Action::UpdateWeather(WeatherUpdate {
            humidity: Some(90.0),
            ..Default::default()
        }));
        let t = task(7, 1);
        store.dispatch(Action::AddCleaningLog(Arc::new(t.complete(t.start_time))));

        let state = store.state();
        assert_eq!(state.weather_data.humidity, 90.0);
        assert_eq!(state.weather_data.condition, "Clear");
        assert_eq!(state.cleaning_logs.len(), 1);
        assert!(state.active_tasks.is_empty());
    }

    #[test]
    fn task_progress_updates_list_and_current() {
        let mut store = Store::default();
        store.dispatch(Action::StartTask(task(1, 1)));
        store.dispatch(Action::UpdateTaskProgress(TaskProgress {
            id: TaskId(1),
            progress: 12.5,
        }));
        let state = store.state();
        assert_eq!(state.active_tasks[0].progress, 12.5);
        assert!(Arc::ptr_eq(state.current_task.as_ref().unwrap(), &state.active_tasks[0]));

        store.dispatch(Action::UpdateTaskProgress(TaskProgress {
            id: TaskId(1),
            progress: 140.0,
        }));
        assert_eq!(store.state().active_tasks[0].progress, 100.0);

        let before = store.state();
        store.dispatch(Action::UpdateTaskProgress(TaskProgress {
            id: TaskId(2),
            progress: 50.0,
        }));
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn subscribers_see_each_transition() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut store = Store::default();
        store.subscribe(move |prev, next| {
            log.borrow_mut().push((prev.emergency_status, next.emergency_status));
        });

        store.dispatch(Action::TriggerEmergency(true));
        store.dispatch(Action::Unrecognized("IGNORED".to_string()));
        store.dispatch(Action::TriggerEmergency(false));

        assert_eq!(*seen.borrow(), vec![(false, true), (true, false)]);
    }

    #[test]
    fn try_dispatch_rejects_bad_references() {
        let mut store = Store::default();
        let before = store.state();

        assert_eq!(
            store.try_dispatch(Action::StartTask(task(1, 3))),
            Err(DispatchError::DroneUnavailable(DroneId(3)))
        );
        assert_eq!(
            store.try_dispatch(Action::StartTask(task(1, 8))),
            Err(DispatchError::UnknownDrone(DroneId(8)))
        );
        assert_eq!(
            store.try_dispatch(Action::UpdateDroneStatus(DroneStatusUpdate {
                id: DroneId(8),
                updates: DroneUpdate::default(),
            })),
            Err(DispatchError::UnknownDrone(DroneId(8)))
        );
        let stray = task(4, 1);
        assert_eq!(
            store.try_dispatch(Action::CompleteTask(Arc::new(stray.complete(stray.start_time)))),
            Err(DispatchError::UnknownTask(TaskId(4)))
        );
        assert_eq!(
            store.try_dispatch(Action::Unrecognized("X".to_string())),
            Err(DispatchError::Unrecognized("X".to_string()))
        );
        assert!(Arc::ptr_eq(&before, &store.state()));

        assert_eq!(store.try_dispatch(Action::StartTask(task(1, 1))), Ok(()));
        assert_eq!(
            store.try_dispatch(Action::StartTask(task(1, 1))),
            Err(DispatchError::DuplicateTask(TaskId(1)))
        );
        assert_eq!(
            store.try_dispatch(Action::UpdateTaskProgress(TaskProgress {
                id: TaskId(1),
                progress: -1.0,
            })),
            Err(DispatchError::ProgressOutOfRange(-1.0))
        );
    }

    #[test]
    fn seeded_store_matches_initial_scenario() {
        let store = Store::new(State::seeded());
        let state = store.state();
        assert_eq!(state.drones.len(), 3);
        assert_eq!(state.buildings.len(), 3);
        assert!(!state.emergency_status);
        assert_eq!(state.telemetry.temperature, 22.0);
        assert_eq!(store.transitions(), 0);
    }
}
