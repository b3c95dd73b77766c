use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    plan::FlightPath, Building, BuildingId, CleaningLog, Drone, DroneId, DroneStatus, Task, TaskId,
    Telemetry, WeatherData,
};

pub const BASE_STATION: &str = "Base Station";

/// The whole console state. Entities sit behind `Arc` so that a transition
/// only allocates what it changes.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub selected_building: Option<Arc<Building>>,
    pub active_tasks: Vec<Arc<Task>>,
    pub drones: Vec<Arc<Drone>>,
    pub buildings: Vec<Arc<Building>>,
    pub current_task: Option<Arc<Task>>,
    pub flight_path: Option<Arc<FlightPath>>,
    pub telemetry: Telemetry,
    pub emergency_status: bool,
    pub weather_data: WeatherData,
    pub cleaning_logs: Vec<Arc<CleaningLog>>,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total: usize,
    pub active: usize,
    pub available: usize,
    pub maintenance: usize,
    pub average_battery: u8,
}

impl State {
    pub fn seeded() -> State {
        // Hard-coded fleet and building list the console starts with.

        let drone = |id, name: &str, status, battery, location: &str| {
            Arc::new(Drone {
                id: DroneId(id),
                name: name.to_string(),
                status,
                battery,
                location: location.to_string(),
            })
        };
        let drones = vec![
            drone(1, "Drone Alpha", DroneStatus::Available, 95, BASE_STATION),
            drone(2, "Drone Beta", DroneStatus::Active, 78, "Building A"),
            drone(3, "Drone Gamma", DroneStatus::Maintenance, 12, "Maintenance Bay"),
        ];

        let building = |id, name: &str, address: &str, floors, height| {
            Arc::new(Building {
                id: BuildingId(id),
                name: name.to_string(),
                address: address.to_string(),
                floors,
                height,
            })
        };
        let buildings = vec![
            building(1, "Corporate Plaza A", "123 Business Ave", 25, 100.0),
            building(2, "Tech Tower", "456 Innovation Blvd", 40, 150.0),
            building(3, "Glass Pavilion", "789 Modern St", 18, 75.0),
        ];

        State {
            selected_building: None,
            active_tasks: Vec::new(),
            drones,
            buildings,
            current_task: None,
            flight_path: None,
            telemetry: Telemetry {
                temperature: 22.0,
                ..Default::default()
            },
            emergency_status: false,
            weather_data: WeatherData {
                condition: "Clear".to_string(),
                wind_speed: 5.0,
                visibility: 10.0,
                temperature: 22.0,
                humidity: 45.0,
            },
            cleaning_logs: Vec::new(),
        }
    }

    pub fn drone(&self, id: DroneId) -> Option<&Arc<Drone>> {
        self.drones.iter().find(|d| d.id == id)
    }

    pub fn building(&self, id: BuildingId) -> Option<&Arc<Building>> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn active_task(&self, id: TaskId) -> Option<&Arc<Task>> {
        self.active_tasks.iter().find(|t| t.id == id)
    }

    pub fn available_drones(&self) -> impl Iterator<Item = &Arc<Drone>> {
        self.drones.iter().filter(|d| d.is_available())
    }

    /// Case-insensitive match on name or address. An empty query matches
    /// every building.
    pub fn search_buildings<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Arc<Building>> {
        let query = query.to_lowercase();
        self.buildings.iter().filter(move |b| {
            b.name.to_lowercase().contains(&query) || b.address.to_lowercase().contains(&query)
        })
    }

    pub fn fleet_summary(&self) -> FleetSummary {
        let count = |status| self.drones.iter().filter(|d| d.status == status).count();
        let average_battery = if self.drones.is_empty() {
            0
        } else {
            let sum: u32 = self.drones.iter().map(|d| d.battery as u32).sum();
            (sum as f64 / self.drones.len() as f64).round() as u8
        };

        FleetSummary {
            total: self.drones.len(),
            active: count(DroneStatus::Active),
            available: count(DroneStatus::Available),
            maintenance: count(DroneStatus::Maintenance),
            average_battery,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::seeded()
    }
}
