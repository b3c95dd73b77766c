use serde::{Deserialize, Serialize};
use skyclean_structs::Building;

use crate::round_whole;

const WINDOWS_PER_FLOOR: u32 = 4;
const LITRES_PER_METER: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningEstimate {
    pub windows: u32,
    pub hours: u32,
    pub solution_litres: u32,
    pub flight_segments: u32,
}

impl CleaningEstimate {
    pub fn for_building(building: &Building) -> Self {
        Self {
            windows: building.floors * WINDOWS_PER_FLOOR,
            hours: round_whole(building.height / 10.0),
            solution_litres: round_whole(building.height * LITRES_PER_METER),
            flight_segments: round_whole(building.height / 3.0),
        }
    }
}
