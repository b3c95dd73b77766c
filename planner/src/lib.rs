pub mod alerts;
pub mod checklist;
pub mod estimate;
pub mod flight_path;

pub use estimate::CleaningEstimate;
pub use flight_path::{PathSettings, PathSettingsError, Pattern};

/// Rounds half away from zero, the way the console displays whole numbers.
pub fn round_whole(x: f64) -> u32 {
    x.round().max(0.0) as u32
}
