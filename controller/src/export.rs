use std::{io::Write, sync::Arc};

use chrono::{DateTime, Utc};
use serde::Serialize;
use skyclean_structs::{CleaningLog, CleaningMode, DroneId, Intensity, TaskId, TaskStatus};

/// Filter for the log table. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    /// Substring of the start date, e.g. `2024-01` or `2024-01-15`.
    pub date: String,
    /// Case-insensitive substring of the building name.
    pub building: String,
}

impl LogFilter {
    pub fn matches(&self, log: &CleaningLog) -> bool {
        let date = log.task.start_time.format("%Y-%m-%d").to_string();
        let matches_date = self.date.is_empty() || date.contains(&self.date);
        let matches_building = self.building.is_empty()
            || log.task.building.to_lowercase().contains(&self.building.to_lowercase());
        matches_date && matches_building
    }

    pub fn apply<'a>(&'a self, logs: &'a [Arc<CleaningLog>]) -> impl Iterator<Item = &'a Arc<CleaningLog>> {
        logs.iter().filter(move |l| self.matches(l))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogRow<'a> {
    id: TaskId,
    building: &'a str,
    drone_id: DroneId,
    area: &'a str,
    intensity: Intensity,
    mode: CleaningMode,
    cleaning_solution: &'a str,
    status: TaskStatus,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    duration: u32,
}

/// Writes one CSV row per log entry, with a header row.
pub fn export_csv<'a, W: Write>(
    logs: impl IntoIterator<Item = &'a Arc<CleaningLog>>,
    out: W,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    for log in logs {
        let t = &log.task;
        writer.serialize(LogRow {
            id: t.id,
            building: &t.building,
            drone_id: t.drone_id,
            area: &t.area,
            intensity: t.intensity,
            mode: t.mode,
            cleaning_solution: &t.cleaning_solution,
            status: t.status,
            start_time: t.start_time,
            end_time: log.end_time,
            duration: log.duration,
        })?;
    }
    writer.flush()?;
    Ok(())
}
