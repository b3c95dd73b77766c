use std::collections::BTreeMap;

use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub key: &'static str,
    pub label: &'static str,
    pub critical: bool,
}

const fn item(key: &'static str, label: &'static str, critical: bool) -> ChecklistItem {
    ChecklistItem { key, label, critical }
}

pub const ITEM_COUNT: usize = 10;

pub static ITEMS: [ChecklistItem; ITEM_COUNT] = [
    item("battery", "Battery Level Check (>80%)", true),
    item("cleaningFluid", "Cleaning Fluid Levels", true),
    item("sensors", "Sensor Calibration", true),
    item("gps", "GPS Signal Strong", true),
    item("communication", "Communication Link Test", true),
    item("weatherCheck", "Weather Conditions Acceptable", true),
    item("noFlyZone", "No-Fly Zone Clearance", true),
    item("equipmentTest", "Cleaning Equipment Test", false),
    item("emergencyProcedures", "Emergency Procedures Reviewed", false),
    item("insuranceValid", "Insurance & Permits Valid", false),
];

/// Pre-flight checklist. Every item, critical or not, must be ticked before
/// the drone counts as flight-ready.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafetyChecklist {
    checked: [bool; ITEM_COUNT],
}

impl SafetyChecklist {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(key: &str) -> Option<usize> {
        ITEMS.iter().position(|i| i.key == key)
    }

    /// Flips the item and returns its new value; `None` for unknown keys.
    pub fn toggle(&mut self, key: &str) -> Option<bool> {
        let idx = Self::index(key)?;
        self.checked[idx] = !self.checked[idx];
        Some(self.checked[idx])
    }

    pub fn is_checked(&self, key: &str) -> bool {
        Self::index(key).map(|i| self.checked[i]).unwrap_or(false)
    }

    pub fn completed(&self) -> usize {
        self.checked.iter().filter(|c| **c).count()
    }

    pub fn outstanding(&self) -> impl Iterator<Item = &'static ChecklistItem> + '_ {
        ITEMS.iter().zip(self.checked.iter()).filter(|(_, c)| !**c).map(|(i, _)| i)
    }

    pub fn critical_outstanding(&self) -> usize {
        self.outstanding().filter(|i| i.critical).count()
    }

    pub fn flight_ready(&self) -> bool {
        let ready = self.checked.iter().all(|c| *c);
        if ready {
            info!("pre-flight checklist complete");
        }
        ready
    }

    pub fn as_map(&self) -> BTreeMap<&'static str, bool> {
        ITEMS.iter().map(|i| i.key).zip(self.checked.iter().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_items_seven_critical() {
        assert_eq!(ITEMS.len(), 10);
        assert_eq!(ITEMS.iter().filter(|i| i.critical).count(), 7);
        let list = SafetyChecklist::new();
        assert_eq!(list.completed(), 0);
        assert_eq!(list.critical_outstanding(), 7);
        assert!(!list.flight_ready());
    }

    #[test]
    fn toggling_every_item_makes_flight_ready() {
        let mut list = SafetyChecklist::new();
        for item in ITEMS.iter() {
            assert_eq!(list.toggle(item.key), Some(true));
        }
        assert_eq!(list.completed(), 10);
        assert!(list.flight_ready());

        assert_eq!(list.toggle("gps"), Some(false));
        assert!(!list.is_checked("gps"));
        assert!(!list.flight_ready());
        assert_eq!(list.outstanding().map(|i| i.key).collect::<Vec<_>>(), vec!["gps"]);
        assert_eq!(list.as_map()["gps"], false);
        assert_eq!(list.as_map()["battery"], true);
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut list = SafetyChecklist::new();
        assert_eq!(list.toggle("parachute"), None);
        assert!(!list.is_checked("parachute"));
        assert_eq!(list, SafetyChecklist::new());
    }

    #[test]
    fn non_critical_items_still_block() {
        let mut list = SafetyChecklist::new();
        for item in ITEMS.iter().filter(|i| i.critical) {
            list.toggle(item.key);
        }
        assert_eq!(list.critical_outstanding(), 0);
        assert!(!list.flight_ready());
    }
}
