use serde::{Deserialize, Serialize};
use skyclean_structs::{Telemetry, WeatherData};

pub const MAX_SAFE_WIND: f64 = 15.0;
pub const MIN_SAFE_VISIBILITY: f64 = 5.0;
pub const HUMIDITY_LIMIT: f64 = 80.0;
pub const HIGH_ALTITUDE: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: &'static str,
}

pub fn weather_alerts(weather: &WeatherData) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if weather.wind_speed > MAX_SAFE_WIND {
        alerts.push(Alert {
            severity: Severity::Warning,
            message: "High wind speeds detected. Consider postponing operations.",
        });
    }
    if weather.visibility < MIN_SAFE_VISIBILITY {
        alerts.push(Alert {
            severity: Severity::Danger,
            message: "Low visibility conditions. Flight operations should be suspended.",
        });
    }
    if weather.humidity > HUMIDITY_LIMIT {
        alerts.push(Alert {
            severity: Severity::Info,
            message: "High humidity may affect cleaning solution performance.",
        });
    }
    alerts
}

pub fn flight_safe(weather: &WeatherData) -> bool {
    weather.wind_speed <= MAX_SAFE_WIND && weather.visibility >= MIN_SAFE_VISIBILITY
}

pub fn telemetry_alerts(telemetry: &Telemetry) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if telemetry.altitude > HIGH_ALTITUDE {
        alerts.push(Alert {
            severity: Severity::Warning,
            message: "High altitude detected - Monitor wind conditions",
        });
    }
    alerts
}

#[cfg(test)]
mod tests {
    use skyclean_structs::state::State;

    use super::*;

    #[test]
    fn calm_weather_is_safe() {
        let weather = State::default().weather_data;
        assert!(weather_alerts(&weather).is_empty());
        assert!(flight_safe(&weather));
    }

    #[test]
    fn storm_raises_every_alert() {
        let weather = WeatherData {
            condition: "Light Rain".to_string(),
            wind_speed: 22.0,
            visibility: 3.0,
            temperature: 16.0,
            humidity: 85.0,
        };
        let severities = weather_alerts(&weather).iter().map(|a| a.severity).collect::<Vec<_>>();
        assert_eq!(severities, vec![Severity::Warning, Severity::Danger, Severity::Info]);
        assert!(!flight_safe(&weather));
    }

    #[test]
    fn limits_are_inclusive_for_safety() {
        let weather = WeatherData {
            wind_speed: 15.0,
            visibility: 5.0,
            humidity: 80.0,
            ..State::default().weather_data
        };
        assert!(weather_alerts(&weather).is_empty());
        assert!(flight_safe(&weather));
    }

    #[test]
    fn high_altitude_warning() {
        let mut telemetry = State::default().telemetry;
        assert!(telemetry_alerts(&telemetry).is_empty());
        telemetry.altitude = 81.0;
        assert_eq!(telemetry_alerts(&telemetry)[0].severity, Severity::Warning);
    }
}
