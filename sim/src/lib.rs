use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skyclean_structs::{TelemetryUpdate, WeatherUpdate};

pub mod periodic;

pub use periodic::{telemetry_feed, PeriodicTask};

pub const WEATHER_CONDITIONS: [&str; 4] = ["Clear", "Partly Cloudy", "Overcast", "Light Rain"];

/// Uniform draw from `[min, min + span)`, rounded to a whole number.
fn around(rng: &mut ChaCha8Rng, min: f64, span: f64) -> f64 {
    (min + rng.gen::<f64>() * span).round()
}

/// Fake sensor readings for the drone currently in the air.
pub struct TelemetrySim {
    rng: ChaCha8Rng,
}

impl TelemetrySim {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    pub fn sample(&mut self) -> TelemetryUpdate {
        let rng = &mut self.rng;
        TelemetryUpdate {
            altitude: Some(around(rng, 20.0, 80.0)),    // m
            speed: Some(around(rng, 5.0, 15.0)),        // km/h
            heading: Some(around(rng, 0.0, 360.0)),     // degrees
            pressure: Some(around(rng, 1003.0, 20.0)),  // hPa
            temperature: Some(around(rng, 18.0, 10.0)), // °C
        }
    }
}

pub struct WeatherSim {
    rng: ChaCha8Rng,
}

impl WeatherSim {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    pub fn sample(&mut self) -> WeatherUpdate {
        let condition = WEATHER_CONDITIONS[self.rng.gen_range(0..WEATHER_CONDITIONS.len())];
        let rng = &mut self.rng;
        WeatherUpdate {
            condition: Some(condition.to_string()),
            wind_speed: Some(around(rng, 5.0, 20.0)),
            visibility: Some(around(rng, 5.0, 15.0)),
            temperature: Some(around(rng, 15.0, 15.0)),
            humidity: Some(around(rng, 30.0, 50.0)),
        }
    }
}

/// Advances cleaning progress by a random step of up to two percent.
pub struct ProgressSim {
    rng: ChaCha8Rng,
}

impl ProgressSim {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    pub fn step(&mut self, progress: f64) -> f64 {
        (progress + self.rng.gen::<f64>() * 2.0).min(100.0)
    }
}
