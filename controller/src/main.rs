use std::time::{Duration, Instant};

use log::{debug, error, info};
use skyclean_controller::{
    config::ConsoleConfig,
    console::{Console, TaskRequest},
    export::{export_csv, LogFilter},
    live::LiveMonitor,
    session::{Role, Session},
    store::Store,
};
use skyclean_planner::{alerts, checklist::{SafetyChecklist, ITEMS}, PathSettings};
use skyclean_sim::WeatherSim;
use skyclean_structs::{state::State, BuildingId, DroneId};

fn main() {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = match ConsoleConfig::from_args(std::env::args()) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    debug!("config {:?}", config);

    let mut session = Session::default();
    session.login("operator", "operator", Role::Operator);

    let mut store = Store::new(State::seeded());
    store.subscribe(|prev, next| {
        if prev.emergency_status != next.emergency_status {
            info!("emergency status now {}", next.emergency_status);
        }
    });
    let mut console = Console::new(store);

    let mut weather = match config.seed {
        Some(seed) => WeatherSim::from_seed(seed),
        None => WeatherSim::from_entropy(),
    };
    for alert in console.refresh_weather(&mut weather) {
        println!("weather alert ({:?}): {}", alert.severity, alert.message);
    }
    if !console.flight_safe() {
        println!("weather not safe for flight, standing down.");
        return;
    }

    let building = match console.select_building(BuildingId(1)) {
        Ok(b) => b,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };
    if let Some(est) = console.estimate() {
        println!(
            "{}: {} windows, ~{} h, {} L solution, {} flight segments",
            building.name, est.windows, est.hours, est.solution_litres, est.flight_segments
        );
    }

    let mut checklist = SafetyChecklist::new();
    for item in ITEMS.iter() {
        checklist.toggle(item.key);
    }
    if !checklist.flight_ready() {
        println!("pre-flight checklist incomplete.");
        return;
    }

    match console.generate_flight_path(&PathSettings::default()) {
        Ok(path) => path.print(),
        Err(e) => {
            error!("{}", e);
            return;
        }
    }

    let task = match console.start_task(TaskRequest {
        area: "full-building".to_string(),
        ..TaskRequest::new(DroneId(1))
    }) {
        Ok(t) => t,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    let mut monitor = LiveMonitor::new(config.telemetry_interval(), config.seed);
    monitor.set_live(config.live_mode, &console.state());

    println!("skyclean main loop starting.");
    let started = Instant::now();
    let demo = Duration::from_secs(config.demo_seconds);
    while started.elapsed() < demo {
        let wait = demo.saturating_sub(started.elapsed()).min(config.telemetry_interval());
        if monitor.pump_timeout(console.store_mut(), wait) > 0 {
            let state = console.state();
            let t = state.telemetry;
            let progress = state.active_task(task.id).map(|a| a.progress).unwrap_or(100.0);
            println!(
                "alt {}m speed {}km/h heading {}° {}hPa {}°C progress {:.1}%",
                t.altitude, t.speed, t.heading, t.pressure, t.temperature, progress
            );
            for alert in alerts::telemetry_alerts(&t) {
                println!("  ! {}", alert.message);
            }
        }
    }
    monitor.set_live(false, &console.state());

    if console.stop_task(task.id).is_none() {
        error!("task {} was not active", task.id);
    }

    let state = console.state();
    let summary = state.fleet_summary();
    println!(
        "fleet: {} active, {} available, {} in maintenance, {}% average battery",
        summary.active, summary.available, summary.maintenance, summary.average_battery
    );

    let logs = LogFilter::default();
    if let Err(e) = export_csv(logs.apply(&state.cleaning_logs), std::io::stdout()) {
        error!("exporting logs: {}", e);
    }

    session.logout();
}
