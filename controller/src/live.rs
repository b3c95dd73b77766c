use std::{
    sync::mpsc::{self, Receiver, Sender},
    time::Duration,
};

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skyclean_sim::{telemetry_feed, PeriodicTask, ProgressSim, TelemetrySim};
use skyclean_structs::{
    action::{Action, TaskProgress},
    state::State,
};

use crate::store::Store;

/// The monitor screen's live toggle. While it is on and at least one task is
/// active, a background feed produces telemetry; `pump` applies whatever the
/// feed has produced since the last call.
pub struct LiveMonitor {
    live: bool,
    interval: Duration,
    rng: ChaCha8Rng,
    progress: ProgressSim,
    tx: Sender<Action>,
    rx: Receiver<Action>,
    feed: Option<PeriodicTask>,
}

impl LiveMonitor {
    pub fn new(interval: Duration, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let progress = ProgressSim::from_seed(rng.gen());
        let (tx, rx) = mpsc::channel();
        Self {
            live: false,
            interval,
            rng,
            progress,
            tx,
            rx,
            feed: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn is_streaming(&self) -> bool {
        self.feed.as_ref().map(|f| f.is_running()).unwrap_or(false)
    }

    pub fn set_live(&mut self, live: bool, state: &State) {
        info!("live telemetry {}", if live { "on" } else { "off" });
        self.live = live;
        self.sync(state);
    }

    /// Starts or stops the feed to match the toggle and the task list.
    pub fn sync(&mut self, state: &State) {
        let wanted = self.live && !state.active_tasks.is_empty();
        match (wanted, self.feed.is_some()) {
            (true, false) => {
                let tx = self.tx.clone();
                let sim = TelemetrySim::from_seed(self.rng.gen());
                self.feed = Some(telemetry_feed(sim, self.interval, move |update| {
                    tx.send(Action::UpdateTelemetry(update)).is_ok()
                }));
            }
            (false, true) => {
                if let Some(feed) = self.feed.take() {
                    feed.stop();
                }
                // Readings produced before the stop are dropped with it.
                let dropped = self.rx.try_iter().count();
                debug!("telemetry feed stopped, {} pending readings dropped", dropped);
            }
            _ => {}
        }
    }

    fn apply(&mut self, store: &mut Store, action: Action) {
        store.dispatch(action);

        let state = store.state();
        for task in state.active_tasks.iter().filter(|t| t.progress < 100.0) {
            store.dispatch(Action::UpdateTaskProgress(TaskProgress {
                id: task.id,
                progress: self.progress.step(task.progress),
            }));
        }
    }

    /// Applies pending readings. After each reading every unfinished active
    /// task advances a little. Returns the number of readings applied.
    ///
    /// The feed is brought in line with the current task list first, so
    /// readings queued after the last task ended are dropped, not applied.
    pub fn pump(&mut self, store: &mut Store) -> usize {
        self.sync(&store.state());
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.apply(store, action);
            applied += 1;
        }
        applied
    }

    /// Blocks for up to `timeout` waiting for the next reading, then pumps.
    pub fn pump_timeout(&mut self, store: &mut Store, timeout: Duration) -> usize {
        self.sync(&store.state());
        match self.rx.recv_timeout(timeout) {
            Ok(action) => {
                self.apply(store, action);
                1 + self.pump(store)
            }
            Err(_) => {
                self.sync(&store.state());
                0
            }
        }
    }
}

impl Drop for LiveMonitor {
    fn drop(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.stop();
        }
    }
}
