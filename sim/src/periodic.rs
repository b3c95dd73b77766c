use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread::JoinHandle,
    time::Duration,
};

use log::{debug, warn};
use skyclean_structs::TelemetryUpdate;

use crate::TelemetrySim;

/// A background thread calling `tick` once per interval until stopped.
///
/// The stop channel doubles as the timer: the thread waits on it with a
/// timeout, so a stop request wakes it immediately. A tick that is already
/// running is allowed to finish.
pub struct PeriodicTask {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    /// `tick` returns `false` to end the task from the inside, e.g. when its
    /// output channel has been closed.
    pub fn spawn(interval: Duration, mut tick: impl FnMut() -> bool + Send + 'static) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = std::thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if !tick() {
                        debug!("periodic task ended by its tick");
                        break;
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    /// Stops the timer and waits for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender disconnects the channel, which the thread reads
        // as a stop request.
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("periodic task panicked");
            }
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Pushes one simulated telemetry reading into `sink` per interval. The feed
/// stops when `sink` returns `false`.
pub fn telemetry_feed(
    mut sim: TelemetrySim,
    interval: Duration,
    mut sink: impl FnMut(TelemetryUpdate) -> bool + Send + 'static,
) -> PeriodicTask {
    debug!("starting telemetry feed every {:?}", interval);
    PeriodicTask::spawn(interval, move || sink(sim.sample()))
}
