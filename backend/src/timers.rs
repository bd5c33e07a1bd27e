//! Countdown timer driver
//!
//! Runs the pure [`Countdown`] machine on the tokio runtime. Each
//! [`TimerKind`] has a single slot: starting a timer replaces the running one
//! of the same kind and leaves the other kind alone. State changes are
//! published on a `watch` channel per kind, so subscribers survive restarts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use aiqo_shared::{Countdown, Meal, TimerKind};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::config::TimerConfig;

const TICK: Duration = Duration::from_secs(1);

struct Slot {
    state: Arc<watch::Sender<Countdown>>,
    /// Bumped on every start and cancel; a tick task only writes while its
    /// generation is current
    generation: Arc<AtomicU64>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Slot {
    fn new() -> Self {
        let (tx, _rx) = watch::channel(Countdown::Idle);
        Self {
            state: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
        }
    }

    /// Invalidate the current run and publish `next`
    async fn replace(&self, next: Countdown) -> u64 {
        let mut task = self.task.lock().await;
        if let Some(handle) = task.take() {
            handle.abort();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(next);
        generation
    }
}

/// Rest and cook countdowns, one running timer per kind
pub struct TimerDriver {
    rest: Slot,
    cook: Slot,
    rest_secs: u32,
}

impl TimerDriver {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            rest: Slot::new(),
            cook: Slot::new(),
            rest_secs: config.rest_secs,
        }
    }

    fn slot(&self, kind: TimerKind) -> &Slot {
        match kind {
            TimerKind::Rest => &self.rest,
            TimerKind::Cook => &self.cook,
        }
    }

    /// Current state of a timer
    pub fn state(&self, kind: TimerKind) -> Countdown {
        *self.slot(kind).state.borrow()
    }

    /// Receive every state change of a timer
    pub fn subscribe(&self, kind: TimerKind) -> watch::Receiver<Countdown> {
        self.slot(kind).state.subscribe()
    }

    /// Start a countdown, cancelling any running timer of the same kind
    pub async fn start(&self, kind: TimerKind, seconds: u32) -> watch::Receiver<Countdown> {
        let slot = self.slot(kind);
        let initial = Countdown::start(seconds);
        let generation = slot.replace(initial).await;
        tracing::debug!(?kind, seconds, "Timer started");

        if initial.is_running() {
            let state = slot.state.clone();
            let current = slot.generation.clone();
            let handle = tokio::spawn(async move {
                let mut interval = tokio::time::interval(TICK);
                // The first tick completes immediately
                interval.tick().await;
                loop {
                    interval.tick().await;
                    let mut running = false;
                    state.send_if_modified(|countdown| {
                        if current.load(Ordering::SeqCst) != generation {
                            return false;
                        }
                        *countdown = countdown.tick();
                        running = countdown.is_running();
                        true
                    });
                    if !running {
                        tracing::debug!(?kind, "Timer finished");
                        break;
                    }
                }
            });

            let mut task = slot.task.lock().await;
            if slot.generation.load(Ordering::SeqCst) == generation {
                *task = Some(handle);
            } else {
                // Replaced while we were spawning
                handle.abort();
            }
        }

        slot.state.subscribe()
    }

    /// Rest timer using the configured length
    pub async fn start_rest(&self) -> watch::Receiver<Countdown> {
        self.start(TimerKind::Rest, self.rest_secs).await
    }

    /// Cook timer for a dish's preparation time
    pub async fn start_cook(&self, meal: &Meal) -> watch::Receiver<Countdown> {
        self.start(TimerKind::Cook, meal.cook_seconds()).await
    }

    /// Stop a timer and return it to idle
    pub async fn cancel(&self, kind: TimerKind) {
        self.slot(kind).replace(Countdown::Idle).await;
        tracing::debug!(?kind, "Timer cancelled");
    }

    /// Stop every timer
    pub async fn shutdown(&self) {
        self.cancel(TimerKind::Rest).await;
        self.cancel(TimerKind::Cook).await;
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        for slot in [&self.rest, &self.cook] {
            if let Ok(mut task) = slot.task.try_lock() {
                if let Some(handle) = task.take() {
                    handle.abort();
                }
            }
        }
    }
}
