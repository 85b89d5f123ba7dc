//! Backend health monitor.
//!
//! ```text
//! Idle ──mount──▶ Loading ──ok──▶ Healthy ──tick/refresh──▶ Loading ...
//!                    │
//!                    └──err──▶ Degraded (last snapshot kept)
//! ```
//!
//! The polling task belongs to [`HealthMonitor`] and is aborted exactly once,
//! on [`HealthMonitor::shutdown`] or drop.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rag_api::{ApiError, HealthSnapshot, RagBackend};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const HEALTH_FAILED: &str = "Failed to fetch health status";

/// Where the health state machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthPhase {
    Idle,
    Loading,
    Healthy,
    Degraded,
}

/// What the health panel should draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthView<'a> {
    /// Nothing fetched yet.
    Loading,
    /// Never fetched successfully; no numbers to show.
    Unavailable { error: &'a str },
    /// A snapshot, possibly stale, with the latest error above it.
    Available {
        snapshot: &'a HealthSnapshot,
        error: Option<&'a str>,
    },
}

/// Health panel state.
#[derive(Debug, Clone, Default)]
pub struct HealthState {
    pub snapshot: Option<HealthSnapshot>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_refresh: Option<DateTime<Utc>>,
    /// An index reload is in flight.
    pub reloading: bool,
    /// Outcome of the last index reload, if any.
    pub notice: Option<String>,
}

impl HealthState {
    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Success replaces the snapshot wholesale; failure keeps it.
    pub fn complete(&mut self, outcome: Result<HealthSnapshot, ApiError>) {
        self.loading = false;
        match outcome {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.error = None;
                self.last_refresh = Some(Utc::now());
            }
            Err(e) => self.error = Some(e.user_message(HEALTH_FAILED)),
        }
    }

    pub fn phase(&self) -> HealthPhase {
        if self.loading {
            HealthPhase::Loading
        } else if self.error.is_some() {
            HealthPhase::Degraded
        } else if self.snapshot.is_some() {
            HealthPhase::Healthy
        } else {
            HealthPhase::Idle
        }
    }

    pub fn view(&self) -> HealthView<'_> {
        match (&self.snapshot, &self.error) {
            (Some(snapshot), error) => HealthView::Available {
                snapshot,
                error: error.as_deref(),
            },
            (None, Some(error)) => HealthView::Unavailable { error },
            (None, None) => HealthView::Loading,
        }
    }
}

/// Fetch once and apply the outcome. Shared by the timer tick and manual
/// refresh.
pub async fn poll_once(backend: &dyn RagBackend, state: &Mutex<HealthState>) {
    state.lock().begin_fetch();
    let outcome = backend.get_health().await;
    match &outcome {
        Ok(snapshot) => tracing::debug!(status = snapshot.status.as_str(), "health fetched"),
        Err(e) => tracing::warn!(error = %e, "health check failed"),
    }
    state.lock().complete(outcome);
}

/// Owns the repeating health poll.
pub struct HealthMonitor {
    backend: Arc<dyn RagBackend>,
    state: Arc<Mutex<HealthState>>,
    refresh_tx: mpsc::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl HealthMonitor {
    /// Fetch immediately, then every `interval`.
    pub fn mount(backend: Arc<dyn RagBackend>, interval: Duration) -> Self {
        let state = Arc::new(Mutex::new(HealthState::default()));
        // Capacity 1: refreshes requested while one is pending collapse into it.
        let (refresh_tx, refresh_rx) = mpsc::channel(1);

        let task = tokio::spawn(poll_loop(
            Arc::clone(&backend),
            Arc::clone(&state),
            interval,
            refresh_rx,
        ));
        tracing::info!(interval_secs = interval.as_secs_f64(), "health monitor mounted");

        Self {
            backend,
            state,
            refresh_tx,
            task: Some(task),
        }
    }

    pub fn snapshot(&self) -> HealthState {
        self.state.lock().clone()
    }

    /// Request an out-of-band fetch on the polling task. Returns `false` if
    /// one was already pending or the monitor is shut down.
    pub fn refresh(&self) -> bool {
        match self.refresh_tx.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => false,
            Err(TrySendError::Closed(())) => false,
        }
    }

    /// Ask the backend to reload its vector index, then refresh health.
    /// Returns `None` while a previous reload is still in flight.
    pub fn reload_index(&self) -> Option<JoinHandle<()>> {
        {
            let mut state = self.state.lock();
            if state.reloading {
                tracing::debug!("index reload already in flight");
                return None;
            }
            state.reloading = true;
        }

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let refresh_tx = self.refresh_tx.clone();

        Some(tokio::spawn(async move {
            let outcome = backend.reload_index().await;
            let notice = match outcome {
                Ok(outcome) => {
                    tracing::info!(
                        status = %outcome.status,
                        vector_count = outcome.vector_count,
                        "vector index reloaded"
                    );
                    let _ = refresh_tx.try_send(());
                    if outcome.message.is_empty() {
                        format!("Index reload {}", outcome.status)
                    } else {
                        outcome.message
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "index reload failed");
                    let reason = e.detail().map(str::to_string).unwrap_or_else(|| e.to_string());
                    format!("Index reload failed: {reason}")
                }
            };
            let mut state = state.lock();
            state.reloading = false;
            state.notice = Some(notice);
        }))
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop polling. Safe to call more than once; only the first call aborts.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::info!("health monitor stopped");
        }
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn poll_loop(
    backend: Arc<dyn RagBackend>,
    state: Arc<Mutex<HealthState>>,
    interval: Duration,
    mut refresh_rx: mpsc::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            received = refresh_rx.recv() => {
                if received.is_none() {
                    break;
                }
            }
        }
        poll_once(backend.as_ref(), &state).await;
    }
}
