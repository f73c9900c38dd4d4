//! The calculator state machine behind the prediction page.
//!
//! `StressEstimator` moves through `Idle -> Computing -> Resolved` and back to
//! `Computing` on every accepted request. Requests arriving while a computation
//! is in flight are rejected with [`EstimatorError::Busy`], so at most one
//! estimate is ever pending and exactly one is visible after the first
//! resolution. The `Computing -> Resolved` transition is driven by a spawned
//! task, not by the caller, so dropping a [`PendingEstimate`] never leaves the
//! machine stuck in `Computing`.

use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::EstimatorSettings;
use crate::error::{EstimatorError, Result};
use crate::model::{Estimate, InputField, StressInputs, StressModel};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "estimate", rename_all = "snake_case")]
pub enum EstimatorState {
    Idle,
    Computing,
    Resolved(Estimate),
}

impl EstimatorState {
    pub fn estimate(&self) -> Option<&Estimate> {
        match self {
            EstimatorState::Resolved(estimate) => Some(estimate),
            _ => None,
        }
    }

    pub fn is_computing(&self) -> bool {
        matches!(self, EstimatorState::Computing)
    }
}

struct Shared {
    model: StressModel,
    latency: Duration,
    inputs: Mutex<StressInputs>,
    rng: Mutex<StdRng>,
    state: watch::Sender<EstimatorState>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Clone)]
pub struct StressEstimator {
    shared: Arc<Shared>,
}

impl StressEstimator {
    pub fn new(settings: &EstimatorSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Builds an estimator whose confidence figures come from `rng`.
    pub fn with_rng(settings: &EstimatorSettings, rng: StdRng) -> Self {
        let (state, _) = watch::channel(EstimatorState::Idle);
        Self {
            shared: Arc::new(Shared {
                model: StressModel::new(),
                latency: settings.latency(),
                inputs: Mutex::new(StressInputs::default()),
                rng: Mutex::new(rng),
                state,
            }),
        }
    }

    pub fn latency(&self) -> Duration {
        self.shared.latency
    }

    pub fn inputs(&self) -> StressInputs {
        *lock(&self.shared.inputs)
    }

    /// Updates one input; `Ok(false)` means the stored value was already equal.
    pub fn set_input(&self, field: InputField, value: f64) -> Result<bool> {
        lock(&self.shared.inputs).set(field, value)
    }

    /// Updates several inputs at once; nothing is stored unless every value is valid.
    ///
    /// Returns the fields whose stored value changed.
    pub fn set_inputs(&self, entries: &[(InputField, f64)]) -> Result<Vec<InputField>> {
        let normalized = entries
            .iter()
            .map(|&(field, value)| field.normalize(value).map(|v| (field, v)))
            .collect::<Result<Vec<_>>>()?;

        let mut current = lock(&self.shared.inputs);
        let mut changed = Vec::new();
        for (field, value) in normalized {
            if current.set(field, value)? && !changed.contains(&field) {
                changed.push(field);
            }
        }
        Ok(changed)
    }

    pub fn replace_inputs(&self, inputs: StressInputs) -> Result<bool> {
        let inputs = inputs.normalized()?;
        let mut current = lock(&self.shared.inputs);
        let changed = *current != inputs;
        *current = inputs;
        Ok(changed)
    }

    pub fn state(&self) -> EstimatorState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<EstimatorState> {
        self.shared.state.subscribe()
    }

    /// Accepts a new computation over `inputs`.
    ///
    /// The machine enters `Computing` before this returns, discarding any
    /// previous estimate. Must be called from within a tokio runtime.
    pub fn request_estimate(&self, inputs: StressInputs) -> Result<PendingEstimate> {
        let inputs = inputs.normalized()?;

        let accepted = self.shared.state.send_if_modified(|state| {
            if state.is_computing() {
                return false;
            }
            *state = EstimatorState::Computing;
            true
        });
        if !accepted {
            warn!("estimate requested while another is in flight");
            return Err(EstimatorError::Busy);
        }

        *lock(&self.shared.inputs) = inputs;
        debug!(?inputs, latency_ms = self.shared.latency.as_millis() as u64, "computing estimate");

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(shared.latency).await;
            let estimate = {
                let mut rng = lock(&shared.rng);
                shared.model.evaluate(&inputs, &mut *rng)
            };
            info!(
                score = estimate.score,
                level = %estimate.level,
                confidence = estimate.confidence,
                "estimate resolved"
            );
            shared.state.send_replace(EstimatorState::Resolved(estimate.clone()));
            estimate
        });

        Ok(PendingEstimate { handle })
    }

    /// Requests an estimate over the currently held inputs.
    pub fn request_current(&self) -> Result<PendingEstimate> {
        self.request_estimate(self.inputs())
    }
}

/// An accepted request; resolves once the simulated latency has elapsed.
pub struct PendingEstimate {
    handle: JoinHandle<Estimate>,
}

impl Future for PendingEstimate {
    type Output = Result<Estimate>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|joined| joined.map_err(|e| EstimatorError::Task(e.to_string())))
    }
}
