use std::sync::Arc;

use shared::{error::FieldError, protocol::PredictionResult, QueryField, VehicleQuery};
use tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use super::state::{Resolution, SessionSnapshot, SessionState};
use crate::{client::PredictionService, error::PredictError};

/// Owns one form query and its request lifecycle.
///
/// The controller lives on the UI side and is never shared. `submit` hands the
/// network round trip to the runtime and returns at once; outcomes come back
/// over a channel and are applied by [`Self::pump`] or
/// [`Self::wait_for_resolution`] in the order they land, so with overlapping
/// submissions the last one to land wins. Dropping the controller closes the
/// channel and later outcomes are discarded.
pub struct SessionController {
    service: Arc<dyn PredictionService>,
    runtime: Handle,
    query: VehicleQuery,
    state: SessionState,
    next_request_id: u64,
    in_flight: usize,
    resolution_tx: UnboundedSender<Resolution>,
    resolution_rx: UnboundedReceiver<Resolution>,
}

/// What `submit` did.
#[derive(Debug)]
pub enum Submission {
    /// Required fields were missing; the session failed without a request.
    Rejected,
    InFlight(RequestHandle),
}

/// Whether a finished request reached its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Discarded,
}

/// Handle on a dispatched prediction request. Dropping it does not cancel the
/// request.
#[derive(Debug)]
pub struct RequestHandle {
    id: u64,
    task: JoinHandle<Delivery>,
}

impl RequestHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Waits for the request task to hand off its outcome.
    pub async fn finished(self) -> Delivery {
        // A panicked task reports through its drop guard; whether that landed
        // is not observable from here.
        self.task.await.unwrap_or(Delivery::Discarded)
    }
}

impl SessionController {
    pub fn new(service: Arc<dyn PredictionService>, runtime: Handle) -> Self {
        let (resolution_tx, resolution_rx) = mpsc::unbounded_channel();
        Self {
            service,
            runtime,
            query: VehicleQuery::default(),
            state: SessionState::Idle,
            next_request_id: 0,
            in_flight: 0,
            resolution_tx,
            resolution_rx,
        }
    }

    pub fn query(&self) -> &VehicleQuery {
        &self.query
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            query: self.query.clone(),
            state: self.state.clone(),
            in_flight: self.in_flight,
        }
    }

    /// Updates one field from raw input. Never changes the lifecycle state.
    pub fn set_field(&mut self, field: QueryField, raw: &str) -> Result<(), FieldError> {
        self.query.apply_raw(field, raw)?;
        debug!(field = field.key(), value = raw, "form field updated");
        Ok(())
    }

    /// [`Self::set_field`] addressed by request key (`marca`, `rulaj`, ...).
    pub fn set_field_by_name(&mut self, name: &str, raw: &str) -> Result<(), FieldError> {
        let field = name.parse::<QueryField>()?;
        self.set_field(field, raw)
    }

    /// Selects a brand, clearing the model unless the new brand lists it.
    pub fn set_brand(&mut self, brand: &str) {
        self.query.select_brand(brand);
        debug!(brand, model = %self.query.model, "brand selected");
    }

    /// Back to the default query and `Idle`. Requests still in flight will
    /// land on the fresh state.
    pub fn reset(&mut self) {
        self.query = VehicleQuery::default();
        self.state = SessionState::Idle;
    }

    /// Validates the required fields and dispatches the query.
    pub fn submit(&mut self) -> Submission {
        if !self.query.has_required_fields() {
            warn!(
                brand = %self.query.brand,
                model = %self.query.model,
                year = self.query.year,
                "prediction not submitted: required fields missing"
            );
            self.state =
                SessionState::Failed(PredictError::Validation.user_message(self.service.base_url()));
            return Submission::Rejected;
        }

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.state = SessionState::Submitting;
        self.in_flight += 1;
        info!(
            request_id,
            brand = %self.query.brand,
            model = %self.query.model,
            year = self.query.year,
            "submitting prediction request"
        );

        let service = Arc::clone(&self.service);
        let query = self.query.clone();
        let reporter = Reporter::new(request_id, self.resolution_tx.clone());
        let task = self.runtime.spawn(async move {
            let outcome = service.predict(&query).await;
            reporter.report(outcome)
        });

        Submission::InFlight(RequestHandle {
            id: request_id,
            task,
        })
    }

    /// Applies every outcome that has already landed. Returns how many.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(resolution) = self.resolution_rx.try_recv() {
            self.apply(resolution);
            applied += 1;
        }
        applied
    }

    /// Waits for the next outcome and applies it. Returns `None` right away
    /// when nothing is in flight.
    pub async fn wait_for_resolution(&mut self) -> Option<&SessionState> {
        if self.in_flight == 0 {
            return None;
        }
        let resolution = self.resolution_rx.recv().await?;
        self.apply(resolution);
        Some(&self.state)
    }

    fn apply(&mut self, resolution: Resolution) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let request_id = resolution.request_id;
        self.state = match resolution.outcome {
            Ok(result) => {
                info!(request_id, predicted = result.predicted, "prediction received");
                SessionState::Succeeded(result)
            }
            Err(err) => {
                warn!(request_id, error = %err, "prediction failed");
                SessionState::Failed(err.user_message(self.service.base_url()))
            }
        };
    }
}

/// Sends exactly one resolution per request. If the task ends without
/// reporting (panic in the service, runtime shutdown) the drop reports a
/// failure instead, so the session never stays stuck in `Submitting`.
struct Reporter {
    request_id: u64,
    tx: Option<UnboundedSender<Resolution>>,
}

impl Reporter {
    fn new(request_id: u64, tx: UnboundedSender<Resolution>) -> Self {
        Self {
            request_id,
            tx: Some(tx),
        }
    }

    fn report(mut self, outcome: Result<PredictionResult, PredictError>) -> Delivery {
        match self.tx.take() {
            Some(tx) => send(&tx, self.request_id, outcome),
            None => Delivery::Discarded,
        }
    }
}

impl Drop for Reporter {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            send(
                &tx,
                self.request_id,
                Err(PredictError::Transport(
                    "prediction request ended unexpectedly".into(),
                )),
            );
        }
    }
}

fn send(
    tx: &UnboundedSender<Resolution>,
    request_id: u64,
    outcome: Result<PredictionResult, PredictError>,
) -> Delivery {
    match tx.send(Resolution {
        request_id,
        outcome,
    }) {
        Ok(()) => Delivery::Delivered,
        Err(_) => {
            debug!(request_id, "session closed before prediction resolved; discarding outcome");
            Delivery::Discarded
        }
    }
}

#[cfg(test)]
#[path = "../tests/session_tests.rs"]
mod tests;
