use shared::{protocol::PredictionResult, VehicleQuery};

use crate::error::PredictError;

/// Request lifecycle of a session. Only [`super::SessionController`] moves it
/// between variants.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(PredictionResult),
    Failed(String),
}

impl SessionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Outcome of one dispatched request, sent from the request task back to the
/// owning session.
#[derive(Debug)]
pub struct Resolution {
    pub request_id: u64,
    pub outcome: Result<PredictionResult, PredictError>,
}

/// Owned copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub query: VehicleQuery,
    pub state: SessionState,
    pub in_flight: usize,
}
