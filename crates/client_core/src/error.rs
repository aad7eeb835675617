use reqwest::StatusCode;
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please fill in brand, model and year";

/// Failure of a prediction round trip. Every variant ends up as the message of
/// a failed session; none reaches the renderer as an error value.
#[derive(Debug, Clone, Error)]
pub enum PredictError {
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,
    /// The service answered with a non-success status.
    #[error("{message}")]
    Service { status: StatusCode, message: String },
    /// No response was received.
    #[error("{0}")]
    Transport(String),
    /// A response arrived but its body could not be decoded.
    #[error("invalid response from prediction service: {0}")]
    Parse(String),
}

impl PredictError {
    pub fn transport(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure concerns the remote service, as opposed to local
    /// input. Parse failures count as service failures.
    pub fn is_service_side(&self) -> bool {
        !matches!(self, Self::Validation)
    }

    /// The text a failed session shows. Service-side failures point the user
    /// at the configured endpoint.
    pub fn user_message(&self, base_url: &str) -> String {
        if self.is_service_side() {
            format!("{self}. Make sure the API is running on {base_url}")
        } else {
            self.to_string()
        }
    }
}
