//! Client side of the car price predictor: the form session controller and the
//! HTTP client for the prediction service.

pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use client::{PredictionClient, PredictionService};
pub use config::{load_settings, Settings};
pub use error::PredictError;
pub use session::{
    Delivery, RequestHandle, SessionController, SessionSnapshot, SessionState, Submission,
};
