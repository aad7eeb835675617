use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    error::ErrorBody,
    protocol::{BatchPredictionResponse, HealthReport, PredictionResult},
    VehicleQuery,
};
use tracing::{debug, warn};

use crate::{
    config::{normalize_base_url, Settings},
    error::PredictError,
};

/// The remote price model as seen by a session.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Endpoint root, quoted back to the user when a request fails.
    fn base_url(&self) -> &str;

    async fn predict(&self, query: &VehicleQuery) -> Result<PredictionResult, PredictError>;
}

/// reqwest-backed client for the prediction HTTP API.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    base_url: String,
}

impl PredictionClient {
    /// `base_url` must already be normalised (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let base_url = normalize_base_url(&settings.api_base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, base_url })
    }

    /// `GET /health/`.
    pub async fn health(&self) -> Result<HealthReport, PredictError> {
        let res = self
            .http
            .get(format!("{}/health/", self.base_url))
            .send()
            .await
            .map_err(PredictError::transport)?;
        decode_response(res).await
    }

    /// `POST /predict-batch/`. The service rejects the whole batch if any
    /// entry fails.
    pub async fn predict_batch(
        &self,
        queries: &[VehicleQuery],
    ) -> Result<BatchPredictionResponse, PredictError> {
        debug!(count = queries.len(), "sending batch prediction request");
        let res = self
            .http
            .post(format!("{}/predict-batch/", self.base_url))
            .json(queries)
            .send()
            .await
            .map_err(PredictError::transport)?;
        decode_response(res).await
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn predict(&self, query: &VehicleQuery) -> Result<PredictionResult, PredictError> {
        debug!(brand = %query.brand, model = %query.model, year = query.year, "sending prediction request");
        let res = self
            .http
            .post(format!("{}/predict/", self.base_url))
            .json(query)
            .send()
            .await
            .map_err(PredictError::transport)?;
        decode_response(res).await
    }
}

async fn decode_response<T: DeserializeOwned>(res: Response) -> Result<T, PredictError> {
    let status = res.status();
    let body = res.bytes().await.map_err(PredictError::transport)?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.message())
            .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
        warn!(status = status.as_u16(), %message, "prediction service returned an error");
        return Err(PredictError::Service { status, message });
    }

    serde_json::from_slice(&body).map_err(|err| PredictError::Parse(err.to_string()))
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
