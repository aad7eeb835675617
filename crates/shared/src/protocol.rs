use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Price estimate returned by `POST /predict/`. Values are kept exactly as
/// received; rounding is a presentation concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub margin: f64,
    #[serde(rename = "confidence")]
    pub confidence_percent: f64,
    #[serde(rename = "residual_std")]
    pub residual_std_dev: f64,
}

/// Response of `GET /health/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
    pub model_status: ModelStatus,
    #[serde(default)]
    pub model_info: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    Loaded,
    NotReady,
    Error,
}

impl HealthReport {
    pub fn is_ready(&self) -> bool {
        self.status == "ok" && self.model_status == ModelStatus::Loaded
    }
}

/// Response of `POST /predict-batch/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictionResponse {
    pub count: usize,
    pub predictions: Vec<BatchPredictionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictionEntry {
    pub car: BatchCarSummary,
    pub prediction: BatchPrediction,
}

/// Echo of the identifying fields of one batch input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCarSummary {
    #[serde(rename = "marca")]
    pub brand: String,
    pub model: String,
    #[serde(rename = "an_fabricatie")]
    pub year: i64,
    #[serde(rename = "rulaj")]
    pub mileage_km: i64,
}

/// Batch entries may omit the confidence figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchPrediction {
    pub predicted: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub margin: f64,
    #[serde(default, rename = "confidence")]
    pub confidence_percent: Option<f64>,
    #[serde(rename = "residual_std")]
    pub residual_std_dev: f64,
}
