use crate::image_file::ImageFile;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
    /// Raw model output; only present on servers that report it.
    #[serde(default)]
    #[allow(dead_code)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Health {
    pub status: String,
    pub model_loaded: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("Prediction failed (HTTP {0})")]
    Status(u16),
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Prediction was interrupted")]
    Interrupted,
}

/// Remote dog/cat classifier.
pub trait Predictor: Send + Sync {
    /// Sends one request; never retries.
    fn predict(&self, image: &ImageFile) -> Result<Prediction, PredictError>;
    fn health(&self) -> Result<Health, PredictError>;
}
