use crate::image_file::ImageFile;
use crate::library::logger::interface::Logger;
use crate::predictor::interface::{Health, PredictError, Prediction, Predictor};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Answers with scripted responses in order and records every request.
pub struct PredictorFake {
    logger: Arc<dyn Logger + Send + Sync>,
    responses: Mutex<VecDeque<Result<Prediction, PredictError>>>,
    requests: Mutex<Vec<ImageFile>>,
}

impl PredictorFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("predictor").with_namespace("fake"),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn respond_with(&self, response: Result<Prediction, PredictError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<ImageFile> {
        self.requests.lock().unwrap().clone()
    }
}

impl Predictor for PredictorFake {
    fn predict(&self, image: &ImageFile) -> Result<Prediction, PredictError> {
        let _ = self
            .logger
            .info(&format!("PredictorFake::predict({:?})", image));
        self.requests.lock().unwrap().push(image.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(PredictError::Status(503)))
    }

    fn health(&self) -> Result<Health, PredictError> {
        Ok(Health {
            status: "healthy".to_string(),
            model_loaded: true,
        })
    }
}
