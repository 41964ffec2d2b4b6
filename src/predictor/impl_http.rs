use crate::config::Config;
use crate::image_file::ImageFile;
use crate::library::logger::interface::Logger;
use crate::predictor::interface::{Health, PredictError, Prediction, Predictor};
use reqwest::blocking::{multipart, Client};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

pub struct PredictorHttp {
    logger: Arc<dyn Logger + Send + Sync>,
    client: Client,
    predict_url: String,
    health_url: String,
    health_timeout: Duration,
}

impl PredictorHttp {
    pub fn new(config: &Config, logger: Arc<dyn Logger + Send + Sync>) -> Result<Self, PredictError> {
        let client = Client::builder().timeout(config.predict_timeout).build()?;

        Ok(Self {
            logger: logger.with_namespace("predictor").with_namespace("http"),
            client,
            predict_url: config.predict_url.clone(),
            health_url: config.health_url.clone(),
            health_timeout: config.health_timeout,
        })
    }

    fn read_json<T: DeserializeOwned>(
        &self,
        response: reqwest::blocking::Response,
    ) -> Result<T, PredictError> {
        let status = response.status();
        if !status.is_success() {
            let _ = self
                .logger
                .warn(&format!("{} responded {}", response.url(), status));
            return Err(PredictError::Status(status.as_u16()));
        }

        let body = response.bytes()?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Predictor for PredictorHttp {
    fn predict(&self, image: &ImageFile) -> Result<Prediction, PredictError> {
        let _ = self.logger.info(&format!(
            "POST {} ({}, {} bytes)",
            self.predict_url,
            image.content_type(),
            image.bytes().len()
        ));

        let part = multipart::Part::bytes(image.bytes().to_vec())
            .file_name(image.name().to_string())
            .mime_str(image.content_type())?;
        let form = multipart::Form::new().part("file", part);

        let response = self.client.post(&self.predict_url).multipart(form).send()?;
        let prediction: Prediction = self.read_json(response)?;

        let _ = self.logger.info(&format!("Prediction: {:?}", prediction));
        Ok(prediction)
    }

    fn health(&self) -> Result<Health, PredictError> {
        let response = self
            .client
            .get(&self.health_url)
            .timeout(self.health_timeout)
            .send()?;
        self.read_json(response)
    }
}
