use crate::config::Config;
use crate::image_file::decode_preview;
use crate::library::logger::interface::Logger;
use crate::predictor::interface::{PredictError, Prediction, Predictor};
use crate::upload_predict::core::{Effect, Event};
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    predictor: Arc<dyn Predictor + Send + Sync>,
    event_sender: Sender<Event>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        predictor: Arc<dyn Predictor + Send + Sync>,
        event_sender: Sender<Event>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("effect"),
            predictor,
            event_sender,
        }
    }

    /// Blocks until the effect is done, then posts exactly one event.
    pub fn run_effect(&self, effect: Effect) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::CheckHealth => {
                let health = self.predictor.health();
                let _ = self.event_sender.send(Event::HealthCheckDone(health));
            }
            Effect::DecodePreview {
                selection_id,
                image,
            } => {
                let result = decode_preview(&image).map_err(|err| err.to_string());
                let _ = self.event_sender.send(Event::PreviewDecodeDone {
                    selection_id,
                    result,
                });
            }
            Effect::Predict {
                submission_id,
                image,
            } => {
                let done = PredictDone::new(self.event_sender.clone(), submission_id);
                let result = self.predictor.predict(&image);
                done.send(result);
            }
            Effect::FillBarAfterDelay { submission_id } => {
                std::thread::sleep(self.config.bar_fill_delay);
                let _ = self
                    .event_sender
                    .send(Event::BarFillElapsed { submission_id });
            }
        }
    }
}

/// Posts `PredictDone` on every exit path, including a panicking predictor.
struct PredictDone {
    event_sender: Sender<Event>,
    submission_id: u64,
    sent: bool,
}

impl PredictDone {
    fn new(event_sender: Sender<Event>, submission_id: u64) -> Self {
        Self {
            event_sender,
            submission_id,
            sent: false,
        }
    }

    fn send(mut self, result: Result<Prediction, PredictError>) {
        self.sent = true;
        let _ = self.event_sender.send(Event::PredictDone {
            submission_id: self.submission_id,
            result,
        });
    }
}

impl Drop for PredictDone {
    fn drop(&mut self) {
        if !self.sent {
            let _ = self.event_sender.send(Event::PredictDone {
                submission_id: self.submission_id,
                result: Err(PredictError::Interrupted),
            });
        }
    }
}
