use crate::config::Config;
use crate::predictor::interface::Prediction;
use crate::upload_predict::core::{
    Model, ModelDropZone, ModelPreview, ModelResult, ModelServer, ModelTrigger,
};
use crate::view::interface::{
    DropZoneView, PreviewView, ResultIcon, ResultView, TriggerView, View,
};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Render {
    view: Arc<Mutex<dyn View + Send>>,
    config: Config,
}

impl Render {
    pub fn new(view: Arc<Mutex<dyn View + Send>>, config: Config) -> Self {
        Self { view, config }
    }

    pub fn render(&self, model: &Model) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut view = self.view.lock().map_err(|_| "view lock poisoned")?;

        // Trigger first so a failing panel never leaves the button stuck busy.
        view.set_trigger(trigger_view(&self.config, model.trigger()))?;

        view.set_drop_zone(match model.drop_zone() {
            ModelDropZone::Normal => DropZoneView::Normal,
            ModelDropZone::DragOver => DropZoneView::Highlighted,
        })?;

        view.set_preview(match model.preview() {
            ModelPreview::Hidden => PreviewView::Prompt,
            ModelPreview::Shown { preview, .. } => PreviewView::Image(preview.clone()),
            ModelPreview::Unavailable { reason, .. } => {
                PreviewView::Unavailable(format!("Preview unavailable: {}", reason))
            }
        })?;

        view.set_result(match model.result() {
            ModelResult::Hidden => None,
            ModelResult::Shown { prediction, .. } => Some(result_view(
                &self.config,
                prediction,
                model.bar_confidence(),
            )),
        })?;

        view.set_notification(model.notification().map(str::to_string))?;

        view.set_server_status(server_status(model.server()))?;

        Ok(())
    }
}

pub fn trigger_view(config: &Config, trigger: &ModelTrigger) -> TriggerView {
    match trigger {
        ModelTrigger::Disabled => TriggerView {
            label: config.idle_trigger_label.clone(),
            enabled: false,
        },
        ModelTrigger::Idle => TriggerView {
            label: config.idle_trigger_label.clone(),
            enabled: true,
        },
        ModelTrigger::Busy { .. } => TriggerView {
            label: config.busy_trigger_label.clone(),
            enabled: false,
        },
    }
}

/// `round(confidence * 100)`, kept inside the bar track.
pub fn percentage(confidence: f64) -> u8 {
    (confidence * 100.0).round().clamp(0.0, 100.0) as u8
}

/// `bar_confidence` is what the bar currently shows, which lags the prediction
/// until the fill delay has elapsed.
pub fn result_view(config: &Config, prediction: &Prediction, bar_confidence: f64) -> ResultView {
    let confidence = percentage(prediction.confidence);
    let (icon, bar_color) = if prediction.label == config.dog_label {
        (ResultIcon::Dog, config.dog_color)
    } else {
        (ResultIcon::Cat, config.cat_color)
    };

    ResultView {
        icon,
        label: prediction.label.clone(),
        caption: format!("Confidence: {}%", confidence),
        bar_width_percent: percentage(bar_confidence),
        bar_color,
    }
}

fn server_status(server: &ModelServer) -> String {
    match server {
        ModelServer::Checking => "Checking server...".to_string(),
        ModelServer::Reachable(health) if health.model_loaded => {
            format!("Server {}", health.status)
        }
        ModelServer::Reachable(health) => format!("Server {} (model not loaded)", health.status),
        ModelServer::Unreachable(reason) => format!("Server unreachable: {}", reason),
    }
}
