use crate::config::Config;
use crate::image_file::{ImageFile, Preview};
use crate::predictor::interface::{Health, PredictError, Prediction};

//
// Model
//

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Model {
    pub(super) selection: Option<Selection>,
    pub(super) next_selection_id: u64,
    pub(super) next_submission_id: u64,
    pub(super) preview: ModelPreview,
    pub(super) trigger: ModelTrigger,
    pub(super) result: ModelResult,
    /// Confidence the bar is drawn at. Survives hidden results so the next
    /// fill moves from the previous width.
    pub(super) bar_confidence: f64,
    pub(super) drop_zone: ModelDropZone,
    pub(super) notification: Option<String>,
    pub(super) server: ModelServer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub id: u64,
    pub image: ImageFile,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum ModelPreview {
    #[default]
    Hidden,
    Shown {
        selection_id: u64,
        preview: Preview,
    },
    Unavailable {
        selection_id: u64,
        reason: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ModelTrigger {
    /// Nothing has been decoded yet.
    #[default]
    Disabled,
    Idle,
    Busy {
        submission_id: u64,
        selection_id: u64,
    },
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum ModelResult {
    #[default]
    Hidden,
    Shown {
        submission_id: u64,
        prediction: Prediction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ModelDropZone {
    #[default]
    Normal,
    DragOver,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ModelServer {
    #[default]
    Checking,
    Reachable(Health),
    Unreachable(String),
}

impl Model {
    pub fn selected_image(&self) -> Option<&ImageFile> {
        self.selection.as_ref().map(|selection| &selection.image)
    }

    #[allow(dead_code)]
    pub fn is_busy(&self) -> bool {
        matches!(self.trigger, ModelTrigger::Busy { .. })
    }

    pub fn can_submit(&self) -> bool {
        self.selection.is_some()
            && self.trigger == ModelTrigger::Idle
            && self.notification.is_none()
    }

    pub fn preview(&self) -> &ModelPreview {
        &self.preview
    }

    pub fn trigger(&self) -> &ModelTrigger {
        &self.trigger
    }

    pub fn result(&self) -> &ModelResult {
        &self.result
    }

    pub fn bar_confidence(&self) -> f64 {
        self.bar_confidence
    }

    pub fn drop_zone(&self) -> ModelDropZone {
        self.drop_zone
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn server(&self) -> &ModelServer {
        &self.server
    }
}

//
// Event
//

#[derive(Debug)]
pub enum Event {
    FileSelected(ImageFile),
    DragEntered,
    DragLeft,
    SubmitPressed,
    NotificationDismissed,
    PreviewDecodeDone {
        selection_id: u64,
        result: Result<Preview, String>,
    },
    PredictDone {
        submission_id: u64,
        result: Result<Prediction, PredictError>,
    },
    BarFillElapsed {
        submission_id: u64,
    },
    HealthCheckDone(Result<Health, PredictError>),
}

//
// Effect
//

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    CheckHealth,
    DecodePreview {
        selection_id: u64,
        image: ImageFile,
    },
    Predict {
        submission_id: u64,
        image: ImageFile,
    },
    FillBarAfterDelay {
        submission_id: u64,
    },
}

//
// Transition
//

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![Effect::CheckHealth])
}

pub fn transition(config: &Config, model: Model, event: Event) -> (Model, Vec<Effect>) {
    // A notification blocks every user input except its own dismissal.
    if model.notification.is_some() && is_user_input(&event) {
        return (model, vec![]);
    }

    match event {
        Event::FileSelected(image) => {
            if !image
                .content_type()
                .starts_with(&config.accepted_content_type_prefix)
            {
                return (model, vec![]);
            }

            let selection_id = model.next_selection_id;
            let model = Model {
                selection: Some(Selection {
                    id: selection_id,
                    image: image.clone(),
                }),
                next_selection_id: selection_id + 1,
                result: ModelResult::Hidden,
                ..model
            };
            (model, vec![Effect::DecodePreview { selection_id, image }])
        }

        Event::DragEntered => (
            Model {
                drop_zone: ModelDropZone::DragOver,
                ..model
            },
            vec![],
        ),

        Event::DragLeft => (
            Model {
                drop_zone: ModelDropZone::Normal,
                ..model
            },
            vec![],
        ),

        Event::PreviewDecodeDone {
            selection_id,
            result,
        } => {
            if !is_current_selection(&model, selection_id) {
                return (model, vec![]);
            }

            let preview = match result {
                Ok(preview) => ModelPreview::Shown {
                    selection_id,
                    preview,
                },
                Err(reason) => ModelPreview::Unavailable {
                    selection_id,
                    reason,
                },
            };
            let trigger = match model.trigger {
                ModelTrigger::Disabled => ModelTrigger::Idle,
                trigger => trigger,
            };
            (
                Model {
                    preview,
                    trigger,
                    result: ModelResult::Hidden,
                    ..model
                },
                vec![],
            )
        }

        Event::SubmitPressed => {
            if !model.can_submit() {
                return (model, vec![]);
            }
            let Some(selection) = model.selection.clone() else {
                return (model, vec![]);
            };

            let submission_id = model.next_submission_id;
            (
                Model {
                    next_submission_id: submission_id + 1,
                    trigger: ModelTrigger::Busy {
                        submission_id,
                        selection_id: selection.id,
                    },
                    ..model
                },
                vec![Effect::Predict {
                    submission_id,
                    image: selection.image,
                }],
            )
        }

        Event::PredictDone {
            submission_id,
            result,
        } => {
            let ModelTrigger::Busy {
                submission_id: busy_submission_id,
                selection_id,
            } = model.trigger
            else {
                return (model, vec![]);
            };
            if busy_submission_id != submission_id {
                return (model, vec![]);
            }

            let model = Model {
                trigger: ModelTrigger::Idle,
                ..model
            };

            match result {
                // The image was replaced while the request was in flight.
                Ok(_) if !is_current_selection(&model, selection_id) => (model, vec![]),
                Ok(prediction) => (
                    Model {
                        result: ModelResult::Shown {
                            submission_id,
                            prediction,
                        },
                        ..model
                    },
                    vec![Effect::FillBarAfterDelay { submission_id }],
                ),
                Err(err) => (
                    Model {
                        notification: Some(format!("Error: {}", err)),
                        ..model
                    },
                    vec![],
                ),
            }
        }

        Event::BarFillElapsed { submission_id } => {
            let filled = match &model.result {
                ModelResult::Shown {
                    submission_id: shown_submission_id,
                    prediction,
                } if *shown_submission_id == submission_id => Some(prediction.confidence),
                _ => None,
            };
            match filled {
                Some(bar_confidence) => (
                    Model {
                        bar_confidence,
                        ..model
                    },
                    vec![],
                ),
                None => (model, vec![]),
            }
        }

        Event::NotificationDismissed => (
            Model {
                notification: None,
                ..model
            },
            vec![],
        ),

        Event::HealthCheckDone(result) => {
            let server = match result {
                Ok(health) => ModelServer::Reachable(health),
                Err(err) => ModelServer::Unreachable(err.to_string()),
            };
            (Model { server, ..model }, vec![])
        }
    }
}

fn is_user_input(event: &Event) -> bool {
    matches!(
        event,
        Event::FileSelected(_) | Event::DragEntered | Event::DragLeft | Event::SubmitPressed
    )
}

fn is_current_selection(model: &Model, selection_id: u64) -> bool {
    model
        .selection
        .as_ref()
        .is_some_and(|selection| selection.id == selection_id)
}
