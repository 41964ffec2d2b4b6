use crate::config::Config;
use crate::image_file::ImageFile;
use crate::library::logger::interface::Logger;
use crate::predictor::interface::Predictor;
use crate::upload_predict::core::{init, transition, Effect, Event, Model, ModelDropZone};
use crate::upload_predict::render::Render;
use crate::upload_predict::run_effect::RunEffect;
use crate::view::interface::View;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};

/// Owns the model and applies every transition on the caller's (UI) thread.
/// Effects run on worker threads and come back through `pump`.
pub struct Controller {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    model: Model,
    render: Render,
    run_effect: RunEffect,
    event_receiver: Receiver<Event>,
    effects_in_flight: usize,
}

impl Controller {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        predictor: Arc<dyn Predictor + Send + Sync>,
        view: Arc<Mutex<dyn View + Send>>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let logger = logger.with_namespace("controller");

        Self {
            render: Render::new(view, config.clone()),
            run_effect: RunEffect::new(config.clone(), logger.clone(), predictor, event_sender),
            config,
            logger,
            model: Model::default(),
            event_receiver,
            effects_in_flight: 0,
        }
    }

    pub fn start(&mut self) {
        let (model, effects) = init();
        self.model = model;
        self.render();
        self.spawn_effects(effects);
    }

    pub fn on_select(&mut self, file: ImageFile) {
        self.dispatch(Event::FileSelected(file));
    }

    pub fn on_submit(&mut self) {
        self.dispatch(Event::SubmitPressed);
    }

    pub fn on_drag_enter(&mut self) {
        self.dispatch(Event::DragEntered);
    }

    pub fn on_drag_leave(&mut self) {
        self.dispatch(Event::DragLeft);
    }

    /// Turns the window's per-frame hover state into enter/leave events.
    /// Nothing is sent while a notification blocks input.
    pub fn on_drag_hover(&mut self, hovering: bool) {
        if self.model.notification().is_some() {
            return;
        }
        let highlighted = self.model.drop_zone() == ModelDropZone::DragOver;
        if hovering && !highlighted {
            self.on_drag_enter();
        } else if !hovering && highlighted {
            self.on_drag_leave();
        }
    }

    pub fn on_dismiss_notification(&mut self) {
        self.dispatch(Event::NotificationDismissed);
    }

    /// Applies every effect result that has arrived so far without blocking.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.event_receiver.try_recv() {
            self.effects_in_flight = self.effects_in_flight.saturating_sub(1);
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    /// Waits for outstanding effects (and the ones they trigger) to finish.
    /// Returns false if `timeout` elapsed first.
    #[cfg(test)]
    pub fn pump_until_settled(&mut self, timeout: std::time::Duration) -> bool {
        let deadline = std::time::Instant::now() + timeout;
        while self.effects_in_flight > 0 {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.event_receiver.recv_timeout(remaining) {
                Ok(event) => {
                    self.effects_in_flight -= 1;
                    self.dispatch(event);
                }
                Err(_) => return false,
            }
        }
        true
    }

    pub fn has_effects_in_flight(&self) -> bool {
        self.effects_in_flight > 0
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    #[allow(dead_code)]
    pub fn selected_image(&self) -> Option<&ImageFile> {
        self.model.selected_image()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn dispatch(&mut self, event: Event) {
        let _ = self.logger.info(&format!("Event: {:?}", event));

        let (model, effects) = transition(&self.config, std::mem::take(&mut self.model), event);
        self.model = model;

        self.render();
        self.spawn_effects(effects);
    }

    fn render(&self) {
        if let Err(err) = self.render.render(&self.model) {
            let _ = self.logger.warn(&format!("Render failed: {}", err));
        }
    }

    fn spawn_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.effects_in_flight += 1;
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }
}
