use config::Config;
use eframe::egui;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use predictor::impl_http::PredictorHttp;
use std::sync::{Arc, Mutex};
use upload_predict::controller::Controller;
use view::impl_gui::{ViewGui, Window};

mod config;
mod image_file;
mod library;
mod predictor;
mod upload_predict;
mod view;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let predictor = Arc::new(PredictorHttp::new(&config, logger.clone())?);

    let view = ViewGui::new();

    let mut controller = Controller::new(
        config,
        logger.clone(),
        predictor,
        Arc::new(Mutex::new(view.clone())),
    );

    controller.start();

    let window = Window::new(controller, view, logger);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 640.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native("Dog or Cat?", options, Box::new(|_cc| Box::new(window)))?;

    Ok(())
}
