use crate::image_file::{content_type_for_path, ImageFile, Preview};
use crate::library::logger::interface::Logger;
use crate::upload_predict::controller::Controller;
use crate::view::interface::{
    DropZoneView, PreviewView, ResultView, Screen, TriggerView, View,
};
use eframe::egui;
use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];
const BAR_TRANSITION_SECS: f32 = 0.5;

/// Screen state shared between the controller (writer) and the window (reader).
#[derive(Clone, Default)]
pub struct ViewGui {
    screen: Arc<Mutex<Screen>>,
}

impl ViewGui {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> Screen {
        self.screen
            .lock()
            .map(|screen| screen.clone())
            .unwrap_or_default()
    }

    fn update(&mut self, f: impl FnOnce(&mut Screen)) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut screen = self.screen.lock().map_err(|_| "screen lock poisoned")?;
        f(&mut screen);
        Ok(())
    }
}

impl View for ViewGui {
    fn set_drop_zone(&mut self, drop_zone: DropZoneView) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|screen| screen.drop_zone = drop_zone)
    }

    fn set_preview(&mut self, preview: PreviewView) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|screen| screen.preview = preview)
    }

    fn set_trigger(&mut self, trigger: TriggerView) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|screen| screen.trigger = trigger)
    }

    fn set_result(&mut self, result: Option<ResultView>) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|screen| screen.result = result)
    }

    fn set_notification(
        &mut self,
        message: Option<String>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|screen| screen.notification = message)
    }

    fn set_server_status(&mut self, status: String) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.update(|screen| screen.server_status = status)
    }
}

pub struct Window {
    controller: Controller,
    view: ViewGui,
    logger: Arc<dyn Logger + Send + Sync>,
    preview_texture: Option<(Arc<[u8]>, egui::TextureHandle)>,
}

impl Window {
    pub fn new(controller: Controller, view: ViewGui, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            controller,
            view,
            logger: logger.with_namespace("window"),
            preview_texture: None,
        }
    }

    fn handle_file_drag(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });

        self.controller.on_drag_hover(hovering);

        // Only the first file of a multi-file drop is used.
        if let Some(file) = dropped.into_iter().next() {
            if let Some(image) = self.read_dropped(file) {
                self.controller.on_select(image);
            }
        }
    }

    fn read_dropped(&self, file: egui::DroppedFile) -> Option<ImageFile> {
        if let Some(path) = file.path {
            return self.read_path(&path);
        }
        let bytes = file.bytes?;
        let content_type = content_type_for_path(Path::new(&file.name));
        Some(ImageFile::new(file.name, content_type, bytes.to_vec()))
    }

    fn read_path(&self, path: &Path) -> Option<ImageFile> {
        match ImageFile::from_path(path) {
            Ok(image) => Some(image),
            Err(err) => {
                let _ = self
                    .logger
                    .warn(&format!("Failed to read {}: {}", path.display(), err));
                None
            }
        }
    }

    fn browse(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file();

        if let Some(image) = picked.and_then(|path| self.read_path(&path)) {
            self.controller.on_select(image);
        }
    }

    fn texture_for(&mut self, ctx: &egui::Context, preview: &Preview) -> egui::TextureHandle {
        if let Some((pixels, texture)) = &self.preview_texture {
            if Arc::ptr_eq(pixels, &preview.rgba) {
                return texture.clone();
            }
        }

        let image =
            egui::ColorImage::from_rgba_unmultiplied([preview.width, preview.height], &preview.rgba);
        let texture = ctx.load_texture("preview", image, egui::TextureOptions::LINEAR);
        self.preview_texture = Some((preview.rgba.clone(), texture.clone()));
        texture
    }
}

impl eframe::App for Window {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_file_drag(ctx);
        self.controller.pump();

        let screen = self.view.snapshot();
        let texture = match &screen.preview {
            PreviewView::Image(preview) => Some(self.texture_for(ctx, preview)),
            _ => None,
        };

        let mut browse_clicked = false;
        let mut submit_clicked = false;
        let mut dismiss_clicked = false;

        egui::TopBottomPanel::bottom("server_status").show(ctx, |ui| {
            ui.small(screen.server_status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(screen.notification.is_none(), |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Dog or Cat?");
                    ui.add_space(12.0);
                });

                browse_clicked = drop_zone(ui, &screen, texture.as_ref());

                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    submit_clicked = ui
                        .add_enabled(
                            screen.trigger.enabled,
                            egui::Button::new(screen.trigger.label.as_str())
                                .min_size(egui::vec2(200.0, 36.0)),
                        )
                        .clicked();
                });

                if let Some(result) = &screen.result {
                    ui.add_space(12.0);
                    ui.separator();
                    result_panel(ui, result);
                }
            });
        });

        if let Some(message) = &screen.notification {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message.as_str());
                    dismiss_clicked = ui.button("OK").clicked();
                });
        }

        if dismiss_clicked {
            self.controller.on_dismiss_notification();
        }
        if browse_clicked {
            self.browse();
        }
        if submit_clicked {
            self.controller.on_submit();
        }

        if self.controller.has_effects_in_flight() {
            ctx.request_repaint_after(self.controller.config().poll_rate);
        }
    }
}

/// Returns true when the zone was clicked.
fn drop_zone(ui: &mut egui::Ui, screen: &Screen, texture: Option<&egui::TextureHandle>) -> bool {
    let stroke_color = match screen.drop_zone {
        DropZoneView::Normal => egui::Color32::GRAY,
        DropZoneView::Highlighted => egui::Color32::from_rgb(0x3b, 0x82, 0xf6),
    };

    egui::Frame::none()
        .stroke(egui::Stroke::new(2.0, stroke_color))
        .rounding(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(ui.available_width(), 220.0));
            ui.vertical_centered(|ui| match (&screen.preview, texture) {
                (PreviewView::Image(_), Some(texture)) => {
                    ui.add(
                        egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                            .max_height(220.0),
                    );
                }
                (PreviewView::Unavailable(text), _) => {
                    ui.add_space(90.0);
                    ui.label(text.as_str());
                }
                _ => {
                    ui.add_space(90.0);
                    ui.label("Drop an image here or click to browse");
                }
            });
        })
        .response
        .interact(egui::Sense::click())
        .clicked()
}

fn result_panel(ui: &mut egui::Ui, result: &ResultView) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(result.icon.as_str()).size(40.0));
        ui.vertical(|ui| {
            ui.heading(result.label.as_str());
            ui.label(result.caption.as_str());
        });
    });

    let target = f32::from(result.bar_width_percent) / 100.0;
    let fill = ui.ctx().animate_value_with_time(
        ui.id().with("confidence_bar"),
        target,
        BAR_TRANSITION_SECS,
    );

    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), 12.0), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, 6.0, egui::Color32::from_gray(60));

    let mut fill_rect = rect;
    fill_rect.set_width(rect.width() * fill);
    let [r, g, b] = result.bar_color;
    ui.painter()
        .rect_filled(fill_rect, 6.0, egui::Color32::from_rgb(r, g, b));
}
