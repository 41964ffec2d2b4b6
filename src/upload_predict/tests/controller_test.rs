use super::fixture::{prediction, Fixture};
use crate::image_file::{fixture::png_file, ImageFile};
use crate::predictor::interface::PredictError;
use crate::view::interface::{DropZoneView, PreviewView, ResultIcon, TriggerView};

fn idle_trigger() -> TriggerView {
    TriggerView {
        label: "Analyze Image".to_string(),
        enabled: true,
    }
}

fn select_and_decode(f: &mut Fixture, file: ImageFile) {
    f.controller.on_select(file);
    f.settle();
}

#[test]
fn test_start_renders_disabled_trigger_and_health() {
    let mut f = Fixture::new();

    let screen = f.screen();
    assert_eq!(screen.preview, PreviewView::Prompt);
    assert!(!screen.trigger.enabled);
    assert_eq!(screen.server_status, "Checking server...");

    f.settle();
    assert_eq!(f.screen().server_status, "Server healthy");
}

#[test]
fn test_non_image_leaves_screen_unchanged() {
    let mut f = Fixture::new();
    f.settle();
    let before = f.screen();

    f.controller
        .on_select(ImageFile::new("notes.txt", "text/plain", b"hello".to_vec()));

    assert!(!f.controller.has_effects_in_flight());
    assert!(f.controller.selected_image().is_none());
    assert_eq!(f.screen(), before);
}

#[test]
fn test_select_shows_preview_and_enables_trigger() {
    let mut f = Fixture::new();

    select_and_decode(&mut f, png_file("dog.png"));

    let screen = f.screen();
    assert!(matches!(
        screen.preview,
        PreviewView::Image(ref preview) if preview.width == 4 && preview.height == 3
    ));
    assert_eq!(screen.trigger, idle_trigger());
    assert_eq!(screen.result, None);
    assert_eq!(f.controller.selected_image(), Some(&png_file("dog.png")));
}

#[test]
fn test_undecodable_image_shows_unavailable_preview() {
    let mut f = Fixture::new();

    select_and_decode(
        &mut f,
        ImageFile::new("broken.jpg", "image/jpeg", vec![0, 1, 2, 3]),
    );

    let screen = f.screen();
    assert!(matches!(
        screen.preview,
        PreviewView::Unavailable(ref text) if text.starts_with("Preview unavailable: ")
    ));
    assert_eq!(screen.trigger, idle_trigger());
}

#[test]
fn test_submit_without_image_sends_nothing() {
    let mut f = Fixture::new();
    f.settle();

    f.controller.on_submit();
    f.settle();

    assert!(f.predictor.requests().is_empty());
    assert!(!f.screen().trigger.enabled);
}

#[test]
fn test_dog_prediction_end_to_end() {
    let mut f = Fixture::new();
    f.predictor.respond_with(Ok(prediction("Dog", 0.87)));
    select_and_decode(&mut f, png_file("dog.png"));

    f.controller.on_submit();
    let busy = f.screen().trigger;
    assert_eq!(
        busy,
        TriggerView {
            label: "Analyzing...".to_string(),
            enabled: false,
        }
    );
    f.settle();

    let result = f.screen().result.expect("result shown");
    assert_eq!(result.icon, ResultIcon::Dog);
    assert_eq!(result.label, "Dog");
    assert_eq!(result.caption, "Confidence: 87%");
    assert_eq!(result.bar_width_percent, 87);
    assert_eq!(result.bar_color, f.config.dog_color);
    assert_eq!(f.screen().trigger, idle_trigger());
    assert_eq!(f.predictor.requests(), vec![png_file("dog.png")]);
}

#[test]
fn test_cat_prediction_end_to_end() {
    let mut f = Fixture::new();
    f.predictor.respond_with(Ok(prediction("Cat", 0.42)));
    select_and_decode(&mut f, png_file("cat.png"));

    f.controller.on_submit();
    f.settle();

    let result = f.screen().result.expect("result shown");
    assert_eq!(result.icon, ResultIcon::Cat);
    assert_eq!(result.caption, "Confidence: 42%");
    assert_eq!(result.bar_width_percent, 42);
    assert_eq!(result.bar_color, f.config.cat_color);
}

#[test]
fn test_double_submit_sends_one_request() {
    let mut f = Fixture::new();
    f.predictor.respond_with(Ok(prediction("Dog", 0.9)));
    f.predictor.respond_with(Ok(prediction("Dog", 0.1)));
    select_and_decode(&mut f, png_file("dog.png"));

    f.controller.on_submit();
    f.controller.on_submit();
    f.settle();

    assert_eq!(f.predictor.requests().len(), 1);
    assert_eq!(
        f.screen().result.map(|result| result.caption),
        Some("Confidence: 90%".to_string())
    );
}

#[test]
fn test_failure_notifies_and_keeps_previous_result() {
    let mut f = Fixture::new();
    f.predictor.respond_with(Ok(prediction("Dog", 0.87)));
    f.predictor.respond_with(Err(PredictError::Status(500)));
    select_and_decode(&mut f, png_file("dog.png"));
    f.controller.on_submit();
    f.settle();
    let before = f.screen();

    f.controller.on_submit();
    f.settle();

    let screen = f.screen();
    assert_eq!(
        screen.notification.as_deref(),
        Some("Error: Prediction failed (HTTP 500)")
    );
    assert_eq!(screen.trigger, idle_trigger());
    assert_eq!(screen.result, before.result);
    assert_eq!(screen.preview, before.preview);

    f.controller.on_dismiss_notification();
    assert_eq!(f.screen().notification, None);
}

#[test]
fn test_new_selection_hides_result() {
    let mut f = Fixture::new();
    f.predictor.respond_with(Ok(prediction("Dog", 0.87)));
    select_and_decode(&mut f, png_file("dog.png"));
    f.controller.on_submit();
    f.settle();
    assert!(f.screen().result.is_some());

    f.controller.on_select(png_file("cat.png"));
    assert_eq!(f.screen().result, None);
    f.settle();

    let screen = f.screen();
    assert_eq!(screen.result, None);
    assert_eq!(screen.trigger, idle_trigger());
}

#[test]
fn test_render_failure_still_restores_trigger() {
    let mut f = Fixture::new();
    f.predictor.respond_with(Ok(prediction("Dog", 0.87)));
    select_and_decode(&mut f, png_file("dog.png"));
    f.controller.on_submit();

    f.view.lock().unwrap().fail_next_result();
    f.settle();

    assert_eq!(f.screen().trigger, idle_trigger());
    assert!(!f.controller.model().is_busy());
}

#[test]
fn test_drag_highlights_drop_zone() {
    let mut f = Fixture::new();

    f.controller.on_drag_enter();
    assert_eq!(f.screen().drop_zone, DropZoneView::Highlighted);

    f.controller.on_drag_leave();
    assert_eq!(f.screen().drop_zone, DropZoneView::Normal);
    assert!(f.controller.selected_image().is_none());
}

#[test]
fn test_drag_hover_sends_only_changes() {
    let mut f = Fixture::new();
    let renders = f.view.lock().unwrap().renders;

    f.controller.on_drag_hover(true);
    f.controller.on_drag_hover(true);
    assert_eq!(f.screen().drop_zone, DropZoneView::Highlighted);

    f.controller.on_drag_hover(false);
    f.controller.on_drag_hover(false);
    assert_eq!(f.screen().drop_zone, DropZoneView::Normal);

    assert_eq!(f.view.lock().unwrap().renders, renders + 2);
}

#[test]
fn test_drag_hover_is_quiet_while_notification_is_open() {
    let mut f = Fixture::new();
    f.predictor.respond_with(Err(PredictError::Status(500)));
    select_and_decode(&mut f, png_file("dog.png"));
    f.controller.on_submit();
    f.settle();
    assert!(f.screen().notification.is_some());
    let renders = f.view.lock().unwrap().renders;

    for _ in 0..3 {
        f.controller.on_drag_hover(true);
    }

    assert_eq!(f.view.lock().unwrap().renders, renders);
    assert_eq!(f.screen().drop_zone, DropZoneView::Normal);
}
