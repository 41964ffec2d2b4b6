use crate::image_file::Preview;
use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropZoneView {
    #[default]
    Normal,
    Highlighted,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewView {
    /// No image yet: the upload prompt is visible.
    #[default]
    Prompt,
    Image(Preview),
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriggerView {
    pub label: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultIcon {
    Dog,
    Cat,
}

impl ResultIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultIcon::Dog => "🐶",
            ResultIcon::Cat => "🐱",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub icon: ResultIcon,
    pub label: String,
    pub caption: String,
    /// Target width of the confidence bar in percent of the track.
    pub bar_width_percent: u8,
    pub bar_color: [u8; 3],
}

/// Everything the window shows, independent of the toolkit drawing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    pub drop_zone: DropZoneView,
    pub preview: PreviewView,
    pub trigger: TriggerView,
    pub result: Option<ResultView>,
    pub notification: Option<String>,
    pub server_status: String,
}

pub trait View: Send {
    fn set_drop_zone(&mut self, drop_zone: DropZoneView) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn set_preview(&mut self, preview: PreviewView) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn set_trigger(&mut self, trigger: TriggerView) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// `None` hides the result panel.
    fn set_result(&mut self, result: Option<ResultView>) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// `Some` shows a blocking notification until the user dismisses it.
    fn set_notification(
        &mut self,
        message: Option<String>,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn set_server_status(&mut self, status: String) -> Result<(), Box<dyn Error + Send + Sync>>;
}
