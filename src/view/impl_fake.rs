use crate::view::interface::{
    DropZoneView, PreviewView, ResultView, Screen, TriggerView, View,
};
use std::error::Error;

/// Keeps the last rendered screen in memory. Can be told to fail once.
#[derive(Default)]
pub struct ViewFake {
    pub screen: Screen,
    pub renders: usize,
    fail_next_result: bool,
}

impl ViewFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_result(&mut self) {
        self.fail_next_result = true;
    }
}

impl View for ViewFake {
    fn set_drop_zone(&mut self, drop_zone: DropZoneView) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screen.drop_zone = drop_zone;
        Ok(())
    }

    fn set_preview(&mut self, preview: PreviewView) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screen.preview = preview;
        Ok(())
    }

    fn set_trigger(&mut self, trigger: TriggerView) -> Result<(), Box<dyn Error + Send + Sync>> {
        // Every render starts with the trigger.
        self.renders += 1;
        self.screen.trigger = trigger;
        Ok(())
    }

    fn set_result(&mut self, result: Option<ResultView>) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.fail_next_result {
            self.fail_next_result = false;
            return Err("ViewFake::set_result failed".into());
        }
        self.screen.result = result;
        Ok(())
    }

    fn set_notification(
        &mut self,
        message: Option<String>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screen.notification = message;
        Ok(())
    }

    fn set_server_status(&mut self, status: String) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screen.server_status = status;
        Ok(())
    }
}
