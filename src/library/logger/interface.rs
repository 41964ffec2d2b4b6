use std::sync::Arc;

pub type LoggerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Namespaced line logger shared by every component.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str) -> LoggerResult;

    /// Something failed but the UI carries on.
    fn warn(&self, message: &str) -> LoggerResult;

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync>;
}
