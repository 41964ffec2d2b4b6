use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub predict_url: String,
    pub health_url: String,
    /// `None` waits on the prediction server for as long as it takes.
    pub predict_timeout: Option<Duration>,
    pub health_timeout: Duration,
    pub accepted_content_type_prefix: String,
    pub bar_fill_delay: Duration,
    pub poll_rate: Duration,
    pub idle_trigger_label: String,
    pub busy_trigger_label: String,
    pub dog_label: String,
    pub dog_color: [u8; 3],
    pub cat_color: [u8; 3],
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predict_url: "http://localhost:8000/predict".to_string(),
            health_url: "http://localhost:8000/health".to_string(),
            predict_timeout: None,
            health_timeout: Duration::from_secs(3),
            accepted_content_type_prefix: "image/".to_string(),
            bar_fill_delay: Duration::from_millis(100),
            poll_rate: Duration::from_millis(50),
            idle_trigger_label: "Analyze Image".to_string(),
            busy_trigger_label: "Analyzing...".to_string(),
            dog_label: "Dog".to_string(),
            dog_color: [0x3b, 0x82, 0xf6],
            cat_color: [0xf4, 0x3f, 0x5e],
            logger_timezone: local_timezone(),
        }
    }
}

fn local_timezone() -> chrono::FixedOffset {
    *chrono::Local::now().offset()
}
