use crate::library::logger::interface::{Logger, LoggerResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: chrono::FixedOffset,
}

impl LoggerConsole {
    pub fn new(timezone: chrono::FixedOffset) -> Self {
        Self {
            namespace: None,
            timezone,
        }
    }

    fn format_line(&self, at: DateTime<Utc>, level: &str, message: &str) -> String {
        let local_time = at.with_timezone(&self.timezone);
        let formatted = local_time.format("%Y-%m-%d %H:%M:%S%.3f");
        match &self.namespace {
            Some(namespace) => format!("[{}] {} {}: {}", formatted, level, namespace, message),
            None => format!("[{}] {} {}", formatted, level, message),
        }
    }
}

impl Logger for LoggerConsole {
    fn info(&self, message: &str) -> LoggerResult {
        println!("{}", self.format_line(Utc::now(), "INFO", message));
        Ok(())
    }

    fn warn(&self, message: &str) -> LoggerResult {
        eprintln!("{}", self.format_line(Utc::now(), "WARN", message));
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerConsole {
            namespace: Some(new_namespace),
            timezone: self.timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_line_without_namespace() {
        let logger = LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap());
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 13, 5, 9).unwrap();

        assert_eq!(
            logger.format_line(at, "INFO", "hello"),
            "[2024-03-01 13:05:09.000] INFO hello"
        );
    }

    #[test]
    fn test_format_line_nested_namespace() {
        let logger = LoggerConsole {
            namespace: Some("controller:effect".to_string()),
            timezone: chrono::FixedOffset::west_opt(7 * 3600).unwrap(),
        };
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 13, 5, 9).unwrap();

        assert_eq!(
            logger.format_line(at, "WARN", "predict"),
            "[2024-03-01 06:05:09.000] WARN controller:effect: predict"
        );
    }
}
