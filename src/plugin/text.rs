use super::Plugin;
use crate::config::TextConfig;
use std::time::Duration;

/// Shows a fixed text.
pub struct Text {
    text: String,
}

impl Text {
    pub fn new(config: &TextConfig) -> Self {
        Self {
            text: config.text.clone(),
        }
    }
}

impl Plugin for Text {
    fn name(&self) -> &str {
        "text"
    }

    fn interval(&self) -> Option<Duration> {
        None
    }

    fn update(&mut self) -> Option<String> {
        Some(self.text.clone())
    }
}
