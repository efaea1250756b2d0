use super::{event, Plugin};
use crate::config::ClockConfig;
use chrono::{DateTime, Local, TimeZone};
use std::{fmt::Write, time::Duration};

/// Formats `time`, returning `None` for an invalid format string.
fn format_time<Tz: TimeZone>(time: &DateTime<Tz>, format: &str) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let mut text = String::new();
    write!(text, "{}", time.format(format)).ok()?;
    Some(text)
}

pub struct Clock {
    format: String,
    alt_format: String,
    show_alt: bool,
    interval: Duration,
}

impl Clock {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            format: config.format.clone(),
            alt_format: config.alt_format.clone(),
            show_alt: false,
            interval: Duration::from_millis(config.interval.max(1)),
        }
    }

    fn current_format(&self) -> &str {
        if self.show_alt {
            &self.alt_format
        } else {
            &self.format
        }
    }
}

impl Plugin for Clock {
    fn name(&self) -> &str {
        "clock"
    }

    fn interval(&self) -> Option<Duration> {
        Some(self.interval)
    }

    fn update(&mut self) -> Option<String> {
        let text = format_time(&Local::now(), self.current_format());
        if text.is_none() {
            log::error!("clock: invalid format: '{}'", self.current_format());
        }
        text
    }

    fn event(&mut self, id: u8) -> bool {
        if id == event::BUTTON_LEFT {
            self.show_alt = !self.show_alt;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn formats_time() {
        let time = Utc.with_ymd_and_hms(2021, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(format_time(&time, "%H:%M").as_deref(), Some("09:05"));
        assert_eq!(
            format_time(&time, "%a %b %e %Y").as_deref(),
            Some("Sun Mar  7 2021")
        );
    }

    #[test]
    fn invalid_format_is_none() {
        let time = Utc.with_ymd_and_hms(2021, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(format_time(&time, "%Q"), None);
    }

    #[test]
    fn left_click_toggles_format() {
        let mut clock = Clock::new(&ClockConfig::default());
        assert_eq!(clock.current_format(), "%H:%M");
        assert!(clock.event(event::BUTTON_LEFT));
        assert_eq!(clock.current_format(), "%a %b %e %Y");
        assert!(!clock.event(event::BUTTON_RIGHT));
        assert_eq!(clock.current_format(), "%a %b %e %Y");
        clock.event(event::BUTTON_LEFT);
        assert_eq!(clock.current_format(), "%H:%M");
        assert_eq!(clock.interval(), Some(Duration::from_millis(1000)));
    }
}
