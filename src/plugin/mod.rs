mod clock;
mod command;
mod text;
mod thread;
mod title;

pub use thread::PluginThread;

use crate::{cfg::parse::most_similar, config::Config, x::Display};
use std::{sync::Arc, time::Duration};

/// Event IDs delivered to plugins.
pub mod event {
    pub const BUTTON_LEFT: u8 = 1;
    pub const BUTTON_MIDDLE: u8 = 2;
    pub const BUTTON_RIGHT: u8 = 3;
    pub const SCROLL_UP: u8 = 4;
    pub const SCROLL_DOWN: u8 = 5;
    /// The active window or the title of a window changed.
    pub const ROOT_PROPERTY: u8 = 32;

    pub fn is_button(id: u8) -> bool {
        (BUTTON_LEFT..=SCROLL_DOWN).contains(&id)
    }
}

/// A source of text for one segment of the bar. Plugins run on their own
/// thread.
pub trait Plugin: Send {
    fn name(&self) -> &str;

    /// Time between updates, `None` to only update on events.
    fn interval(&self) -> Option<Duration>;

    /// Produces the current text, or `None` if it should stay unchanged.
    fn update(&mut self) -> Option<String>;

    /// Handles an event, see the `event` module. Returns whether the plugin
    /// needs an `update` because of it.
    fn event(&mut self, _id: u8) -> bool {
        false
    }
}

const PLUGIN_NAMES: &[&str] = &["clock", "command", "text", "title"];

/// Creates the plugin with the given name.
pub fn create(name: &str, config: &Config, display: &Arc<Display>) -> Option<Box<dyn Plugin>> {
    match name {
        "clock" => Some(Box::new(clock::Clock::new(&config.clock))),
        "command" => Some(Box::new(command::Command::new(&config.command))),
        "text" => Some(Box::new(text::Text::new(&config.text))),
        "title" => Some(Box::new(title::Title::new(display.clone(), &config.title))),
        _ => {
            match most_similar(name, PLUGIN_NAMES.iter().cloned()) {
                Some(similar) => {
                    log::error!("Unknown plugin: '{name}' (did you mean '{similar}'?)")
                }
                None => log::error!("Unknown plugin: '{name}'"),
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_ids() {
        assert!(event::is_button(event::BUTTON_LEFT));
        assert!(event::is_button(event::SCROLL_DOWN));
        assert!(!event::is_button(0));
        assert!(!event::is_button(event::ROOT_PROPERTY));
    }
}
