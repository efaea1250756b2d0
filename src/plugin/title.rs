use super::{event, Plugin};
use crate::{
    config::TitleConfig,
    x::{Display, GetProperty, Window, XcbWindow},
};
use std::{sync::Arc, time::Duration};
use xcb::x::EventMask;

const ELLIPSIS: char = '…';

/// Shortens `title` to at most `max_chars` characters, marking the cut with
/// an ellipsis. A limit of 0 disables shortening.
fn truncate(title: &str, max_chars: usize) -> String {
    if max_chars == 0 || title.chars().count() <= max_chars {
        return title.to_string();
    }
    let mut short: String = title.chars().take(max_chars - 1).collect();
    short.push(ELLIPSIS);
    short
}

/// Shows the title of the active window.
pub struct Title {
    display: Arc<Display>,
    max_chars: usize,
    active: Option<XcbWindow>,
}

impl Title {
    pub fn new(display: Arc<Display>, config: &TitleConfig) -> Self {
        Self {
            display,
            max_chars: config.max_chars,
            active: None,
        }
    }

    /// Starts watching property changes on a newly activated window so title
    /// changes reach the main loop.
    fn watch(&mut self, active: Option<XcbWindow>) {
        if active == self.active {
            return;
        }
        if let Some(window) = active {
            log::trace!("title: watching {window:?}");
            Window::from_handle(self.display.clone(), window)
                .change_event_mask(EventMask::PROPERTY_CHANGE);
        }
        self.active = active;
    }
}

impl Plugin for Title {
    fn name(&self) -> &str {
        "title"
    }

    fn interval(&self) -> Option<Duration> {
        None
    }

    fn update(&mut self) -> Option<String> {
        let display = self.display.clone();
        let active = display
            .root()
            .get_window_property(&display, display.atoms.net_active_window);
        self.watch(active);
        let title = active
            .and_then(|window| display.window_title(&window))
            .unwrap_or_default();
        Some(truncate(&title, self.max_chars))
    }

    fn event(&mut self, id: u8) -> bool {
        id == event::ROOT_PROPERTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_titles_are_unchanged() {
        assert_eq!(truncate("Terminal", 80), "Terminal");
        assert_eq!(truncate("", 3), "");
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn long_titles_are_cut() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("äöüß", 2), "ä…");
        assert_eq!(truncate("abcdef", 1), "…");
    }

    #[test]
    fn zero_disables_limit() {
        assert_eq!(truncate("abcdef", 0), "abcdef");
    }
}
