use crate::x::Window;
use xcb::{
    x::{EventMask, ExposeEvent, Property, PropertyNotifyEvent, ATOM_NONE, CURRENT_TIME},
    Xid,
};

/// Wakes the main loop by sending synthetic events to the bar window.
///
/// A ping is a `PropertyNotify` for the `NONE` atom, which the server never
/// generates itself, and makes the main loop re-check its plugins. A render
/// request is an `Expose` with a count of 0.
#[derive(Clone)]
pub struct Signal {
    window: Window,
}

impl Signal {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    pub fn ping(&self) {
        if self.window.handle().is_none() {
            return;
        }
        let event = PropertyNotifyEvent::new(
            self.window.handle(),
            ATOM_NONE,
            CURRENT_TIME,
            Property::NewValue,
        );
        self.window.send_event(EventMask::EXPOSURE, &event);
    }

    pub fn render(&self) {
        if self.window.handle().is_none() {
            return;
        }
        let event = ExposeEvent::new(self.window.handle(), 0, 0, 0, 0, 0);
        self.window.send_event(EventMask::EXPOSURE, &event);
    }
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signal({:?})", self.window.handle())
    }
}
