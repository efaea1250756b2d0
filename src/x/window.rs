use super::{Display, WindowAttributes, WindowBuilder, XcbWindow};
use std::sync::Arc;
use xcb::{
    x::{
        ChangeWindowAttributes, ConfigWindow, ConfigureWindow, DestroyWindow, EventMask,
        MapWindow, SendEvent, SendEventDest, StackMode,
    },
    BaseEvent, ProtocolResult, Xid,
};

#[derive(Clone)]
pub struct Window {
    handle: XcbWindow,
    display: Arc<Display>,
}

impl Window {
    pub fn from_handle(display: Arc<Display>, handle: XcbWindow) -> Self {
        Self { handle, display }
    }

    pub fn builder(display: Arc<Display>) -> WindowBuilder {
        WindowBuilder::new(display)
    }

    pub fn handle(&self) -> XcbWindow {
        self.handle
    }

    pub fn display(&self) -> &Arc<Display> {
        &self.display
    }

    pub fn destroy(&self) {
        self.display.void_request(&DestroyWindow {
            window: self.handle,
        })
    }

    pub fn map(&self) {
        self.display.void_request(&MapWindow {
            window: self.handle,
        })
    }

    pub fn change_attributes<F>(&self, f: F)
    where
        F: FnOnce(&mut WindowAttributes),
    {
        let mut attributes = WindowAttributes::new();
        f(&mut attributes);
        self.display.void_request(&ChangeWindowAttributes {
            window: self.handle,
            value_list: attributes.value_list(),
        });
    }

    /// Like `change_attributes` but waits for the server to process the request.
    pub fn try_change_attributes<F>(&self, f: F) -> ProtocolResult<()>
    where
        F: FnOnce(&mut WindowAttributes),
    {
        let mut attributes = WindowAttributes::new();
        f(&mut attributes);
        self.display.try_void_request(&ChangeWindowAttributes {
            window: self.handle,
            value_list: attributes.value_list(),
        })
    }

    pub fn change_event_mask(&self, mask: EventMask) {
        self.change_attributes(|attributes| {
            attributes.event_mask(mask);
        });
    }

    pub fn configure(&self, value_list: &mut [ConfigWindow]) {
        self.display.void_request(&ConfigureWindow {
            window: self.handle,
            value_list,
        });
    }

    pub fn try_configure(&self, value_list: &mut [ConfigWindow]) -> ProtocolResult<()> {
        self.display.try_void_request(&ConfigureWindow {
            window: self.handle,
            value_list,
        })
    }

    pub fn raise(&self) {
        self.configure(&mut [ConfigWindow::StackMode(StackMode::Above)]);
    }

    pub fn stack_above(&self, sibling: XcbWindow) -> ProtocolResult<()> {
        self.try_configure(&mut [
            ConfigWindow::Sibling(sibling),
            ConfigWindow::StackMode(StackMode::Above),
        ])
    }

    pub fn send_event<E: BaseEvent>(&self, mask: EventMask, event: &'_ E) {
        self.display.void_request(&SendEvent {
            propagate: false,
            destination: SendEventDest::Window(self.handle),
            event_mask: mask,
            event,
        });
    }
}

impl PartialEq for Window {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl PartialEq<XcbWindow> for Window {
    fn eq(&self, other: &XcbWindow) -> bool {
        self.handle == *other
    }
}

impl Xid for Window {
    fn none() -> Self {
        unimplemented!()
    }

    fn is_none(&self) -> bool {
        self.handle.is_none()
    }

    fn resource_id(&self) -> u32 {
        self.handle.resource_id()
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.handle.resource_id())
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Window({})", self.handle.resource_id())
    }
}
