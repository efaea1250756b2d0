use super::{Display, Visual, Window, WindowAttributes, XcbWindow};
use crate::error::OrFatal;
use std::sync::Arc;
use xcb::x::{CreateWindow, Visualid, WindowClass, COPY_FROM_PARENT};

pub struct WindowBuilder {
    display: Arc<Display>,
    depth: u8,
    parent: XcbWindow,
    x: i16,
    y: i16,
    width: u16,
    height: u16,
    border_width: u16,
    class: WindowClass,
    visual: Visualid,
    attributes: WindowAttributes,
}

impl WindowBuilder {
    pub fn new(display: Arc<Display>) -> Self {
        let parent = display.root();
        Self {
            display,
            depth: COPY_FROM_PARENT as u8,
            parent,
            x: 0,
            y: 0,
            width: 1,
            height: 1,
            border_width: 0,
            class: WindowClass::InputOutput,
            visual: COPY_FROM_PARENT,
            attributes: WindowAttributes::new(),
        }
    }

    pub fn geometry(mut self, rect: impl Into<(i16, i16, u16, u16)>) -> Self {
        (self.x, self.y, self.width, self.height) = rect.into();
        self
    }

    /// Sets depth, visual, and colormap.
    pub fn visual_info(mut self, vi: &Visual) -> Self {
        self.depth = vi.depth;
        self.visual = vi.id;
        self.attributes.colormap(vi.colormap);
        self
    }

    pub fn attributes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut WindowAttributes),
    {
        f(&mut self.attributes);
        self
    }

    /// Creates the window. Failing to create a window is fatal.
    pub fn build(mut self) -> Window {
        let wid = self.display.connection.generate_id();
        let value_list = self.attributes.value_list();
        self.display
            .try_void_request(&CreateWindow {
                depth: self.depth,
                wid,
                parent: self.parent,
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                border_width: self.border_width,
                class: self.class,
                visual: self.visual,
                value_list,
            })
            .or_fatal();
        Window::from_handle(self.display, wid)
    }
}
