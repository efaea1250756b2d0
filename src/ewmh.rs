use crate::{
    bar::Position,
    rectangle::Rectangle,
    x::{Display, GetProperty, PropertyValue, SetProperty, Window, XcbWindow},
};
use xcb::x::Atom;

/// `_NET_WM_DESKTOP` value for windows that should appear on all desktops.
pub const ALL_DESKTOPS: u32 = 0xFFFFFFFF;

/// Name of the window i3 uses as parent for all its containers.
const I3_ROOT_NAME: &str = "i3";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WindowType {
    Dock,
}

impl WindowType {
    fn into_atom(self, display: &Display) -> Atom {
        match self {
            Self::Dock => display.atoms.net_wm_window_type_dock,
        }
    }
}

pub fn set_window_type(window: &Window, window_type: WindowType) {
    let display = window.display();
    window.set_property(
        display,
        display.atoms.net_wm_window_type,
        PropertyValue::Atom(window_type.into_atom(display)),
    );
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WindowState {
    Sticky,
    Above,
}

impl WindowState {
    fn into_atom(self, display: &Display) -> Atom {
        match self {
            Self::Sticky => display.atoms.net_wm_state_sticky,
            Self::Above => display.atoms.net_wm_state_above,
        }
    }
}

/// Sets `_NET_WM_STATE` to exactly the given states.
pub fn set_wm_state(window: &Window, states: &[WindowState]) {
    let display = window.display();
    let atoms = states.iter().map(|s| s.into_atom(display)).collect();
    window.set_property(
        display,
        display.atoms.net_wm_state,
        PropertyValue::AtomList(atoms),
    );
}

pub fn set_wm_desktop(window: &Window, desktop: u32) {
    let display = window.display();
    window.set_property(
        display,
        display.atoms.net_wm_desktop,
        PropertyValue::Cardinal(desktop),
    );
}

/// Reserved space at the screen edges, in the layout of `_NET_WM_STRUT_PARTIAL`.
/// The start/end values are inclusive screen coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Strut {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
    pub left_start_y: u32,
    pub left_end_y: u32,
    pub right_start_y: u32,
    pub right_end_y: u32,
    pub top_start_x: u32,
    pub top_end_x: u32,
    pub bottom_start_x: u32,
    pub bottom_end_x: u32,
}

impl Strut {
    /// Computes the strut for a bar with the given geometry on a screen of the
    /// given height.
    pub fn for_bar(position: Position, bar: &Rectangle, screen_height: u16) -> Self {
        let start_x = bar.x.max(0) as u32;
        let end_x = (start_x + bar.width as u32).saturating_sub(1);
        match position {
            Position::Top => Self {
                top: bar.bottom_edge().max(0) as u32,
                top_start_x: start_x,
                top_end_x: end_x,
                ..Self::default()
            },
            Position::Bottom => Self {
                bottom: (screen_height as i32 - bar.y as i32).max(0) as u32,
                bottom_start_x: start_x,
                bottom_end_x: end_x,
                ..Self::default()
            },
        }
    }

    /// Values for `_NET_WM_STRUT`.
    pub fn simple(&self) -> Vec<u32> {
        vec![self.left, self.right, self.top, self.bottom]
    }

    /// Values for `_NET_WM_STRUT_PARTIAL`.
    pub fn partial(&self) -> Vec<u32> {
        vec![
            self.left,
            self.right,
            self.top,
            self.bottom,
            self.left_start_y,
            self.left_end_y,
            self.right_start_y,
            self.right_end_y,
            self.top_start_x,
            self.top_end_x,
            self.bottom_start_x,
            self.bottom_end_x,
        ]
    }
}

/// Sets both `_NET_WM_STRUT` and `_NET_WM_STRUT_PARTIAL`.
pub fn set_strut(window: &Window, strut: &Strut) {
    let display = window.display();
    window.set_property(
        display,
        display.atoms.net_wm_strut,
        PropertyValue::CardinalList(strut.simple()),
    );
    window.set_property(
        display,
        display.atoms.net_wm_strut_partial,
        PropertyValue::CardinalList(strut.partial()),
    );
}

pub fn is_i3_root_name(name: &str) -> bool {
    name == I3_ROOT_NAME
}

/// Finds the window i3 keeps all managed windows in by looking for a child of
/// the root window named "i3".
pub fn find_i3_root(display: &Display) -> Option<XcbWindow> {
    let children = match display.query_children(display.root()) {
        Ok(children) => children,
        Err(error) => {
            log::warn!("Could not query root window children: {error}");
            return None;
        }
    };
    let found = children.into_iter().find(|child| {
        child
            .get_string_property(display, display.atoms.net_wm_name)
            .map_or(false, |name| is_i3_root_name(&name))
    });
    match found {
        Some(window) => log::debug!("Found i3 root: {window:?}"),
        None => log::debug!("No i3 root window found"),
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_strut_reserves_bar_height() {
        let bar = Rectangle::new(0, 0, 1920, 24);
        let strut = Strut::for_bar(Position::Top, &bar, 1080);
        assert_eq!(strut.simple(), vec![0, 0, 24, 0]);
        assert_eq!(strut.top_start_x, 0);
        assert_eq!(strut.top_end_x, 1919);
        assert_eq!(strut.bottom_start_x, 0);
        assert_eq!(strut.bottom_end_x, 0);
    }

    #[test]
    fn bottom_strut_is_measured_from_screen_bottom() {
        let bar = Rectangle::new(1920, 1056, 1280, 24);
        let strut = Strut::for_bar(Position::Bottom, &bar, 1080);
        assert_eq!(strut.simple(), vec![0, 0, 0, 24]);
        assert_eq!(strut.bottom_start_x, 1920);
        assert_eq!(strut.bottom_end_x, 3199);
    }

    #[test]
    fn strut_on_lower_monitor_covers_space_above() {
        // Top bar on a monitor below another one.
        let bar = Rectangle::new(0, 1080, 1920, 30);
        let strut = Strut::for_bar(Position::Top, &bar, 2160);
        assert_eq!(strut.top, 1110);
    }

    #[test]
    fn partial_strut_layout() {
        let bar = Rectangle::new(10, 0, 100, 20);
        let partial = Strut::for_bar(Position::Top, &bar, 500).partial();
        assert_eq!(partial.len(), 12);
        assert_eq!(partial, vec![0, 0, 20, 0, 0, 0, 0, 0, 10, 109, 0, 0]);
    }

    #[test]
    fn zero_width_bar_does_not_underflow() {
        let bar = Rectangle::new(0, 0, 0, 20);
        let strut = Strut::for_bar(Position::Top, &bar, 500);
        assert_eq!(strut.top_end_x, 0);
    }

    #[test]
    fn i3_root_name_must_match_exactly() {
        assert!(is_i3_root_name("i3"));
        assert!(!is_i3_root_name("i"));
        assert!(!is_i3_root_name("i3bar"));
        assert!(!is_i3_root_name(""));
    }
}
