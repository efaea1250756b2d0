use super::{Display, XcbWindow};
use xcb::{
    x::{
        Atom, ChangeProperty, GetPropertyReply, PropMode, ATOM_ANY, ATOM_ATOM,
        ATOM_CARDINAL, ATOM_NONE, ATOM_STRING, ATOM_WINDOW,
    },
    Xid, XidNew,
};

xcb::atoms_struct! {
    #[derive(Clone, Debug)]
    pub struct Atoms {
        pub net_active_window => b"_NET_ACTIVE_WINDOW" only_if_exists = false,
        pub net_wm_desktop => b"_NET_WM_DESKTOP" only_if_exists = false,
        pub net_wm_name => b"_NET_WM_NAME" only_if_exists = false,
        pub net_wm_state => b"_NET_WM_STATE" only_if_exists = false,
        pub net_wm_state_above => b"_NET_WM_STATE_ABOVE" only_if_exists = false,
        pub net_wm_state_sticky => b"_NET_WM_STATE_STICKY" only_if_exists = false,
        pub net_wm_strut => b"_NET_WM_STRUT" only_if_exists = false,
        pub net_wm_strut_partial => b"_NET_WM_STRUT_PARTIAL" only_if_exists = false,
        pub net_wm_window_type => b"_NET_WM_WINDOW_TYPE" only_if_exists = false,
        pub net_wm_window_type_dock => b"_NET_WM_WINDOW_TYPE_DOCK" only_if_exists = false,

        pub utf8_string => b"UTF8_STRING" only_if_exists = false,
    }
}

/// Property types.
#[derive(Clone, Debug)]
pub enum PropertyValue {
    Atom(Atom),
    AtomList(Vec<Atom>),
    Cardinal(u32),
    CardinalList(Vec<u32>),
    /// Properties of type `UTF8_STRING`
    String(String),
}

impl PropertyValue {
    /// Get the type atom for the value.
    fn r#type(&self, display: &Display) -> Atom {
        match self {
            Self::Atom(_) => ATOM_ATOM,
            Self::AtomList(_) => ATOM_ATOM,
            Self::Cardinal(_) => ATOM_CARDINAL,
            Self::CardinalList(_) => ATOM_CARDINAL,
            Self::String(_) => display.atoms.utf8_string,
        }
    }

    /// Changes a windows property to this value, consuming the value.
    fn change(self, display: &Display, window: XcbWindow, property: Atom, mode: PropMode) {
        let r#type = self.r#type(display);
        macro_rules! make_request {
            ($data:expr) => {
                display.void_request(&ChangeProperty {
                    mode,
                    window,
                    property,
                    r#type,
                    data: $data,
                })
            };
        }
        match self {
            Self::Atom(atom) => make_request!(&[atom]),
            Self::AtomList(atoms) => make_request!(atoms.as_slice()),
            Self::Cardinal(cardinal) => make_request!(&[cardinal]),
            Self::CardinalList(cardinals) => make_request!(cardinals.as_slice()),
            Self::String(string) => make_request!(string.as_bytes()),
        }
    }
}

pub trait GetProperty {
    /// Returns the window to use in the request.
    fn window(&self) -> XcbWindow;

    /// Makes a `GetProperty` request with all arguments.
    fn get_property_full(
        &self,
        display: &Display,
        delete: bool,
        property: Atom,
        r#type: Atom,
        long_offset: u32,
        long_length: u32,
    ) -> xcb::Result<GetPropertyReply> {
        display.request_with_reply(&xcb::x::GetProperty {
            delete,
            window: self.window(),
            property,
            r#type,
            long_offset,
            long_length,
        })
    }

    /// Makes a `GetProperty` request with some arguments set to a default value.
    fn get_property(
        &self,
        display: &Display,
        property: Atom,
        r#type: Atom,
    ) -> xcb::Result<GetPropertyReply> {
        // The length passed to the request is just an upper bound.
        const MAX_LENGTH: u32 = 0x1FFFFFFF;
        self.get_property_full(display, false, property, r#type, 0, MAX_LENGTH)
    }

    fn get_string_property(&self, display: &Display, property: Atom) -> Option<String> {
        let reply = self.get_property(display, property, ATOM_ANY).ok()?;
        let real_type = reply.r#type();
        if real_type == ATOM_NONE {
            return None;
        }
        if real_type != ATOM_STRING && real_type != display.atoms.utf8_string {
            log::warn!("Not a string property: {property:?} (real type is {real_type:?})");
            return None;
        }
        Some(String::from_utf8_lossy(reply.value::<u8>()).into_owned())
    }

    /// Reads a single window value, e.g. `_NET_ACTIVE_WINDOW`.
    fn get_window_property(&self, display: &Display, property: Atom) -> Option<XcbWindow> {
        let reply = self
            .get_property_full(display, false, property, ATOM_WINDOW, 0, 1)
            .ok()?;
        if reply.r#type() != ATOM_WINDOW {
            return None;
        }
        reply
            .value::<XcbWindow>()
            .first()
            .copied()
            .filter(|window| !window.is_none())
    }
}

impl<T> GetProperty for T
where
    T: Xid,
{
    fn window(&self) -> XcbWindow {
        unsafe { XcbWindow::new(self.resource_id()) }
    }
}

pub trait SetProperty {
    /// Returns the window to use in the request.
    fn window(&self) -> XcbWindow;

    fn set_property(&self, display: &Display, property: Atom, value: PropertyValue) {
        value.change(display, self.window(), property, PropMode::Replace);
    }
}

impl<T> SetProperty for T
where
    T: Xid,
{
    fn window(&self) -> XcbWindow {
        unsafe { XcbWindow::new(self.resource_id()) }
    }
}
