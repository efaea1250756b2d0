use super::{property::Atoms, GetProperty, XcbWindow};
use crate::error::fatal_error;
use xcb::{
    x::{
        Atom, Colormap, ColormapAlloc, CreateColormap, GetAtomName, QueryTree,
        Screen, Visualid, ATOM_WM_NAME,
    },
    ConnError, Connection, CookieWithReplyChecked, Error, Event, ProtocolResult,
    RequestWithoutReply, Xid,
};

pub struct Display {
    pub(super) connection: Connection,
    screen_num: i32,
    pub(super) root: XcbWindow,
    pub atoms: Atoms,
}

impl Display {
    /// Connects to the display server and interns all atoms we use.
    /// If `name` is `None` the `DISPLAY` environment variable is used.
    pub fn connect(name: Option<&str>) -> xcb::Result<Self> {
        let (connection, screen_num) = Connection::connect(name)?;
        let root = connection
            .get_setup()
            .roots()
            .nth(screen_num as usize)
            .map(|screen| screen.root())
            .ok_or(Error::Connection(ConnError::ClosedInvalidScreen))?;
        let atoms = Atoms::intern_all(&connection)?;
        Ok(Self {
            connection,
            screen_num,
            root,
            atoms,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Returns the connection as the type `xcb_util` needs (`xcb::base::Connection`).
    /// In our xcb version `xcb::base` is a private module so this function takes
    /// any type and infers the correct one for `xcb_util` calls.
    /// Should never be used for anything else!
    pub fn connection_for_xcb_util<T>(&self) -> &T {
        unsafe { std::mem::transmute(&self.connection) }
    }

    /// Get the handle of the root window.
    pub fn root(&self) -> XcbWindow {
        self.root
    }

    pub fn screen(&self) -> &Screen {
        self.connection
            .get_setup()
            .roots()
            .nth(self.screen_num as usize)
            // The screen number was validated in `connect`.
            .unwrap_or_else(|| fatal_error(format!("No such screen: {}", self.screen_num)))
    }

    /// Size of the whole screen in pixels.
    pub fn screen_size(&self) -> (u16, u16) {
        let screen = self.screen();
        (screen.width_in_pixels(), screen.height_in_pixels())
    }

    pub fn void_request<'a, R>(&'a self, request: &'a R)
    where
        R: RequestWithoutReply,
    {
        self.connection.send_request(request);
        self.flush();
    }

    pub fn try_void_request<'a, R>(&'a self, request: &'a R) -> ProtocolResult<()>
    where
        R: RequestWithoutReply,
    {
        let cookie = self.connection.send_request_checked(request);
        self.connection.check_request(cookie)
    }

    pub fn request_with_reply<'a, R>(
        &'a self,
        request: &'a R,
    ) -> xcb::Result<<<R as xcb::Request>::Cookie as CookieWithReplyChecked>::Reply>
    where
        R: xcb::RequestWithReply,
        <R as xcb::Request>::Cookie: CookieWithReplyChecked,
    {
        let cookie = self.connection.send_request(request);
        self.connection.wait_for_reply(cookie)
    }

    pub fn flush(&self) {
        if let Err(error) = self.connection.flush() {
            log::error!("Failed to flush connection: {error}");
        }
    }

    pub fn next_event(&self) -> Result<Event, Error> {
        self.connection.wait_for_event()
    }

    pub fn create_colormap(&self, visual: Visualid) -> ProtocolResult<Colormap> {
        let mid = self.connection.generate_id();
        self.try_void_request(&CreateColormap {
            alloc: ColormapAlloc::None,
            mid,
            window: self.root,
            visual,
        })?;
        Ok(mid)
    }

    pub fn get_atom_name(&self, atom: Atom) -> Option<String> {
        self.request_with_reply(&GetAtomName { atom })
            .ok()
            .map(|reply| reply.name().to_utf8().to_string())
    }

    /// Returns the direct children of the given window in stacking order
    /// (bottom-most first).
    pub fn query_children(&self, window: XcbWindow) -> xcb::Result<Vec<XcbWindow>> {
        Ok(self
            .request_with_reply(&QueryTree { window })?
            .children()
            .to_vec())
    }

    /// Returns the `_NET_WM_NAME` of the window, falling back to `WM_NAME`.
    pub fn window_title(&self, window: &impl Xid) -> Option<String> {
        window
            .get_string_property(self, self.atoms.net_wm_name)
            .or_else(|| window.get_string_property(self, ATOM_WM_NAME))
    }
}

impl std::fmt::Debug for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Display(screen {})", self.screen_num)
    }
}
