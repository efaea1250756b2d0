use super::Display;
use crate::rectangle::Rectangle;
use xcb::randr::{GetMonitors, MonitorInfo};

pub struct Monitor {
    pub name: Option<String>,
    pub geometry: Rectangle,
    pub is_primary: bool,
}

impl Monitor {
    fn new(name: Option<String>, info: &MonitorInfo) -> Self {
        Self {
            name,
            geometry: Rectangle::new(info.x(), info.y(), info.width(), info.height()),
            is_primary: info.primary(),
        }
    }
}

pub fn query_screens(display: &Display) -> xcb::Result<Vec<Monitor>> {
    Ok(display
        .request_with_reply(&GetMonitors {
            window: display.root(),
            get_active: true,
        })?
        .monitors()
        .map(|info| {
            let name = display.get_atom_name(info.name());
            Monitor::new(name, info)
        })
        .collect())
}

/// Returns the geometry of the primary monitor. If there is no primary monitor
/// the first one is used, and without RandR the whole screen.
pub fn main_monitor_geometry(display: &Display) -> Rectangle {
    match query_screens(display) {
        Ok(monitors) => {
            for monitor in monitors.iter() {
                log::debug!(
                    "Monitor {}: {}{}",
                    monitor.name.as_deref().unwrap_or("?"),
                    monitor.geometry,
                    if monitor.is_primary { " (primary)" } else { "" }
                );
            }
            let main = monitors
                .iter()
                .find(|m| m.is_primary)
                .or_else(|| monitors.first());
            if let Some(main) = main {
                return main.geometry;
            }
        }
        Err(error) => log::warn!("Could not query monitors: {error}"),
    }
    let (width, height) = display.screen_size();
    Rectangle::new(0, 0, width, height)
}
