mod bar;
mod event_queue;
mod signal;

pub use bar::Bar;
pub use event_queue::PluginEvents;
pub use signal::Signal;

use crate::{plugin::PluginThread, x::Display};
use xcb::x::{self, ATOM_NONE, ATOM_WM_NAME};

/// Screen edge the bar is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Position {
    Top,
    Bottom,
}

/// Is this property change one the plugins may want to react to?
fn is_window_property(display: &Display, atom: x::Atom) -> bool {
    atom == display.atoms.net_active_window
        || atom == display.atoms.net_wm_name
        || atom == ATOM_WM_NAME
}

/// Stops plugin threads that have exited and removes them from the bar.
fn reap_plugins(plugins: &mut Vec<PluginThread>) {
    let (finished, running): (Vec<_>, Vec<_>) =
        plugins.drain(..).partition(PluginThread::is_finished);
    *plugins = running;
    for plugin in finished {
        log::warn!("Plugin '{}' stopped", plugin.name());
        plugin.stop();
    }
}

/// Runs the event loop until the bar window is destroyed or the connection
/// to the server is lost.
pub fn run(bar: &mut Bar, plugins: &mut Vec<PluginThread>, events: &PluginEvents) {
    let display = bar.window().display().clone();
    let root = display.root();
    bar.draw(plugins);
    loop {
        let event = match display.next_event() {
            Ok(event) => event,
            Err(xcb::Error::Protocol(error)) => {
                log::error!("X error: {error:?}");
                continue;
            }
            Err(error) => {
                log::error!("Lost connection to the X server: {error}");
                break;
            }
        };
        match event {
            xcb::Event::X(x::Event::Expose(e)) => {
                if e.window() == bar.handle() && e.count() == 0 {
                    bar.draw(plugins);
                }
            }
            xcb::Event::X(x::Event::PropertyNotify(e)) => {
                if e.window() == bar.handle() {
                    if e.atom() == ATOM_NONE {
                        reap_plugins(plugins);
                        bar.draw(plugins);
                    }
                } else if is_window_property(&display, e.atom()) {
                    log::trace!("Property {:?} changed on {:?}", e.atom(), e.window());
                    for plugin in plugins.iter() {
                        events.add(plugin.id(), crate::plugin::event::ROOT_PROPERTY);
                        plugin.update();
                    }
                }
            }
            xcb::Event::X(x::Event::ButtonPress(e)) => {
                if e.event() != bar.handle() {
                    continue;
                }
                if let Some(plugin) = bar
                    .segment_at(e.event_x() as i32)
                    .and_then(|index| plugins.get(index))
                {
                    log::trace!("Button {} on plugin '{}'", e.detail(), plugin.name());
                    events.add(plugin.id(), e.detail());
                    plugin.update();
                }
            }
            xcb::Event::X(x::Event::ConfigureNotify(e)) => {
                if e.event() == root && e.window() != bar.handle() {
                    bar.restack();
                }
            }
            xcb::Event::X(x::Event::MapNotify(e)) => {
                if e.event() == root && e.window() != bar.handle() {
                    bar.restack();
                }
            }
            xcb::Event::X(x::Event::DestroyNotify(e)) => {
                if e.window() == bar.handle() {
                    log::info!("Bar window was destroyed");
                    bar.mark_destroyed();
                    break;
                }
                bar.window_destroyed(e.window());
            }
            _ => {}
        }
    }
}
