use super::Plugin;
use crate::{
    bar::{PluginEvents, Signal},
    error::LogError,
};
use parking_lot::Mutex;
use std::{
    sync::{
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
};

const STOP_SIGNAL: u8 = 0;
const UPDATE_SIGNAL: u8 = 1;

/// Pings the main loop when the plugin thread exits, even by panic.
struct PingOnExit(Signal);

impl Drop for PingOnExit {
    fn drop(&mut self) {
        self.0.ping();
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Wake {
    Stop,
    Interval,
    Events,
}

/// Waits for the next signal or the plugin's interval.
fn wait(receiver: &Receiver<u8>, plugin: &dyn Plugin) -> Wake {
    let result = match plugin.interval() {
        Some(interval) => receiver.recv_timeout(interval),
        None => receiver.recv().map_err(|_| RecvTimeoutError::Disconnected),
    };
    match result {
        Ok(STOP_SIGNAL) | Err(RecvTimeoutError::Disconnected) => Wake::Stop,
        Err(RecvTimeoutError::Timeout) => Wake::Interval,
        Ok(_) => Wake::Events,
    }
}

/// Delivers pending events and updates the text if `force` is set or an
/// event asked for it. Returns whether the text changed.
fn step(
    id: usize,
    plugin: &mut dyn Plugin,
    events: &PluginEvents,
    text: &Mutex<String>,
    force: bool,
) -> bool {
    let mut needs_update = force;
    for event in events.take(id) {
        needs_update |= plugin.event(event);
    }
    if !needs_update {
        return false;
    }
    match plugin.update() {
        Some(new_text) => {
            let mut text = text.lock();
            if *text != new_text {
                *text = new_text;
                true
            } else {
                false
            }
        }
        None => false,
    }
}

/// A plugin running on its own thread. The thread updates the plugin
/// periodically or when asked to and publishes its text.
pub struct PluginThread {
    id: usize,
    name: String,
    handle: JoinHandle<()>,
    sender: Sender<u8>,
    text: Arc<Mutex<String>>,
}

impl PluginThread {
    pub fn spawn(
        id: usize,
        mut plugin: Box<dyn Plugin>,
        events: PluginEvents,
        signal: Signal,
    ) -> std::io::Result<Self> {
        let name = plugin.name().to_string();
        let (sender, receiver) = mpsc::channel();
        let text = Arc::new(Mutex::new(String::new()));
        let thread_text = text.clone();
        let handle = thread::Builder::new()
            .name(format!("plugin-{name}"))
            .spawn(move || {
                let _guard = PingOnExit(signal.clone());
                let mut force = true;
                loop {
                    if step(id, plugin.as_mut(), &events, &thread_text, force) {
                        signal.render();
                    }
                    match wait(&receiver, plugin.as_ref()) {
                        Wake::Stop => break,
                        Wake::Interval => force = true,
                        Wake::Events => force = false,
                    }
                }
                log::trace!("Plugin thread '{}' exiting", plugin.name());
            })?;
        log::debug!("Started plugin '{name}' (thread {id})");
        Ok(Self {
            id,
            name,
            handle,
            sender,
            text,
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The most recently published text.
    pub fn text(&self) -> String {
        self.text.lock().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Makes the thread update the plugin now. The interval restarts after this.
    pub fn update(&self) {
        self.sender.send(UPDATE_SIGNAL).log_error();
    }

    /// Stops and joins the thread.
    pub fn stop(self) {
        // Fails if the thread already exited.
        self.sender.send(STOP_SIGNAL).ok();
        if self.handle.join().is_err() {
            log::error!("Plugin '{}' panicked", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Recorder {
        seen: Vec<u8>,
    }

    impl Plugin for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn interval(&self) -> Option<Duration> {
            None
        }

        fn update(&mut self) -> Option<String> {
            Some(format!("{:?}", self.seen))
        }

        fn event(&mut self, id: u8) -> bool {
            self.seen.push(id);
            true
        }
    }

    /// Counts updates and only wants them for button events.
    struct ClickCounter {
        updates: usize,
    }

    impl Plugin for ClickCounter {
        fn name(&self) -> &str {
            "click-counter"
        }

        fn interval(&self) -> Option<Duration> {
            Some(Duration::from_millis(10))
        }

        fn update(&mut self) -> Option<String> {
            self.updates += 1;
            Some(self.updates.to_string())
        }

        fn event(&mut self, id: u8) -> bool {
            crate::plugin::event::is_button(id)
        }
    }

    #[test]
    fn step_delivers_events_in_order() {
        let events = PluginEvents::new();
        let text = Mutex::new(String::new());
        let mut plugin = Recorder { seen: Vec::new() };
        assert!(step(0, &mut plugin, &events, &text, true));
        assert_eq!(*text.lock(), "[]");
        events.add(0, 1);
        events.add(1, 4);
        events.add(0, 32);
        assert!(step(0, &mut plugin, &events, &text, false));
        assert_eq!(*text.lock(), "[1, 32]");
        assert_eq!(events.len(1), 1);
    }

    #[test]
    fn unchanged_text_is_not_a_change() {
        let events = PluginEvents::new();
        let text = Mutex::new(String::new());
        let mut plugin = Recorder { seen: Vec::new() };
        assert!(step(0, &mut plugin, &events, &text, true));
        assert!(!step(0, &mut plugin, &events, &text, true));
    }

    #[test]
    fn ignored_events_do_not_update() {
        let events = PluginEvents::new();
        let text = Mutex::new(String::new());
        let mut plugin = ClickCounter { updates: 0 };
        events.add(0, crate::plugin::event::ROOT_PROPERTY);
        assert!(!step(0, &mut plugin, &events, &text, false));
        assert_eq!(plugin.updates, 0);
        assert_eq!(events.len(0), 0);

        events.add(0, crate::plugin::event::ROOT_PROPERTY);
        events.add(0, crate::plugin::event::BUTTON_LEFT);
        assert!(step(0, &mut plugin, &events, &text, false));
        assert_eq!(plugin.updates, 1);

        assert!(step(0, &mut plugin, &events, &text, true));
        assert_eq!(plugin.updates, 2);
        assert_eq!(*text.lock(), "2");
    }

    #[test]
    fn wait_reports_why_it_woke() {
        let plugin = Recorder { seen: Vec::new() };
        let (sender, receiver) = mpsc::channel();
        sender.send(UPDATE_SIGNAL).unwrap();
        sender.send(STOP_SIGNAL).unwrap();
        assert_eq!(wait(&receiver, &plugin), Wake::Events);
        assert_eq!(wait(&receiver, &plugin), Wake::Stop);
        drop(sender);
        assert_eq!(wait(&receiver, &plugin), Wake::Stop);

        let plugin = ClickCounter { updates: 0 };
        let (_sender, receiver) = mpsc::channel::<u8>();
        assert_eq!(wait(&receiver, &plugin), Wake::Interval);
    }
}
