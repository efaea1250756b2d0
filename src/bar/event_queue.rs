use parking_lot::Mutex;
use std::sync::Arc;

/// Pending event IDs for each plugin thread, indexed by thread ID.
#[derive(Clone, Default)]
pub struct PluginEvents {
    queues: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl PluginEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event to the queue of the given thread, creating the queue
    /// if this is its first event.
    pub fn add(&self, thread_id: usize, event_id: u8) {
        let mut queues = self.queues.lock();
        if queues.len() <= thread_id {
            queues.resize_with(thread_id + 1, Vec::new);
        }
        queues[thread_id].push(event_id);
    }

    /// Removes and returns all pending events of the given thread in the
    /// order they were added.
    pub fn take(&self, thread_id: usize) -> Vec<u8> {
        self.queues
            .lock()
            .get_mut(thread_id)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub fn len(&self, thread_id: usize) -> usize {
        self.queues.lock().get(thread_id).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for PluginEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.queues.lock().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_kept_in_order_per_thread() {
        let events = PluginEvents::new();
        events.add(0, 1);
        events.add(2, 32);
        events.add(0, 3);
        assert_eq!(events.len(0), 2);
        assert_eq!(events.len(1), 0);
        assert_eq!(events.len(2), 1);
        assert_eq!(events.take(0), vec![1, 3]);
        assert_eq!(events.take(0), Vec::<u8>::new());
        assert_eq!(events.take(2), vec![32]);
    }

    #[test]
    fn unknown_thread_has_no_events() {
        let events = PluginEvents::new();
        assert_eq!(events.len(7), 0);
        assert!(events.take(7).is_empty());
    }

    #[test]
    fn clones_share_queues() {
        let events = PluginEvents::new();
        let other = events.clone();
        let handle = std::thread::spawn(move || {
            for id in 1..=5 {
                other.add(1, id);
            }
        });
        handle.join().unwrap();
        assert_eq!(events.take(1), vec![1, 2, 3, 4, 5]);
    }
}
