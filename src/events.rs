//! Timer notifications and the listener registry

use std::fmt;

use serde::{Deserialize, Serialize};

/// Notification raised by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// Throttled (or forced) display refresh, carrying the elapsed seconds
    Updated { elapsed: f64 },
    Started,
    Paused,
    Resumed,
    Stopped,
    Reset,
}

impl TimerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::Updated { .. } => "updated",
            TimerEvent::Started => "started",
            TimerEvent::Paused => "paused",
            TimerEvent::Resumed => "resumed",
            TimerEvent::Stopped => "stopped",
            TimerEvent::Reset => "reset",
        }
    }
}

/// Handle returned by [`ListenerRegistry::add`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&TimerEvent)>;

/// Ordered set of event listeners.
///
/// Dispatch is synchronous and follows registration order. Ids are never
/// reused, so a stale id cannot remove a newer listener.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&TimerEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Drop every listener, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.listeners.len();
        self.listeners.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn dispatch(&mut self, event: &TimerEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn dispatches_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();

        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            registry.add(move |event| log.borrow_mut().push(format!("{tag}:{}", event.name())));
        }
        registry.dispatch(&TimerEvent::Started);

        assert_eq!(*log.borrow(), vec!["first:started", "second:started"]);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let calls = Rc::new(RefCell::new(0));
        let mut registry = ListenerRegistry::new();

        let counter = Rc::clone(&calls);
        let id = registry.add(move |_| *counter.borrow_mut() += 1);
        assert!(registry.remove(id));
        assert!(!registry.remove(id));

        registry.dispatch(&TimerEvent::Reset);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut registry = ListenerRegistry::new();
        let first = registry.add(|_| {});
        assert_eq!(registry.clear(), 1);
        let second = registry.add(|_| {});

        assert_ne!(first, second);
        assert!(!registry.remove(first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn serializes_with_event_tag() {
        let json = serde_json::to_string(&TimerEvent::Updated { elapsed: 1.5 }).unwrap();
        assert_eq!(json, r#"{"event":"updated","elapsed":1.5}"#);
    }
}
