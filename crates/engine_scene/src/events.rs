//! Gameplay event fan-out.
//!
//! Events are a closed enum; listeners are `FnMut` closures keyed by a
//! [`ListenerId`]. Dispatch takes `&mut self`, so a listener can never
//! subscribe or unsubscribe re-entrantly — the borrow checker rules out the
//! mid-dispatch list mutation that event buses usually have to defend
//! against.

use crate::object::ObjectId;

/// A gameplay event broadcast once per frame after the update pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Two objects collided.
    Collision { a: ObjectId, b: ObjectId },
    /// A character's health reached zero.
    Death { object: ObjectId },
    /// A character reached a new level.
    LevelUp { object: ObjectId, level: i32 },
}

/// Handle identifying a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Dispatches [`GameEvent`]s to subscribed listeners in subscription order.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// Subscribe a listener; returns the handle needed to unsubscribe.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if the handle was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Deliver an event to every listener.
    pub fn dispatch(&mut self, event: &GameEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
