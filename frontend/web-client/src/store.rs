//! Holds the latest [`GameState`] reported by the server.

use std::sync::Arc;
use ticket_to_ride::game_state::GameState;

/// Notified every time the store's state is replaced.
pub trait StateObserver {
    fn state_replaced(&mut self, state: &GameState);
}

/// The single source of truth for what gets drawn, and what the bot decides on.
///
/// States are never patched in place: each sync replaces the whole state. Snapshots handed out
/// earlier keep pointing at the state they were taken from.
#[derive(Default)]
pub struct StateStore {
    current: Option<Arc<GameState>>,
    observers: Vec<Box<dyn StateObserver>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&GameState> {
        self.current.as_deref()
    }

    /// A cheap, immutable handle on the current state.
    pub fn snapshot(&self) -> Option<Arc<GameState>> {
        self.current.clone()
    }

    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    /// Replaces the current state, then notifies every observer in subscription order.
    pub fn replace(&mut self, state: GameState) {
        let state = Arc::new(state);
        self.current = Some(Arc::clone(&state));

        for observer in &mut self.observers {
            observer.state_replaced(&state);
        }
    }

    /// Forgets the current state, e.g. when a new game is created. Observers are kept.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
