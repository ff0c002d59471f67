use std::fmt;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle returned by [`Signal::connect`], used to disconnect a listener.
    pub struct Connection;
}

type Listener<T> = Box<dyn FnMut(&T)>;

/// A synchronous broadcast channel.
///
/// Listeners receive a shared reference to the emitted value and run on the
/// emitting thread, in the middle of whatever graph operation emitted it.
/// They cannot reach the graph through the signal; work that needs to edit
/// the graph must be queued and applied after the operation returns.
///
/// Listeners run in the order they were connected.
pub struct Signal<T> {
    connections: SlotMap<Connection, ()>,
    listeners: Vec<(Connection, Listener<T>)>,
}

impl<T> Signal<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: SlotMap::with_key(),
            listeners: Vec::new(),
        }
    }

    pub fn connect<F>(&mut self, listener: F) -> Connection
    where
        F: FnMut(&T) + 'static,
    {
        let connection = self.connections.insert(());
        self.listeners.push((connection, Box::new(listener)));
        connection
    }

    /// Returns `false` if the connection was already gone.
    pub fn disconnect(&mut self, connection: Connection) -> bool {
        if self.connections.remove(connection).is_none() {
            return false;
        }
        self.listeners.retain(|(key, _)| *key != connection);
        true
    }

    pub fn is_connected(&self, connection: Connection) -> bool {
        self.connections.contains_key(connection)
    }

    pub fn emit(&mut self, value: &T) {
        for (_, listener) in &mut self.listeners {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.connections.clear();
        self.listeners.clear();
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
