//! Outbound delivery: the seam between the room core and the transport.

use std::collections::HashMap;

use arena_protocol::{RoomId, ServerEvent};
use arena_transport::ConnectionId;
use tokio::sync::mpsc;

/// Channel sender delivering events to one connection's handler task.
pub type ClientSender = mpsc::UnboundedSender<ServerEvent>;

/// Where the registry sends events.
///
/// Delivery is fire-and-forget: no acknowledgement, no retry, and
/// sending to a connection that has gone away is silently dropped.
pub trait Outbox {
    /// Unicast to a single connection.
    fn send_to(&mut self, conn: ConnectionId, event: ServerEvent);

    /// Broadcast to every connection subscribed to `room_id`.
    fn send_to_room(&mut self, room_id: &RoomId, event: ServerEvent);

    /// Adds `conn` to the broadcast group of `room_id`.
    fn subscribe(&mut self, conn: ConnectionId, room_id: &RoomId);

    /// Removes `conn` from the broadcast group of `room_id`.
    fn unsubscribe(&mut self, conn: ConnectionId, room_id: &RoomId);
}

/// Production [`Outbox`]: one unbounded channel per connection plus the
/// room broadcast groups.
#[derive(Debug, Default)]
pub struct ChannelOutbox {
    clients: HashMap<ConnectionId, ClientSender>,
    groups: HashMap<RoomId, Vec<ConnectionId>>,
}

impl ChannelOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts delivering to `conn` through `sender`.
    pub fn register(&mut self, conn: ConnectionId, sender: ClientSender) {
        self.clients.insert(conn, sender);
    }

    /// Stops delivering to `conn` and drops it from every group.
    pub fn deregister(&mut self, conn: ConnectionId) {
        self.clients.remove(&conn);
        self.groups.retain(|_, members| {
            members.retain(|m| *m != conn);
            !members.is_empty()
        });
    }

    /// Number of registered connections.
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}

impl Outbox for ChannelOutbox {
    fn send_to(&mut self, conn: ConnectionId, event: ServerEvent) {
        if let Some(sender) = self.clients.get(&conn) {
            let _ = sender.send(event);
        }
    }

    fn send_to_room(&mut self, room_id: &RoomId, event: ServerEvent) {
        let Some(members) = self.groups.get(room_id) else {
            return;
        };
        for conn in members {
            if let Some(sender) = self.clients.get(conn) {
                let _ = sender.send(event.clone());
            }
        }
    }

    fn subscribe(&mut self, conn: ConnectionId, room_id: &RoomId) {
        let members = self.groups.entry(room_id.clone()).or_default();
        if !members.contains(&conn) {
            members.push(conn);
        }
    }

    fn unsubscribe(&mut self, conn: ConnectionId, room_id: &RoomId) {
        if let Some(members) = self.groups.get_mut(room_id) {
            members.retain(|m| *m != conn);
            if members.is_empty() {
                self.groups.remove(room_id);
            }
        }
    }
}
