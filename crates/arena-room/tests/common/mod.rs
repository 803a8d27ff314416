//! Shared helpers: a recording outbox and shorthand constructors.

#![allow(dead_code)]

use std::collections::HashMap;

use arena_protocol::{RoomId, RoomSnapshot, RoundResult, ServerEvent};
use arena_room::{Outbox, RoomRegistry};
use arena_transport::ConnectionId;

/// One delivered event, as the fake saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Direct(ConnectionId, ServerEvent),
    Room(RoomId, ServerEvent),
}

/// An [`Outbox`] that records instead of delivering.
#[derive(Debug, Default)]
pub struct RecordingOutbox {
    pub sent: Vec<Sent>,
    pub groups: HashMap<RoomId, Vec<ConnectionId>>,
}

impl RecordingOutbox {
    /// Returns and clears everything sent so far.
    pub fn take(&mut self) -> Vec<Sent> {
        std::mem::take(&mut self.sent)
    }
}

impl Outbox for RecordingOutbox {
    fn send_to(&mut self, conn: ConnectionId, event: ServerEvent) {
        self.sent.push(Sent::Direct(conn, event));
    }

    fn send_to_room(&mut self, room_id: &RoomId, event: ServerEvent) {
        self.sent.push(Sent::Room(room_id.clone(), event));
    }

    fn subscribe(&mut self, conn: ConnectionId, room_id: &RoomId) {
        self.groups.entry(room_id.clone()).or_default().push(conn);
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

pub type Registry = RoomRegistry<RecordingOutbox>;

pub fn registry() -> Registry {
    RoomRegistry::new(RecordingOutbox::default())
}

pub fn cid(id: u64) -> ConnectionId {
    ConnectionId::new(id)
}

pub fn rid(id: &str) -> RoomId {
    RoomId::new(id)
}

/// Drains the outbox.
pub fn drain(registry: &mut Registry) -> Vec<Sent> {
    registry.outbox_mut().take()
}

/// Joins and discards the resulting broadcasts.
pub fn join(registry: &mut Registry, conn: u64, room: &str, name: &str) {
    registry
        .join_room(cid(conn), rid(room), Some(name))
        .expect("join should succeed");
    drain(registry);
}

/// Extracts the snapshot from a room broadcast.
pub fn as_room_state(sent: &Sent) -> &RoomSnapshot {
    match sent {
        Sent::Room(_, ServerEvent::RoomState(snapshot)) => snapshot,
        other => panic!("expected room_state broadcast, got {other:?}"),
    }
}

/// Extracts the recipient and result from a private round result.
pub fn as_round_result(sent: &Sent) -> (ConnectionId, RoundResult) {
    match sent {
        Sent::Direct(conn, ServerEvent::RoundResult(result)) => (*conn, *result),
        other => panic!("expected round_result, got {other:?}"),
    }
}

/// Checks the registry-wide invariants.
pub fn assert_invariants(registry: &Registry) {
    for room_id in registry.room_ids() {
        let room = registry.room(room_id).expect("listed room exists");
        assert!(room.player_count() >= 1, "empty room {room_id} persisted");
        assert!(room.player_count() <= 2, "room {room_id} over capacity");
        for (conn, _) in room.players() {
            assert_eq!(registry.room_of(conn), Some(room_id));
        }
    }
}
