//! Room registry: creates, tracks, and routes connections to rooms.

use std::collections::HashMap;

use arena_protocol::{RoomId, ServerEvent};
use arena_transport::ConnectionId;

use crate::{Outbox, Player, Room, RoomError};

/// Owns every active room and knows which connection is in which room.
///
/// Invariants, holding after every public method returns:
/// - a room has at most [`MAX_PLAYERS`](crate::MAX_PLAYERS) players;
/// - no room with zero players is stored;
/// - a connection is in at most one room, and `memberships` agrees with
///   the rooms' player lists.
///
/// Choice submission and round resolution live in the `engine` module as
/// a second `impl` block on this type.
pub struct RoomRegistry<O: Outbox> {
    pub(crate) rooms: HashMap<RoomId, Room>,
    pub(crate) memberships: HashMap<ConnectionId, RoomId>,
    pub(crate) outbox: O,
}

impl<O: Outbox> RoomRegistry<O> {
    /// Creates an empty registry delivering through `outbox`.
    pub fn new(outbox: O) -> Self {
        Self {
            rooms: HashMap::new(),
            memberships: HashMap::new(),
            outbox,
        }
    }

    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    pub fn outbox_mut(&mut self) -> &mut O {
        &mut self.outbox
    }

    /// Returns the room with this id, if it exists.
    pub fn room(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    /// Returns the room a connection is currently in, if any.
    pub fn room_of(&self, conn: ConnectionId) -> Option<&RoomId> {
        self.memberships.get(&conn)
    }

    /// Returns the number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Lists all active room IDs.
    pub fn room_ids(&self) -> impl Iterator<Item = &RoomId> {
        self.rooms.keys()
    }

    /// Returns the existing room or creates an empty one.
    ///
    /// A room created here and never joined would break the "no empty
    /// rooms" invariant, so only [`join_room`](Self::join_room) calls this
    /// outside of tests.
    pub fn get_or_create_room(&mut self, room_id: &RoomId) -> &mut Room {
        self.rooms.entry(room_id.clone()).or_insert_with(|| {
            tracing::info!(%room_id, "room created");
            Room::new(room_id.clone())
        })
    }

    /// Adds `conn` to `room_id` under `name`.
    ///
    /// On success the room's members get one `room_state`. On failure the
    /// error is also sent to `conn` alone as a `room_error`, and nothing
    /// changes.
    ///
    /// # Errors
    /// - [`RoomError::AlreadyInRoom`] if `conn` is already in a room
    ///   (this one or another)
    /// - [`RoomError::RoomFull`] if the room has two players
    pub fn join_room(
        &mut self,
        conn: ConnectionId,
        room_id: RoomId,
        name: Option<&str>,
    ) -> Result<(), RoomError> {
        if let Some(current) = self.memberships.get(&conn) {
            let err = RoomError::AlreadyInRoom(conn, current.clone());
            return Err(self.reject(conn, err));
        }

        let room = self.get_or_create_room(&room_id);
        if room.is_full() {
            return Err(self.reject(conn, RoomError::RoomFull(room_id)));
        }

        let player = Player::new(name);
        tracing::info!(
            %room_id,
            %conn,
            name = %player.name,
            players = room.player_count() + 1,
            "player joined"
        );
        room.add_player(conn, player);

        self.memberships.insert(conn, room_id.clone());
        self.outbox.subscribe(conn, &room_id);
        self.broadcast_room_state(&room_id);
        Ok(())
    }

    /// Removes `conn` from its room.
    ///
    /// The last player out deletes the room; otherwise the remaining
    /// player gets one `room_state`.
    ///
    /// # Errors
    /// [`RoomError::NotInRoom`] if `conn` isn't in a room. Nothing changes
    /// in that case, and callers usually ignore it.
    pub fn leave_room(&mut self, conn: ConnectionId) -> Result<(), RoomError> {
        let room_id = self
            .memberships
            .remove(&conn)
            .ok_or(RoomError::NotInRoom(conn))?;
        self.outbox.unsubscribe(conn, &room_id);

        let Some(room) = self.rooms.get_mut(&room_id) else {
            return Err(RoomError::NotInRoom(conn));
        };
        room.remove_player(conn);

        tracing::info!(
            %room_id,
            %conn,
            players = room.player_count(),
            "player left"
        );

        if room.is_empty() {
            let lifetime = room.created_at().elapsed();
            self.rooms.remove(&room_id);
            tracing::info!(
                %room_id,
                lifetime_ms = lifetime.as_millis() as u64,
                "room closed"
            );
        } else {
            self.broadcast_room_state(&room_id);
        }
        Ok(())
    }

    /// Cleans up after a connection that went away.
    ///
    /// Same effect as [`leave_room`](Self::leave_room): a pending choice of
    /// the remaining player is kept and no round is resolved.
    pub fn handle_disconnect(
        &mut self,
        conn: ConnectionId,
    ) -> Result<(), RoomError> {
        tracing::debug!(%conn, "connection gone");
        self.leave_room(conn)
    }

    /// Sends the room's current snapshot to all of its members.
    pub(crate) fn broadcast_room_state(&mut self, room_id: &RoomId) {
        if let Some(room) = self.rooms.get(room_id) {
            let snapshot = room.snapshot();
            self.outbox
                .send_to_room(room_id, ServerEvent::RoomState(snapshot));
        }
    }

    /// Tells `conn` why its request failed and hands the error back.
    fn reject(&mut self, conn: ConnectionId, err: RoomError) -> RoomError {
        tracing::debug!(%conn, error = %err, "request rejected");
        self.outbox.send_to(conn, ServerEvent::RoomError(err.to_string()));
        err
    }
}
