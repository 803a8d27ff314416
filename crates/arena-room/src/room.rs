//! A single room and the players in it.

use std::time::Instant;

use arena_protocol::{Choice, PlayerView, RoomId, RoomSnapshot};
use arena_transport::ConnectionId;

/// Maximum number of players in a room.
pub const MAX_PLAYERS: usize = 2;

/// Name given to players who join without one (or with a blank one).
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// A participant in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Display name, already trimmed.
    pub name: String,
    /// Choice for the current round; `None` until the player commits.
    pub choice: Option<Choice>,
}

impl Player {
    /// Creates a player with no choice yet.
    ///
    /// `name` is trimmed; an empty or missing name becomes
    /// [`DEFAULT_PLAYER_NAME`].
    pub fn new(name: Option<&str>) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_PLAYER_NAME);
        Self {
            name: name.to_owned(),
            choice: None,
        }
    }

    /// Returns `true` if the player has committed a choice this round.
    pub fn has_chosen(&self) -> bool {
        self.choice.is_some()
    }
}

/// A session container for up to [`MAX_PLAYERS`] players.
///
/// Players are kept in join order; that order is what `room_state`
/// shows and what decides who is "first" when a round resolves.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    created_at: Instant,
    players: Vec<(ConnectionId, Player)>,
}

impl Room {
    pub(crate) fn new(id: RoomId) -> Self {
        Self {
            id,
            created_at: Instant::now(),
            players: Vec::with_capacity(MAX_PLAYERS),
        }
    }

    /// The room's id.
    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// When the room was created.
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    /// Looks up a player by connection.
    pub fn player(&self, conn: ConnectionId) -> Option<&Player> {
        self.players
            .iter()
            .find(|(id, _)| *id == conn)
            .map(|(_, p)| p)
    }

    pub(crate) fn player_mut(
        &mut self,
        conn: ConnectionId,
    ) -> Option<&mut Player> {
        self.players
            .iter_mut()
            .find(|(id, _)| *id == conn)
            .map(|(_, p)| p)
    }

    /// Players in join order.
    pub fn players(&self) -> impl Iterator<Item = (ConnectionId, &Player)> {
        self.players.iter().map(|(id, p)| (*id, p))
    }

    /// Number of players with a choice set.
    pub fn ready_count(&self) -> usize {
        self.players.iter().filter(|(_, p)| p.has_chosen()).count()
    }

    /// Appends a player. Callers check [`is_full`](Self::is_full) first.
    pub(crate) fn add_player(&mut self, conn: ConnectionId, player: Player) {
        debug_assert!(!self.is_full());
        self.players.push((conn, player));
    }

    /// Removes a player, keeping the others in join order.
    pub(crate) fn remove_player(
        &mut self,
        conn: ConnectionId,
    ) -> Option<Player> {
        let index = self.players.iter().position(|(id, _)| *id == conn)?;
        Some(self.players.remove(index).1)
    }

    /// Both players and their choices, if the room has exactly two
    /// players and both have committed.
    pub(crate) fn committed_pair(
        &self,
    ) -> Option<[(ConnectionId, Choice); 2]> {
        match self.players.as_slice() {
            [(a, pa), (b, pb)] => Some([(*a, pa.choice?), (*b, pb.choice?)]),
            _ => None,
        }
    }

    pub(crate) fn reset_choices(&mut self) {
        for (_, player) in &mut self.players {
            player.choice = None;
        }
    }

    /// The public view broadcast as `room_state`. Choices are reduced
    /// to a yes/no flag.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.id.clone(),
            players: self
                .players
                .iter()
                .map(|(id, p)| PlayerView {
                    socket_id: *id,
                    name: p.name.clone(),
                    has_chosen: p.has_chosen(),
                })
                .collect(),
            ready_count: self.ready_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(id: u64) -> ConnectionId {
        ConnectionId::new(id)
    }

    #[test]
    fn test_player_name_is_trimmed_or_defaulted() {
        assert_eq!(Player::new(Some("  Alice ")).name, "Alice");
        assert_eq!(Player::new(Some("   ")).name, DEFAULT_PLAYER_NAME);
        assert_eq!(Player::new(Some("")).name, DEFAULT_PLAYER_NAME);
        assert_eq!(Player::new(None).name, DEFAULT_PLAYER_NAME);
        assert!(!Player::new(None).has_chosen());
    }

    #[test]
    fn test_players_keep_join_order_after_removal() {
        let mut room = Room::new(RoomId::new("R1"));
        room.add_player(cid(3), Player::new(Some("c")));
        room.add_player(cid(1), Player::new(Some("a")));
        assert!(room.is_full());

        room.remove_player(cid(3));
        room.add_player(cid(2), Player::new(Some("b")));

        let order: Vec<_> = room.players().map(|(id, _)| id).collect();
        assert_eq!(order, vec![cid(1), cid(2)]);
    }

    #[test]
    fn test_remove_unknown_player_is_none() {
        let mut room = Room::new(RoomId::new("R1"));
        assert!(room.remove_player(cid(9)).is_none());
        assert!(room.is_empty());
    }

    #[test]
    fn test_committed_pair_requires_two_choices() {
        let mut room = Room::new(RoomId::new("R1"));
        room.add_player(cid(1), Player::new(None));
        room.player_mut(cid(1)).unwrap().choice = Some(Choice::Rock);
        assert!(room.committed_pair().is_none(), "only one player");

        room.add_player(cid(2), Player::new(None));
        assert!(room.committed_pair().is_none(), "second has no choice");

        room.player_mut(cid(2)).unwrap().choice = Some(Choice::Paper);
        assert_eq!(
            room.committed_pair(),
            Some([(cid(1), Choice::Rock), (cid(2), Choice::Paper)])
        );

        room.reset_choices();
        assert_eq!(room.ready_count(), 0);
    }

    #[test]
    fn test_snapshot_hides_choice_values() {
        let mut room = Room::new(RoomId::new("R1"));
        room.add_player(cid(1), Player::new(Some("Alice")));
        room.add_player(cid(2), Player::new(Some("Bob")));
        room.player_mut(cid(2)).unwrap().choice = Some(Choice::Scissors);

        let snap = room.snapshot();
        assert_eq!(snap.room_id, RoomId::new("R1"));
        assert_eq!(snap.ready_count, 1);
        assert_eq!(snap.players.len(), 2);
        assert_eq!(snap.players[0].name, "Alice");
        assert!(!snap.players[0].has_chosen);
        assert!(snap.players[1].has_chosen);
    }
}
