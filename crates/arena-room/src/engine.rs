//! Round engine: collects hidden choices and resolves rounds.

use arena_protocol::{Choice, RoomId, RoundResult, ServerEvent};
use arena_transport::ConnectionId;

use crate::{judge, Outbox, RoomRegistry};

impl<O: Outbox> RoomRegistry<O> {
    /// Records `raw` as `conn`'s choice for the current round.
    ///
    /// Silently ignored (returns `false`) when `conn` isn't in a room or
    /// `raw` isn't exactly `rock`, `paper` or `scissors`. Otherwise the
    /// room gets a `room_state` and the round is resolved if both players
    /// are now committed. A player may change their mind until then.
    pub fn submit_choice(&mut self, conn: ConnectionId, raw: &str) -> bool {
        let Some(room_id) = self.memberships.get(&conn).cloned() else {
            tracing::trace!(%conn, "choice outside a room ignored");
            return false;
        };
        let choice = match raw.parse::<Choice>() {
            Ok(choice) => choice,
            Err(e) => {
                tracing::trace!(%conn, error = %e, "choice ignored");
                return false;
            }
        };
        let Some(player) = self
            .rooms
            .get_mut(&room_id)
            .and_then(|room| room.player_mut(conn))
        else {
            return false;
        };

        player.choice = Some(choice);
        tracing::debug!(%room_id, %conn, "choice recorded");

        self.broadcast_room_state(&room_id);
        self.resolve_round(&room_id);
        true
    }

    /// Resolves the round if the room has two committed players.
    ///
    /// Each player privately receives `round_result`; then both choices
    /// are cleared and the room gets a fresh `room_state`. Returns `true`
    /// if a round was resolved.
    pub fn resolve_round(&mut self, room_id: &RoomId) -> bool {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return false;
        };
        let Some([(first, first_choice), (second, second_choice)]) =
            room.committed_pair()
        else {
            return false;
        };

        let outcome = judge(first_choice, second_choice);
        room.reset_choices();

        tracing::info!(
            %room_id,
            %first,
            %second,
            first_choice = %first_choice,
            second_choice = %second_choice,
            %outcome,
            "round resolved"
        );

        self.outbox.send_to(
            first,
            ServerEvent::RoundResult(RoundResult {
                you: first_choice,
                opponent: second_choice,
                outcome,
            }),
        );
        self.outbox.send_to(
            second,
            ServerEvent::RoundResult(RoundResult {
                you: second_choice,
                opponent: first_choice,
                outcome: outcome.complement(),
            }),
        );

        self.broadcast_room_state(room_id);
        true
    }
}
