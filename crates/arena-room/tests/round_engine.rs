//! Integration tests for choice submission and round resolution.

mod common;

use arena_protocol::{Choice, Outcome, RoundResult};
use arena_room::judge;
use common::*;

/// Two players in "R1": conn 1 = Alice, conn 2 = Bob.
fn full_room() -> Registry {
    let mut reg = registry();
    join(&mut reg, 1, "R1", "Alice");
    join(&mut reg, 2, "R1", "Bob");
    reg
}

// =========================================================================
// submit_choice
// =========================================================================

#[test]
fn test_choice_outside_room_is_ignored() {
    let mut reg = registry();
    assert!(!reg.submit_choice(cid(1), "rock"));
    assert!(drain(&mut reg).is_empty());
    assert_eq!(reg.room_count(), 0);
}

#[test]
fn test_invalid_choice_is_ignored() {
    let mut reg = full_room();
    for raw in ["lizard", "Rock", "", " paper"] {
        assert!(!reg.submit_choice(cid(1), raw), "{raw:?}");
    }
    assert!(drain(&mut reg).is_empty());
    assert_eq!(reg.room(&rid("R1")).unwrap().ready_count(), 0);
}

#[test]
fn test_first_choice_broadcasts_ready_flag_only() {
    let mut reg = full_room();
    assert!(reg.submit_choice(cid(1), "rock"));

    let sent = drain(&mut reg);
    assert_eq!(sent.len(), 1, "broadcast but no resolution");
    let snap = as_room_state(&sent[0]);
    assert_eq!(snap.ready_count, 1);
    assert!(snap.players[0].has_chosen);
    assert!(!snap.players[1].has_chosen);

    // The value itself stays server-side.
    assert!(!format!("{:?}", sent[0]).contains("Rock"));
}

#[test]
fn test_choice_can_change_before_opponent_commits() {
    let mut reg = full_room();
    reg.submit_choice(cid(1), "rock");
    reg.submit_choice(cid(1), "paper");
    drain(&mut reg);

    let room = reg.room(&rid("R1")).unwrap();
    assert_eq!(room.player(cid(1)).unwrap().choice, Some(Choice::Paper));
    assert_eq!(room.ready_count(), 1);
}

#[test]
fn test_lone_player_choice_never_resolves() {
    let mut reg = registry();
    join(&mut reg, 1, "R1", "Alice");
    assert!(reg.submit_choice(cid(1), "scissors"));

    let sent = drain(&mut reg);
    assert_eq!(sent.len(), 1);
    assert_eq!(as_room_state(&sent[0]).ready_count, 1);
}

// =========================================================================
// resolve_round
// =========================================================================

#[test]
fn test_alice_rock_beats_bob_scissors() {
    let mut reg = full_room();
    reg.submit_choice(cid(1), "rock");
    drain(&mut reg);
    reg.submit_choice(cid(2), "scissors");

    let sent = drain(&mut reg);
    // room_state (ready 2), result A, result B, room_state (ready 0)
    assert_eq!(sent.len(), 4, "{sent:#?}");
    assert_eq!(as_room_state(&sent[0]).ready_count, 2);

    assert_eq!(
        as_round_result(&sent[1]),
        (
            cid(1),
            RoundResult {
                you: Choice::Rock,
                opponent: Choice::Scissors,
                outcome: Outcome::Win,
            }
        )
    );
    assert_eq!(
        as_round_result(&sent[2]),
        (
            cid(2),
            RoundResult {
                you: Choice::Scissors,
                opponent: Choice::Rock,
                outcome: Outcome::Lose,
            }
        )
    );

    let after = as_room_state(&sent[3]);
    assert_eq!(after.ready_count, 0);
    assert!(after.players.iter().all(|p| !p.has_chosen));
}

#[test]
fn test_choices_are_reset_after_resolution() {
    let mut reg = full_room();
    reg.submit_choice(cid(1), "paper");
    reg.submit_choice(cid(2), "paper");

    let room = reg.room(&rid("R1")).unwrap();
    assert!(room.players().all(|(_, p)| p.choice.is_none()));

    // A fresh round starts from scratch.
    drain(&mut reg);
    reg.submit_choice(cid(2), "rock");
    let sent = drain(&mut reg);
    assert_eq!(sent.len(), 1);
}

#[test]
fn test_every_pair_resolves_symmetrically() {
    for a in Choice::ALL {
        for b in Choice::ALL {
            let mut reg = full_room();
            reg.submit_choice(cid(1), a.as_str());
            reg.submit_choice(cid(2), b.as_str());

            let results: Vec<_> = drain(&mut reg)
                .iter()
                .filter(|s| matches!(s, Sent::Direct(..)))
                .map(as_round_result)
                .collect();
            assert_eq!(results.len(), 2, "{a} vs {b}");

            let (conn_a, res_a) = results[0];
            let (conn_b, res_b) = results[1];
            assert_eq!(conn_a, cid(1));
            assert_eq!(conn_b, cid(2));
            assert_eq!((res_a.you, res_a.opponent), (a, b));
            assert_eq!((res_b.you, res_b.opponent), (b, a));
            assert_eq!(res_a.outcome, judge(a, b));
            assert_eq!(res_b.outcome, res_a.outcome.complement());
            if a == b {
                assert_eq!(res_a.outcome, Outcome::Draw);
                assert_eq!(res_b.outcome, Outcome::Draw);
            } else {
                assert_ne!(res_a.outcome, res_b.outcome);
            }
        }
    }
}

#[test]
fn test_resolve_round_is_noop_until_both_committed() {
    let mut reg = full_room();
    assert!(!reg.resolve_round(&rid("R1")));
    reg.submit_choice(cid(1), "rock");
    drain(&mut reg);
    assert!(!reg.resolve_round(&rid("R1")));
    assert!(drain(&mut reg).is_empty());
    assert!(!reg.resolve_round(&rid("missing")));
}

#[test]
fn test_multiple_rounds_in_a_row() {
    let mut reg = full_room();
    let rounds = [("rock", "paper"), ("scissors", "paper"), ("rock", "rock")];
    let expected = [Outcome::Lose, Outcome::Win, Outcome::Draw];

    for ((a, b), outcome) in rounds.into_iter().zip(expected) {
        reg.submit_choice(cid(1), a);
        reg.submit_choice(cid(2), b);
        let sent = drain(&mut reg);
        let (_, first) = as_round_result(&sent[2]);
        assert_eq!(first.outcome, outcome);
        assert_eq!(as_room_state(sent.last().unwrap()).ready_count, 0);
    }
    assert_invariants(&reg);
}
