//! The dominance relation.

use arena_protocol::{Choice, Outcome};

/// Outcome for the player who threw `mine` against `theirs`.
///
/// Rock beats scissors, scissors beats paper, paper beats rock, equal
/// hands draw. The opponent's outcome is always
/// `judge(mine, theirs).complement()`.
pub fn judge(mine: Choice, theirs: Choice) -> Outcome {
    use Choice::{Paper, Rock, Scissors};

    match (mine, theirs) {
        (Rock, Scissors) | (Scissors, Paper) | (Paper, Rock) => Outcome::Win,
        (Scissors, Rock) | (Paper, Scissors) | (Rock, Paper) => Outcome::Lose,
        (Rock, Rock) | (Paper, Paper) | (Scissors, Scissors) => Outcome::Draw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Choice::{Paper, Rock, Scissors};

    #[test]
    fn test_dominance_table() {
        let expected = [
            (Rock, Rock, Outcome::Draw),
            (Rock, Paper, Outcome::Lose),
            (Rock, Scissors, Outcome::Win),
            (Paper, Rock, Outcome::Win),
            (Paper, Paper, Outcome::Draw),
            (Paper, Scissors, Outcome::Lose),
            (Scissors, Rock, Outcome::Lose),
            (Scissors, Paper, Outcome::Win),
            (Scissors, Scissors, Outcome::Draw),
        ];
        for (mine, theirs, outcome) in expected {
            assert_eq!(judge(mine, theirs), outcome, "{mine} vs {theirs}");
        }
    }

    #[test]
    fn test_judge_is_antisymmetric() {
        for a in Choice::ALL {
            for b in Choice::ALL {
                assert_eq!(judge(b, a), judge(a, b).complement(), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_only_equal_hands_draw() {
        for a in Choice::ALL {
            for b in Choice::ALL {
                assert_eq!(judge(a, b) == Outcome::Draw, a == b);
            }
        }
    }
}
