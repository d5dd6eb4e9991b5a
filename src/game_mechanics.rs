//! Round engine: five standard rounds, the wipe rule, and the sudden-death
//! tie-breaker.
//!
//! The engine mutates the two duelists' scores in place and reports every
//! step to a [`GameObserver`], so the console can narrate and pause without
//! the engine doing any I/O. Observers may fail (a console write, a closed
//! stdin); the engine itself cannot.

use std::convert::Infallible;

use log::{debug, info};

use crate::constants::STANDARD_ROUNDS;
use crate::dice_mechanics::{roll, DieSource};
use crate::types::{GameResult, PlayerScore, Roll, RollKind, TurnOutcome, Verdict};

/// Receives game events in the order they happen. Every hook defaults to a no-op.
pub trait GameObserver {
    type Error;

    fn game_started(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// `round` is 1-based.
    fn round_started(&mut self, _round: usize) -> Result<(), Self::Error> {
        Ok(())
    }

    fn turn_started(&mut self, _username: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn rolled(&mut self, _username: &str, _roll: &Roll) -> Result<(), Self::Error> {
        Ok(())
    }

    fn turn_scored(&mut self, _username: &str, _outcome: &TurnOutcome) -> Result<(), Self::Error> {
        Ok(())
    }

    fn turn_finished(&mut self, _username: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn tie_breaker_started(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after every full tie-breaker pass, decided or not. `pass` is 1-based.
    fn tie_breaker_pass_finished(
        &mut self,
        _pass: u32,
        _players: &[PlayerScore; 2],
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn verdict(&mut self, _verdict: &Verdict) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentObserver;

impl GameObserver for SilentObserver {
    type Error = Infallible;
}

/// Apply a standard roll worth `points` to a player holding `current`.
///
/// The new score is `current + points` unless that would be negative, in
/// which case the score is wiped to 0.
pub fn apply_standard_roll(current: i32, points: i32) -> TurnOutcome {
    let total = current + points;
    if total < 0 {
        TurnOutcome::Wiped { points }
    } else if points == 0 {
        TurnOutcome::NoPoints { total }
    } else {
        TurnOutcome::Gained { points, total }
    }
}

/// Compare two players. The strictly higher score wins; equal scores give `None`.
pub fn decide_winner(first: &PlayerScore, second: &PlayerScore) -> Option<Verdict> {
    let (winner, loser) = if first.score > second.score {
        (first, second)
    } else if second.score > first.score {
        (second, first)
    } else {
        return None;
    };
    Some(Verdict {
        winner: winner.username.clone(),
        loser: loser.username.clone(),
        margin: winner.score - loser.score,
    })
}

/// Play the fixed standard rounds, two dice per turn, players in order.
pub fn play_standard_rounds<D, O>(
    players: &mut [PlayerScore; 2],
    dice: &mut D,
    observer: &mut O,
) -> Result<(), O::Error>
where
    D: DieSource + ?Sized,
    O: GameObserver + ?Sized,
{
    for round in 1..=STANDARD_ROUNDS {
        observer.round_started(round)?;
        for player in players.iter_mut() {
            observer.turn_started(&player.username)?;
            let r = roll(dice, RollKind::Standard);
            observer.rolled(&player.username, &r)?;

            let outcome = apply_standard_roll(player.score, r.points);
            if let TurnOutcome::Wiped { points } = outcome {
                debug!(
                    "{} wiped in round {} ({} + {} < 0)",
                    player.username, round, player.score, points
                );
            }
            player.score = outcome.total();
            observer.turn_scored(&player.username, &outcome)?;
            observer.turn_finished(&player.username)?;
        }
    }
    Ok(())
}

/// Sudden death: every pass, each player throws one die and adds it.
///
/// Runs until a pass ends with a strict score difference. There is no pass
/// limit; with fair dice the loop ends with probability 1. Returns the
/// verdict and the number of passes played.
pub fn play_tie_breaker<D, O>(
    players: &mut [PlayerScore; 2],
    dice: &mut D,
    observer: &mut O,
) -> Result<(Verdict, u32), O::Error>
where
    D: DieSource + ?Sized,
    O: GameObserver + ?Sized,
{
    let mut pass = 0u32;
    loop {
        pass += 1;
        for player in players.iter_mut() {
            observer.turn_started(&player.username)?;
            let r = roll(dice, RollKind::TieBreaker);
            observer.rolled(&player.username, &r)?;

            player.score += r.points;
            let outcome = TurnOutcome::Gained {
                points: r.points,
                total: player.score,
            };
            observer.turn_scored(&player.username, &outcome)?;
            observer.turn_finished(&player.username)?;
        }
        observer.tie_breaker_pass_finished(pass, players)?;

        if let Some(verdict) = decide_winner(&players[0], &players[1]) {
            return Ok((verdict, pass));
        }
        debug!("tie-breaker pass {} still tied at {}", pass, players[0].score);
    }
}

/// Play one complete game: standard rounds, then the tie-breaker if needed.
pub fn play_game<D, O>(
    players: &mut [PlayerScore; 2],
    dice: &mut D,
    observer: &mut O,
) -> Result<GameResult, O::Error>
where
    D: DieSource + ?Sized,
    O: GameObserver + ?Sized,
{
    observer.game_started()?;
    play_standard_rounds(players, dice, observer)?;

    let (verdict, tie_breaker_passes) = match decide_winner(&players[0], &players[1]) {
        Some(verdict) => (verdict, 0),
        None => {
            observer.tie_breaker_started()?;
            play_tie_breaker(players, dice, observer)?
        }
    };
    observer.verdict(&verdict)?;

    info!(
        "{} beat {} by {} ({} tie-breaker passes)",
        verdict.winner, verdict.loser, verdict.margin, tie_breaker_passes
    );
    Ok(GameResult {
        verdict,
        tie_breaker_passes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice_mechanics::ScriptedDice;

    fn duel(a: i32, b: i32) -> [PlayerScore; 2] {
        [PlayerScore::new("alice", a), PlayerScore::new("bob", b)]
    }

    /// Records the order of events for assertions.
    #[derive(Default)]
    struct EventLog {
        events: Vec<String>,
    }

    impl GameObserver for EventLog {
        type Error = Infallible;

        fn round_started(&mut self, round: usize) -> Result<(), Infallible> {
            self.events.push(format!("round {round}"));
            Ok(())
        }

        fn turn_scored(&mut self, username: &str, outcome: &TurnOutcome) -> Result<(), Infallible> {
            self.events
                .push(format!("{username} -> {}", outcome.total()));
            Ok(())
        }

        fn tie_breaker_started(&mut self) -> Result<(), Infallible> {
            self.events.push("tie-breaker".to_string());
            Ok(())
        }

        fn verdict(&mut self, verdict: &Verdict) -> Result<(), Infallible> {
            self.events
                .push(format!("{} wins by {}", verdict.winner, verdict.margin));
            Ok(())
        }
    }

    #[test]
    fn test_negative_points_kept_when_total_non_negative() {
        assert_eq!(
            apply_standard_roll(3, -2),
            TurnOutcome::Gained {
                points: -2,
                total: 1
            }
        );
    }

    #[test]
    fn test_wipe_when_total_negative() {
        assert_eq!(apply_standard_roll(1, -2), TurnOutcome::Wiped { points: -2 });
        assert_eq!(apply_standard_roll(1, -2).total(), 0);
    }

    #[test]
    fn test_zero_points_reported_distinctly() {
        assert_eq!(apply_standard_roll(7, 0), TurnOutcome::NoPoints { total: 7 });
        assert_eq!(apply_standard_roll(0, 0), TurnOutcome::NoPoints { total: 0 });
    }

    #[test]
    fn test_exact_zero_total_is_not_wiped() {
        assert_eq!(
            apply_standard_roll(2, -2),
            TurnOutcome::Gained {
                points: -2,
                total: 0
            }
        );
    }

    #[test]
    fn test_decide_winner() {
        let [a, b] = duel(21, 18);
        let v = decide_winner(&a, &b).unwrap();
        assert_eq!(v.winner, "alice");
        assert_eq!(v.loser, "bob");
        assert_eq!(v.margin, 3);

        let v = decide_winner(&b, &a).unwrap();
        assert_eq!(v.winner, "alice");
        assert_eq!(v.margin, 3);
    }

    #[test]
    fn test_decide_winner_tied_is_idempotent() {
        let [a, b] = duel(12, 12);
        for _ in 0..10 {
            assert_eq!(decide_winner(&a, &b), None);
        }
        assert_eq!(a.score, 12);
        assert_eq!(b.score, 12);
    }

    #[test]
    fn test_tie_breaker_scenario() {
        let mut players = duel(12, 12);
        let mut dice = ScriptedDice::new([4, 4, 5, 2]);
        let (verdict, passes) =
            play_tie_breaker(&mut players, &mut dice, &mut SilentObserver).unwrap();
        assert_eq!(passes, 2);
        assert_eq!(players[0].score, 21);
        assert_eq!(players[1].score, 18);
        assert_eq!(verdict.winner, "alice");
        assert_eq!(verdict.margin, 3);
    }

    #[test]
    fn test_tie_breaker_with_random_dice_terminates() {
        let mut players = duel(0, 0);
        let mut dice = crate::dice_mechanics::RandomDice::seeded(7);
        let (verdict, passes) =
            play_tie_breaker(&mut players, &mut dice, &mut SilentObserver).unwrap();
        assert!(passes >= 1);
        assert!(verdict.margin > 0);
        assert_ne!(players[0].score, players[1].score);
    }

    #[test]
    fn test_standard_rounds_decide_game() {
        // alice throws (1,3) -> 14 each round, bob throws (2,4) -> 16 each round.
        let script: Vec<i32> = (0..STANDARD_ROUNDS).flat_map(|_| [1, 3, 2, 4]).collect();
        let mut dice = ScriptedDice::new(script);
        let mut players = duel(0, 0);
        let mut log = EventLog::default();

        let result = play_game(&mut players, &mut dice, &mut log).unwrap();
        assert_eq!(players[0].score, 70);
        assert_eq!(players[1].score, 80);
        assert_eq!(result.verdict.winner, "bob");
        assert_eq!(result.verdict.margin, 10);
        assert_eq!(result.tie_breaker_passes, 0);
        assert_eq!(dice.remaining(), 0);

        assert_eq!(log.events[0], "round 1");
        assert_eq!(log.events[1], "alice -> 14");
        assert_eq!(log.events[2], "bob -> 16");
        assert!(!log.events.contains(&"tie-breaker".to_string()));
        assert_eq!(log.events.last().unwrap(), "bob wins by 10");
    }

    #[test]
    fn test_tied_game_enters_tie_breaker() {
        let mut script: Vec<i32> = (0..STANDARD_ROUNDS).flat_map(|_| [1, 3, 1, 3]).collect();
        script.extend([4, 4, 5, 2]);
        let mut dice = ScriptedDice::new(script);
        let mut players = duel(0, 0);
        let mut log = EventLog::default();

        let result = play_game(&mut players, &mut dice, &mut log).unwrap();
        assert_eq!(result.tie_breaker_passes, 2);
        assert_eq!(result.verdict.winner, "alice");
        assert_eq!(result.verdict.margin, 3);
        assert_eq!(players[0].score, 79);
        assert_eq!(players[1].score, 76);
        assert!(log.events.contains(&"tie-breaker".to_string()));
    }

    #[test]
    fn test_prior_scores_carry_into_game() {
        // bob starts 1 point ahead and then wipes on round 1: (1,2) -> -2.
        let mut script = vec![2, 4, 1, 2];
        script.extend((1..STANDARD_ROUNDS).flat_map(|_| [2, 4, 2, 4]));
        let mut dice = ScriptedDice::new(script);
        let mut players = duel(0, 1);
        play_game(&mut players, &mut dice, &mut SilentObserver).unwrap();
        assert_eq!(players[0].score, 80);
        assert_eq!(players[1].score, 64);
    }
}
