//! Core data structures: the session score map, roll results and verdicts.
//!
//! The central type is [`Scoreboard`], the ordered username → score map owned
//! by a [`crate::session::Session`]. It is filled at sign-in, mutated by the
//! round engine through [`Scoreboard::as_pair_mut`] and written back to the
//! store after every game.

use serde::Serialize;

/// One signed-in player and their running score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerScore {
    pub username: String,
    pub score: i32,
}

impl PlayerScore {
    pub fn new(username: impl Into<String>, score: i32) -> Self {
        Self {
            username: username.into(),
            score,
        }
    }
}

/// Session score map. Insertion order is sign-in order, which is also turn order.
#[derive(Clone, Debug, Default)]
pub struct Scoreboard {
    players: Vec<PlayerScore>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player at the end of the turn order.
    ///
    /// Returns false (and leaves the board untouched) if the username is
    /// already signed in.
    pub fn insert(&mut self, username: &str, score: i32) -> bool {
        if self.contains(username) {
            return false;
        }
        self.players.push(PlayerScore::new(username, score));
        true
    }

    pub fn contains(&self, username: &str) -> bool {
        self.players.iter().any(|p| p.username == username)
    }

    pub fn score_of(&self, username: &str) -> Option<i32> {
        self.players
            .iter()
            .find(|p| p.username == username)
            .map(|p| p.score)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players in turn order.
    pub fn players(&self) -> &[PlayerScore] {
        &self.players
    }

    /// The two duelists, or `None` unless exactly two players are signed in.
    pub fn as_pair_mut(&mut self) -> Option<&mut [PlayerScore; 2]> {
        self.players.as_mut_slice().try_into().ok()
    }
}

/// Which kind of throw a roll is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollKind {
    /// Two dice with the double/odd/even adjustments.
    Standard,
    /// One die, face value only.
    TieBreaker,
}

/// A scored throw.
///
/// `faces` holds the dice thrown first (two for [`RollKind::Standard`], one
/// for [`RollKind::TieBreaker`]); `bonus_die` is the extra die a double earns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roll {
    pub kind: RollKind,
    pub faces: Vec<i32>,
    pub bonus_die: Option<i32>,
    pub points: i32,
    pub is_double: bool,
    /// Odd two-die sum. Always false for tie-breaker throws.
    pub is_odd: bool,
}

/// What a standard turn did to the player's score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Points were added (they may be negative, as long as the total stays >= 0).
    Gained { points: i32, total: i32 },
    /// The roll was worth exactly zero.
    NoPoints { total: i32 },
    /// The roll would have taken the total below zero; the score was reset.
    Wiped { points: i32 },
}

impl TurnOutcome {
    /// The player's score after the turn.
    pub fn total(&self) -> i32 {
        match *self {
            TurnOutcome::Gained { total, .. } | TurnOutcome::NoPoints { total } => total,
            TurnOutcome::Wiped { .. } => 0,
        }
    }
}

/// A decided duel: who won and by how much.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub winner: String,
    pub loser: String,
    pub margin: i32,
}

/// Result of one complete game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub verdict: Verdict,
    /// Number of tie-breaker passes played (0 if the standard rounds decided it).
    pub tie_breaker_passes: u32,
}

/// One row of the ranked leaderboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub username: String,
    pub score: i32,
}
