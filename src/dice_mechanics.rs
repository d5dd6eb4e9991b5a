//! Dice sources and the per-roll scoring rules.
//!
//! A roll draws its faces from a [`DieSource`]. Production games use
//! [`RandomDice`] (a `SmallRng`, optionally seeded for reproducible games);
//! tests use [`ScriptedDice`] to replay exact faces.

use std::collections::VecDeque;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::constants::*;
use crate::types::{Roll, RollKind};

/// Anything that can throw a single six-sided die.
pub trait DieSource {
    /// Return a face in `1..=6`.
    fn roll_die(&mut self) -> i32;
}

/// Uniform dice backed by a `rand` generator.
pub struct RandomDice<R = SmallRng> {
    rng: R,
}

impl RandomDice<SmallRng> {
    /// Seed from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Deterministic dice: the same seed replays the same game.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DieSource for RandomDice<R> {
    #[inline]
    fn roll_die(&mut self) -> i32 {
        self.rng.random_range(1..=DIE_FACES)
    }
}

/// Replays a fixed sequence of faces, then continues with seeded random dice.
///
/// Faces are replayed exactly as given.
pub struct ScriptedDice {
    script: VecDeque<i32>,
    fallback: RandomDice,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = i32>) -> Self {
        Self {
            script: faces.into_iter().collect(),
            fallback: RandomDice::seeded(0),
        }
    }

    /// Scripted faces not yet thrown.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DieSource for ScriptedDice {
    fn roll_die(&mut self) -> i32 {
        match self.script.pop_front() {
            Some(face) => face,
            None => self.fallback.roll_die(),
        }
    }
}

/// True when every face shows the same value. An empty throw is not a double.
pub fn is_double(faces: &[i32]) -> bool {
    match faces.first() {
        Some(&first) => faces.iter().all(|&f| f == first),
        None => false,
    }
}

/// True when the faces add up to an odd number.
pub fn is_odd_sum(faces: &[i32]) -> bool {
    faces.iter().sum::<i32>() % 2 != 0
}

/// Score a standard two-die throw.
///
/// `bonus_die` is the extra die thrown after a double and is only read when
/// the two faces match:
/// - double: `sum + bonus`
/// - odd sum: `sum - 5`, flagged odd
/// - even sum: `sum + 10`
pub fn score_standard_roll(faces: [i32; 2], bonus_die: Option<i32>) -> Roll {
    let sum = faces[0] + faces[1];
    let double = is_double(&faces);
    let odd = !double && is_odd_sum(&faces);

    let (points, bonus_die) = if double {
        (sum + bonus_die.unwrap_or(0), bonus_die)
    } else if odd {
        (sum - ODD_SUM_PENALTY, None)
    } else {
        (sum + EVEN_SUM_BONUS, None)
    };

    Roll {
        kind: RollKind::Standard,
        faces: faces.to_vec(),
        bonus_die,
        points,
        is_double: double,
        is_odd: odd,
    }
}

/// Score a tie-breaker throw: the face value, never odd-flagged.
pub fn score_tie_breaker_roll(face: i32) -> Roll {
    Roll {
        kind: RollKind::TieBreaker,
        faces: vec![face],
        bonus_die: None,
        points: face,
        is_double: false,
        is_odd: false,
    }
}

/// Throw and score one roll of the given kind.
///
/// A standard roll draws two faces, plus a third only when the first two match.
pub fn roll<D: DieSource + ?Sized>(dice: &mut D, kind: RollKind) -> Roll {
    let roll = match kind {
        RollKind::TieBreaker => score_tie_breaker_roll(dice.roll_die()),
        RollKind::Standard => {
            let faces = [dice.roll_die(), dice.roll_die()];
            let bonus_die = if is_double(&faces) {
                Some(dice.roll_die())
            } else {
                None
            };
            score_standard_roll(faces, bonus_die)
        }
    };
    debug!(
        "{:?} roll {:?} bonus={:?} -> {} points (odd={})",
        roll.kind, roll.faces, roll.bonus_die, roll.points, roll.is_odd
    );
    roll
}

/// `(points, is_odd)` for one throw: two dice when `two_dice`, else a single die.
pub fn roll_points<D: DieSource + ?Sized>(dice: &mut D, two_dice: bool) -> (i32, bool) {
    let kind = if two_dice {
        RollKind::Standard
    } else {
        RollKind::TieBreaker
    };
    let roll = roll(dice, kind);
    (roll.points, roll.is_odd)
}
