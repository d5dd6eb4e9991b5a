//! # Dice Duel — two-player dice game with a persistent leaderboard
//!
//! Two players sign in against a local SQLite database, play five rounds of
//! two-dice throws, settle ties with a sudden-death single-die tie-breaker,
//! and have their totals saved and ranked.
//!
//! ## Scoring
//!
//! | Throw | Points |
//! |-------|--------|
//! | Double (two equal faces) | sum + one extra die |
//! | Odd sum | sum − 5 (may be negative) |
//! | Even sum | sum + 10 |
//! | Tie-breaker (one die) | face value |
//!
//! A standard throw that would take a player's total below zero wipes it to 0
//! instead. Tie-breaker throws are always added.
//!
//! ## Layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`dice_mechanics`] | Die sources and per-roll scoring |
//! | [`game_mechanics`] | Round engine, wipe rule, tie-breaker, winner check |
//! | [`storage`] | [`storage::ScoreStore`] and its SQLite implementation |
//! | [`auth`] | Credential rules, sign-up and sign-in flows |
//! | [`session`] | Sign in, play, save, rank, repeat |
//! | [`console`] | Prompts and game narration |
//! | [`render`] | Die faces, menus, leaderboard text |
//! | [`env_config`] | Environment configuration and logging setup |

pub mod auth;
pub mod console;
pub mod constants;
pub mod dice_mechanics;
pub mod env_config;
pub mod error;
pub mod game_mechanics;
pub mod render;
pub mod session;
pub mod storage;
pub mod types;

pub use error::DuelError;
