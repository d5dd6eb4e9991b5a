//! Environment configuration and logging setup for the `dice-duel` binary.
//!
//! Reads `DICE_DUEL_DB`, `DICE_DUEL_SEED` and `DICE_DUEL_LEADERBOARD_SIZE`.
//! Command-line flags override these values.

use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{DEFAULT_DB_PATH, LEADERBOARD_SIZE};
use crate::error::DuelError;

pub const DB_VAR: &str = "DICE_DUEL_DB";
pub const SEED_VAR: &str = "DICE_DUEL_SEED";
pub const LEADERBOARD_SIZE_VAR: &str = "DICE_DUEL_LEADERBOARD_SIZE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuelConfig {
    pub db_path: PathBuf,
    /// `None` seeds the dice from the operating system.
    pub seed: Option<u64>,
    pub leaderboard_size: usize,
    pub pause: bool,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            seed: None,
            leaderboard_size: LEADERBOARD_SIZE,
            pause: true,
        }
    }
}

impl DuelConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, DuelError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DuelError> {
        let mut config = Self::default();
        if let Some(path) = lookup(DB_VAR).filter(|p| !p.is_empty()) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(SEED_VAR) {
            config.seed = Some(parse_var(SEED_VAR, &raw)?);
        }
        if let Some(raw) = lookup(LEADERBOARD_SIZE_VAR) {
            config.leaderboard_size = parse_var(LEADERBOARD_SIZE_VAR, &raw)?;
        }
        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T, DuelError> {
    raw.trim()
        .parse()
        .map_err(|_| DuelError::InvalidConfig(format!("{name}={raw:?} is not a valid number")))
}

/// Install `env_logger` on stderr, `warn` unless `RUST_LOG` says otherwise.
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}
