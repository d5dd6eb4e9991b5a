//! Session controller: admit two players, then play games until they stop.
//!
//! A [`Session`] owns everything a sitting needs: the score store, the dice,
//! the console and the [`Scoreboard`]. Scores carry over from one game to
//! the next and are written back to the store after every game.

use std::io::{BufRead, Write};

use log::info;

use crate::auth::admit_player;
use crate::console::Console;
use crate::constants::{LEADERBOARD_SIZE, PLAYER_COUNT};
use crate::dice_mechanics::DieSource;
use crate::error::DuelError;
use crate::game_mechanics::play_game;
use crate::render::render_leaderboard;
use crate::storage::ScoreStore;
use crate::types::{GameResult, LeaderboardEntry, Scoreboard};

pub struct Session<S, D, R, W> {
    store: S,
    dice: D,
    console: Console<R, W>,
    scoreboard: Scoreboard,
    leaderboard_size: usize,
}

impl<S, D, R, W> Session<S, D, R, W>
where
    S: ScoreStore,
    D: DieSource,
    R: BufRead,
    W: Write,
{
    pub fn new(store: S, dice: D, console: Console<R, W>) -> Self {
        Self {
            store,
            dice,
            console,
            scoreboard: Scoreboard::new(),
            leaderboard_size: LEADERBOARD_SIZE,
        }
    }

    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Run the account menu once per missing player.
    pub fn sign_in_players(&mut self) -> Result<(), DuelError> {
        while self.scoreboard.len() < PLAYER_COUNT {
            admit_player(&mut self.store, &mut self.console, &mut self.scoreboard)?;
        }
        Ok(())
    }

    /// Play one game on the current scoreboard.
    pub fn play_game(&mut self) -> Result<GameResult, DuelError> {
        let signed_in = self.scoreboard.len();
        let players = self
            .scoreboard
            .as_pair_mut()
            .ok_or(DuelError::NotEnoughPlayers(signed_in))?;
        play_game(players, &mut self.dice, &mut self.console)
    }

    /// Write every player's current score back to the store.
    pub fn store_scores(&mut self) -> Result<(), DuelError> {
        for player in self.scoreboard.players() {
            self.store.set_score(&player.username, player.score)?;
        }
        Ok(())
    }

    /// Fetch and print the leaderboard.
    pub fn show_leaderboard(&mut self) -> Result<Vec<LeaderboardEntry>, DuelError> {
        let entries = self.store.top_n(self.leaderboard_size)?;
        self.console.write_raw(&render_leaderboard(&entries))?;
        Ok(entries)
    }

    /// The whole sitting: sign in, then play, save and rank until the players
    /// decline another game. Running out of input at that question ends the
    /// session normally.
    pub fn run(&mut self) -> Result<(), DuelError> {
        self.sign_in_players()?;
        let mut games = 0u32;
        loop {
            self.play_game()?;
            games += 1;
            self.store_scores()?;
            self.show_leaderboard()?;

            match self.console.confirm("\nWould you like to play another game?: ") {
                Ok(true) => continue,
                Ok(false) | Err(DuelError::InputClosed) => break,
                Err(e) => return Err(e),
            }
        }
        info!("Session ended after {} game(s)", games);
        Ok(())
    }
}
