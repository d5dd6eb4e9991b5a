//! Line-oriented console: prompts, menus and game narration.
//!
//! [`Console`] is generic over its reader and writer so sessions can be
//! driven from in-memory buffers. It implements [`GameObserver`], turning
//! engine events into the text players see.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::constants::{DEFAULT_PIP, EVEN_SUM_BONUS, STANDARD_ROUNDS};
use crate::error::DuelError;
use crate::game_mechanics::GameObserver;
use crate::render::{render_dice, Menu};
use crate::types::{Roll, RollKind, TurnOutcome, Verdict};

pub struct Console<R, W> {
    input: R,
    output: W,
    pause: bool,
    pip: char,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pause: true,
            pip: DEFAULT_PIP,
        }
    }

    /// Whether to wait for Enter after every turn (on by default).
    pub fn with_pause(mut self, pause: bool) -> Self {
        self.pause = pause;
        self
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Write one line.
    pub fn say(&mut self, line: impl Display) -> Result<(), DuelError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Write raw text with no trailing newline added.
    pub fn write_raw(&mut self, text: &str) -> Result<(), DuelError> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Show `message` and read one line, without its line ending.
    pub fn prompt(&mut self, message: &str) -> Result<String, DuelError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(DuelError::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Prompt until a non-empty answer is given, switching to `retry` after
    /// the first empty one.
    pub fn prompt_non_empty(&mut self, message: &str, retry: &str) -> Result<String, DuelError> {
        let mut answer = self.prompt(message)?;
        while answer.is_empty() {
            answer = self.prompt(retry)?;
        }
        Ok(answer)
    }

    /// Ask a yes/no question. Only answers starting with `y`/`Y` count as yes;
    /// empty answers ask again.
    pub fn confirm(&mut self, question: &str) -> Result<bool, DuelError> {
        loop {
            let answer = self.prompt(question)?;
            match answer.trim().chars().next() {
                Some(c) => return Ok(c.eq_ignore_ascii_case(&'y')),
                None => continue,
            }
        }
    }

    /// Display `menu` until a valid option number is entered. Returns it (1-based).
    pub fn choose(&mut self, menu: &Menu) -> Result<usize, DuelError> {
        loop {
            self.say("")?;
            self.write_raw(&menu.render())?;
            let answer = self.prompt(&format!("Please enter option (1-{}): ", menu.len()))?;
            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=menu.len()).contains(&n) => return Ok(n),
                Ok(_) => self.say(format!(
                    "Please enter a number between 1 and {}.",
                    menu.len()
                ))?,
                Err(_) => self.say("Please do not input a character.")?,
            }
        }
    }

    /// Wait for Enter, unless pausing is off.
    pub fn pause(&mut self) -> Result<(), DuelError> {
        if self.pause {
            self.prompt("Press enter to continue")?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> GameObserver for Console<R, W> {
    type Error = DuelError;

    fn game_started(&mut self) -> Result<(), DuelError> {
        self.say("\nLet the games begin!")
    }

    fn round_started(&mut self, round: usize) -> Result<(), DuelError> {
        self.say(format!("\n ----   Round {round}   ---- "))
    }

    fn turn_started(&mut self, username: &str) -> Result<(), DuelError> {
        self.say(format!("\n\t\t{username}'s turn:"))
    }

    fn rolled(&mut self, _username: &str, roll: &Roll) -> Result<(), DuelError> {
        let faces = render_dice(&roll.faces, self.pip);
        self.say(faces)?;
        if roll.kind == RollKind::TieBreaker {
            return Ok(());
        }
        if let Some(bonus) = roll.bonus_die {
            self.say("You get to roll an extra die since you rolled a double!")?;
            let bonus = render_dice(&[bonus], self.pip);
            self.say(bonus)?;
        } else if roll.is_odd {
            self.say("Oh no! The sum of your dice is an odd number!")?;
        } else {
            self.say(format!(
                "Yes! The sum of your dice is an even number so you will receive an additional {EVEN_SUM_BONUS} points!"
            ))?;
        }
        Ok(())
    }

    fn turn_scored(&mut self, username: &str, outcome: &TurnOutcome) -> Result<(), DuelError> {
        match *outcome {
            TurnOutcome::Gained { points, total } => self.say(format!(
                "{username} gained {points} points from this round, with an overall score of {total}!"
            )),
            TurnOutcome::NoPoints { total } => self.say(format!(
                "{username} gained no points from this round, with an overall score of {total}!"
            )),
            TurnOutcome::Wiped { .. } => self.say(format!(
                "{username} could not gain points from this round; the sum of their dice is odd!"
            )),
        }
    }

    fn turn_finished(&mut self, _username: &str) -> Result<(), DuelError> {
        self.pause()
    }

    fn tie_breaker_started(&mut self) -> Result<(), DuelError> {
        self.say(format!(
            "\nBoth players have the same score at the end of {STANDARD_ROUNDS} rounds! A tie-breaker will commence!\n"
        ))
    }

    fn verdict(&mut self, verdict: &Verdict) -> Result<(), DuelError> {
        self.say(format!(
            "{} wins with {} more points than {}!",
            verdict.winner, verdict.margin, verdict.loser
        ))
    }
}
