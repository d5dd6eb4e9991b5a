//! Account management: credential rules and the sign-up / sign-in flows.
//!
//! Each player picks an [`AccountAction`] from the account menu. Sign-up
//! hands over to sign-in when the username is taken, and sign-in hands over
//! to sign-up after [`MAX_SIGN_IN_ATTEMPTS`] failures, so the flow only ends
//! once a player is on the scoreboard (or input runs out).

use std::io::{BufRead, Write};

use log::{info, warn};
use thiserror::Error;

use crate::console::Console;
use crate::constants::*;
use crate::error::DuelError;
use crate::render::Menu;
use crate::storage::ScoreStore;
use crate::types::Scoreboard;

/// Why a proposed username or password was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialProblem {
    #[error("Your username should be at least 3 characters long!")]
    UsernameTooShort,
    #[error("Your password is supposed to be between 6-12 characters!")]
    PasswordLength,
    #[error("Your password needs to contain a symbol, a number and a letter!")]
    PasswordComposition,
}

pub fn validate_username(username: &str) -> Result<(), CredentialProblem> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(CredentialProblem::UsernameTooShort);
    }
    Ok(())
}

/// Length in `6..=12` characters, with at least one letter, digit and symbol.
pub fn validate_password(password: &str) -> Result<(), CredentialProblem> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(CredentialProblem::PasswordLength);
    }
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(char::is_numeric);
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(&c));
    if has_letter && has_digit && has_symbol {
        Ok(())
    } else {
        Err(CredentialProblem::PasswordComposition)
    }
}

/// Entries of the account menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountAction {
    SignUp,
    SignIn,
}

impl AccountAction {
    pub const ALL: [AccountAction; 2] = [AccountAction::SignUp, AccountAction::SignIn];

    pub fn label(self) -> &'static str {
        match self {
            AccountAction::SignUp => "Sign up",
            AccountAction::SignIn => "Sign in",
        }
    }

    /// Map a 1-based menu choice back to its action.
    pub fn from_choice(choice: usize) -> Option<Self> {
        choice
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn menu() -> Menu {
        Self::ALL
            .iter()
            .fold(Menu::new("Account Management"), |menu, action| {
                menu.add(action.label())
            })
    }
}

fn prompt_valid_username<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<String, DuelError> {
    loop {
        let username = console.prompt("Please enter your username: ")?;
        match validate_username(&username) {
            Ok(()) => return Ok(username),
            Err(problem) => console.say(problem)?,
        }
    }
}

fn prompt_valid_password<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<String, DuelError> {
    loop {
        let password = console.prompt("Please enter your password: ")?;
        match validate_password(&password) {
            Ok(()) => return Ok(password),
            Err(problem) => console.say(problem)?,
        }
    }
}

/// Registration form. Returns the new username, or `None` when the player
/// should be sent to sign-in instead.
pub fn sign_up<S, R, W>(
    store: &mut S,
    console: &mut Console<R, W>,
    scoreboard: &mut Scoreboard,
) -> Result<Option<String>, DuelError>
where
    S: ScoreStore + ?Sized,
    R: BufRead,
    W: Write,
{
    console.say("\n -- Registration Form -- ")?;
    let username = prompt_valid_username(console)?;
    let password = prompt_valid_password(console)?;

    if store.username_exists(&username)? {
        console.say("You should be on the login page! Redirecting you...\n")?;
        return Ok(None);
    }
    match store.register(&username, &password) {
        Ok(()) => {}
        Err(DuelError::UsernameTaken(_)) => {
            console.say("You should be on the login page! Redirecting you...\n")?;
            return Ok(None);
        }
        Err(e) => return Err(e),
    }

    scoreboard.insert(&username, 0);
    console.say(format!("Account created successfully! Welcome {username}"))?;
    Ok(Some(username))
}

/// Login form with [`MAX_SIGN_IN_ATTEMPTS`] attempts. Returns the signed-in
/// username, or `None` when the player should be sent to sign-up.
pub fn sign_in<S, R, W>(
    store: &S,
    console: &mut Console<R, W>,
    scoreboard: &mut Scoreboard,
) -> Result<Option<String>, DuelError>
where
    S: ScoreStore + ?Sized,
    R: BufRead,
    W: Write,
{
    console.say("\n --    Login Form    -- ")?;
    for attempt in 1..=MAX_SIGN_IN_ATTEMPTS {
        let username =
            console.prompt_non_empty("Please enter your username: ", "Please re-enter your username: ")?;
        let password =
            console.prompt_non_empty("Please enter your password: ", "Please re-enter your password: ")?;

        if scoreboard.contains(&username) {
            warn!("{} is already signed in (attempt {})", username, attempt);
            console.say("A user already logged into that account. Please try again")?;
        } else if store.credentials_match(&username, &password)? {
            let score = store.get_score(&username)?;
            scoreboard.insert(&username, score);
            info!("{} signed in with score {}", username, score);
            console.say(format!("Login successful! Welcome {username}"))?;
            return Ok(Some(username));
        } else {
            warn!("Failed sign-in for {} (attempt {})", username, attempt);
            if attempt < MAX_SIGN_IN_ATTEMPTS {
                console.say("Username and/or password is incorrect. Please try again.")?;
            }
        }
    }

    console.say(
        "You exceeded the amount of times it takes to sign in,\ntherefore you will be redirected to a signup form!",
    )?;
    Ok(None)
}

/// Run the account menu for one player until they are on the scoreboard.
pub fn admit_player<S, R, W>(
    store: &mut S,
    console: &mut Console<R, W>,
    scoreboard: &mut Scoreboard,
) -> Result<String, DuelError>
where
    S: ScoreStore + ?Sized,
    R: BufRead,
    W: Write,
{
    let menu = AccountAction::menu();
    let choice = console.choose(&menu)?;
    let mut action = AccountAction::from_choice(choice).unwrap_or(AccountAction::SignIn);

    loop {
        let admitted = match action {
            AccountAction::SignUp => sign_up(store, console, scoreboard)?,
            AccountAction::SignIn => sign_in(&*store, console, scoreboard)?,
        };
        if let Some(username) = admitted {
            return Ok(username);
        }
        action = match action {
            AccountAction::SignUp => AccountAction::SignIn,
            AccountAction::SignIn => AccountAction::SignUp,
        };
    }
}
