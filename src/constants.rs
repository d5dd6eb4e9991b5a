//! Game constants: round structure, scoring adjustments and account rules.
//!
//! The scoring adjustments apply to the standard two-die roll only:
//! - a double earns one extra die, added to the sum
//! - an odd sum loses [`ODD_SUM_PENALTY`] points (the result may be negative)
//! - an even sum earns [`EVEN_SUM_BONUS`] extra points

/// Number of players in a duel.
pub const PLAYER_COUNT: usize = 2;

/// Number of standard rounds before a winner is decided.
pub const STANDARD_ROUNDS: usize = 5;

/// Highest face of a die. Faces run from 1 to this value inclusive.
pub const DIE_FACES: i32 = 6;

/// Subtracted from an odd, non-double two-die sum.
pub const ODD_SUM_PENALTY: i32 = 5;

/// Added to an even, non-double two-die sum.
pub const EVEN_SUM_BONUS: i32 = 10;

/// Default number of entries shown on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 5;

/// Minimum username length, in characters.
pub const MIN_USERNAME_LEN: usize = 3;

/// Password length bounds, in characters, both inclusive.
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 12;

/// Sign-in attempts before a player is sent to the sign-up form.
pub const MAX_SIGN_IN_ATTEMPTS: usize = 3;

/// Characters accepted as the "symbol" a password must contain.
pub const PASSWORD_SYMBOLS: [char; 22] = [
    '$', '£', '#', '!', '^', '&', ' ', '*', '(', ')', '-', '_', '+', '=', '[', ']', '.', ',', '/',
    '?', '~', '@',
];

/// Database file used when neither `--db` nor `DICE_DUEL_DB` is given.
pub const DEFAULT_DB_PATH: &str = "Database.db";

/// Character drawn for each pip on a rendered die.
pub const DEFAULT_PIP: char = 'o';
