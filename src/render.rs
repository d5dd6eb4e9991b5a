//! Text rendering: die faces, boxed menus and the leaderboard.
//!
//! A die is five lines, seven columns wide:
//!
//! ```text
//! +-----+
//! | o   |
//! |  o  |
//! |   o |
//! +-----+
//! ```
//!
//! Pips sit in four slots: the corner pair (faces >= 2), the other corner pair
//! (faces >= 4), the middle pair (face 6) and the centre (odd faces).

use crate::types::LeaderboardEntry;

const DIE_EDGE: &str = "+-----+";
const DIE_GAP: &str = "\t\t";

/// The five lines of one die face.
pub fn die_face_lines(face: i32, pip: char) -> [String; 5] {
    let slot = |lit: bool| if lit { pip } else { ' ' };
    let corner = slot(face >= 2);
    let other_corner = slot(face >= 4);
    let middle = slot(face == 6);
    let centre = slot(face % 2 != 0);
    [
        DIE_EDGE.to_string(),
        format!("| {corner} {other_corner} |"),
        format!("| {middle}{centre}{middle} |"),
        format!("| {other_corner} {corner} |"),
        DIE_EDGE.to_string(),
    ]
}

/// Render dice side by side, one text line per row, each ending in a newline.
pub fn render_dice(faces: &[i32], pip: char) -> String {
    let dice: Vec<[String; 5]> = faces.iter().map(|&f| die_face_lines(f, pip)).collect();
    let mut out = String::new();
    for row in 0..5 {
        let line: Vec<&str> = dice.iter().map(|d| d[row].as_str()).collect();
        out.push_str(&line.join(DIE_GAP));
        out.push('\n');
    }
    out
}

/// Minimum option text width, so short titles still leave room to read.
const MIN_TEXT_WIDTH: usize = 10;

/// A boxed, numbered text menu.
///
/// ```text
/// +--------------------+
/// | Account Management |
/// +--------------------+
/// | (1) Sign up        |
/// | (2) Sign in        |
/// +--------------------+
/// ```
#[derive(Clone, Debug)]
pub struct Menu {
    title: String,
    width: Option<usize>,
    options: Vec<String>,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: None,
            options: Vec::new(),
        }
    }

    /// Inner width between the `+` corners. Values that would squeeze the
    /// title are raised to fit it.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Append an option; it is numbered by position, starting at 1.
    pub fn add(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    fn number_width(&self) -> usize {
        self.options.len().max(1).to_string().len()
    }

    fn inner_width(&self) -> usize {
        let title_width = self.title.chars().count() + 2;
        let floor = MIN_TEXT_WIDTH + 5 + self.number_width();
        self.width.unwrap_or(0).max(title_width).max(floor)
    }

    pub fn render(&self) -> String {
        let width = self.inner_width();
        let digits = self.number_width();
        let text_width = width - 5 - digits;
        let separator = format!("+{}+\n", "-".repeat(width));

        let mut out = separator.clone();
        out.push_str(&format!("| {:^w$} |\n", self.title, w = width - 2));
        out.push_str(&separator);

        for (i, option) in self.options.iter().enumerate() {
            let number = format!("({})", i + 1);
            for (j, line) in wrap_words(option.trim(), text_width).iter().enumerate() {
                if j == 0 {
                    out.push_str(&format!("| {number:<nw$} ", nw = digits + 2));
                } else {
                    out.push_str(&format!("| {:nw$} ", "", nw = digits + 2));
                }
                out.push_str(&format!("{line:<text_width$} |\n"));
            }
        }
        out.push_str(&separator);
        out
    }
}

/// Greedy word wrap. Words longer than `width` are split mid-word.
/// Always returns at least one line.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// "Top N Players:" followed by one ranked line per entry.
pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    let mut out = format!("\n\t\tTop {} Players:\n", entries.len());
    for entry in entries {
        out.push_str(&format!(
            "{}. {}  --  Score: {}\n",
            entry.rank, entry.username, entry.score
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_one() {
        let lines = die_face_lines(1, 'o');
        assert_eq!(lines[1], "|     |");
        assert_eq!(lines[2], "|  o  |");
        assert_eq!(lines[3], "|     |");
    }

    #[test]
    fn test_face_four() {
        let lines = die_face_lines(4, 'o');
        assert_eq!(lines[1], "| o o |");
        assert_eq!(lines[2], "|     |");
        assert_eq!(lines[3], "| o o |");
    }

    #[test]
    fn test_face_six() {
        let lines = die_face_lines(6, '*');
        assert_eq!(lines[1], "| * * |");
        assert_eq!(lines[2], "| * * |");
        assert_eq!(lines[3], "| * * |");
    }

    #[test]
    fn test_pip_count_matches_face() {
        for face in 1..=6 {
            let pips: usize = die_face_lines(face, 'o')
                .iter()
                .map(|l| l.matches('o').count())
                .sum();
            assert_eq!(pips, face as usize, "face {face}");
        }
    }

    #[test]
    fn test_render_two_dice_side_by_side() {
        let out = render_dice(&[2, 5], 'o');
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "+-----+\t\t+-----+");
        assert_eq!(lines[2], "|     |\t\t|  o  |");
    }

    #[test]
    fn test_menu_lines_share_width() {
        let menu = Menu::new("Account Management").add("Sign up").add("Sign in");
        let out = menu.render();
        let widths: Vec<usize> = out.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "{out}");
        assert!(out.contains("| Account Management |"));
        assert!(out.contains("| (1) Sign up"));
        assert!(out.contains("| (2) Sign in"));
    }

    #[test]
    fn test_menu_wraps_long_options() {
        let menu = Menu::new("Menu").add("An option far too long to fit on one line");
        let out = menu.render();
        let widths: Vec<usize> = out.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "{out}");
        assert!(out.lines().count() > 5);
    }

    #[test]
    fn test_menu_respects_wider_width() {
        let menu = Menu::new("Hi").with_width(30).add("Go");
        assert!(menu.render().starts_with(&format!("+{}+", "-".repeat(30))));
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap_words("one two three", 7), ["one two", "three"]);
        assert_eq!(wrap_words("abcdefgh", 3), ["abc", "def", "gh"]);
        assert_eq!(wrap_words("", 5), [""]);
    }

    #[test]
    fn test_render_leaderboard() {
        let entries = vec![
            LeaderboardEntry {
                rank: 1,
                username: "bob".into(),
                score: 80,
            },
            LeaderboardEntry {
                rank: 2,
                username: "alice".into(),
                score: 70,
            },
        ];
        let out = render_leaderboard(&entries);
        assert!(out.contains("Top 2 Players:"));
        assert!(out.contains("1. bob  --  Score: 80\n"));
        assert!(out.contains("2. alice  --  Score: 70\n"));
    }
}
