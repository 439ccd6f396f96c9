//! Command-line vocabulary shared by the binary and the library.
//!
//! [`Direction`] names the four compass directions focus can move in, and
//! [`Invocation`] is the parsed form of `winfocus <direction> [min_distance]`.

use std::fmt;

/// Threshold used when neither the command line nor the config file supplies
/// one.
pub const MIN_DISTANCE_DEFAULT: u32 = 50;

/// Direction to move focus in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Parse a direction from the first character of `s`.
    ///
    /// `"u"`, `"up"` and `"upward"` all select [`Direction::Up`]; anything
    /// whose first character is not one of `u`, `d`, `l`, `r` is rejected.
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.chars().next()? {
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Required sign of the delta on each axis, as `(dir_x, dir_y)`.
    ///
    /// Screen coordinates grow downward, so `Up` is `(0, -1)`.
    pub fn axis(self) -> (i64, i64) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// A fully parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub direction: Direction,
    /// Snap threshold from the command line, `None` if it was omitted.
    pub min_distance: Option<u32>,
}

impl Invocation {
    /// Parse the arguments that follow the program name.
    ///
    /// Returns `None` when the direction is missing or unrecognised, in which
    /// case the caller prints [`usage`] and exits successfully.
    pub fn parse<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let direction = Direction::from_arg(args.next()?.as_ref())?;
        let min_distance = args.next().map(|s| parse_min_distance(s.as_ref()));
        Some(Self {
            direction,
            min_distance,
        })
    }
}

/// Usage line printed for a missing or unknown direction.
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {} {{up|down|left|right}} [min_distance={}]",
        program, MIN_DISTANCE_DEFAULT
    )
}

/// Best-effort integer parse in the manner of C's `atoi`.
///
/// Leading whitespace and one sign are accepted, then as many digits as are
/// present.  Input without leading digits yields `0`.  Negative values clamp
/// to `0`: no delta magnitude is below a negative threshold, so both mean
/// "never snap".
pub fn parse_min_distance(s: &str) -> u32 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        });
    if negative {
        0
    } else {
        value
    }
}
