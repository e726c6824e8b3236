use std::fmt;

/// Source position of a token or statement.
///
/// Only the line is tracked; runtime errors report `file:line`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    pub line: u32,
}

impl Pos {
    pub const fn new(line: u32) -> Self {
        Pos { line }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.line)
    }
}
