//! Document coordinates in tab-expanded column space

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (line, column) position. Columns are visual: a tab spans up to the
/// next tab stop. Ordering is lexicographic on (line, column).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coordinates {
    pub line: usize,
    pub column: usize,
}

impl Coordinates {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Start of the document
    pub const fn origin() -> Self {
        Self { line: 0, column: 0 }
    }
}

impl From<(usize, usize)> for Coordinates {
    fn from((line, column): (usize, usize)) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(Coordinates::new(0, 10) < Coordinates::new(1, 0));
        assert!(Coordinates::new(2, 3) < Coordinates::new(2, 4));
        assert_eq!(
            Coordinates::new(5, 1).max(Coordinates::new(4, 9)),
            Coordinates::new(5, 1)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinates::new(3, 7).to_string(), "3:7");
    }
}
