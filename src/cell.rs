use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the grid, addressed by row and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    /// Squared Euclidean distance (no sqrt)
    pub fn distance_squared(&self, other: &Cell) -> i32 {
        let dr = self.row - other.row;
        let dc = self.col - other.col;
        dr * dr + dc * dc
    }

    /// Euclidean distance, used both as step cost and as heuristic
    pub fn distance(&self, other: &Cell) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// True when `other` is one of the 8 surrounding cells
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self != other && (self.row - other.row).abs() <= 1 && (self.col - other.col).abs() <= 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Format a path as `(r,c) -> (r,c) -> ...`
pub fn format_path(path: &[Cell]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Sum of step distances along a path
pub fn path_length(path: &[Cell]) -> f64 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
