use crate::cell::Cell;
use std::fmt;

/// Why a grid edit was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditConflict {
    /// Cell lies outside the grid
    OutOfBounds,
    /// Endpoint cannot be placed on an obstacle
    Blocked,
    /// Obstacle cannot be placed on the start or goal
    Endpoint,
    /// Start and goal must differ
    SameAsOtherEndpoint,
}

/// A grid edit that conflicts with the start/goal/obstacle invariants.
/// The grid is left untouched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidEdit {
    pub cell: Cell,
    pub conflict: EditConflict,
}

impl InvalidEdit {
    pub fn new(cell: Cell, conflict: EditConflict) -> Self {
        InvalidEdit { cell, conflict }
    }
}

impl fmt::Display for InvalidEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.conflict {
            EditConflict::OutOfBounds => "cell is outside the grid",
            EditConflict::Blocked => "cell is blocked",
            EditConflict::Endpoint => "cell is the start or goal",
            EditConflict::SameAsOtherEndpoint => "cell is already the other endpoint",
        };
        write!(f, "invalid edit at {}: {}", self.cell, reason)
    }
}

impl std::error::Error for InvalidEdit {}

/// Errors returned by the search engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Start or goal is not set
    NotConfigured,
    /// The grid changed after the engine was created
    StaleState,
    /// Path requested while the search has not found one
    NoPathAvailable,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NotConfigured => write!(f, "start and goal must both be set"),
            SearchError::StaleState => {
                write!(f, "grid changed under a live search; create a new engine")
            }
            SearchError::NoPathAvailable => write!(f, "no path available"),
        }
    }
}

impl std::error::Error for SearchError {}
