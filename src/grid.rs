use crate::cell::Cell;
use crate::error::{EditConflict, InvalidEdit};
use std::sync::atomic::{AtomicU64, Ordering};

/// Largest supported side length
pub const MAX_ROWS: i32 = 4096;

/// Source of grid identities; every grid and every clone gets a fresh one
static NEXT_GRID_ID: AtomicU64 = AtomicU64::new(0);

fn next_grid_id() -> u64 {
    NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed)
}

/// Row offsets visited by `neighbors`, in order
const ROW_ORDER: [i32; 3] = [0, -1, 1];
/// Column offsets visited by `neighbors`, in order
const COL_ORDER: [i32; 3] = [0, -1, 1];

/// Square grid of free/blocked cells with optional start and goal.
/// Invariant: start and goal are never blocked and never equal.
#[derive(Debug)]
pub struct Grid {
    /// Identity shared by no other grid, clones included
    id: u64,
    rows: i32,
    blocked: Vec<bool>,
    start: Option<Cell>,
    goal: Option<Cell>,
    /// Revision number - incremented whenever obstacles or endpoints change
    revision: u64,
}

impl Clone for Grid {
    /// A copy is an independent grid: it gets its own identity, so engines
    /// bound to the original treat it as stale.
    fn clone(&self) -> Self {
        Grid {
            id: next_grid_id(),
            rows: self.rows,
            blocked: self.blocked.clone(),
            start: self.start,
            goal: self.goal,
            revision: self.revision,
        }
    }
}

impl Grid {
    /// Create a new `rows` x `rows` grid with every cell free.
    /// `rows` is clamped into `0..=MAX_ROWS`.
    pub fn new(rows: i32) -> Self {
        let rows = rows.clamp(0, MAX_ROWS);
        Grid {
            id: next_grid_id(),
            rows,
            blocked: vec![false; rows as usize * rows as usize],
            start: None,
            goal: None,
            revision: 0,
        }
    }

    /// Create a grid with specific blocked cells (out-of-bounds cells are ignored)
    pub fn with_blocked(rows: i32, blocked: &[Cell]) -> Self {
        let mut grid = Self::new(rows);
        for cell in blocked {
            if let Some(id) = grid.index(*cell) {
                grid.blocked[id] = true;
            }
        }
        grid
    }

    /// Number of rows (and columns)
    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    pub fn goal(&self) -> Option<Cell> {
        self.goal
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Process-unique identity of this grid
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= 0 && cell.row < self.rows && cell.col >= 0 && cell.col < self.rows
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row as usize * self.rows as usize + cell.col as usize)
        } else {
            None
        }
    }

    /// Check if a cell is blocked. Out of bounds is considered blocked.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        match self.index(cell) {
            Some(id) => self.blocked[id],
            None => true,
        }
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Iterate over every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.rows).map(move |col| Cell::new(row, col)))
    }

    /// Free cells among the 8 surrounding `cell`, clipped to the grid.
    ///
    /// Order is fixed: rows `row, row-1, row+1`, and within each row
    /// columns `col, col-1, col+1`. The search's tie-break depends on it.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let mut result = Vec::with_capacity(8);
        for dr in ROW_ORDER {
            for dc in COL_ORDER {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let next = Cell::new(cell.row + dr, cell.col + dc);
                if !self.is_blocked(next) {
                    result.push(next);
                }
            }
        }
        result
    }

    /// Set or clear an obstacle. Rejected on the start or goal.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) -> Result<(), InvalidEdit> {
        let id = self
            .index(cell)
            .ok_or(InvalidEdit::new(cell, EditConflict::OutOfBounds))?;
        if self.start == Some(cell) || self.goal == Some(cell) {
            return Err(InvalidEdit::new(cell, EditConflict::Endpoint));
        }
        if self.blocked[id] != blocked {
            self.blocked[id] = blocked;
            self.revision += 1;
        }
        Ok(())
    }

    /// Place the start. Rejected on an obstacle or the goal.
    pub fn set_start(&mut self, cell: Cell) -> Result<(), InvalidEdit> {
        self.check_endpoint(cell, self.goal)?;
        if self.start != Some(cell) {
            self.start = Some(cell);
            self.revision += 1;
        }
        Ok(())
    }

    /// Place the goal. Rejected on an obstacle or the start.
    pub fn set_goal(&mut self, cell: Cell) -> Result<(), InvalidEdit> {
        self.check_endpoint(cell, self.start)?;
        if self.goal != Some(cell) {
            self.goal = Some(cell);
            self.revision += 1;
        }
        Ok(())
    }

    /// Remove the start, returning the cell it was on
    pub fn clear_start(&mut self) -> Option<Cell> {
        let old = self.start.take();
        if old.is_some() {
            self.revision += 1;
        }
        old
    }

    /// Remove the goal, returning the cell it was on
    pub fn clear_goal(&mut self) -> Option<Cell> {
        let old = self.goal.take();
        if old.is_some() {
            self.revision += 1;
        }
        old
    }

    fn check_endpoint(&self, cell: Cell, other: Option<Cell>) -> Result<(), InvalidEdit> {
        if !self.contains(cell) {
            return Err(InvalidEdit::new(cell, EditConflict::OutOfBounds));
        }
        if self.is_blocked(cell) {
            return Err(InvalidEdit::new(cell, EditConflict::Blocked));
        }
        if other == Some(cell) {
            return Err(InvalidEdit::new(cell, EditConflict::SameAsOtherEndpoint));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_order() {
        let grid = Grid::new(3);
        let n = grid.neighbors(Cell::new(1, 1));
        let expected = vec![
            Cell::new(1, 0),
            Cell::new(1, 2),
            Cell::new(0, 1),
            Cell::new(0, 0),
            Cell::new(0, 2),
            Cell::new(2, 1),
            Cell::new(2, 0),
            Cell::new(2, 2),
        ];
        assert_eq!(n, expected);
    }

    #[test]
    fn test_neighbors_clipped_and_filtered() {
        let grid = Grid::with_blocked(3, &[Cell::new(1, 1)]);
        let n = grid.neighbors(Cell::new(0, 0));
        assert_eq!(n, vec![Cell::new(0, 1), Cell::new(1, 0)]);
    }

    #[test]
    fn test_revision_only_on_change() {
        let mut grid = Grid::new(4);
        grid.set_blocked(Cell::new(1, 1), true).unwrap();
        assert_eq!(grid.revision(), 1);
        grid.set_blocked(Cell::new(1, 1), true).unwrap();
        assert_eq!(grid.revision(), 1);
        grid.set_start(Cell::new(0, 0)).unwrap();
        grid.set_start(Cell::new(0, 0)).unwrap();
        assert_eq!(grid.revision(), 2);
        assert_eq!(grid.clear_goal(), None);
        assert_eq!(grid.revision(), 2);
    }

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(Grid::new(50_000).rows(), MAX_ROWS);
        assert_eq!(Grid::new(-3).rows(), 0);
        assert_eq!(Grid::new(-3).cells().count(), 0);
    }

    #[test]
    fn test_every_grid_has_its_own_id() {
        let a = Grid::new(3);
        let b = Grid::new(3);
        let c = a.clone();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_eq!(a.revision(), c.revision());
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let grid = Grid::new(2);
        assert!(grid.is_blocked(Cell::new(-1, 0)));
        assert!(grid.is_blocked(Cell::new(0, 2)));
        assert!(!grid.is_blocked(Cell::new(1, 1)));
    }
}
