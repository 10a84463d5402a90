//! Text layout of a grid, one character per cell:
//!
//! - `.` free cell
//! - `#` blocked cell
//! - `S` start
//! - `G` goal
//!
//! When rendering a grid together with a search, free cells additionally show
//! `o` (open), `x` (closed) and `*` (path, or the best known trail while the
//! search is still running).

use crate::search::{SearchEngine, SearchStatus};
use crate::{Cell, Grid};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const FREE: char = '.';
pub const BLOCKED: char = '#';
pub const START: char = 'S';
pub const GOAL: char = 'G';
pub const OPEN: char = 'o';
pub const CLOSED: char = 'x';
pub const PATH: char = '*';

/// Parse a layout string into a grid.
///
/// Blank lines and surrounding whitespace are ignored. The grid must be square.
pub fn parse_layout(text: &str) -> Result<Grid, String> {
    let lines: Vec<&str> = text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err("No grid lines found".to_string());
    }

    let rows = lines.len();
    let mut blocked = Vec::new();
    let mut start = None;
    let mut goal = None;

    for (row, line) in lines.iter().enumerate() {
        let width = line.chars().count();
        if width != rows {
            return Err(format!(
                "Row {} has {} cells, expected {} (grid must be square)",
                row, width, rows
            ));
        }

        for (col, ch) in line.chars().enumerate() {
            let cell = Cell::new(row as i32, col as i32);
            match ch {
                FREE | OPEN | CLOSED | PATH => {}
                BLOCKED => blocked.push(cell),
                START => {
                    if start.replace(cell).is_some() {
                        return Err(format!("Second start found at {}", cell));
                    }
                }
                GOAL => {
                    if goal.replace(cell).is_some() {
                        return Err(format!("Second goal found at {}", cell));
                    }
                }
                other => return Err(format!("Unknown character '{}' at {}", other, cell)),
            }
        }
    }

    let mut grid = Grid::with_blocked(rows as i32, &blocked);
    if let Some(cell) = start {
        grid.set_start(cell).map_err(|e| e.to_string())?;
    }
    if let Some(cell) = goal {
        grid.set_goal(cell).map_err(|e| e.to_string())?;
    }
    Ok(grid)
}

/// Load a layout file
pub fn load_layout(path: &Path) -> Result<Grid, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_layout(&contents)?)
}

/// Render a grid, overlaying the search state when given
pub fn render_layout(grid: &Grid, engine: Option<&SearchEngine>) -> String {
    let path: HashSet<Cell> = match engine {
        Some(engine) if engine.status() == SearchStatus::Found => engine
            .reconstruct_path()
            .map(|p| p.into_iter().collect())
            .unwrap_or_default(),
        Some(engine) => engine.trail().into_iter().collect(),
        None => HashSet::new(),
    };

    let mut result = String::new();
    for row in 0..grid.rows() {
        for col in 0..grid.rows() {
            let cell = Cell::new(row, col);
            let symbol = if grid.start() == Some(cell) {
                START
            } else if grid.goal() == Some(cell) {
                GOAL
            } else if grid.is_blocked(cell) {
                BLOCKED
            } else if path.contains(&cell) {
                PATH
            } else {
                match engine {
                    Some(e) if e.is_open(cell) => OPEN,
                    Some(e) if e.is_closed(cell) => CLOSED,
                    _ => FREE,
                }
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}
