use crate::action_log::{Action, ActionLog};
use crate::error::SearchError;
use crate::layout::render_layout;
use crate::mapgen::SetupMode;
use crate::search::{SearchEngine, SearchStatus};
use crate::{Cell, Grid};

/// Editor state driven by the window: the grid being painted plus the
/// search currently running on it, if any.
///
/// Every edit that changes the grid discards the live search.
pub struct Session {
    grid: Grid,
    mode: SetupMode,
    engine: Option<SearchEngine>,
    log: ActionLog,
    trace: bool,
    /// Outcome of the live search has been logged
    reported: bool,
}

impl Session {
    pub fn new(grid: Grid, mode: SetupMode) -> Self {
        Session {
            grid,
            mode,
            engine: None,
            log: ActionLog::new(),
            trace: false,
            reported: false,
        }
    }

    /// Enable per-expansion trace output on searches started from now on
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mode(&self) -> SetupMode {
        self.mode
    }

    pub fn engine(&self) -> Option<&SearchEngine> {
        self.engine.as_ref()
    }

    pub fn status(&self) -> Option<SearchStatus> {
        self.engine.as_ref().map(|e| e.status())
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut ActionLog {
        &mut self.log
    }

    /// Left click: start first, then goal, then (manual mode) obstacles.
    /// Returns true when the grid changed.
    pub fn paint(&mut self, cell: Cell) -> bool {
        if !self.grid.contains(cell) {
            return false;
        }

        let action = if self.grid.start().is_none() && self.grid.set_start(cell).is_ok() {
            Some(Action::PlaceStart { row: cell.row, col: cell.col })
        } else if self.grid.goal().is_none() && self.grid.set_goal(cell).is_ok() {
            Some(Action::PlaceGoal { row: cell.row, col: cell.col })
        } else if self.mode == SetupMode::Manual
            && !self.grid.is_blocked(cell)
            && self.grid.set_blocked(cell, true).is_ok()
        {
            Some(Action::PlaceObstacle { row: cell.row, col: cell.col })
        } else {
            None
        };

        self.apply_edit(action)
    }

    /// Right click: remove the start, goal or obstacle under the cursor.
    /// Returns true when the grid changed.
    pub fn erase(&mut self, cell: Cell) -> bool {
        if !self.grid.contains(cell) {
            return false;
        }

        let action = if self.grid.start() == Some(cell) {
            self.grid.clear_start();
            Some(Action::RemoveStart { row: cell.row, col: cell.col })
        } else if self.grid.goal() == Some(cell) {
            self.grid.clear_goal();
            Some(Action::RemoveGoal { row: cell.row, col: cell.col })
        } else if self.grid.is_blocked(cell) && self.grid.set_blocked(cell, false).is_ok() {
            Some(Action::RemoveObstacle { row: cell.row, col: cell.col })
        } else {
            None
        };

        self.apply_edit(action)
    }

    fn apply_edit(&mut self, action: Option<Action>) -> bool {
        match action {
            Some(action) => {
                self.log.log_finish(action);
                self.cancel_search();
                true
            }
            None => false,
        }
    }

    /// Begin a fresh search on the current grid
    pub fn start_search(&mut self) -> Result<(), SearchError> {
        if self.grid.start().is_none() || self.grid.goal().is_none() {
            return Err(SearchError::NotConfigured);
        }

        self.cancel_search();
        self.log.log_start(Action::RunSearch);
        self.engine = Some(SearchEngine::new(&self.grid).with_trace(self.trace));
        self.reported = false;
        Ok(())
    }

    /// Discard the live search, if any
    pub fn cancel_search(&mut self) {
        if let Some(engine) = self.engine.take() {
            if !engine.status().is_terminal() {
                self.log.log_finish(Action::CancelSearch {
                    expansions: engine.expansions(),
                });
            }
        }
    }

    /// Run up to `steps` expansions of the live search.
    /// Returns `None` when no search is running.
    pub fn tick(&mut self, steps: usize) -> Result<Option<SearchStatus>, SearchError> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(None);
        };

        let mut status = engine.status();
        for _ in 0..steps.max(1) {
            status = engine.step(&self.grid)?;
            if status.is_terminal() {
                break;
            }
        }

        if status.is_terminal() && !self.reported {
            self.reported = true;
            let path = engine.reconstruct_path().unwrap_or_default();
            let cost = engine.path_cost().ok();
            match cost {
                Some(cost) => println!(
                    "Path found: {} cells, cost {:.3}, {} expansions",
                    path.len(),
                    cost,
                    engine.expansions()
                ),
                None => println!("No Path Found! ({} expansions)", engine.expansions()),
            }
            self.log.log_finish(Action::SearchOutcome {
                status,
                expansions: engine.expansions(),
                path_cells: path.len(),
                cost,
            });
        }

        Ok(Some(status))
    }

    /// Text layout of the grid with the search overlaid
    pub fn render_layout(&self) -> String {
        render_layout(&self.grid, self.engine.as_ref())
    }
}
