use crate::search::SearchStatus;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Action phase - whether the action is starting or finishing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActionPhase {
    Start,
    Finish,
}

/// User actions on the grid and search lifecycle events
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Place the start at (row, col)
    PlaceStart { row: i32, col: i32 },
    /// Place the goal at (row, col)
    PlaceGoal { row: i32, col: i32 },
    /// Block a cell
    PlaceObstacle { row: i32, col: i32 },
    RemoveStart { row: i32, col: i32 },
    RemoveGoal { row: i32, col: i32 },
    RemoveObstacle { row: i32, col: i32 },
    /// Search run launched
    RunSearch,
    /// Search run discarded before finishing
    CancelSearch { expansions: usize },
    /// Search run reached a terminal status
    SearchOutcome {
        status: SearchStatus,
        expansions: usize,
        path_cells: usize,
        cost: Option<f64>,
    },
    /// Layout copied to clipboard
    CopyLayout,
}

/// Logged action with timestamp and phase
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
    pub phase: ActionPhase,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with current timestamp and phase
    pub fn log(&mut self, action: Action, phase: ActionPhase) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;

        self.actions.push(LoggedAction {
            timestamp_ms,
            action,
            phase,
        });
    }

    pub fn log_start(&mut self, action: Action) {
        self.log(action, ActionPhase::Start);
    }

    pub fn log_finish(&mut self, action: Action) {
        self.log(action, ActionPhase::Finish);
    }

    pub fn get_actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Print log to console
    pub fn print(&self) {
        println!("\n=== Action Log ({} events) ===", self.actions.len());
        for (i, logged) in self.actions.iter().enumerate() {
            let phase_str = match logged.phase {
                ActionPhase::Start => "START ",
                ActionPhase::Finish => "FINISH",
            };
            println!("[{:6}ms] #{:3} {} {:?}", logged.timestamp_ms, i + 1, phase_str, logged.action);
        }
        println!("=== End of Log ===\n");
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut placed = 0;
        let mut removed = 0;
        let mut runs = 0;
        let mut cancelled = 0;
        let mut found = 0;
        let mut no_path = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::PlaceStart { .. }
                | Action::PlaceGoal { .. }
                | Action::PlaceObstacle { .. } => placed += 1,
                Action::RemoveStart { .. }
                | Action::RemoveGoal { .. }
                | Action::RemoveObstacle { .. } => removed += 1,
                Action::RunSearch if logged.phase == ActionPhase::Start => runs += 1,
                Action::CancelSearch { .. } => cancelled += 1,
                Action::SearchOutcome { status, .. } => match status {
                    SearchStatus::Found => found += 1,
                    _ => no_path += 1,
                },
                _ => {}
            }
        }

        let duration = self.actions.last().map(|a| a.timestamp_ms).unwrap_or(0);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Grid Edits: {} placed, {} removed\n\
             Searches: {} started, {} cancelled, {} found, {} without path",
            duration,
            self.actions.len(),
            placed,
            removed,
            runs,
            cancelled,
            found,
            no_path
        )
    }
}
