use crate::{Cell, Grid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the grid's obstacles are created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupMode {
    /// Obstacles are scattered at random; the user only places start and goal
    Random,
    /// The user paints obstacles by hand
    Manual,
}

impl FromStr for SetupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "r" => Ok(SetupMode::Random),
            "manual" | "m" => Ok(SetupMode::Manual),
            other => Err(format!("Unknown setup mode '{}' (expected random or manual)", other)),
        }
    }
}

impl fmt::Display for SetupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupMode::Random => write!(f, "random"),
            SetupMode::Manual => write!(f, "manual"),
        }
    }
}

impl SetupMode {
    /// On-screen help for this mode
    pub fn instructions(&self) -> &'static str {
        match self {
            SetupMode::Manual => {
                "Left click: start, then goal, then obstacles | Right click: remove | Space: run"
            }
            SetupMode::Random => "Left click: start, then goal | Right click: remove | Space: run",
        }
    }
}

/// Build a grid for the given mode. In `Random` mode each cell is blocked
/// with probability `percent`.
pub fn generate<R: Rng>(rows: i32, mode: SetupMode, percent: f64, rng: &mut R) -> Grid {
    if mode == SetupMode::Manual {
        return Grid::new(rows);
    }

    let percent = percent.clamp(0.0, 1.0);
    let mut blocked = Vec::new();
    for row in 0..rows {
        for col in 0..rows {
            if percent > rng.gen::<f64>() {
                blocked.push(Cell::new(row, col));
            }
        }
    }
    Grid::with_blocked(rows, &blocked)
}

/// Random generator, seeded when a seed is given
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
