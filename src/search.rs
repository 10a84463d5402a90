use crate::cell::{format_path, Cell};
use crate::error::SearchError;
use crate::node::NodeCost;
use crate::Grid;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Where a search run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    /// Created, nothing expanded yet
    Ready,
    /// Open set still has cells to expand
    Running,
    /// Goal was selected for expansion
    Found,
    /// Open set ran dry before the goal was selected
    NoPathFound,
}

impl SearchStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SearchStatus::Found | SearchStatus::NoPathFound)
    }
}

/// An entry in the open queue
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f64,
    /// Discovery sequence number of the cell, fixed at first insertion
    seq: u64,
    cell: Cell,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .f
            .total_cmp(&self.f)
            // Tie-breaker: earliest discovered cell wins
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Incremental A* search over a `Grid`.
///
/// The engine remembers which grid it was created against and that grid's
/// revision; stepping it with another grid, or one edited since, fails with
/// [`SearchError::StaleState`]. Each [`step`](SearchEngine::step) performs
/// exactly one expansion, so a caller can pace the search (one step per
/// frame) or run it to completion with identical results.
///
/// Open cells are ordered by `f`, ties going to the cell first inserted
/// into the open set.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    grid_id: u64,
    rows: i32,
    revision: u64,
    start: Option<Cell>,
    goal: Option<Cell>,
    status: SearchStatus,
    /// Open cells mapped to their discovery sequence number
    open: HashMap<Cell, u64>,
    /// Priority queue over `open`; entries whose cost is outdated are skipped on pop
    queue: BinaryHeap<OpenEntry>,
    closed: HashSet<Cell>,
    nodes: HashMap<Cell, NodeCost>,
    next_seq: u64,
    expansions: usize,
    last_expanded: Option<Cell>,
    trace: bool,
}

impl SearchEngine {
    /// Bind a new search to the grid's current start, goal and obstacles
    pub fn new(grid: &Grid) -> Self {
        SearchEngine {
            grid_id: grid.id(),
            rows: grid.rows(),
            revision: grid.revision(),
            start: grid.start(),
            goal: grid.goal(),
            status: SearchStatus::Ready,
            open: HashMap::new(),
            queue: BinaryHeap::new(),
            closed: HashSet::new(),
            nodes: HashMap::new(),
            next_seq: 0,
            expansions: 0,
            last_expanded: None,
            trace: false,
        }
    }

    /// Print a line per expansion
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    pub fn goal(&self) -> Option<Cell> {
        self.goal
    }

    /// Number of cells moved from open to closed so far
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Cell most recently selected for expansion
    pub fn last_expanded(&self) -> Option<Cell> {
        self.last_expanded
    }

    /// True when `grid` is the very grid this engine was created against,
    /// unedited since
    pub fn is_current(&self, grid: &Grid) -> bool {
        grid.id() == self.grid_id && grid.rows() == self.rows && grid.revision() == self.revision
    }

    /// Perform one expansion.
    ///
    /// The first call seeds the open set with the start. Once the status is
    /// `Found` or `NoPathFound`, further calls return it unchanged.
    pub fn step(&mut self, grid: &Grid) -> Result<SearchStatus, SearchError> {
        if !self.is_current(grid) {
            return Err(SearchError::StaleState);
        }
        let (start, goal) = match (self.start, self.goal) {
            (Some(start), Some(goal)) => (start, goal),
            _ => return Err(SearchError::NotConfigured),
        };
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        if self.status == SearchStatus::Ready {
            self.seed(start, goal);
        }

        self.expand(grid, goal);
        Ok(self.status)
    }

    /// Step until a terminal status is reached
    pub fn run_to_completion(&mut self, grid: &Grid) -> Result<SearchStatus, SearchError> {
        loop {
            let status = self.step(grid)?;
            if status.is_terminal() {
                return Ok(status);
            }
        }
    }

    fn seed(&mut self, start: Cell, goal: Cell) {
        let node = NodeCost::origin(start, goal);
        self.nodes.insert(start, node);
        self.open.insert(start, self.next_seq);
        self.queue.push(OpenEntry {
            f: node.f,
            seq: self.next_seq,
            cell: start,
        });
        self.next_seq += 1;
        self.status = SearchStatus::Running;

        if self.trace {
            println!("[search] seeded start {} -> goal {}, h={:.3}", start, goal, node.h);
        }
    }

    /// Pop the open cell with the lowest `(f, seq)`, skipping outdated queue entries
    fn pop_open(&mut self) -> Option<Cell> {
        while let Some(entry) = self.queue.pop() {
            if !self.open.contains_key(&entry.cell) {
                continue;
            }
            match self.nodes.get(&entry.cell) {
                Some(node) if node.f == entry.f => {}
                _ => continue,
            }
            self.open.remove(&entry.cell);
            return Some(entry.cell);
        }
        None
    }

    fn expand(&mut self, grid: &Grid, goal: Cell) {
        let Some(current) = self.pop_open() else {
            self.finish(SearchStatus::NoPathFound);
            return;
        };

        self.closed.insert(current);
        self.expansions += 1;
        self.last_expanded = Some(current);

        if current == goal {
            self.finish(SearchStatus::Found);
            return;
        }

        let current_g = self.nodes.get(&current).map(|n| n.g).unwrap_or(0.0);
        let mut relaxed = 0;

        for next in grid.neighbors(current) {
            if self.closed.contains(&next) {
                continue;
            }

            let tentative_g = current_g + current.distance(&next);
            let node = self.nodes.entry(next).or_default();

            // New cells are always relaxed; known open cells only on improvement
            let seq = match self.open.get(&next) {
                Some(&seq) => {
                    if tentative_g >= node.g {
                        continue;
                    }
                    seq
                }
                None => {
                    let seq = self.next_seq;
                    self.next_seq += 1;
                    self.open.insert(next, seq);
                    seq
                }
            };

            node.relax(next, current, tentative_g, goal);
            self.queue.push(OpenEntry {
                f: node.f,
                seq,
                cell: next,
            });
            relaxed += 1;
        }

        if self.trace {
            println!(
                "[search] #{} expanded {} g={:.3}, relaxed {}, open={}",
                self.expansions,
                current,
                current_g,
                relaxed,
                self.open.len()
            );
        }

        if self.open.is_empty() {
            self.finish(SearchStatus::NoPathFound);
        }
    }

    fn finish(&mut self, status: SearchStatus) {
        self.status = status;
        if self.trace {
            match status {
                SearchStatus::Found => println!(
                    "[search] FOUND after {} expansions: {}",
                    self.expansions,
                    format_path(&self.trail())
                ),
                _ => println!("[search] NO PATH after {} expansions", self.expansions),
            }
        }
    }

    /// Follow parent links from `cell` back to the start, returned start-first
    fn chain_from(&self, cell: Cell) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut cursor = Some(cell);
        while let Some(cell) = cursor {
            path.push(cell);
            cursor = self.nodes.get(&cell).and_then(|n| n.parent);
        }
        path.reverse();
        path
    }

    /// The start-to-goal path. Only available once the status is `Found`.
    pub fn reconstruct_path(&self) -> Result<Vec<Cell>, SearchError> {
        match (self.status, self.goal) {
            (SearchStatus::Found, Some(goal)) => Ok(self.chain_from(goal)),
            _ => Err(SearchError::NoPathAvailable),
        }
    }

    /// Total cost of the found path
    pub fn path_cost(&self) -> Result<f64, SearchError> {
        match (self.status, self.goal) {
            (SearchStatus::Found, Some(goal)) => self
                .nodes
                .get(&goal)
                .map(|n| n.g)
                .ok_or(SearchError::NoPathAvailable),
            _ => Err(SearchError::NoPathAvailable),
        }
    }

    /// Best known path from the start to the last expanded cell
    pub fn trail(&self) -> Vec<Cell> {
        match self.last_expanded {
            Some(cell) => self.chain_from(cell),
            None => Vec::new(),
        }
    }

    pub fn is_open(&self, cell: Cell) -> bool {
        self.open.contains_key(&cell)
    }

    pub fn is_closed(&self, cell: Cell) -> bool {
        self.closed.contains(&cell)
    }

    /// Cost record of a discovered cell
    pub fn node(&self, cell: Cell) -> Option<&NodeCost> {
        self.nodes.get(&cell)
    }

    pub fn open_set_snapshot(&self) -> HashSet<Cell> {
        self.open.keys().copied().collect()
    }

    pub fn closed_set_snapshot(&self) -> HashSet<Cell> {
        self.closed.clone()
    }
}
