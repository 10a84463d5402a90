#![allow(dead_code)]

use astar_grid::layout::parse_layout;
use astar_grid::mapgen::{generate, make_rng, SetupMode};
use astar_grid::{Cell, Grid, SearchEngine, SearchStatus};
use std::collections::{HashMap, HashSet};

/// Build a grid from a text layout, panicking on malformed input
pub fn grid_from_layout(text: &str) -> Grid {
    parse_layout(text).unwrap_or_else(|e| panic!("bad test layout: {}", e))
}

/// Empty grid with endpoints set
pub fn open_grid(rows: i32, start: Cell, goal: Cell) -> Grid {
    let mut grid = Grid::new(rows);
    grid.set_start(start).unwrap();
    grid.set_goal(goal).unwrap();
    grid
}

/// Run a search to completion, counting `step` calls
pub fn solve(grid: &Grid) -> (SearchEngine, usize) {
    let mut engine = SearchEngine::new(grid);
    let mut steps = 0;
    let limit = (grid.rows() * grid.rows()) as usize;
    loop {
        steps += 1;
        let status = engine.step(grid).unwrap();
        if status.is_terminal() {
            assert!(steps <= limit, "took {} steps on {} cells", steps, limit);
            return (engine, steps);
        }
        assert!(steps < limit, "search did not terminate within {} steps", limit);
    }
}

/// Random grid with 30% obstacles and endpoints on random free cells
pub fn random_grid(rows: i32, seed: u64) -> Grid {
    use rand::seq::SliceRandom;

    let mut rng = make_rng(Some(seed));
    let mut grid = generate(rows, SetupMode::Random, 0.3, &mut rng);
    let free: Vec<Cell> = grid.cells().filter(|c| !grid.is_blocked(*c)).collect();
    let picked: Vec<Cell> = free.choose_multiple(&mut rng, 2).copied().collect();
    grid.set_start(picked[0]).unwrap();
    grid.set_goal(picked[1]).unwrap();
    grid
}

/// True shortest distances from `from` to every reachable cell (plain Dijkstra)
pub fn reference_distances(grid: &Grid, from: Cell) -> HashMap<Cell, f64> {
    let mut dist: HashMap<Cell, f64> = HashMap::new();
    let mut done: HashSet<Cell> = HashSet::new();
    dist.insert(from, 0.0);

    loop {
        let next = dist
            .iter()
            .filter(|(c, _)| !done.contains(*c))
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(c, d)| (*c, *d));
        let Some((cell, d)) = next else {
            return dist;
        };
        done.insert(cell);
        for n in grid.neighbors(cell) {
            let candidate = d + cell.distance(&n);
            let entry = dist.entry(n).or_insert(f64::INFINITY);
            if candidate < *entry {
                *entry = candidate;
            }
        }
    }
}

/// A* over a plain list scanned front to back for the lowest `f`.
/// Returns the path (if any) and the number of expansions.
pub fn linear_scan_astar(grid: &Grid) -> (Option<Vec<Cell>>, usize) {
    let start = grid.start().unwrap();
    let goal = grid.goal().unwrap();

    let mut open = vec![start];
    let mut closed = HashSet::new();
    let mut g: HashMap<Cell, f64> = HashMap::new();
    let mut f: HashMap<Cell, f64> = HashMap::new();
    let mut parent: HashMap<Cell, Cell> = HashMap::new();
    g.insert(start, 0.0);
    f.insert(start, start.distance(&goal));
    let mut expansions = 0;

    while !open.is_empty() {
        let mut best = 0;
        for i in 1..open.len() {
            if f[&open[i]] < f[&open[best]] {
                best = i;
            }
        }
        let current = open.remove(best);
        closed.insert(current);
        expansions += 1;

        if current == goal {
            let mut path = vec![goal];
            let mut cursor = goal;
            while let Some(p) = parent.get(&cursor) {
                path.push(*p);
                cursor = *p;
            }
            path.reverse();
            return (Some(path), expansions);
        }

        for n in grid.neighbors(current) {
            if closed.contains(&n) {
                continue;
            }
            let tentative = g[&current] + current.distance(&n);
            if !open.contains(&n) {
                open.push(n);
            } else if tentative >= g[&n] {
                continue;
            }
            parent.insert(n, current);
            g.insert(n, tentative);
            f.insert(n, tentative + n.distance(&goal));
        }
    }

    (None, expansions)
}

/// Path starts at start, ends at goal, moves between adjacent free cells
pub fn assert_valid_path(grid: &Grid, path: &[Cell]) {
    assert!(!path.is_empty(), "path is empty");
    assert_eq!(path.first().copied(), grid.start());
    assert_eq!(path.last().copied(), grid.goal());
    for pair in path.windows(2) {
        assert!(pair[0].is_adjacent(&pair[1]), "{} and {} not adjacent", pair[0], pair[1]);
    }
    for cell in path {
        assert!(!grid.is_blocked(*cell), "path crosses blocked cell {}", cell);
    }
}

pub fn assert_status(engine: &SearchEngine, status: SearchStatus) {
    assert_eq!(engine.status(), status, "unexpected search status");
}
