mod common;

use astar_grid::action_log::Action;
use astar_grid::mapgen::SetupMode;
use astar_grid::session::Session;
use astar_grid::{Cell, Grid, SearchStatus};
use common::*;

fn painted_session() -> Session {
    let mut session = Session::new(Grid::new(6), SetupMode::Manual);
    session.paint(Cell::new(0, 0));
    session.paint(Cell::new(5, 5));
    for row in 0..5 {
        session.paint(Cell::new(row, 3));
    }
    session
}

#[test]
fn test_full_run_logs_outcome_once() {
    let mut session = painted_session();
    session.start_search().unwrap();

    let mut status = None;
    for _ in 0..100 {
        status = session.tick(1).unwrap();
        if status.map(|s| s.is_terminal()).unwrap_or(false) {
            break;
        }
    }
    assert_eq!(status, Some(SearchStatus::Found));

    // Further ticks do not log again
    session.tick(1).unwrap();
    let outcomes = session
        .log()
        .get_actions()
        .iter()
        .filter(|a| matches!(a.action, Action::SearchOutcome { .. }))
        .count();
    assert_eq!(outcomes, 1);

    let engine = session.engine().unwrap();
    let path = engine.reconstruct_path().unwrap();
    assert_valid_path(session.grid(), &path);
    assert!(path.contains(&Cell::new(5, 3)));
}

#[test]
fn test_steps_per_frame_do_not_change_result() {
    let mut slow = painted_session();
    let mut fast = painted_session();
    slow.start_search().unwrap();
    fast.start_search().unwrap();

    while !slow.tick(1).unwrap().unwrap().is_terminal() {}
    assert!(fast.tick(1000).unwrap().unwrap().is_terminal());

    let slow_engine = slow.engine().unwrap();
    let fast_engine = fast.engine().unwrap();
    assert_eq!(slow_engine.reconstruct_path(), fast_engine.reconstruct_path());
    assert_eq!(slow_engine.expansions(), fast_engine.expansions());
}

#[test]
fn test_edit_discards_running_search() {
    let mut session = painted_session();
    session.start_search().unwrap();
    session.tick(2).unwrap();
    assert_eq!(session.status(), Some(SearchStatus::Running));

    assert!(session.erase(Cell::new(2, 3)));
    assert_eq!(session.status(), None);
    assert!(session
        .log()
        .get_actions()
        .iter()
        .any(|a| matches!(a.action, Action::CancelSearch { expansions: 2 })));

    // Rejected edits keep the search alive
    session.start_search().unwrap();
    assert!(!session.paint(Cell::new(0, 0)));
    assert!(session.engine().is_some());
}

#[test]
fn test_no_path_reported() {
    let mut session = Session::new(Grid::new(5), SetupMode::Manual);
    session.paint(Cell::new(0, 0));
    session.paint(Cell::new(4, 4));
    for row in 0..5 {
        session.paint(Cell::new(row, 2));
    }
    session.start_search().unwrap();
    assert_eq!(session.tick(100), Ok(Some(SearchStatus::NoPathFound)));
    assert!(session.log().summary().contains("0 found, 1 without path"));
}

#[test]
fn test_render_layout_tracks_session() {
    let mut session = Session::new(Grid::new(3), SetupMode::Manual);
    session.paint(Cell::new(0, 0));
    session.paint(Cell::new(2, 2));
    session.paint(Cell::new(1, 1));
    assert_eq!(session.render_layout(), "S..\n.#.\n..G\n");
}
