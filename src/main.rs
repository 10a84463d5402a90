use arboard::Clipboard;
use astar_grid::action_log::Action;
use astar_grid::config::Config;
use astar_grid::layout::{load_layout, render_layout};
use astar_grid::mapgen::{generate, make_rng, SetupMode};
use astar_grid::search::{SearchEngine, SearchStatus};
use astar_grid::session::Session;
use astar_grid::{format_path, Cell};
use macroquad::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

/// Command line options
#[derive(Debug, Default)]
struct Args {
    mode: Option<SetupMode>,
    seed: Option<u64>,
    headless: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--random" => parsed.mode = Some(SetupMode::Random),
            "--manual" => parsed.mode = Some(SetupMode::Manual),
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|e| format!("Invalid seed '{}': {}", value, e))?;
                parsed.seed = Some(seed);
            }
            "--headless" => {
                let value = iter.next().ok_or("--headless needs a layout file")?;
                parsed.headless = Some(value.clone());
            }
            other => return Err(format!("Unknown argument '{}'", other)),
        }
    }

    Ok(parsed)
}

/// Solve a layout file without drawing. Returns the process exit code.
fn run_headless(path: &str, trace: bool) -> i32 {
    let grid = match load_layout(Path::new(path)) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Failed to load layout {}: {}", path, e);
            return 1;
        }
    };

    let mut engine = SearchEngine::new(&grid).with_trace(trace);
    let status = match engine.run_to_completion(&grid) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Search failed: {}", e);
            return 1;
        }
    };

    println!("{}", render_layout(&grid, Some(&engine)));
    println!("Expansions: {}", engine.expansions());

    match (status, engine.reconstruct_path(), engine.path_cost()) {
        (SearchStatus::Found, Ok(path), Ok(cost)) => {
            println!("Path: {}", format_path(&path));
            println!("Cells: {}, Cost: {:.4}", path.len(), cost);
            0
        }
        _ => {
            println!("No Path Found!");
            1
        }
    }
}

/// Visualization state
struct VisState {
    session: Session,
    cell_length: f32,
    margin: f32,
    steps_per_frame: usize,
    show_trail: bool,
    show_help: bool,
    background: Color,
}

impl VisState {
    fn new(config: &Config, mode: SetupMode, seed: Option<u64>) -> Self {
        let mut rng = make_rng(seed);
        let grid = generate(
            config.grid.rows,
            mode,
            config.generation.obstacle_percent,
            &mut rng,
        );

        VisState {
            session: Session::new(grid, mode).with_trace(config.logging.trace_search),
            cell_length: config.grid.cell_length(),
            margin: config.grid.margin as f32,
            steps_per_frame: config.search.steps_per_frame,
            show_trail: config.visual.show_trail,
            show_help: config.visual.show_help,
            background: Color::from_rgba(
                config.visual.background_r,
                config.visual.background_g,
                config.visual.background_b,
                255,
            ),
        }
    }

    /// Screen position to grid cell
    fn cell_at(&self, x: f32, y: f32) -> Option<Cell> {
        let pitch = self.cell_length + self.margin;
        if x < 0.0 || y < 0.0 || pitch <= 0.0 {
            return None;
        }
        let cell = Cell::new((y / pitch) as i32, (x / pitch) as i32);
        if self.session.grid().contains(cell) {
            Some(cell)
        } else {
            None
        }
    }

    fn handle_input(&mut self) {
        let left = is_mouse_button_down(MouseButton::Left);
        let right = is_mouse_button_down(MouseButton::Right);
        if left || right {
            let (mouse_x, mouse_y) = mouse_position();
            if let Some(cell) = self.cell_at(mouse_x, mouse_y) {
                if left {
                    self.session.paint(cell);
                } else {
                    self.session.erase(cell);
                }
            }
        }

        if is_key_pressed(KeyCode::Space) {
            if let Err(e) = self.session.start_search() {
                println!("Cannot start search: {}", e);
            }
        }

        if is_key_pressed(KeyCode::R) {
            self.session.cancel_search();
        }

        if is_key_pressed(KeyCode::C) {
            self.copy_to_clipboard();
        }

        if is_key_pressed(KeyCode::L) {
            self.session.log().print();
        }
    }

    fn update(&mut self) {
        if let Err(e) = self.session.tick(self.steps_per_frame) {
            eprintln!("Search stopped: {}", e);
            self.session.cancel_search();
        }
    }

    fn copy_to_clipboard(&mut self) {
        let layout = self.session.render_layout();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&layout) {
                    println!("Failed to copy to clipboard: {}", e);
                } else {
                    println!("Grid layout copied to clipboard!");
                    self.session.log_mut().log_finish(Action::CopyLayout);
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                println!("Failed to access clipboard: {}", e);
            }
        }
    }

    /// Cells drawn as the path: the final path once found, otherwise the trail
    fn highlighted(&self) -> HashSet<Cell> {
        match self.session.engine() {
            Some(engine) if engine.status() == SearchStatus::Found => engine
                .reconstruct_path()
                .map(|p| p.into_iter().collect())
                .unwrap_or_default(),
            Some(engine) if self.show_trail => engine.trail().into_iter().collect(),
            _ => HashSet::new(),
        }
    }

    fn cell_color(&self, cell: Cell, highlighted: &HashSet<Cell>) -> Color {
        let grid = self.session.grid();
        if grid.start() == Some(cell) {
            return BLUE;
        }
        if grid.goal() == Some(cell) || highlighted.contains(&cell) {
            return PURPLE;
        }
        if grid.is_blocked(cell) {
            return BLACK;
        }
        match self.session.engine() {
            Some(engine) if engine.is_open(cell) => GREEN,
            Some(engine) if engine.is_closed(cell) => RED,
            _ => WHITE,
        }
    }

    fn status_line(&self) -> String {
        match self.session.engine() {
            Some(engine) => match engine.status() {
                SearchStatus::Found => format!(
                    "Found: {} cells, cost {:.2}, {} expansions | R: reset",
                    engine.reconstruct_path().map(|p| p.len()).unwrap_or(0),
                    engine.path_cost().unwrap_or(0.0),
                    engine.expansions()
                ),
                SearchStatus::NoPathFound => {
                    format!("No path ({} expansions) | R: reset", engine.expansions())
                }
                _ => format!("Searching... {} expansions", engine.expansions()),
            },
            None => self.session.mode().instructions().to_string(),
        }
    }

    fn draw(&self) {
        clear_background(self.background);

        let highlighted = self.highlighted();
        let pitch = self.cell_length + self.margin;
        for cell in self.session.grid().cells() {
            draw_rectangle(
                pitch * cell.col as f32 + self.margin,
                pitch * cell.row as f32 + self.margin,
                self.cell_length,
                self.cell_length,
                self.cell_color(cell, &highlighted),
            );
        }

        if self.show_help {
            let bar_y = screen_height() - 24.0;
            draw_rectangle(0.0, bar_y, screen_width(), 24.0, Color::from_rgba(0, 0, 0, 200));
            draw_text(&self.status_line(), 8.0, bar_y + 17.0, 20.0, YELLOW);
        }
    }
}

/// Settings from `config.toml`, read once per process
fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(Config::load)
}

fn window_conf() -> Conf {
    let config = config();
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: config.grid.window_size,
        window_height: config.grid.window_size,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: astar_grid [--random | --manual] [--seed N] [--headless <layout>]");
            std::process::exit(2);
        }
    };

    let config = config();

    if let Some(path) = &args.headless {
        std::process::exit(run_headless(path, config.logging.trace_search));
    }

    let mode = args.mode.unwrap_or_else(|| {
        config.generation.mode.parse::<SetupMode>().unwrap_or_else(|e| {
            eprintln!("Warning: {}; using manual", e);
            SetupMode::Manual
        })
    });
    let seed = args.seed.or(config.generation.seed);

    println!("Setup mode: {}", mode);
    println!("{}", mode.instructions());

    let mut state = VisState::new(config, mode, seed);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.handle_input();
        state.update();
        state.draw();

        next_frame().await
    }

    println!("{}", state.session.log().summary());
    if config.logging.enable_action_log {
        match state.session.log().save_to_file(&config.logging.action_log_path) {
            Ok(()) => println!("Action log saved to {}", config.logging.action_log_path),
            Err(e) => eprintln!("Failed to save action log: {}", e),
        }
    }
}
