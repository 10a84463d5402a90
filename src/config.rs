use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    /// Number of rows, which is also the number of columns
    #[serde(default = "default_rows")]
    pub rows: i32,
    /// Window width and height in pixels
    #[serde(default = "default_window_size")]
    pub window_size: i32,
    /// Gap between cells in pixels
    #[serde(default = "default_margin")]
    pub margin: i32,
}

#[derive(Debug, Deserialize)]
pub struct GenerationConfig {
    /// "random" or "manual"
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Share of cells turned into obstacles in random mode (0-1)
    #[serde(default = "default_obstacle_percent")]
    pub obstacle_percent: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    /// Expansions performed per rendered frame
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: usize,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    /// Show the best known path to the last expanded cell while running
    #[serde(default = "default_show_trail")]
    pub show_trail: bool,
    #[serde(default = "default_show_help")]
    pub show_help: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
    /// Print one line per search expansion
    #[serde(default)]
    pub trace_search: bool,
}

// Default values
fn default_rows() -> i32 { 50 }
fn default_window_size() -> i32 { 800 }
fn default_margin() -> i32 { 2 }
fn default_mode() -> String { "manual".to_string() }
fn default_obstacle_percent() -> f64 { 0.3 }
fn default_steps_per_frame() -> usize { 1 }
fn default_window_title() -> String { "A* Pathfinding Algorithm".to_string() }
fn default_bg_r() -> u8 { 0 }
fn default_bg_g() -> u8 { 0 }
fn default_bg_b() -> u8 { 0 }
fn default_show_trail() -> bool { true }
fn default_show_help() -> bool { true }
fn default_enable_action_log() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            window_size: default_window_size(),
            margin: default_margin(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            obstacle_percent: default_obstacle_percent(),
            seed: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            steps_per_frame: default_steps_per_frame(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_trail: default_show_trail(),
            show_help: default_show_help(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
            trace_search: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            generation: GenerationConfig::default(),
            search: SearchConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GridConfig {
    /// Side length of one cell in pixels
    pub fn cell_length(&self) -> f32 {
        if self.rows <= 0 {
            return 0.0;
        }
        ((self.window_size - self.rows * self.margin) / self.rows).max(1) as f32
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    println!("Loaded configuration from config.toml");
                    config
                }
                Err(e) => {
                    eprintln!("Warning: {}", e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                println!("No config.toml found, using default configuration");
                Config::default()
            }
        }
    }
}
