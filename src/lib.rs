pub mod action_log;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod mapgen;
pub mod node;
pub mod search;
pub mod session;

pub use cell::{format_path, path_length, Cell};
pub use error::{EditConflict, InvalidEdit, SearchError};
pub use grid::Grid;
pub use node::NodeCost;
pub use search::{SearchEngine, SearchStatus};
