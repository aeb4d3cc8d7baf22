pub mod config;
pub mod dictionary;
pub mod error;
pub mod game;
pub mod models;
pub mod utils;

pub use dictionary::Dictionary;
pub use error::{EngineError, Result};
pub use game::{EngineConfig, EngineSnapshot, EngineState, GameMode, TileManager};
pub use models::{Position, Tile, TileCategory};
