pub mod tile;

pub use tile::{Position, Tile, TileCategory};
