// Game engine modules

pub mod converter;
pub mod events;
pub mod factory;
pub mod grid;
pub mod hazard;
pub mod letters;
pub mod manager;
pub mod mode;
pub mod performance;
pub mod rules;
pub mod scorer;
pub mod snapshot;
pub mod tile_types;
pub mod validator;

pub use converter::TileConverter;
pub use events::{
    GameEvents, HazardEvent, HazardReport, NoopEvents, SelectResult, SelectionRejection,
    SubmitOutcome, TileMove, TileUpgrade,
};
pub use grid::Grid;
pub use letters::LetterGenerator;
pub use manager::{EngineState, TileManager};
pub use mode::GameMode;
pub use performance::PerformanceEvaluator;
pub use rules::{BreakPointTable, CategoryTable, EngineConfig, MultiplierTable};
pub use scorer::Scorer;
pub use snapshot::EngineSnapshot;
pub use tile_types::TileTypeGenerator;
pub use validator::WordChecker;
