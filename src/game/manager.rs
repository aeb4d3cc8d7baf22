use rand::Rng;
use std::sync::Arc;

use crate::{
    dictionary::Dictionary,
    error::{EngineError, Result},
    game::{
        converter::TileConverter,
        events::{GameEvents, HazardEvent, HazardReport, NoopEvents, SelectResult, SelectionRejection, SubmitOutcome},
        factory::{self, RefillContext},
        grid::Grid,
        hazard,
        letters::LetterGenerator,
        performance::PerformanceEvaluator,
        rules::EngineConfig,
        snapshot::EngineSnapshot,
        tile_types::TileTypeGenerator,
        validator::WordChecker,
    },
    models::{Position, Tile, TileCategory},
};

/// Level a fresh engine starts at
pub const STARTING_LEVEL: u32 = 1;

/// Where the player is in the select/submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing selected
    Idle,
    /// A path is being built
    Selecting,
    /// The current path spells a dictionary word
    Validated,
    /// A fire tile reached the bottom; input is refused until `revive`
    GameOver,
}

/// The grid engine.
///
/// Owns the board, the selection path and every generator. Submission runs
/// removal, gravity, refill, upgrade and the hazard scan as one synchronous
/// step and hands back a diff for presentation layers to animate.
pub struct TileManager<R: Rng> {
    config: EngineConfig,
    grid: Grid,
    selection: Vec<Position>,
    letters: LetterGenerator,
    tile_types: TileTypeGenerator,
    performance: PerformanceEvaluator,
    checker: WordChecker,
    level: u32,
    game_over: bool,
    rng: R,
    events: Box<dyn GameEvents>,
}

impl<R: Rng> TileManager<R> {
    /// Start a new game with a freshly generated board
    pub fn new(config: EngineConfig, dictionary: Arc<Dictionary>, mut rng: R) -> Result<Self> {
        config.validate()?;
        let checker = WordChecker::new(dictionary)?;
        let mut letters = LetterGenerator::new(config.letter_frequencies.clone());
        let grid = Self::generate_board(&config, &mut letters, &mut rng);

        tracing::info!(
            "Started {} game on a {}x{} board",
            config.mode,
            config.rows,
            config.columns
        );

        Ok(Self {
            tile_types: TileTypeGenerator::new(config.mode),
            config,
            grid,
            selection: Vec::new(),
            letters,
            performance: PerformanceEvaluator::new(),
            checker,
            level: STARTING_LEVEL,
            game_over: false,
            rng,
            events: Box::new(NoopEvents),
        })
    }

    /// Resume a saved session. The snapshot's mode overrides the config's.
    pub fn restore(
        mut config: EngineConfig,
        dictionary: Arc<Dictionary>,
        snapshot: EngineSnapshot,
        rng: R,
    ) -> Result<Self> {
        config.mode = snapshot.mode;
        config.validate()?;

        let found_rows = snapshot.grid.len();
        let found_columns = snapshot.grid.first().map(|row| row.len()).unwrap_or(0);
        if found_rows != config.rows || found_columns != config.columns {
            return Err(EngineError::SnapshotMismatch {
                rows: config.rows,
                columns: config.columns,
                found_rows,
                found_columns,
            });
        }

        let grid = Grid::from_cells(snapshot.grid)?;
        Self::check_saved_selection(&grid, &snapshot.selection, config.max_selection)?;

        let checker = WordChecker::new(dictionary)?;
        let mut letters = LetterGenerator::new(config.letter_frequencies.clone());
        letters.restore_probabilities(snapshot.current_probabilities)?;

        tracing::info!("Restored {} game at level {}", config.mode, snapshot.level);

        Ok(Self {
            tile_types: TileTypeGenerator::new(config.mode),
            config,
            grid,
            selection: snapshot.selection,
            letters,
            performance: PerformanceEvaluator::with_counters(
                snapshot.hot_streak,
                snapshot.cold_streak,
            ),
            checker,
            level: snapshot.level,
            game_over: snapshot.game_over,
            rng,
            events: Box::new(NoopEvents),
        })
    }

    /// Route game-over, hazard-state and rejection signals to `events`
    pub fn with_events(mut self, events: Box<dyn GameEvents>) -> Self {
        self.events = events;
        self
    }

    fn generate_board(config: &EngineConfig, letters: &mut LetterGenerator, rng: &mut R) -> Grid {
        Grid::from_fn(config.rows, config.columns, |position| {
            factory::generate_tile(letters, TileCategory::Regular, position, true, rng)
        })
    }

    fn check_saved_selection(grid: &Grid, selection: &[Position], cap: usize) -> Result<()> {
        if selection.len() > cap {
            return Err(EngineError::CorruptSnapshot(format!(
                "selection of {} tiles exceeds cap {}",
                selection.len(),
                cap
            )));
        }

        for (index, position) in selection.iter().enumerate() {
            let selected = grid.get(*position).map(|tile| tile.is_selected);
            if selected != Some(true) {
                return Err(EngineError::CorruptSnapshot(format!(
                    "selected position {} is not a selected tile",
                    position
                )));
            }
            if index > 0 && !Grid::is_adjacent(selection[index - 1], *position) {
                return Err(EngineError::CorruptSnapshot(format!(
                    "selection breaks at {}",
                    position
                )));
            }
            if selection[..index].contains(position) {
                return Err(EngineError::CorruptSnapshot(format!(
                    "position {} is selected twice",
                    position
                )));
            }
        }

        if let Some(stray) = grid
            .tiles()
            .find(|tile| tile.is_selected && !selection.contains(&tile.position))
        {
            return Err(EngineError::CorruptSnapshot(format!(
                "tile at {} is flagged selected outside the selection",
                stray.position
            )));
        }

        Ok(())
    }

    /// Throw away the board and start over. Letter weights and streaks go
    /// back to their initial values; the level is left to the caller.
    pub fn new_game(&mut self) {
        self.letters.reset_probabilities();
        self.performance.reset();
        self.selection.clear();
        self.game_over = false;
        self.grid = Self::generate_board(&self.config, &mut self.letters, &mut self.rng);
        tracing::info!("New {} game", self.config.mode);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn performance(&self) -> &PerformanceEvaluator {
        &self.performance
    }

    pub fn letter_generator(&self) -> &LetterGenerator {
        &self.letters
    }

    pub fn word_checker(&self) -> &WordChecker {
        &self.checker
    }

    /// Selected positions, oldest first
    pub fn selection(&self) -> &[Position] {
        &self.selection
    }

    /// Selected tiles, oldest first
    pub fn selected_tiles(&self) -> Vec<Tile> {
        self.selection
            .iter()
            .filter_map(|position| self.grid.get(*position).cloned())
            .collect()
    }

    /// Word spelled by the current selection
    pub fn current_word(&self) -> String {
        WordChecker::word(&self.selected_tiles())
    }

    /// Score the current selection would earn
    pub fn current_score(&self) -> i32 {
        WordChecker::score(&self.selected_tiles(), &self.config.multipliers)
    }

    pub fn is_valid_selection(&self) -> bool {
        self.checker.is_valid(&self.selected_tiles())
    }

    pub fn state(&self) -> EngineState {
        if self.game_over {
            EngineState::GameOver
        } else if self.selection.is_empty() {
            EngineState::Idle
        } else if self.is_valid_selection() {
            EngineState::Validated
        } else {
            EngineState::Selecting
        }
    }

    /// Extend the selection path with the tile at `position`
    pub fn select(&mut self, position: Position) -> SelectResult {
        match self.check_selectable(position) {
            Ok(()) => {
                if let Some(tile) = self.grid.get_mut(position) {
                    tile.is_selected = true;
                }
                self.selection.push(position);
                SelectResult::Selected
            }
            Err(reason) => {
                tracing::trace!("Rejected selection at {}: {:?}", position, reason);
                self.events.selection_rejected(position, reason);
                SelectResult::Rejected(reason)
            }
        }
    }

    fn check_selectable(&self, position: Position) -> std::result::Result<(), SelectionRejection> {
        if self.game_over {
            return Err(SelectionRejection::GameOver);
        }

        let tile = self
            .grid
            .get(position)
            .ok_or(SelectionRejection::OutOfBounds)?;

        if !tile.is_playable() {
            return Err(SelectionRejection::NotPlayable);
        }
        if self.selection.contains(&position) {
            return Err(SelectionRejection::AlreadySelected);
        }
        if self.selection.len() >= self.config.max_selection {
            return Err(SelectionRejection::SelectionFull);
        }
        if let Some(last) = self.selection.last() {
            if !Grid::is_adjacent(*last, position) {
                return Err(SelectionRejection::NotAdjacent);
            }
        }

        Ok(())
    }

    /// Drop `position` and everything selected after it. Returns false if
    /// the position was not selected.
    pub fn deselect(&mut self, position: Position) -> bool {
        let Some(index) = self.selection.iter().position(|p| *p == position) else {
            return false;
        };

        for removed in self.selection.drain(index..) {
            if let Some(tile) = self.grid.get_mut(removed) {
                tile.is_selected = false;
            }
        }
        true
    }

    pub fn clear_selection(&mut self) {
        for position in self.selection.drain(..) {
            if let Some(tile) = self.grid.get_mut(position) {
                tile.is_selected = false;
            }
        }
    }

    /// Forget the selection after the board moved under it. Flags are
    /// cleared grid-wide since the stored positions may no longer point at
    /// the selected tiles.
    fn drop_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        tracing::debug!("Selection of {} tiles dropped by a hazard move", self.selection.len());
        self.selection.clear();
        for tile in self.grid.tiles_mut() {
            tile.is_selected = false;
        }
    }

    /// Overwrite a single slot. Only writes when `tile.position` matches.
    pub fn update_tile(&mut self, position: Position, tile: Tile) -> bool {
        self.grid.update_tile(position, tile)
    }

    /// Play the current selection. Returns `None` and changes nothing when
    /// the selection is not a dictionary word.
    pub fn submit(&mut self) -> Option<SubmitOutcome> {
        if self.game_over {
            return None;
        }

        let tiles = self.selected_tiles();
        if !self.checker.is_valid(&tiles) {
            tracing::debug!("'{}' is not a word", WordChecker::word(&tiles));
            return None;
        }

        let word = WordChecker::word(&tiles);
        let points = WordChecker::score(&tiles, &self.config.multipliers);
        tracing::info!("Submitting '{}' for {} points", word, points);

        self.performance.record_word(&word, points);

        // 1. Removal
        self.grid.mark_for_removal(&self.selection);
        let removed = self.selected_tiles();

        // 2. Gravity
        let gravity = self.grid.collapse();

        // 3. Refill
        let vacated = self.grid.placeholder_positions();
        let context = RefillContext {
            word: &word,
            points,
            level: self.level,
            streak: &self.performance,
        };
        let spawned = factory::generate_refill(
            &mut self.letters,
            &self.tile_types,
            context,
            &vacated,
            &mut self.rng,
        );
        for tile in &spawned {
            self.grid.update_tile(tile.position, tile.clone());
        }
        tracing::debug!(
            "Cleared {} tiles, {} fell, {} spawned",
            removed.len(),
            gravity.len(),
            spawned.len()
        );

        // 4. Upgrade
        let upgrade = TileConverter::apply_upgrade(&word, points, &mut self.grid, &mut self.rng);

        // 5. Hazards
        let hazards = self.scan_hazards();

        // 6. Selection
        self.selection.clear();

        debug_assert!(self.grid.check_integrity().is_ok());

        Some(SubmitOutcome {
            word,
            points,
            removed,
            gravity,
            spawned,
            upgrade,
            hazards,
        })
    }

    /// Run one hazard tick. Fires the game-over signal the first time a
    /// fire tile sits on the bottom row; while game over is latched the
    /// board is left alone.
    pub fn scan_hazards(&mut self) -> HazardReport {
        if self.game_over {
            return HazardReport {
                hazard_present: self.grid.hazard_present(),
                ..HazardReport::default()
            };
        }

        let letters = &mut self.letters;
        let rng = &mut self.rng;
        let report = hazard::scan_hazards(&mut self.grid, &self.config.break_points, |position| {
            factory::generate_tile(letters, TileCategory::Regular, position, false, rng)
        });

        let disturbed = report.events.iter().any(|event| match event {
            HazardEvent::Advanced { spawned, .. } => self
                .selection
                .iter()
                .any(|position| position.column == spawned.position.column),
            _ => false,
        });
        if disturbed || report.game_over {
            self.drop_selection();
        }

        if report.game_over {
            self.game_over = true;
            tracing::info!("Game over at level {}", self.level);
            self.events.game_over();
        }
        self.events.hazard_state(report.hazard_present);

        report
    }

    /// Extra-life recovery: every fire tile burns out into a regular tile
    /// and play resumes. Returns how many fire tiles were extinguished.
    pub fn revive(&mut self) -> usize {
        let mut extinguished = 0;
        for tile in self.grid.tiles_mut().filter(|tile| tile.is_hazard()) {
            tile.category = TileCategory::Regular;
            tile.burn_counter = 0;
            extinguished += 1;
        }

        self.game_over = false;
        tracing::info!("Revived, {} fire tiles extinguished", extinguished);
        self.events.hazard_state(false);
        extinguished
    }

    /// Capture everything needed to resume this session
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            grid: self.grid.cells().to_vec(),
            selection: self.selection.clone(),
            current_probabilities: self.letters.current_probabilities().to_vec(),
            hot_streak: self.performance.hot_count(),
            cold_streak: self.performance.cold_count(),
            level: self.level,
            mode: self.config.mode,
            game_over: self.game_over,
        }
    }
}
