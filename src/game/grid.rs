use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{
    error::{EngineError, Result},
    game::events::TileMove,
    models::{Position, Tile},
};

/// Brick-offset letter grid.
///
/// Stored row-major (`cells[row][column]`). Odd columns sit half a tile
/// lower than even ones, so a tile in an even column touches rows `r - 1`
/// and `r` of its neighbouring columns while a tile in an odd column
/// touches rows `r` and `r + 1`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Tile>>,
}

impl Grid {
    /// Build a grid by asking `make` for the tile at every position
    pub fn from_fn(rows: usize, columns: usize, mut make: impl FnMut(Position) -> Tile) -> Self {
        let mut cells = Vec::with_capacity(rows);

        for row in 0..rows {
            let mut cells_in_row = Vec::with_capacity(columns);
            for column in 0..columns {
                cells_in_row.push(make(Position::new(row, column)));
            }
            cells.push(cells_in_row);
        }

        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Rebuild a grid from saved rows, checking it is rectangular and
    /// every tile agrees with its slot
    pub fn from_cells(cells: Vec<Vec<Tile>>) -> Result<Self> {
        let rows = cells.len();
        let columns = cells.first().map(|row| row.len()).unwrap_or(0);

        if rows == 0 || columns == 0 {
            return Err(EngineError::InvalidGridSize { rows, columns });
        }
        if cells.iter().any(|row| row.len() != columns) {
            return Err(EngineError::CorruptSnapshot(
                "grid rows have different lengths".to_string(),
            ));
        }

        let grid = Self {
            rows,
            columns,
            cells,
        };
        grid.check_integrity()?;
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn last_row(&self) -> usize {
        self.rows - 1
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.column < self.columns
    }

    pub fn get(&self, position: Position) -> Option<&Tile> {
        self.cells
            .get(position.row)
            .and_then(|row| row.get(position.column))
    }

    pub(crate) fn get_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.cells
            .get_mut(position.row)
            .and_then(|row| row.get_mut(position.column))
    }

    /// Rows of tiles, top to bottom
    pub fn cells(&self) -> &[Vec<Tile>] {
        &self.cells
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().flatten()
    }

    /// Write `tile` into `position`. Refuses (returns false) unless the
    /// tile already carries that position, so slots and tiles never drift
    /// apart.
    pub fn update_tile(&mut self, position: Position, tile: Tile) -> bool {
        if tile.position != position {
            tracing::debug!(
                "Refusing to write tile at {} into slot {}",
                tile.position,
                position
            );
            return false;
        }

        match self.get_mut(position) {
            Some(slot) => {
                *slot = tile;
                true
            }
            None => false,
        }
    }

    /// Check if two positions touch under the brick-offset layout
    pub fn is_adjacent(a: Position, b: Position) -> bool {
        if a.column == b.column {
            return a.row.abs_diff(b.row) == 1;
        }

        if a.column.abs_diff(b.column) != 1 {
            return false;
        }

        if a.column % 2 == 0 {
            b.row == a.row || b.row + 1 == a.row
        } else {
            b.row == a.row || b.row == a.row + 1
        }
    }

    /// All in-bounds neighbours of `position`
    pub fn neighbors(&self, position: Position) -> Vec<Position> {
        let mut found = Vec::with_capacity(6);
        let row_start = position.row.saturating_sub(1);
        let column_start = position.column.saturating_sub(1);

        for row in row_start..=(position.row + 1).min(self.rows - 1) {
            for column in column_start..=(position.column + 1).min(self.columns - 1) {
                let candidate = Position::new(row, column);
                if Self::is_adjacent(position, candidate) {
                    found.push(candidate);
                }
            }
        }

        found
    }

    /// Flag every tile at `positions` for removal
    pub fn mark_for_removal(&mut self, positions: &[Position]) {
        for position in positions {
            if let Some(tile) = self.get_mut(*position) {
                tile.is_marked_for_removal = true;
            }
        }
    }

    /// Gravity. In each column the surviving tiles drop toward the bottom
    /// row keeping their order, and the vacated top slots get placeholders.
    pub fn collapse(&mut self) -> Vec<TileMove> {
        let mut moves = Vec::new();

        for column in 0..self.columns {
            let survivors: Vec<Tile> = (0..self.rows)
                .map(|row| self.cells[row][column].clone())
                .filter(|tile| !tile.is_marked_for_removal)
                .collect();
            let vacated = self.rows - survivors.len();

            for row in 0..vacated {
                self.cells[row][column] = Tile::placeholder(Position::new(row, column));
            }

            for (offset, mut tile) in survivors.into_iter().enumerate() {
                let to = Position::new(vacated + offset, column);
                if tile.position != to {
                    moves.push(TileMove {
                        tile_id: tile.id,
                        from: tile.position,
                        to,
                    });
                }
                tile.position = to;
                self.cells[to.row][column] = tile;
            }
        }

        moves
    }

    /// Shift rows `0..=through_row` of `column` down by one. The tile at
    /// `through_row + 1` is dropped and row 0 receives a placeholder.
    /// Returns the tile that was pushed out.
    pub(crate) fn shift_column_down(
        &mut self,
        column: usize,
        through_row: usize,
    ) -> (Tile, Vec<TileMove>) {
        let mut moves = Vec::with_capacity(through_row + 1);
        let dropped = self.cells[through_row + 1][column].clone();

        for row in (0..=through_row).rev() {
            let mut tile = self.cells[row][column].clone();
            let to = Position::new(row + 1, column);
            moves.push(TileMove {
                tile_id: tile.id,
                from: tile.position,
                to,
            });
            tile.position = to;
            self.cells[row + 1][column] = tile;
        }

        self.cells[0][column] = Tile::placeholder(Position::new(0, column));
        (dropped, moves)
    }

    /// Slots currently holding placeholders, row-major
    pub fn placeholder_positions(&self) -> Vec<Position> {
        self.tiles()
            .filter(|tile| tile.is_placeholder)
            .map(|tile| tile.position)
            .collect()
    }

    pub fn hazard_present(&self) -> bool {
        self.tiles().any(|tile| tile.is_hazard())
    }

    /// Verify the settled-state invariants: every tile sits where it says,
    /// identities are unique and no placeholder is left behind
    pub fn check_integrity(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.rows * self.columns);

        for (row, cells_in_row) in self.cells.iter().enumerate() {
            for (column, tile) in cells_in_row.iter().enumerate() {
                let slot = Position::new(row, column);
                if tile.position != slot {
                    return Err(EngineError::CorruptSnapshot(format!(
                        "tile {} claims {} but sits in {}",
                        tile.id, tile.position, slot
                    )));
                }
                if tile.is_placeholder {
                    return Err(EngineError::CorruptSnapshot(format!(
                        "placeholder left at {}",
                        slot
                    )));
                }
                if !seen.insert(tile.id) {
                    return Err(EngineError::CorruptSnapshot(format!(
                        "tile {} appears twice",
                        tile.id
                    )));
                }
            }
        }

        Ok(())
    }
}
