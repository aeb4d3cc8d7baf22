//! Fire tile propagation.
//!
//! Each scan looks at every column from the bottom up and takes the lowest
//! fire tile as that column's active one. A fire tile burns through the tile
//! beneath it over several scans, depending on that tile's break point, then
//! drops into its slot, dragging the rest of the column with it. A fire tile
//! already on the bottom row ends the game.

use crate::{
    game::{
        events::{HazardEvent, HazardReport},
        grid::Grid,
        rules::BreakPointTable,
    },
    models::{Position, Tile},
};

/// Run one hazard tick over `grid`. `spawn` supplies the tile that enters
/// the top of a column after a fire tile advances.
pub fn scan_hazards(
    grid: &mut Grid,
    break_points: &BreakPointTable,
    mut spawn: impl FnMut(Position) -> Tile,
) -> HazardReport {
    let mut report = HazardReport::default();
    let last_row = grid.last_row();

    for column in 0..grid.columns() {
        let Some(row) = (0..grid.rows())
            .rev()
            .find(|row| grid.cells()[*row][column].is_hazard())
        else {
            continue;
        };
        let position = Position::new(row, column);

        if row == last_row {
            let tile_id = grid.cells()[row][column].id;
            tracing::info!("Fire tile {} reached the bottom row at {}", tile_id, position);
            report
                .events
                .push(HazardEvent::ReachedBottom { tile_id, position });
            report.game_over = true;
            break;
        }

        let below = &grid.cells()[row + 1][column];
        if below.is_hazard() {
            continue;
        }
        let break_point = break_points.get(below.category);

        let Some(hazard) = grid.get_mut(position) else {
            continue;
        };

        if hazard.burn_counter < break_point {
            hazard.burn_counter += 1;
            report.events.push(HazardEvent::Burning {
                tile_id: hazard.id,
                position,
                burn_counter: hazard.burn_counter,
            });
            continue;
        }

        hazard.burn_counter = 0;
        let tile_id = hazard.id;
        let (consumed, moves) = grid.shift_column_down(column, row);

        let top = Position::new(0, column);
        let spawned = spawn(top);
        if !grid.update_tile(top, spawned.clone()) {
            tracing::warn!("Spawned tile for column {} did not match its slot", column);
        }

        tracing::debug!(
            "Fire tile {} consumed {} ({}) and moved to row {}",
            tile_id,
            consumed.letter,
            consumed.category,
            row + 1
        );

        report.events.push(HazardEvent::Advanced {
            tile_id,
            consumed: consumed.id,
            moves,
            spawned,
        });
    }

    report.hazard_present = grid.hazard_present();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fixtures::{fresh_tile, lettered_grid};
    use crate::models::TileCategory;

    fn set_category(grid: &mut Grid, position: Position, category: TileCategory) {
        grid.get_mut(position).unwrap().category = category;
    }

    #[test]
    fn test_no_hazards_no_changes() {
        let mut grid = lettered_grid(5, 5);
        let before = grid.clone();
        let report = scan_hazards(&mut grid, &BreakPointTable::default(), fresh_tile);

        assert!(report.events.is_empty());
        assert!(!report.game_over);
        assert!(!report.hazard_present);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_hazard_on_last_row_ends_game_without_mutation() {
        let mut grid = lettered_grid(7, 7);
        set_category(&mut grid, Position::new(6, 0), TileCategory::Hazard);
        // A second fire tile further right must not move this tick
        set_category(&mut grid, Position::new(2, 4), TileCategory::Hazard);
        grid.get_mut(Position::new(2, 4)).unwrap().burn_counter = 5;
        let before = grid.clone();

        let report = scan_hazards(&mut grid, &BreakPointTable::default(), fresh_tile);

        assert!(report.game_over);
        assert_eq!(report.events.len(), 1);
        assert!(matches!(
            report.events[0],
            HazardEvent::ReachedBottom { position, .. } if position == Position::new(6, 0)
        ));
        assert_eq!(grid, before);
        assert!(report.hazard_present);
    }

    #[test]
    fn test_break_point_gating() {
        let mut grid = lettered_grid(7, 7);
        let break_points = BreakPointTable::default();
        let hazard_at = Position::new(2, 3);
        let below = Position::new(3, 3);
        set_category(&mut grid, hazard_at, TileCategory::Hazard);
        set_category(&mut grid, below, TileCategory::BonusHigh);
        let limit = break_points.get(TileCategory::BonusHigh);
        grid.get_mut(hazard_at).unwrap().burn_counter = limit - 1;
        let hazard_id = grid.get(hazard_at).unwrap().id;
        let consumed_id = grid.get(below).unwrap().id;

        // One below the break point: the counter ticks, nothing moves
        let report = scan_hazards(&mut grid, &break_points, fresh_tile);
        assert_eq!(grid.get(hazard_at).unwrap().id, hazard_id);
        assert_eq!(grid.get(hazard_at).unwrap().burn_counter, limit);
        assert!(matches!(report.events[0], HazardEvent::Burning { .. }));

        // At the break point: one row of cascade and a reset counter
        let above_id = grid.get(Position::new(1, 3)).unwrap().id;
        let report = scan_hazards(&mut grid, &break_points, fresh_tile);
        let moved = grid.get(below).unwrap();
        assert_eq!(moved.id, hazard_id);
        assert_eq!(moved.burn_counter, 0);
        assert_eq!(grid.get(Position::new(2, 3)).unwrap().id, above_id);
        assert!(grid.tiles().all(|t| t.id != consumed_id));
        assert!(!grid.get(Position::new(0, 3)).unwrap().is_placeholder);
        assert_eq!(grid.check_integrity(), Ok(()));

        match &report.events[0] {
            HazardEvent::Advanced { moves, consumed, .. } => {
                assert_eq!(*consumed, consumed_id);
                assert_eq!(moves.len(), 3);
            }
            other => panic!("expected an advance, got {:?}", other),
        }
    }

    #[test]
    fn test_regular_tile_burns_fastest() {
        let mut grid = lettered_grid(5, 5);
        let break_points = BreakPointTable::default();
        set_category(&mut grid, Position::new(1, 1), TileCategory::Hazard);

        let mut scans = 0;
        while !grid.get(Position::new(2, 1)).unwrap().is_hazard() {
            scan_hazards(&mut grid, &break_points, fresh_tile);
            scans += 1;
        }
        assert_eq!(scans as u32, break_points.get(TileCategory::Regular) + 1);
    }

    #[test]
    fn test_lowest_hazard_in_column_is_active() {
        let mut grid = lettered_grid(5, 5);
        set_category(&mut grid, Position::new(2, 2), TileCategory::Hazard);
        set_category(&mut grid, Position::new(3, 2), TileCategory::Hazard);
        let before = grid.clone();

        let report = scan_hazards(&mut grid, &BreakPointTable::default(), fresh_tile);

        // The lower fire tile is the active one and it sits on a regular tile
        assert_eq!(report.events.len(), 1);
        assert!(matches!(
            report.events[0],
            HazardEvent::Burning { position, .. } if position == Position::new(3, 2)
        ));
        assert_eq!(
            grid.get(Position::new(2, 2)).unwrap(),
            before.get(Position::new(2, 2)).unwrap()
        );
    }
}
