//! Randomised board layout.
//!
//! Generation is deterministic for a given random source: tiles are drawn in
//! row-major order, then food, walls, and enemies claim coordinates from a
//! shrinking pool of empty interior cells, in that order.

use std::ops::Range;

use rand::Rng;
use scavenger_core::{
    CellCoord, GenerationError, OccupantKind, TileKind, MIN_BOARD_EDGE, PLAYER_START,
};

use crate::board::Board;

/// Tunables for the board generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    /// Number of cell columns, border included.
    pub columns: u32,
    /// Number of cell rows, border included.
    pub rows: u32,
    /// Size of the ground tile palette.
    pub ground_variants: u8,
    /// Size of the blocking tile palette.
    pub blocking_variants: u8,
    /// Exact number of food pickups placed on each board.
    pub food_count: u32,
    /// Half-open range the interior wall count is drawn from.
    pub wall_count: Range<u32>,
    /// Half-open range the enemy count is drawn from.
    pub enemy_count: Range<u32>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: 8,
            rows: 8,
            ground_variants: 4,
            blocking_variants: 3,
            food_count: 5,
            wall_count: 6..10,
            enemy_count: 2..5,
        }
    }
}

impl BoardConfig {
    /// Cell the exit is placed on.
    #[must_use]
    pub fn exit_cell(&self) -> CellCoord {
        CellCoord::new(
            self.columns.saturating_sub(2),
            self.rows.saturating_sub(2),
        )
    }
}

/// Board tiles plus the coordinates claimed for every occupant category.
///
/// Occupants are not yet written into the board; the world assigns their
/// identifiers when it commits the layout.
#[derive(Debug)]
pub(crate) struct Layout {
    pub(crate) board: Board,
    pub(crate) exit: CellCoord,
    pub(crate) food: Vec<CellCoord>,
    pub(crate) walls: Vec<CellCoord>,
    pub(crate) enemies: Vec<CellCoord>,
    pub(crate) empty_cells: Vec<CellCoord>,
}

/// Builds a fresh layout, failing without side effects when the board cannot
/// hold every requested occupant.
pub(crate) fn generate<R: Rng + ?Sized>(
    config: &BoardConfig,
    rng: &mut R,
) -> Result<Layout, GenerationError> {
    let (columns, rows) = (config.columns, config.rows);
    if columns < MIN_BOARD_EDGE || rows < MIN_BOARD_EDGE {
        return Err(GenerationError::BoardTooSmall { columns, rows });
    }

    let mut board = Board::new(columns, rows);
    let mut pool = Vec::new();

    for row in 0..rows {
        for column in 0..columns {
            let coord = CellCoord::new(column, row);
            if is_border(coord, columns, rows) {
                let variant = rng.gen_range(0..config.blocking_variants.max(1));
                board.reset_cell(coord, false, TileKind::Blocking(variant));
            } else {
                let variant = rng.gen_range(0..config.ground_variants.max(1));
                board.reset_cell(coord, true, TileKind::Ground(variant));
                pool.push(coord);
            }
        }
    }

    pool.retain(|coord| *coord != PLAYER_START);

    let exit = config.exit_cell();
    pool.retain(|coord| *coord != exit);

    let food = claim(&mut pool, OccupantKind::Food, config.food_count, rng)?;
    let wall_count = draw_count(rng, &config.wall_count);
    let walls = claim(&mut pool, OccupantKind::Wall, wall_count, rng)?;
    let enemy_count = draw_count(rng, &config.enemy_count);
    let enemies = claim(&mut pool, OccupantKind::Enemy, enemy_count, rng)?;

    Ok(Layout {
        board,
        exit,
        food,
        walls,
        enemies,
        empty_cells: pool,
    })
}

fn is_border(coord: CellCoord, columns: u32, rows: u32) -> bool {
    coord.column() == 0
        || coord.row() == 0
        || coord.column() + 1 == columns
        || coord.row() + 1 == rows
}

fn draw_count<R: Rng + ?Sized>(rng: &mut R, range: &Range<u32>) -> u32 {
    if range.is_empty() {
        range.start
    } else {
        rng.gen_range(range.clone())
    }
}

fn claim<R: Rng + ?Sized>(
    pool: &mut Vec<CellCoord>,
    category: OccupantKind,
    count: u32,
    rng: &mut R,
) -> Result<Vec<CellCoord>, GenerationError> {
    let requested = usize::try_from(count).unwrap_or(usize::MAX);
    if requested > pool.len() {
        return Err(GenerationError::PoolExhausted {
            category,
            requested: count,
            available: pool.len(),
        });
    }

    let mut claimed = Vec::with_capacity(requested);
    for _ in 0..requested {
        let index = rng.gen_range(0..pool.len());
        claimed.push(pool.remove(index));
    }
    Ok(claimed)
}
