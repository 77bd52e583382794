#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Scavenger engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The session submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presenters to react to deterministically. Systems consume immutable views
//! such as [`GridView`] and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cell the player occupies at the start of every board.
pub const PLAYER_START: CellCoord = CellCoord::new(1, 1);

/// Food the player holds when a new game starts.
pub const STARTING_FOOD: i32 = 20;

/// Food removed from the pool on every turn tick.
pub const FOOD_DECAY_PER_TURN: i32 = 1;

/// Food granted to the pool whenever an enemy lands an attack.
pub const ENEMY_ATTACK_FOOD_REWARD: i32 = 3;

/// Health removed from the player by a single enemy attack.
pub const ENEMY_ATTACK_DAMAGE: u32 = 1;

/// Smallest board edge that leaves room for both the start and the exit cell.
pub const MIN_BOARD_EDGE: u32 = 4;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the board dimensions used by subsequent generations.
    ///
    /// The current board is discarded.
    ConfigureBoard {
        /// Number of cell columns on the board.
        columns: u32,
        /// Number of cell rows on the board.
        rows: u32,
    },
    /// Discards the current board and every occupant placed on it.
    CleanBoard,
    /// Generates a fresh board from the world's random source.
    GenerateBoard,
    /// Resets the resource pool for a brand new game.
    ResetResources {
        /// Food the player starts with.
        food: i32,
    },
    /// Increments the level counter.
    AdvanceLevel,
    /// Applies a signed change to the food pool.
    ChangeFood {
        /// Amount of food added (positive) or consumed (negative).
        delta: i32,
    },
    /// Restores the player's health and unfreezes input handling.
    ResetPlayer,
    /// Places the player on the provided cell.
    SpawnPlayer {
        /// Cell the player should occupy.
        cell: CellCoord,
    },
    /// Requests that the player step a single cell in the given direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the player pick up the food lying on the provided cell.
    CollectFood {
        /// Cell holding the food pickup.
        cell: CellCoord,
    },
    /// Requests that the occupant of the provided cell react to the player trying to enter.
    BumpOccupant {
        /// Cell the player tried to enter.
        cell: CellCoord,
    },
    /// Requests that an enemy attack the player.
    EnemyAttack {
        /// Identifier of the attacking enemy.
        enemy: EnemyId,
    },
    /// Requests that an enemy advance a single step in the specified direction.
    StepEnemy {
        /// Identifier of the enemy attempting to move.
        enemy: EnemyId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Signals that the presentation of an enemy step has completed.
    FinishEnemyMove {
        /// Identifier of the enemy whose motion finished.
        enemy: EnemyId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Announces that the board was discarded.
    BoardCleared {
        /// Cells that held a tile before the board was discarded.
        cells: Vec<CellCoord>,
    },
    /// Announces the tile selected for a cell during generation.
    TilePlaced {
        /// Cell that received the tile.
        cell: CellCoord,
        /// Tile assigned to the cell.
        tile: TileKind,
    },
    /// Announces that an occupant claimed a cell.
    OccupantPlaced {
        /// Cell claimed by the occupant.
        cell: CellCoord,
        /// Occupant that claimed the cell.
        occupant: Occupant,
    },
    /// Confirms that a fresh board finished generating.
    BoardGenerated {
        /// Number of cell columns on the generated board.
        columns: u32,
        /// Number of cell rows on the generated board.
        rows: u32,
        /// Empty cells left over after every occupant was placed.
        empty_cells: usize,
    },
    /// Reports that board generation failed and no board is active.
    BoardGenerationFailed {
        /// Reason the generation failed.
        reason: GenerationError,
    },
    /// Confirms that the resource pool was reset for a new game.
    ResourcesReset {
        /// Food available after the reset.
        food: i32,
        /// Level active after the reset.
        level: u32,
    },
    /// Confirms that the food pool changed.
    FoodChanged {
        /// Food available after the change.
        food: i32,
    },
    /// Confirms that the level counter advanced.
    LevelAdvanced {
        /// Level active after the advance.
        level: u32,
    },
    /// Announces that the food pool ran out.
    GameOver {
        /// Level the player reached.
        level: u32,
    },
    /// Confirms that the player's state was restored for a new game.
    PlayerReset {
        /// Health restored to the player.
        health: u32,
    },
    /// Confirms that the player was placed onto the board.
    PlayerSpawned {
        /// Cell the player occupies.
        cell: CellCoord,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after moving.
        to: CellCoord,
    },
    /// Reports that the player took damage.
    PlayerDamaged {
        /// Health remaining after the damage.
        health: u32,
    },
    /// Confirms that the player picked up food.
    FoodCollected {
        /// Identifier of the collected pickup.
        food: FoodId,
        /// Cell that held the pickup.
        cell: CellCoord,
        /// Amount of food granted.
        amount: i32,
    },
    /// Reports that a wall absorbed a hit from the player.
    WallDamaged {
        /// Identifier of the damaged wall.
        wall: WallId,
        /// Cell holding the wall.
        cell: CellCoord,
        /// Hit points remaining.
        hit_points: u32,
    },
    /// Reports that a wall crumbled and vacated its cell.
    WallDestroyed {
        /// Identifier of the destroyed wall.
        wall: WallId,
        /// Cell that held the wall.
        cell: CellCoord,
    },
    /// Reports that the player stepped against the exit.
    ExitReached {
        /// Cell holding the exit.
        cell: CellCoord,
    },
    /// Confirms that an enemy moved between two cells.
    EnemyMoved {
        /// Identifier of the enemy that moved.
        enemy: EnemyId,
        /// Cell the enemy occupied before moving.
        from: CellCoord,
        /// Cell the enemy occupies after moving.
        to: CellCoord,
    },
    /// Confirms that an enemy finished presenting its move and may act again.
    EnemySettled {
        /// Identifier of the settled enemy.
        enemy: EnemyId,
    },
    /// Reports that an enemy attacked the player.
    EnemyAttacked {
        /// Identifier of the attacking enemy.
        enemy: EnemyId,
        /// Cell holding the attacking enemy.
        cell: CellCoord,
    },
    /// Reports that an enemy took damage and survived.
    EnemyDamaged {
        /// Identifier of the damaged enemy.
        enemy: EnemyId,
        /// Health remaining.
        health: u32,
    },
    /// Reports that an enemy was destroyed and removed from the board.
    EnemyDestroyed {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Cell that held the enemy.
        cell: CellCoord,
    },
}

/// Reasons board generation may fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum GenerationError {
    /// The board cannot hold both the player start and the exit on its interior.
    #[error(
        "board of {columns}x{rows} cells is smaller than the {min}x{min} minimum",
        min = MIN_BOARD_EDGE
    )]
    BoardTooSmall {
        /// Requested number of columns.
        columns: u32,
        /// Requested number of rows.
        rows: u32,
    },
    /// The empty-cell pool ran out before every occupant of a category was placed.
    #[error("empty-cell pool exhausted placing {category:?}: requested {requested}, only {available} available")]
    PoolExhausted {
        /// Category of occupant being placed.
        category: OccupantKind,
        /// Number of occupants requested for the category.
        requested: u32,
        /// Empty cells remaining when the category was reached.
        available: usize,
    },
}

/// Cardinal movement directions available to agents.
///
/// Boards use a y-up convention, so `North` increases the row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward decreasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell (`x`).
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell (`y`).
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Neighbouring cell one step away in `direction`.
    ///
    /// Returns `None` when the step would produce a negative index. Upper
    /// bounds are the grid's concern.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }

    /// Signed distance `(dx, dy)` from `self` to `other`.
    #[must_use]
    pub fn delta_to(self, other: CellCoord) -> (i64, i64) {
        (
            i64::from(other.column) - i64::from(self.column),
            i64::from(other.row) - i64::from(self.row),
        )
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }
}

/// Visual tile assigned to a cell, expressed as a palette index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Walkable ground tile drawn from the ground palette.
    Ground(u8),
    /// Blocking border tile drawn from the blocking palette.
    Blocking(u8),
}

/// Unique identifier assigned to an interior wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallId(u32);

impl WallId {
    /// Creates a new wall identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a food pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodId(u32);

impl FoodId {
    /// Creates a new food identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Anything that can claim a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// Destructible interior wall.
    Wall(WallId),
    /// Food pickup.
    Food(FoodId),
    /// Exit leading to the next level.
    Exit,
    /// Enemy chasing the player.
    Enemy(EnemyId),
    /// The player.
    Player,
}

impl Occupant {
    /// Category of the occupant with identifiers stripped.
    #[must_use]
    pub const fn kind(&self) -> OccupantKind {
        match self {
            Self::Wall(_) => OccupantKind::Wall,
            Self::Food(_) => OccupantKind::Food,
            Self::Exit => OccupantKind::Exit,
            Self::Enemy(_) => OccupantKind::Enemy,
            Self::Player => OccupantKind::Player,
        }
    }
}

/// Occupant categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccupantKind {
    /// Destructible interior wall.
    Wall,
    /// Food pickup.
    Food,
    /// Exit leading to the next level.
    Exit,
    /// Enemy chasing the player.
    Enemy,
    /// The player.
    Player,
}

/// One addressable board position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    passable: bool,
    tile: TileKind,
    occupant: Option<Occupant>,
}

impl Cell {
    /// Creates an empty cell.
    #[must_use]
    pub const fn new(passable: bool, tile: TileKind) -> Self {
        Self {
            passable,
            tile,
            occupant: None,
        }
    }

    /// Whether agents may enter the cell when it is unoccupied.
    #[must_use]
    pub const fn passable(&self) -> bool {
        self.passable
    }

    /// Tile drawn for the cell.
    #[must_use]
    pub const fn tile(&self) -> TileKind {
        self.tile
    }

    /// Occupant currently claiming the cell, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    /// Whether an agent could step into the cell right now.
    #[must_use]
    pub const fn is_vacant(&self) -> bool {
        self.passable && self.occupant.is_none()
    }

    /// Replaces the tile drawn for the cell.
    pub fn set_tile(&mut self, tile: TileKind) {
        self.tile = tile;
    }

    /// Writes the occupant slot directly.
    pub fn set_occupant(&mut self, occupant: Option<Occupant>) {
        self.occupant = occupant;
    }
}

/// Read-only view into the dense cell grid.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [Cell],
    columns: u32,
    rows: u32,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [Cell], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Returns the cell at the provided coordinate, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<&'a Cell> {
        self.index(cell).and_then(|index| self.cells.get(index))
    }

    /// Returns the occupant of the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<Occupant> {
        self.cell(cell).and_then(Cell::occupant)
    }

    /// Reports whether the cell is in bounds and passable, regardless of occupancy.
    #[must_use]
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        self.cell(cell).is_some_and(Cell::passable)
    }

    /// Reports whether the cell is in bounds, passable, and unoccupied.
    #[must_use]
    pub fn is_vacant(&self, cell: CellCoord) -> bool {
        self.cell(cell).is_some_and(Cell::is_vacant)
    }

    /// Iterates all cells together with their coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &'a Cell)> + 'a {
        let columns = self.columns.max(1);
        let cells = self.cells;
        cells.iter().enumerate().map(move |(index, cell)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), cell)
        })
    }

    /// Provides the dimensions of the underlying grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Grid cell currently occupied by the enemy.
    pub cell: CellCoord,
    /// Health remaining.
    pub health: u32,
    /// Whether the enemy's last step is still being presented.
    pub busy: bool,
}

/// Read-only snapshot describing all enemies on the board.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a single enemy.
    #[must_use]
    pub fn get(&self, enemy: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&enemy, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of enemies captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the view holds no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Whether the player still accepts input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerMode {
    /// Input is handled normally.
    Active,
    /// Input is frozen until a new game starts.
    GameOver,
}

/// Immutable representation of the player's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Cell occupied by the player, `None` before spawning.
    pub cell: Option<CellCoord>,
    /// Health remaining.
    pub health: u32,
    /// Input handling mode.
    pub mode: PlayerMode,
}

/// Whether the session is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The game is in progress.
    Playing,
    /// The game ended; food changes are ignored.
    GameOver,
}

/// Immutable representation of the resource pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceSnapshot {
    /// Food available.
    pub food: i32,
    /// Level the player reached.
    pub level: u32,
    /// Whether the game is still running.
    pub phase: Phase,
}
