#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Scavenger.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use scavenger_core::{
    CellCoord, Command, Direction, EnemyId, Event, FoodId, Occupant, Phase, PlayerMode, WallId,
    ENEMY_ATTACK_DAMAGE, STARTING_FOOD,
};

mod board;
mod entry;
mod generation;

pub use generation::BoardConfig;

use board::Board;
use entry::{EntryOutcome, EntryReaction, ExitState};

const DEFAULT_SEED: u64 = 0x5ca7_e49e_d00d_f00d;

/// Tunables for the authoritative world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Layout parameters used by every board generation.
    pub board: BoardConfig,
    /// Seed for the world's random source.
    pub seed: u64,
    /// Food granted by a single pickup.
    pub food_amount: i32,
    /// Hits an interior wall absorbs before crumbling.
    pub wall_hit_points: u32,
    /// Hits an enemy absorbs before being destroyed.
    pub enemy_health: u32,
    /// Health the player starts each game with.
    pub player_health: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            seed: DEFAULT_SEED,
            food_amount: 10,
            wall_hit_points: 3,
            enemy_health: 3,
            player_health: 10,
        }
    }
}

/// Represents the authoritative Scavenger world state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    rng: ChaCha8Rng,
    board: Option<Board>,
    exit: Option<ExitState>,
    walls: BTreeMap<WallId, WallState>,
    food: BTreeMap<FoodId, FoodState>,
    enemies: BTreeMap<EnemyId, EnemyState>,
    player: PlayerState,
    resources: Resources,
    ids: IdAllocator,
}

impl World {
    /// Creates a world without a board; generate one with [`Command::GenerateBoard`].
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let player = PlayerState {
            cell: None,
            health: config.player_health,
            mode: PlayerMode::Active,
        };
        Self {
            config,
            rng,
            board: None,
            exit: None,
            walls: BTreeMap::new(),
            food: BTreeMap::new(),
            enemies: BTreeMap::new(),
            player,
            resources: Resources {
                food: STARTING_FOOD,
                level: 1,
                phase: Phase::Playing,
            },
            ids: IdAllocator::default(),
        }
    }

    fn clean(&mut self, out_events: &mut Vec<Event>) {
        let Some(board) = self.board.take() else {
            return;
        };

        out_events.push(Event::BoardCleared {
            cells: board.coords().collect(),
        });
        self.exit = None;
        self.walls.clear();
        self.food.clear();
        self.enemies.clear();
        self.player.cell = None;
    }

    fn generate(&mut self, out_events: &mut Vec<Event>) {
        self.clean(out_events);

        let layout = match generation::generate(&self.config.board, &mut self.rng) {
            Ok(layout) => layout,
            Err(reason) => {
                log::warn!("board generation failed: {reason}");
                out_events.push(Event::BoardGenerationFailed { reason });
                return;
            }
        };

        let mut board = layout.board;
        for (cell, data) in board.view().iter() {
            out_events.push(Event::TilePlaced {
                cell,
                tile: data.tile(),
            });
        }

        let mut place = |board: &mut Board, cell: CellCoord, occupant: Occupant| {
            if board.occupy(cell, occupant) {
                out_events.push(Event::OccupantPlaced { cell, occupant });
            }
        };

        place(&mut board, layout.exit, Occupant::Exit);
        self.exit = Some(ExitState { cell: layout.exit });

        for cell in layout.food {
            let id = self.ids.food();
            place(&mut board, cell, Occupant::Food(id));
            let _ = self.food.insert(
                id,
                FoodState {
                    cell,
                    amount: self.config.food_amount,
                },
            );
        }

        for cell in layout.walls {
            let id = self.ids.wall();
            place(&mut board, cell, Occupant::Wall(id));
            let _ = self.walls.insert(
                id,
                WallState {
                    id,
                    cell,
                    hit_points: self.config.wall_hit_points,
                },
            );
        }

        for cell in layout.enemies {
            let id = self.ids.enemy();
            place(&mut board, cell, Occupant::Enemy(id));
            let _ = self.enemies.insert(
                id,
                EnemyState {
                    id,
                    cell,
                    health: self.config.enemy_health,
                    busy: false,
                },
            );
        }

        let (columns, rows) = board.dimensions();
        log::info!(
            "generated {columns}x{rows} board: {} food, {} walls, {} enemies",
            self.food.len(),
            self.walls.len(),
            self.enemies.len()
        );
        out_events.push(Event::BoardGenerated {
            columns,
            rows,
            empty_cells: layout.empty_cells.len(),
        });
        self.board = Some(board);
    }

    fn change_food(&mut self, delta: i32, out_events: &mut Vec<Event>) {
        if self.resources.phase == Phase::GameOver {
            log::debug!("ignoring food change of {delta} after game over");
            return;
        }

        self.resources.food = self.resources.food.saturating_add(delta);
        out_events.push(Event::FoodChanged {
            food: self.resources.food,
        });

        if self.resources.food <= 0 {
            self.game_over(out_events);
        }
    }

    fn game_over(&mut self, out_events: &mut Vec<Event>) {
        if self.resources.phase == Phase::GameOver {
            return;
        }

        self.resources.phase = Phase::GameOver;
        self.player.mode = PlayerMode::GameOver;
        log::info!("game over on level {}", self.resources.level);
        out_events.push(Event::GameOver {
            level: self.resources.level,
        });
    }

    fn spawn_player(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(board) = self.board.as_mut() else {
            log::warn!("cannot spawn player at {cell:?} without a board");
            return;
        };

        if let Some(previous) = self.player.cell.take() {
            let _ = board.vacate(previous);
        }

        if board.occupy(cell, Occupant::Player) {
            self.player.cell = Some(cell);
            out_events.push(Event::PlayerSpawned { cell });
        } else {
            log::warn!("player spawn cell {cell:?} is not vacant");
        }
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.player.mode == PlayerMode::GameOver {
            return;
        }
        let (Some(board), Some(from)) = (self.board.as_mut(), self.player.cell) else {
            return;
        };
        let Some(to) = from.offset(direction) else {
            return;
        };

        if board.transfer(from, to) {
            self.player.cell = Some(to);
            out_events.push(Event::PlayerMoved { from, to });
        }
    }

    fn collect_food(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        let Some(Occupant::Food(id)) = board.cell(cell).and_then(|data| data.occupant()) else {
            log::debug!("no food to collect at {cell:?}");
            return;
        };

        let _ = board.vacate(cell);
        let amount = self
            .food
            .remove(&id)
            .map_or(self.config.food_amount, |state| state.amount);
        out_events.push(Event::FoodCollected {
            food: id,
            cell,
            amount,
        });
        self.change_food(amount, out_events);
    }

    fn bump(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        let occupant = board.cell(cell).and_then(|data| data.occupant());

        let outcome = match occupant {
            Some(Occupant::Wall(id)) => self
                .walls
                .get_mut(&id)
                .map(|wall| wall.player_wants_to_enter(out_events)),
            Some(Occupant::Enemy(id)) => self
                .enemies
                .get_mut(&id)
                .map(|enemy| enemy.player_wants_to_enter(out_events)),
            Some(Occupant::Exit) => self
                .exit
                .as_mut()
                .map(|exit| exit.player_wants_to_enter(out_events)),
            Some(Occupant::Food(_) | Occupant::Player) | None => None,
        };

        if outcome != Some(EntryOutcome::Removed) {
            return;
        }

        let _ = board.vacate(cell);
        match occupant {
            Some(Occupant::Wall(id)) => {
                let _ = self.walls.remove(&id);
            }
            Some(Occupant::Enemy(id)) => {
                let _ = self.enemies.remove(&id);
            }
            _ => {}
        }
    }

    fn enemy_attack(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        let Some(state) = self.enemies.get(&enemy) else {
            log::warn!("attack requested for missing enemy {}", enemy.get());
            return;
        };
        if self.player.cell.is_none() {
            return;
        }

        out_events.push(Event::EnemyAttacked {
            enemy,
            cell: state.cell,
        });
        self.player.health = self.player.health.saturating_sub(ENEMY_ATTACK_DAMAGE);
        out_events.push(Event::PlayerDamaged {
            health: self.player.health,
        });
    }

    fn step_enemy(
        &mut self,
        enemy: EnemyId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) {
        let (Some(board), Some(state)) = (self.board.as_mut(), self.enemies.get_mut(&enemy)) else {
            log::warn!("step requested for missing enemy {}", enemy.get());
            return;
        };
        if state.busy {
            return;
        }
        let from = state.cell;
        let Some(to) = from.offset(direction) else {
            return;
        };

        if board.transfer(from, to) {
            state.cell = to;
            state.busy = true;
            out_events.push(Event::EnemyMoved { enemy, from, to });
        }
    }

    fn finish_enemy_move(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        if let Some(state) = self.enemies.get_mut(&enemy) {
            if state.busy {
                state.busy = false;
                out_events.push(Event::EnemySettled { enemy });
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureBoard { columns, rows } => {
            world.config.board.columns = columns;
            world.config.board.rows = rows;
            world.clean(out_events);
        }
        Command::CleanBoard => world.clean(out_events),
        Command::GenerateBoard => world.generate(out_events),
        Command::ResetResources { food } => {
            world.resources = Resources {
                food,
                level: 1,
                phase: Phase::Playing,
            };
            out_events.push(Event::ResourcesReset { food, level: 1 });
        }
        Command::AdvanceLevel => {
            world.resources.level = world.resources.level.saturating_add(1);
            log::info!("advanced to level {}", world.resources.level);
            out_events.push(Event::LevelAdvanced {
                level: world.resources.level,
            });
        }
        Command::ChangeFood { delta } => world.change_food(delta, out_events),
        Command::ResetPlayer => {
            world.player.health = world.config.player_health;
            world.player.mode = PlayerMode::Active;
            out_events.push(Event::PlayerReset {
                health: world.player.health,
            });
        }
        Command::SpawnPlayer { cell } => world.spawn_player(cell, out_events),
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
        Command::CollectFood { cell } => world.collect_food(cell, out_events),
        Command::BumpOccupant { cell } => world.bump(cell, out_events),
        Command::EnemyAttack { enemy } => world.enemy_attack(enemy, out_events),
        Command::StepEnemy { enemy, direction } => world.step_enemy(enemy, direction, out_events),
        Command::FinishEnemyMove { enemy } => world.finish_enemy_move(enemy, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use scavenger_core::{
        CellCoord, EnemyId, EnemySnapshot, EnemyView, GridView, PlayerSnapshot, ResourceSnapshot,
        WallId,
    };

    use super::{World, WorldConfig};

    /// Configuration the world was created with, including board changes since.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Read-only view of the active board, `None` when no board is generated.
    #[must_use]
    pub fn grid_view(world: &World) -> Option<GridView<'_>> {
        world.board.as_ref().map(|board| board.view())
    }

    /// Captures a read-only view of the enemies on the board.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .values()
                .map(|state| EnemySnapshot {
                    id: state.id,
                    cell: state.cell,
                    health: state.health,
                    busy: state.busy,
                })
                .collect(),
        )
    }

    /// Captures a single enemy, if it is still on the board.
    #[must_use]
    pub fn enemy(world: &World, enemy: EnemyId) -> Option<EnemySnapshot> {
        world.enemies.get(&enemy).map(|state| EnemySnapshot {
            id: state.id,
            cell: state.cell,
            health: state.health,
            busy: state.busy,
        })
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            cell: world.player.cell,
            health: world.player.health,
            mode: world.player.mode,
        }
    }

    /// Captures the resource pool.
    #[must_use]
    pub fn resources(world: &World) -> ResourceSnapshot {
        ResourceSnapshot {
            food: world.resources.food,
            level: world.resources.level,
            phase: world.resources.phase,
        }
    }

    /// Cell holding the exit of the active board.
    #[must_use]
    pub fn exit(world: &World) -> Option<CellCoord> {
        world.exit.map(|exit| exit.cell)
    }

    /// Remaining hit points of an interior wall.
    #[must_use]
    pub fn wall_hit_points(world: &World, wall: WallId) -> Option<u32> {
        world.walls.get(&wall).map(|state| state.hit_points)
    }

    /// Cells of every interior wall, in identifier order.
    #[must_use]
    pub fn wall_cells(world: &World) -> Vec<CellCoord> {
        world.walls.values().map(|state| state.cell).collect()
    }

    /// Cells of every food pickup, in identifier order.
    #[must_use]
    pub fn food_cells(world: &World) -> Vec<CellCoord> {
        world.food.values().map(|state| state.cell).collect()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct WallState {
    pub(crate) id: WallId,
    pub(crate) cell: CellCoord,
    pub(crate) hit_points: u32,
}

#[derive(Clone, Debug)]
struct FoodState {
    cell: CellCoord,
    amount: i32,
}

#[derive(Clone, Debug)]
pub(crate) struct EnemyState {
    pub(crate) id: EnemyId,
    pub(crate) cell: CellCoord,
    pub(crate) health: u32,
    pub(crate) busy: bool,
}

#[derive(Clone, Copy, Debug)]
struct PlayerState {
    cell: Option<CellCoord>,
    health: u32,
    mode: PlayerMode,
}

#[derive(Clone, Copy, Debug)]
struct Resources {
    food: i32,
    level: u32,
    phase: Phase,
}

/// Monotonic identifier counters; never reset so ids stay unique across boards.
#[derive(Debug, Default)]
struct IdAllocator {
    next_wall: u32,
    next_food: u32,
    next_enemy: u32,
}

impl IdAllocator {
    fn wall(&mut self) -> WallId {
        let id = WallId::new(self.next_wall);
        self.next_wall = self.next_wall.wrapping_add(1);
        id
    }

    fn food(&mut self) -> FoodId {
        let id = FoodId::new(self.next_food);
        self.next_food = self.next_food.wrapping_add(1);
        id
    }

    fn enemy(&mut self) -> EnemyId {
        let id = EnemyId::new(self.next_enemy);
        self.next_enemy = self.next_enemy.wrapping_add(1);
        id
    }
}
