#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Scavenger adapters.
//!
//! The simulation never calls into these traits directly; adapters drain the
//! session's events and hand them to [`present`].

use anyhow::Result as AnyResult;
use glam::Vec2;
use scavenger_core::{CellCoord, EnemyId, Event, OccupantKind, TileKind, WallId};
use scavenger_system_player_control::PlayerInput;

/// Places cells on a square grid in world space, y pointing up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// World position of the centre of cell `(0, 0)`.
    pub origin: Vec2,
    /// Side length of a single cell expressed in world units.
    pub tile_length: f32,
}

impl GridLayout {
    /// Creates a new layout descriptor.
    #[must_use]
    pub const fn new(origin: Vec2, tile_length: f32) -> Self {
        Self {
            origin,
            tile_length,
        }
    }

    /// World position of the centre of `cell`.
    #[must_use]
    pub fn world_position(&self, cell: CellCoord) -> Vec2 {
        self.origin + Vec2::new(cell.column() as f32, cell.row() as f32) * self.tile_length
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0)
    }
}

/// Draws board tiles and the occupants standing on them.
pub trait TileRenderer {
    /// Shows the ground or blocking sprite for `cell`.
    fn place_tile(&mut self, cell: CellCoord, tile: TileKind);

    /// Shows an occupant of `kind` on `cell`.
    fn place_occupant(&mut self, cell: CellCoord, kind: OccupantKind);

    /// Removes whatever occupant sprite is drawn on `cell`.
    fn clear_occupant(&mut self, cell: CellCoord);

    /// Removes the tile and anything drawn on it.
    fn clear_tile(&mut self, cell: CellCoord);

    /// World position the renderer uses for `cell`.
    fn world_position(&self, cell: CellCoord) -> Vec2;
}

/// Heads-up display showing the food counter and the game over panel.
pub trait HudSurface {
    /// Updates the food label.
    fn show_food(&mut self, food: i32);

    /// Shows the game over panel with `message`.
    fn show_game_over(&mut self, message: &str);

    /// Hides the game over panel.
    fn hide_game_over(&mut self);
}

/// Who a cue is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Actor {
    /// The player.
    Player,
    /// An enemy.
    Enemy(EnemyId),
    /// An interior wall.
    Wall(WallId),
}

/// Fire-and-forget animation triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// The actor started moving to a new cell.
    Moving,
    /// The actor strikes.
    Attack,
    /// The actor was hit but survived.
    Damage,
    /// The player lost health.
    Hurt,
}

/// Receives animation cues; nothing it does feeds back into the simulation.
pub trait CueSink {
    /// Plays `cue` on `actor`.
    fn cue(&mut self, actor: Actor, cue: Cue);
}

/// Everything [`present`] needs from an adapter.
pub trait Presenter: TileRenderer + HudSurface + CueSink {}

impl<T: TileRenderer + HudSurface + CueSink + ?Sized> Presenter for T {}

/// Key presses gathered by adapters for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Up was pressed this frame.
    pub up: bool,
    /// Down was pressed this frame.
    pub down: bool,
    /// Left was pressed this frame.
    pub left: bool,
    /// Right was pressed this frame.
    pub right: bool,
    /// Restart was requested this frame.
    pub restart: bool,
}

impl FrameInput {
    /// Translates the frame's key presses into player system input.
    #[must_use]
    pub const fn player_input(&self) -> PlayerInput {
        PlayerInput::new(self.up, self.down, self.left, self.right, self.restart)
    }
}

/// Source of frames, typically polling a device or reading a script.
pub trait FrameSource {
    /// Next frame of input, or `None` once the source asks to quit.
    fn next_frame(&mut self) -> AnyResult<Option<FrameInput>>;
}

/// Text shown next to the food counter.
#[must_use]
pub fn food_label(food: i32) -> String {
    format!("Food : {food}")
}

/// Text shown on the game over panel.
#[must_use]
pub fn game_over_message(level: u32) -> String {
    format!("Game Over!\n\nSurvived {level} days")
}

/// Forwards world events to the presentation collaborators.
pub fn present<P: Presenter + ?Sized>(events: &[Event], presenter: &mut P) {
    for event in events {
        match event {
            Event::BoardCleared { cells } => {
                for cell in cells {
                    presenter.clear_tile(*cell);
                }
            }
            Event::TilePlaced { cell, tile } => presenter.place_tile(*cell, *tile),
            Event::OccupantPlaced { cell, occupant } => {
                presenter.place_occupant(*cell, occupant.kind());
            }
            Event::PlayerSpawned { cell } => presenter.place_occupant(*cell, OccupantKind::Player),
            Event::PlayerMoved { from, to } => {
                presenter.clear_occupant(*from);
                presenter.place_occupant(*to, OccupantKind::Player);
                presenter.cue(Actor::Player, Cue::Moving);
            }
            Event::PlayerDamaged { .. } => presenter.cue(Actor::Player, Cue::Hurt),
            Event::EnemyMoved { enemy, from, to } => {
                presenter.clear_occupant(*from);
                presenter.place_occupant(*to, OccupantKind::Enemy);
                presenter.cue(Actor::Enemy(*enemy), Cue::Moving);
            }
            Event::EnemyAttacked { enemy, .. } => presenter.cue(Actor::Enemy(*enemy), Cue::Attack),
            Event::EnemyDamaged { enemy, .. } => presenter.cue(Actor::Enemy(*enemy), Cue::Damage),
            Event::WallDamaged { wall, .. } => presenter.cue(Actor::Wall(*wall), Cue::Damage),
            Event::EnemyDestroyed { cell, .. }
            | Event::WallDestroyed { cell, .. }
            | Event::FoodCollected { cell, .. } => presenter.clear_occupant(*cell),
            Event::ResourcesReset { food, .. } | Event::FoodChanged { food } => {
                presenter.show_food(*food);
            }
            Event::GameOver { level } => presenter.show_game_over(&game_over_message(*level)),
            Event::PlayerReset { .. } => presenter.hide_game_over(),
            Event::BoardGenerated { .. }
            | Event::BoardGenerationFailed { .. }
            | Event::LevelAdvanced { .. }
            | Event::ExitReached { .. }
            | Event::EnemySettled { .. } => {}
        }
    }
}
