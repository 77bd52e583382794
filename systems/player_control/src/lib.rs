#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure player input system that turns frame input into turn intents and
//! world commands.

use scavenger_core::{CellCoord, Command, Direction, Event, GridView, Occupant, PlayerMode};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
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

impl PlayerInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(up: bool, down: bool, left: bool, right: bool, restart: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
            restart,
        }
    }

    /// Input pressing only the key for `direction`.
    #[must_use]
    pub const fn step(direction: Direction) -> Self {
        Self {
            up: matches!(direction, Direction::North),
            down: matches!(direction, Direction::South),
            left: matches!(direction, Direction::West),
            right: matches!(direction, Direction::East),
            restart: false,
        }
    }
}

/// What the player asked for on a given frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerIntent {
    /// Take a turn by stepping toward `Direction`.
    Step(Direction),
    /// Start a new game after the previous one ended.
    Restart,
}

/// Player system that tracks the input mode and yields at most one intent per frame.
#[derive(Clone, Debug)]
pub struct PlayerControl {
    mode: PlayerMode,
}

impl Default for PlayerControl {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerControl {
    /// Creates a new player system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: PlayerMode::Active,
        }
    }

    /// Input mode as last observed from world events.
    #[must_use]
    pub const fn mode(&self) -> PlayerMode {
        self.mode
    }

    /// Consumes world events and frame input to produce the frame's intent.
    ///
    /// Directions are prioritised north, south, east, west. While the game is
    /// over movement is ignored and only a restart is honoured.
    pub fn handle(&mut self, events: &[Event], input: PlayerInput) -> Option<PlayerIntent> {
        for event in events {
            match event {
                Event::GameOver { .. } => self.mode = PlayerMode::GameOver,
                Event::PlayerReset { .. } => self.mode = PlayerMode::Active,
                _ => {}
            }
        }

        if self.mode == PlayerMode::GameOver {
            return input.restart.then_some(PlayerIntent::Restart);
        }

        let direction = if input.up {
            Direction::North
        } else if input.down {
            Direction::South
        } else if input.right {
            Direction::East
        } else if input.left {
            Direction::West
        } else {
            return None;
        };
        Some(PlayerIntent::Step(direction))
    }
}

/// Cell the player would try to enter, or `None` when it is off the board or
/// impassable and the turn should not happen at all.
#[must_use]
pub fn turn_target(
    player: CellCoord,
    direction: Direction,
    grid: GridView<'_>,
) -> Option<CellCoord> {
    player
        .offset(direction)
        .filter(|target| grid.is_passable(*target))
}

/// Maps the occupant found on `target` to the commands of the player's move.
///
/// Food is taken by the player before entering; everything else reacts to
/// being bumped and keeps the player in place.
pub fn interaction_commands(
    direction: Direction,
    target: CellCoord,
    occupant: Option<Occupant>,
    out: &mut Vec<Command>,
) {
    match occupant {
        None => out.push(Command::MovePlayer { direction }),
        Some(Occupant::Food(_)) => {
            out.push(Command::CollectFood { cell: target });
            out.push(Command::MovePlayer { direction });
        }
        Some(Occupant::Wall(_) | Occupant::Enemy(_) | Occupant::Exit) => {
            out.push(Command::BumpOccupant { cell: target });
        }
        Some(Occupant::Player) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scavenger_core::{Cell, EnemyId, FoodId, TileKind, WallId};

    #[test]
    fn up_wins_over_other_directions() {
        let mut control = PlayerControl::new();
        let input = PlayerInput::new(true, true, true, true, false);
        assert_eq!(
            control.handle(&[], input),
            Some(PlayerIntent::Step(Direction::North))
        );
    }

    #[test]
    fn right_wins_over_left() {
        let mut control = PlayerControl::new();
        let input = PlayerInput::new(false, false, true, true, false);
        assert_eq!(
            control.handle(&[], input),
            Some(PlayerIntent::Step(Direction::East))
        );
    }

    #[test]
    fn no_keys_no_intent() {
        let mut control = PlayerControl::new();
        assert_eq!(control.handle(&[], PlayerInput::default()), None);
    }

    #[test]
    fn restart_is_ignored_while_playing() {
        let mut control = PlayerControl::new();
        let input = PlayerInput::new(false, false, false, false, true);
        assert_eq!(control.handle(&[], input), None);
    }

    #[test]
    fn game_over_freezes_movement_until_reset() {
        let mut control = PlayerControl::new();
        let step = PlayerInput::step(Direction::East);

        assert_eq!(control.handle(&[Event::GameOver { level: 2 }], step), None);
        assert_eq!(control.mode(), PlayerMode::GameOver);

        let restart = PlayerInput::new(false, false, false, false, true);
        assert_eq!(control.handle(&[], restart), Some(PlayerIntent::Restart));

        assert_eq!(
            control.handle(&[Event::PlayerReset { health: 10 }], step),
            Some(PlayerIntent::Step(Direction::East))
        );
    }

    #[test]
    fn interaction_commands_follow_the_occupant() {
        let target = CellCoord::new(2, 1);
        let direction = Direction::East;
        let mut out = Vec::new();

        interaction_commands(direction, target, None, &mut out);
        assert_eq!(out, vec![Command::MovePlayer { direction }]);

        out.clear();
        interaction_commands(direction, target, Some(Occupant::Food(FoodId::new(0))), &mut out);
        assert_eq!(
            out,
            vec![
                Command::CollectFood { cell: target },
                Command::MovePlayer { direction },
            ]
        );

        for occupant in [
            Occupant::Wall(WallId::new(0)),
            Occupant::Enemy(EnemyId::new(0)),
            Occupant::Exit,
        ] {
            out.clear();
            interaction_commands(direction, target, Some(occupant), &mut out);
            assert_eq!(out, vec![Command::BumpOccupant { cell: target }]);
        }
    }

    #[test]
    fn turn_target_rejects_blocking_and_off_board_cells() {
        let mut cells = vec![Cell::new(true, TileKind::Ground(0)); 9];
        cells[1] = Cell::new(false, TileKind::Blocking(0));
        let grid = GridView::new(&cells, 3, 3);

        assert_eq!(
            turn_target(CellCoord::new(1, 1), Direction::South, grid),
            None
        );
        assert_eq!(
            turn_target(CellCoord::new(2, 1), Direction::East, grid),
            None
        );
        assert_eq!(
            turn_target(CellCoord::new(0, 0), Direction::West, grid),
            None
        );
        assert_eq!(
            turn_target(CellCoord::new(1, 1), Direction::North, grid),
            Some(CellCoord::new(1, 2))
        );
    }
}
