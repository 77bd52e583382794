#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session controller that owns the world and drives turns, levels and games.

mod config;
mod error;
mod turn;

use std::mem;

use scavenger_core::{
    Command, Direction, EnemyId, Event, Occupant, PlayerMode, FOOD_DECAY_PER_TURN, PLAYER_START,
};
use scavenger_system_enemy_ai::{EnemyAi, EnemyDecision};
use scavenger_system_player_control::{
    interaction_commands, turn_target, PlayerControl, PlayerInput, PlayerIntent,
};
use scavenger_world::{self as world, query, World};

pub use config::SessionConfig;
pub use error::SessionError;
pub use turn::{Listener, Tick, TurnBroadcaster};

/// Single-player game session.
///
/// Every state change goes through [`world::apply`]; the resulting events are
/// kept until a presenter drains them.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    world: World,
    turns: TurnBroadcaster,
    enemy_ai: EnemyAi,
    player_control: PlayerControl,
    events: Vec<Event>,
    control_inbox: Vec<Event>,
    exit_reached: bool,
}

impl Session {
    /// Creates a session without a board; call [`Session::start_new_game`] to play.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let world = World::new(config.world.clone());
        let mut turns = TurnBroadcaster::new();
        let _ = turns.subscribe(Listener::FoodDecay);

        Self {
            config,
            world,
            turns,
            enemy_ai: EnemyAi::new(),
            player_control: PlayerControl::new(),
            events: Vec::new(),
            control_inbox: Vec::new(),
            exit_reached: false,
        }
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Configuration the session was created with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current turn count; 1 before the first tick.
    #[must_use]
    pub fn turn(&self) -> u64 {
        self.turns.turn()
    }

    /// Current turn subscribers in dispatch order.
    #[must_use]
    pub fn listeners(&self) -> &[Listener] {
        self.turns.listeners()
    }

    /// Lays out a fresh first level, then resets resources and the player.
    ///
    /// A failed generation leaves resources and the player untouched.
    pub fn start_new_game(&mut self) -> Result<(), SessionError> {
        log::info!("starting a new game");
        self.run(Command::CleanBoard);
        self.generate()?;
        self.run(Command::ResetResources {
            food: self.config.starting_food,
        });
        self.run(Command::ResetPlayer);
        self.run(Command::SpawnPlayer { cell: PLAYER_START });
        Ok(())
    }

    /// Replaces the board with a new one and moves on to the next level.
    ///
    /// Food carries over between levels.
    pub fn advance_level(&mut self) -> Result<(), SessionError> {
        self.run(Command::CleanBoard);
        self.generate()?;
        self.run(Command::SpawnPlayer { cell: PLAYER_START });
        self.run(Command::AdvanceLevel);
        Ok(())
    }

    /// Plays one turn: food decays, then every enemy acts in spawn order.
    ///
    /// Returns the turn count after the increment.
    pub fn tick(&mut self) -> u64 {
        let Tick { turn, listeners } = self.turns.tick();
        log::debug!("turn {turn}: {} listeners", listeners.len());

        for listener in listeners {
            match listener {
                Listener::FoodDecay => self.change_food(-FOOD_DECAY_PER_TURN),
                Listener::Enemy(enemy) => self.enemy_turn(enemy),
            }
        }
        turn
    }

    /// Adds `delta` to the food pool; running out ends the game.
    pub fn change_food(&mut self, delta: i32) {
        self.run(Command::ChangeFood { delta });
    }

    /// Takes the player's turn toward `direction`.
    ///
    /// Returns `Ok(false)` when no turn was played: the game is over, the
    /// player is not on the board, or the target is off the board or blocking.
    pub fn player_turn(&mut self, direction: Direction) -> Result<bool, SessionError> {
        let player = query::player(&self.world);
        if player.mode == PlayerMode::GameOver {
            return Ok(false);
        }
        let (Some(cell), Some(grid)) = (player.cell, query::grid_view(&self.world)) else {
            return Ok(false);
        };
        let Some(target) = turn_target(cell, direction, grid) else {
            return Ok(false);
        };

        let _ = self.tick();
        if query::player(&self.world).mode == PlayerMode::GameOver {
            return Ok(true);
        }

        let occupant: Option<Occupant> =
            query::grid_view(&self.world).and_then(|grid| grid.occupant(target));
        let mut commands = Vec::new();
        interaction_commands(direction, target, occupant, &mut commands);
        for command in commands {
            self.run(command);
        }

        if mem::take(&mut self.exit_reached) {
            self.advance_level()?;
        }
        Ok(true)
    }

    /// Per-frame entry point: turns input into at most one intent and acts on it.
    pub fn update(&mut self, input: PlayerInput) -> Result<Option<PlayerIntent>, SessionError> {
        let inbox = mem::take(&mut self.control_inbox);
        let intent = self.player_control.handle(&inbox, input);

        match intent {
            Some(PlayerIntent::Step(direction)) => {
                let _ = self.player_turn(direction)?;
            }
            Some(PlayerIntent::Restart) => self.start_new_game()?,
            None => {}
        }
        Ok(intent)
    }

    /// Reports that the presentation of `enemy`'s last step has finished.
    pub fn motion_finished(&mut self, enemy: EnemyId) {
        self.run(Command::FinishEnemyMove { enemy });
    }

    /// Hands over every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.events)
    }

    fn enemy_turn(&mut self, enemy: EnemyId) {
        let Some(snapshot) = query::enemy(&self.world, enemy) else {
            log::warn!("turn dispatched to missing enemy {}", enemy.get());
            return;
        };
        let Some(grid) = query::grid_view(&self.world) else {
            return;
        };
        let player = query::player(&self.world).cell;

        let mut commands = Vec::new();
        let decision = self.enemy_ai.handle(&snapshot, player, grid, &mut commands);
        log::debug!("enemy {} at {:?}: {decision:?}", enemy.get(), snapshot.cell);

        for command in commands {
            self.run(command);
        }
        if self.config.instant_motion && matches!(decision, EnemyDecision::Step(_)) {
            self.run(Command::FinishEnemyMove { enemy });
        }
    }

    fn generate(&mut self) -> Result<(), SessionError> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::GenerateBoard, &mut events);
        let failure = events.iter().find_map(|event| match event {
            Event::BoardGenerationFailed { reason } => Some(*reason),
            _ => None,
        });
        self.record(events);

        match failure {
            Some(reason) => Err(SessionError::Generation(reason)),
            None => Ok(()),
        }
    }

    fn run(&mut self, command: Command) {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.record(events);
    }

    fn record(&mut self, events: Vec<Event>) {
        for event in &events {
            match event {
                Event::OccupantPlaced {
                    occupant: Occupant::Enemy(enemy),
                    ..
                } => {
                    let _ = self.turns.subscribe(Listener::Enemy(*enemy));
                }
                Event::EnemyDestroyed { enemy, .. } => {
                    let _ = self.turns.unsubscribe(Listener::Enemy(*enemy));
                }
                Event::BoardCleared { .. } => self.turns.unsubscribe_enemies(),
                Event::ExitReached { .. } => self.exit_reached = true,
                Event::GameOver { .. } | Event::PlayerReset { .. } => {
                    self.control_inbox.push(event.clone());
                }
                _ => {}
            }
        }
        self.events.extend(events);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scavenger_core::{CellCoord, GenerationError, OccupantKind, Phase};
    use scavenger_world::{BoardConfig, WorldConfig};

    fn session_with(board: BoardConfig) -> Session {
        Session::new(SessionConfig {
            world: WorldConfig {
                board,
                ..WorldConfig::default()
            },
            ..SessionConfig::default()
        })
    }

    fn empty_board() -> BoardConfig {
        BoardConfig {
            columns: 4,
            rows: 4,
            food_count: 0,
            wall_count: 0..0,
            enemy_count: 0..0,
            ..BoardConfig::default()
        }
    }

    #[test]
    fn new_game_spawns_player_on_start_cell() {
        let mut session = Session::default();
        session.start_new_game().expect("default board fits");

        let player = query::player(session.world());
        assert_eq!(player.cell, Some(PLAYER_START));
        assert_eq!(player.mode, PlayerMode::Active);
        assert_eq!(query::resources(session.world()).food, 20);
        assert_eq!(query::resources(session.world()).level, 1);
    }

    #[test]
    fn enemies_subscribe_after_food_decay() {
        let mut session = Session::default();
        session.start_new_game().expect("default board fits");

        let enemies: Vec<_> = query::enemy_view(session.world())
            .iter()
            .map(|enemy| Listener::Enemy(enemy.id))
            .collect();
        assert!(!enemies.is_empty());
        assert_eq!(session.listeners()[0], Listener::FoodDecay);
        assert_eq!(&session.listeners()[1..], enemies.as_slice());
    }

    #[test]
    fn regeneration_replaces_enemy_subscriptions() {
        let mut session = Session::default();
        session.start_new_game().expect("default board fits");
        session.start_new_game().expect("default board fits");

        let enemies = query::enemy_view(session.world()).len();
        assert_eq!(session.listeners().len(), enemies + 1);
    }

    #[test]
    fn exhausted_pool_fails_new_game_without_board() {
        let mut session = session_with(BoardConfig {
            columns: 4,
            rows: 5,
            ..BoardConfig::default()
        });

        let error = session.start_new_game().expect_err("pool too small");

        assert_eq!(
            error,
            SessionError::Generation(GenerationError::PoolExhausted {
                category: OccupantKind::Food,
                requested: 5,
                available: 4,
            })
        );
        assert!(query::grid_view(session.world()).is_none());
        assert_eq!(session.listeners(), &[Listener::FoodDecay]);
    }

    #[test]
    fn failed_restart_keeps_phase_and_player_mode_in_step() {
        let mut session = session_with(BoardConfig {
            columns: 4,
            rows: 5,
            ..BoardConfig::default()
        });
        session.change_food(-20);
        assert_eq!(query::resources(session.world()).phase, Phase::GameOver);

        assert!(session.start_new_game().is_err());

        assert_eq!(query::resources(session.world()).phase, Phase::GameOver);
        assert_eq!(query::player(session.world()).mode, PlayerMode::GameOver);
        assert!(session
            .drain_events()
            .iter()
            .all(|event| !matches!(event, Event::ResourcesReset { .. } | Event::PlayerReset { .. })));
    }

    #[test]
    fn blocked_turn_does_not_tick() {
        let mut session = session_with(empty_board());
        session.start_new_game().expect("board fits");

        assert_eq!(session.player_turn(Direction::West), Ok(false));
        assert_eq!(session.turn(), 1);
        assert_eq!(query::resources(session.world()).food, 20);
    }

    #[test]
    fn walking_onto_the_exit_advances_the_level() {
        let mut session = session_with(empty_board());
        session.start_new_game().expect("board fits");

        assert_eq!(session.player_turn(Direction::East), Ok(true));
        assert_eq!(
            query::player(session.world()).cell,
            Some(CellCoord::new(2, 1))
        );
        assert_eq!(session.player_turn(Direction::North), Ok(true));

        let resources = query::resources(session.world());
        assert_eq!(resources.level, 2);
        assert_eq!(resources.food, 18);
        assert_eq!(query::player(session.world()).cell, Some(PLAYER_START));
    }

    #[test]
    fn game_over_freezes_player_turns() {
        let mut session = session_with(empty_board());
        session.start_new_game().expect("board fits");
        session.change_food(-20);

        assert_eq!(query::resources(session.world()).phase, Phase::GameOver);
        assert_eq!(session.player_turn(Direction::East), Ok(false));
        assert_eq!(query::player(session.world()).cell, Some(PLAYER_START));
    }

    #[test]
    fn restart_input_starts_over_after_game_over() {
        let mut session = session_with(empty_board());
        session.start_new_game().expect("board fits");
        session.change_food(-20);

        let restart = PlayerInput::new(false, false, false, false, true);
        assert_eq!(session.update(restart), Ok(Some(PlayerIntent::Restart)));

        let resources = query::resources(session.world());
        assert_eq!(resources.phase, Phase::Playing);
        assert_eq!(resources.food, 20);
        assert_eq!(
            session.update(PlayerInput::step(Direction::East)),
            Ok(Some(PlayerIntent::Step(Direction::East)))
        );
        assert_eq!(
            query::player(session.world()).cell,
            Some(CellCoord::new(2, 1))
        );
    }
}
