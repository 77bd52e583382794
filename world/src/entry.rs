//! Reactions of occupants to the player trying to enter their cell.
//!
//! Only walls, enemies, and the exit react here. Food never does: picking it
//! up is the entering player's job (see `Command::CollectFood`).

use scavenger_core::{CellCoord, Event};

use crate::{EnemyState, WallState};

/// What became of an occupant after the player pushed against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EntryOutcome {
    /// The occupant keeps its cell.
    Stays,
    /// The occupant was destroyed and must be removed from its cell.
    Removed,
}

/// Capability of occupants that respond to the player bumping into them.
pub(crate) trait EntryReaction {
    fn player_wants_to_enter(&mut self, out_events: &mut Vec<Event>) -> EntryOutcome;
}

impl EntryReaction for WallState {
    fn player_wants_to_enter(&mut self, out_events: &mut Vec<Event>) -> EntryOutcome {
        self.hit_points = self.hit_points.saturating_sub(1);
        if self.hit_points == 0 {
            out_events.push(Event::WallDestroyed {
                wall: self.id,
                cell: self.cell,
            });
            EntryOutcome::Removed
        } else {
            out_events.push(Event::WallDamaged {
                wall: self.id,
                cell: self.cell,
                hit_points: self.hit_points,
            });
            EntryOutcome::Stays
        }
    }
}

impl EntryReaction for EnemyState {
    fn player_wants_to_enter(&mut self, out_events: &mut Vec<Event>) -> EntryOutcome {
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            out_events.push(Event::EnemyDestroyed {
                enemy: self.id,
                cell: self.cell,
            });
            EntryOutcome::Removed
        } else {
            out_events.push(Event::EnemyDamaged {
                enemy: self.id,
                health: self.health,
            });
            EntryOutcome::Stays
        }
    }
}

/// The exit never moves and is never destroyed; bumping it ends the level.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ExitState {
    pub(crate) cell: CellCoord,
}

impl EntryReaction for ExitState {
    fn player_wants_to_enter(&mut self, out_events: &mut Vec<Event>) -> EntryOutcome {
        out_events.push(Event::ExitReached { cell: self.cell });
        EntryOutcome::Stays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scavenger_core::{EnemyId, WallId};

    #[test]
    fn wall_crumbles_after_its_hit_points_run_out() {
        let mut wall = WallState {
            id: WallId::new(1),
            cell: CellCoord::new(2, 2),
            hit_points: 2,
        };
        let mut events = Vec::new();

        assert_eq!(wall.player_wants_to_enter(&mut events), EntryOutcome::Stays);
        assert_eq!(wall.player_wants_to_enter(&mut events), EntryOutcome::Removed);
        assert_eq!(
            events,
            vec![
                Event::WallDamaged {
                    wall: WallId::new(1),
                    cell: CellCoord::new(2, 2),
                    hit_points: 1,
                },
                Event::WallDestroyed {
                    wall: WallId::new(1),
                    cell: CellCoord::new(2, 2),
                },
            ]
        );
    }

    #[test]
    fn enemy_survives_until_health_is_gone() {
        let mut enemy = EnemyState {
            id: EnemyId::new(3),
            cell: CellCoord::new(4, 1),
            health: 3,
            busy: false,
        };
        let mut events = Vec::new();

        assert_eq!(enemy.player_wants_to_enter(&mut events), EntryOutcome::Stays);
        assert_eq!(enemy.player_wants_to_enter(&mut events), EntryOutcome::Stays);
        assert_eq!(enemy.player_wants_to_enter(&mut events), EntryOutcome::Removed);
        assert!(matches!(events.last(), Some(Event::EnemyDestroyed { .. })));
    }

    #[test]
    fn exit_reports_arrival_and_stays() {
        let mut exit = ExitState {
            cell: CellCoord::new(6, 6),
        };
        let mut events = Vec::new();

        assert_eq!(exit.player_wants_to_enter(&mut events), EntryOutcome::Stays);
        assert_eq!(
            events,
            vec![Event::ExitReached {
                cell: CellCoord::new(6, 6)
            }]
        );
    }
}
