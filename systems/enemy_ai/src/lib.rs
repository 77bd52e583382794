#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure enemy decision system that chases the player and attacks when adjacent.

use scavenger_core::{
    CellCoord, Command, Direction, EnemySnapshot, GridView, ENEMY_ATTACK_FOOD_REWARD,
};

/// Outcome of a single enemy turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyDecision {
    /// The enemy is still moving and sits this turn out.
    Wait,
    /// The enemy is orthogonally adjacent to the player and strikes.
    Attack,
    /// The enemy steps one cell toward the player.
    Step(Direction),
    /// Both candidate cells were blocked; the enemy stays put.
    Hold,
}

/// Enemy system that turns snapshots and a grid view into world commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnemyAi;

impl EnemyAi {
    /// Creates a new enemy system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decides what `enemy` does this turn given the player's cell.
    ///
    /// The axis with the greater absolute distance is tried first; ties go to
    /// the vertical axis. A step is only proposed into a vacant cell.
    #[must_use]
    pub fn decide(enemy: &EnemySnapshot, player: CellCoord, grid: GridView<'_>) -> EnemyDecision {
        if enemy.busy {
            return EnemyDecision::Wait;
        }

        let (dx, dy) = enemy.cell.delta_to(player);
        if (dx.abs() == 1 && dy == 0) || (dy.abs() == 1 && dx == 0) {
            return EnemyDecision::Attack;
        }

        let horizontal = toward(dx, Direction::East, Direction::West);
        let vertical = toward(dy, Direction::North, Direction::South);
        let candidates = if dx.abs() > dy.abs() {
            [horizontal, vertical]
        } else {
            [vertical, horizontal]
        };

        candidates
            .into_iter()
            .find(|direction| {
                enemy
                    .cell
                    .offset(*direction)
                    .is_some_and(|target| grid.is_vacant(target))
            })
            .map_or(EnemyDecision::Hold, EnemyDecision::Step)
    }

    /// Emits the commands realising the enemy's decision and returns it.
    ///
    /// Without a player on the board the enemy holds.
    pub fn handle(
        &self,
        enemy: &EnemySnapshot,
        player: Option<CellCoord>,
        grid: GridView<'_>,
        out: &mut Vec<Command>,
    ) -> EnemyDecision {
        let Some(player) = player else {
            return EnemyDecision::Hold;
        };

        let decision = Self::decide(enemy, player, grid);
        match decision {
            EnemyDecision::Attack => {
                out.push(Command::EnemyAttack { enemy: enemy.id });
                out.push(Command::ChangeFood {
                    delta: ENEMY_ATTACK_FOOD_REWARD,
                });
            }
            EnemyDecision::Step(direction) => out.push(Command::StepEnemy {
                enemy: enemy.id,
                direction,
            }),
            EnemyDecision::Wait | EnemyDecision::Hold => {}
        }
        decision
    }
}

fn toward(distance: i64, positive: Direction, negative: Direction) -> Direction {
    if distance > 0 {
        positive
    } else {
        negative
    }
}
