use scavenger_core::{
    CellCoord, Command, Direction, Event, Occupant, Phase, PlayerMode, PLAYER_START,
};
use scavenger_world::{self as world, query, World};

fn spawned_world() -> World {
    let mut world = World::default();
    let mut events = Vec::new();
    world::apply(&mut world, Command::GenerateBoard, &mut events);
    world::apply(&mut world, Command::ResetPlayer, &mut events);
    world::apply(
        &mut world,
        Command::SpawnPlayer { cell: PLAYER_START },
        &mut events,
    );
    world
}

fn neighbour(world: &World, direction: Direction) -> (CellCoord, Option<Occupant>) {
    let cell = PLAYER_START.offset(direction).expect("start has neighbours");
    let view = query::grid_view(world).expect("board generated");
    (cell, view.occupant(cell))
}

#[test]
fn player_blocked_by_border_stays_put() {
    let mut world = spawned_world();
    let mut events = Vec::new();

    world::apply(
        &mut world,
        Command::MovePlayer {
            direction: Direction::South,
        },
        &mut events,
    );

    assert!(events.is_empty());
    assert_eq!(query::player(&world).cell, Some(PLAYER_START));
}

#[test]
fn player_moves_into_vacant_cells() {
    let mut world = spawned_world();
    let direction = [Direction::North, Direction::East]
        .into_iter()
        .find(|direction| neighbour(&world, *direction).1.is_none());
    let Some(direction) = direction else {
        return;
    };
    let (target, _) = neighbour(&world, direction);
    let mut events = Vec::new();

    world::apply(&mut world, Command::MovePlayer { direction }, &mut events);

    assert_eq!(
        events,
        vec![Event::PlayerMoved {
            from: PLAYER_START,
            to: target,
        }]
    );
    let view = query::grid_view(&world).expect("board generated");
    assert_eq!(view.occupant(target), Some(Occupant::Player));
    assert_eq!(view.occupant(PLAYER_START), None);
}

#[test]
fn collecting_food_raises_the_pool() {
    let mut world = spawned_world();
    let food_cell = query::food_cells(&world)[0];
    let before = query::resources(&world).food;
    let mut events = Vec::new();

    world::apply(&mut world, Command::CollectFood { cell: food_cell }, &mut events);

    assert!(matches!(
        events.first(),
        Some(Event::FoodCollected { amount: 10, .. })
    ));
    assert_eq!(query::resources(&world).food, before + 10);
    let view = query::grid_view(&world).expect("board generated");
    assert_eq!(view.occupant(food_cell), None);
}

#[test]
fn bumping_a_wall_three_times_clears_it() {
    let mut world = spawned_world();
    let wall_cell = query::wall_cells(&world)[0];
    let mut events = Vec::new();

    for _ in 0..3 {
        world::apply(&mut world, Command::BumpOccupant { cell: wall_cell }, &mut events);
    }

    assert!(matches!(events.last(), Some(Event::WallDestroyed { .. })));
    assert!(!query::wall_cells(&world).contains(&wall_cell));
    let view = query::grid_view(&world).expect("board generated");
    assert!(view.is_vacant(wall_cell));
}

#[test]
fn bumping_the_exit_reports_arrival() {
    let mut world = spawned_world();
    let exit = query::exit(&world).expect("exit placed");
    let mut events = Vec::new();

    world::apply(&mut world, Command::BumpOccupant { cell: exit }, &mut events);

    assert_eq!(events, vec![Event::ExitReached { cell: exit }]);
    let view = query::grid_view(&world).expect("board generated");
    assert_eq!(view.occupant(exit), Some(Occupant::Exit));
}

#[test]
fn enemy_attacks_wear_down_health_without_ending_the_game() {
    let mut world = spawned_world();
    let enemy = query::enemy_view(&world).iter().next().map(|snapshot| snapshot.id);
    let enemy = enemy.expect("enemies generated");
    let mut events = Vec::new();

    for _ in 0..12 {
        world::apply(&mut world, Command::EnemyAttack { enemy }, &mut events);
    }

    let player = query::player(&world);
    assert_eq!(player.health, 0);
    assert_eq!(player.mode, PlayerMode::Active);
    assert_eq!(query::resources(&world).phase, Phase::Playing);
    assert!(!events.iter().any(|event| matches!(event, Event::GameOver { .. })));
    assert_eq!(events.last(), Some(&Event::PlayerDamaged { health: 0 }));
}

#[test]
fn stepping_enemy_stays_busy_until_settled() {
    let mut world = spawned_world();
    let mut events = Vec::new();
    let snapshot = query::enemy_view(&world)
        .into_vec()
        .into_iter()
        .find_map(|snapshot| {
            let view = query::grid_view(&world)?;
            Direction::ALL.into_iter().find_map(|direction| {
                let target = snapshot.cell.offset(direction)?;
                view.is_vacant(target).then_some((snapshot, direction, target))
            })
        });
    let Some((snapshot, direction, target)) = snapshot else {
        return;
    };

    world::apply(
        &mut world,
        Command::StepEnemy {
            enemy: snapshot.id,
            direction,
        },
        &mut events,
    );
    assert!(query::enemy(&world, snapshot.id).is_some_and(|enemy| enemy.busy));
    assert_eq!(
        query::enemy(&world, snapshot.id).map(|enemy| enemy.cell),
        Some(target)
    );

    world::apply(
        &mut world,
        Command::FinishEnemyMove { enemy: snapshot.id },
        &mut events,
    );
    assert!(query::enemy(&world, snapshot.id).is_some_and(|enemy| !enemy.busy));
    assert_eq!(events.last(), Some(&Event::EnemySettled { enemy: snapshot.id }));
}
