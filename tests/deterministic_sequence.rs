use std::time::Duration;

use snake_levels::food::Food;
use snake_levels::grid::{GridSize, Position};
use snake_levels::input::Direction;
use snake_levels::level::level;
use snake_levels::obstacle::{Obstacle, ObstacleKind, advance_obstacles};
use snake_levels::simulation::{CollisionKind, Simulation, TickEvent};
use snake_levels::snake::Snake;

const TICK: Duration = Duration::from_millis(125);

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut sim = Simulation::new_with_seed(
        GridSize {
            width: 6,
            height: 4,
        },
        1,
        42,
    );
    sim.snake = Snake::new(Position::new(1, 1), Direction::Right);
    sim.food = Some(Food::new(Position::new(2, 1)));

    let events = sim.advance(None, TICK);
    assert!(matches!(events[0], TickEvent::FoodEaten { points: 1, .. }));
    assert_eq!(sim.score, 1);
    assert_eq!(sim.snake.len(), 2);
    assert_eq!(sim.snake.head(), Position::new(2, 1));

    sim.food = Some(Food::new(Position::new(5, 3)));
    sim.advance(Some(Direction::Up), TICK);
    assert!(!sim.is_over());
    assert_eq!(sim.snake.head(), Position::new(2, 0));

    let events = sim.advance(None, TICK);
    assert_eq!(events, vec![TickEvent::Collision(CollisionKind::Boundary)]);
    assert_eq!(sim.collision(), Some(CollisionKind::Boundary));
}

#[test]
fn classic_first_bite_on_a_twenty_grid() {
    let mut sim = Simulation::new_with_seed(GridSize::square(20), 1, 7);
    sim.snake = Snake::new(Position::new(10, 10), Direction::Right);
    sim.food = Some(Food::new(Position::new(11, 10)));

    sim.advance(None, TICK);

    let body: Vec<_> = sim.snake.segments().copied().collect();
    assert_eq!(body, vec![Position::new(11, 10), Position::new(10, 10)]);
    let food = sim.food.expect("food relocated");
    assert_ne!(food.position, Position::new(11, 10));
    assert!(body.iter().all(|segment| *segment != food.position));
    assert_eq!(sim.score, 1);
}

#[test]
fn walking_off_the_left_edge_ends_the_game() {
    let mut sim = Simulation::new_with_seed(GridSize::square(20), 1, 8);
    sim.snake = Snake::from_segments(
        vec![Position::new(0, 5), Position::new(1, 5)],
        Direction::Left,
    );

    sim.advance(None, TICK);

    assert_eq!(sim.snake.head(), Position::new(-1, 5));
    assert!(sim.is_over());
}

#[test]
fn patrol_turns_around_at_a_wall() {
    let mut obstacles = vec![
        Obstacle::moving(Position::new(1, 8), 1),
        Obstacle::wall(Position::new(2, 8)),
    ];

    for _ in 0..10 {
        advance_obstacles(&mut obstacles, GridSize::square(20), |_| false);
    }

    assert_eq!(obstacles[0].position, Position::new(1, 8));
    assert!(matches!(obstacles[0].kind, ObstacleKind::Moving { sign: -1, .. }));
}

#[test]
fn level_lookup_clamps_to_last_level() {
    assert_eq!(level(99), level(5));
    assert_eq!(level(99).name, "Expert");
}

#[test]
fn same_seed_replays_the_same_round() {
    let script = [
        Some(Direction::Up),
        None,
        Some(Direction::Left),
        None,
        None,
        Some(Direction::Down),
        None,
        Some(Direction::Right),
    ];

    let play = |seed| {
        let mut sim = Simulation::new_with_seed(GridSize::square(20), 3, seed);
        let mut log = Vec::new();
        for intent in script.iter().cycle().take(60) {
            log.extend(sim.advance(*intent, TICK));
        }
        (sim.snake.head(), sim.score, sim.food, log)
    };

    assert_eq!(play(5), play(5));
}
