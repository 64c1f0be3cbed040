use wrapsnake::food::Food;
use wrapsnake::grid::Grid;
use wrapsnake::snake::{Direction, Snake};
use wrapsnake::{GameConfig, GameSession, SessionState, TickOutcome};

const FAR_AWAY: (i32, i32) = (200, 200);

fn trail_of(session: &GameSession) -> Vec<(i32, i32)> {
    session.snake().trail().iter().copied().collect()
}

fn tick_onto_food(session: &mut GameSession, direction: Direction) -> TickOutcome {
    session.steer(direction);
    let step = session.grid().block_size();
    let target = session.grid().wrap(session.snake().position(), direction.delta(step));
    session.place_food(Food::at(target));
    session.tick()
}

fn tick_past_food(session: &mut GameSession, direction: Direction) -> TickOutcome {
    session.steer(direction);
    session.place_food(Food::at(FAR_AWAY));
    session.tick()
}

#[test]
fn three_ticks_right_without_food() {
    let mut session = GameSession::with_seed(GameConfig::default(), 11).unwrap();

    for _ in 0..3 {
        let outcome = tick_past_food(&mut session, Direction::Right);
        assert_eq!(outcome, TickOutcome::Running { rate: 10.0 });
    }

    assert_eq!(session.snake().position(), (30, 0));
    assert_eq!(session.snake().length(), 0);
    assert!(trail_of(&session).is_empty());
    assert!(!session.snake().is_dead());
    assert_eq!(session.state(), SessionState::Running);
}

#[test]
fn eating_on_fourth_tick_keeps_the_extra_cell() {
    let mut session = GameSession::with_seed(GameConfig::default(), 12).unwrap();

    for _ in 0..3 {
        tick_past_food(&mut session, Direction::Right);
    }
    let outcome = tick_onto_food(&mut session, Direction::Right);

    assert_eq!(session.snake().position(), (40, 0));
    assert_eq!(session.snake().length(), 1);
    assert_eq!(trail_of(&session), vec![(40, 0)]);
    match outcome {
        TickOutcome::Running { rate } => assert!((rate - 10.0004).abs() < 1e-9),
        other => panic!("unexpected {:?}", other),
    }
    assert!(!session.snake().occupies(session.food().position()));

    tick_past_food(&mut session, Direction::Right);
    assert_eq!(session.snake().length(), 1);
    assert_eq!(trail_of(&session), vec![(50, 0)]);
}

#[test]
fn biting_own_trail_ends_the_session() {
    let mut session = GameSession::with_seed(GameConfig::default(), 13).unwrap();

    for _ in 0..5 {
        tick_onto_food(&mut session, Direction::Right);
    }
    assert_eq!(session.snake().length(), 5);

    assert!(matches!(tick_past_food(&mut session, Direction::Down), TickOutcome::Running { .. }));
    assert!(matches!(tick_past_food(&mut session, Direction::Left), TickOutcome::Running { .. }));
    let outcome = tick_past_food(&mut session, Direction::Up);

    assert_eq!(session.snake().position(), (40, 0));
    assert_eq!(outcome, TickOutcome::Over { score: 5 });
    assert!(session.is_over());

    // Nothing moves once the session is over
    assert_eq!(session.tick(), TickOutcome::Over { score: 5 });
    assert_eq!(session.snake().position(), (40, 0));
}

#[test]
fn wrapping_past_the_edge_is_not_fatal() {
    let config = GameConfig::new(40, 40, 10);
    let mut session = GameSession::with_seed(config, 14).unwrap();
    session.place_food(Food::at((20, 20)));
    session.steer(Direction::Left);

    for _ in 0..10 {
        if let TickOutcome::Over { .. } = session.tick() {
            panic!("a snake that never eats cannot die");
        }
        assert!(session.grid().contains(session.snake().position()));
    }
}

#[test]
fn reversal_is_rejected() {
    let mut session = GameSession::with_seed(GameConfig::default(), 15).unwrap();

    tick_past_food(&mut session, Direction::Up);
    tick_past_food(&mut session, Direction::Down);

    assert_eq!(session.heading(), Some(Direction::Up));
    assert_eq!(session.snake().position(), (0, 380));
}

#[test]
fn food_never_lands_on_the_snake() {
    let config = GameConfig::new(60, 60, 10);
    let turns = [Direction::Right, Direction::Right, Direction::Down, Direction::Left, Direction::Down];

    for seed in 0..20 {
        let mut session = GameSession::with_seed(config.clone(), seed).unwrap();
        assert!(!session.snake().occupies(session.food().position()));

        for i in 0..300 {
            session.steer(turns[i % turns.len()]);
            if let TickOutcome::Over { .. } = session.tick() {
                break;
            }
            assert!(!session.snake().occupies(session.food().position()), "seed {}", seed);
        }
    }
}

#[test]
fn snake_advance_bookkeeping() {
    let grid = Grid::new(400, 400, 10);
    let mut snake = Snake::new(grid, (0, 0));

    snake.advance(&Food::at(FAR_AWAY), 10, 0);
    assert_eq!((snake.length(), snake.trail().len()), (0, 0));

    snake.advance(&Food::at((20, 0)), 10, 0);
    assert_eq!((snake.length(), snake.trail().len()), (1, 1));

    snake.advance(&Food::at((30, 0)), 10, 0);
    assert_eq!((snake.length(), snake.trail().len()), (2, 2));

    snake.advance(&Food::at(FAR_AWAY), 10, 0);
    assert_eq!((snake.length(), snake.trail().len()), (2, 2));
    assert_eq!(snake.position(), (40, 0));
    assert!(!snake.is_dead());
}
