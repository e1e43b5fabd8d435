use wrapsnake::game::{Game, Status};
use wrapsnake::grid::{BoardSize, Glyph, Position};
use wrapsnake::snake::Direction::*;

use rand::SeedableRng;
use rand::rngs::StdRng;

fn pos(x: u16, y: u16) -> Position {
    Position::new(x, y)
}

#[test]
fn head_reaches_food_on_a_ten_by_ten_board() {
    let rng = StdRng::seed_from_u64(2024);
    let mut game = Game::with_layout(BoardSize::new(10, 10), pos(0, 0), pos(5, 5), rng).unwrap();

    for _ in 0..5 {
        assert_eq!(game.tick(Some(Right)).unwrap(), Status::Running);
    }
    assert_eq!(game.head_position().unwrap(), pos(5, 0));
    assert_eq!(game.score(), 0);
    assert_eq!(game.body_len(), 0);

    for _ in 0..5 {
        assert_eq!(game.tick(Some(Down)).unwrap(), Status::Running);
    }
    assert_eq!(game.head_position().unwrap(), pos(5, 5));
    assert_eq!(game.score(), 1);
    assert_eq!(game.body_len(), 1);
    assert_eq!(game.body(), vec![pos(5, 4)]);

    let food = game.food_position().unwrap();
    assert_ne!(food, pos(5, 5));
    assert_ne!(food, pos(5, 4));
    assert_eq!(game.grid().glyph_at(food), Glyph::Food);
}

#[test]
fn left_while_heading_right_is_ignored() {
    let rng = StdRng::seed_from_u64(1);
    let mut game = Game::with_layout(BoardSize::new(10, 10), pos(3, 3), pos(9, 9), rng).unwrap();

    game.tick(Some(Left)).unwrap();

    assert_eq!(game.direction().unwrap(), Right);
    assert_eq!(game.head_position().unwrap(), pos(4, 3));
}

fn start(size: BoardSize, head: Position, food: Position) -> Game {
    Game::with_layout(size, head, food, StdRng::seed_from_u64(0)).unwrap()
}

#[test]
fn head_wraps_around_every_edge() {
    let size = BoardSize::new(6, 4);
    let food = pos(3, 2);

    let mut game = start(size, pos(5, 1), food);
    game.tick(Some(Right)).unwrap();
    assert_eq!(game.head_position().unwrap(), pos(0, 1));

    let mut game = start(size, pos(2, 0), food);
    game.tick(Some(Up)).unwrap();
    assert_eq!(game.head_position().unwrap(), pos(2, 3));

    let mut game = start(size, pos(2, 3), food);
    game.tick(Some(Down)).unwrap();
    assert_eq!(game.head_position().unwrap(), pos(2, 0));

    let mut game = start(size, pos(1, 1), food);
    game.tick(Some(Up)).unwrap();
    game.tick(Some(Left)).unwrap();
    assert_eq!(game.head_position().unwrap(), pos(0, 0));
    game.tick(Some(Left)).unwrap();
    assert_eq!(game.head_position().unwrap(), pos(5, 0));
    assert_eq!(game.status(), Status::Running);
}

#[test]
fn random_games_end_and_never_break_the_board() {
    for seed in 0..20 {
        let mut game = Game::new(BoardSize::new(8, 6), Some(seed)).unwrap();
        let dirs = [Up, Right, Down, Left];

        for step in 0..400 {
            let status = game.tick(Some(dirs[(step / 3 + seed as usize) % 4])).unwrap();

            let head = game.head_position().unwrap();
            let body = game.body();
            assert!(head.x < 8 && head.y < 6);
            assert_eq!(game.grid().glyph_at(head), Glyph::Head);

            if status == Status::Running {
                let food = game.food_position().unwrap();
                assert!(food != head && !body.contains(&food));
                assert_eq!(game.grid().count(Glyph::Food), 1);
                assert_eq!(game.score() as usize, body.len());
            } else {
                break;
            }
        }
    }
}
