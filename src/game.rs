use crate::collision::{self, Resolution};
use crate::entity::{Entity, EntityPool, PoolError};
use crate::grid::{BoardSize, Grid, Position};
use crate::snake::{self, Direction};

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

pub const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Lost,
    Won,
}

impl Status {
    pub fn is_over(self) -> bool {
        self != Status::Running
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("a {width}x{height} board cannot hold both the head and the food")]
    BoardTooSmall { width: u16, height: u16 },
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// One game of snake: the board, everything on it, and the score.
///
/// Once the game is over further ticks change nothing.
pub struct Game<R = StdRng> {
    grid: Grid,
    pool: EntityPool,
    score: u32,
    status: Status,
    rng: R,
}

impl Game<StdRng> {
    /// Starts a game with head and food on random distinct cells. Without a
    /// seed the random source is seeded from the OS.
    pub fn new(size: BoardSize, seed: Option<u64>) -> Result<Self, GameError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(size, rng)
    }
}

impl<R: rand::Rng> Game<R> {
    pub fn with_rng(size: BoardSize, mut rng: R) -> Result<Self, GameError> {
        check_size(size)?;

        let head = Position::random(size, &mut rng);
        let food = loop {
            let pos = Position::random(size, &mut rng);
            if pos != head {
                break pos;
            }
        };

        Self::with_layout(size, head, food, rng)
    }

    /// Starts a game with the head and food on the given cells.
    pub fn with_layout(size: BoardSize, head: Position, food: Position, rng: R) -> Result<Self, GameError> {
        check_size(size)?;

        let mut pool = EntityPool::for_board(size);
        pool.spawn_head(head, INITIAL_DIRECTION)?;
        pool.spawn_food(food)?;

        let mut grid = Grid::new(size);
        for (_, entity) in pool.iter() {
            grid.paint(entity.position(), entity.glyph());
        }

        info!("new game on a {}x{} board, head at {:?}, food at {:?}", size.width, size.height, head, food);
        Ok(Game { grid, pool, score: 0, status: Status::Running, rng })
    }

    /// Commits a steering request, ignoring a direct reversal. Returns the
    /// direction in effect afterwards.
    pub fn steer(&mut self, requested: Option<Direction>) -> Result<Direction, GameError> {
        let id = self.pool.head_id()?;

        match self.pool.get_mut(id) {
            Some(Entity::Head { direction, .. }) => {
                *direction = snake::commit_direction(*direction, requested);
                Ok(*direction)
            },
            _ => Err(PoolError::MissingHead.into()),
        }
    }

    /// Runs one tick: steering, movement, then collision and growth.
    pub fn tick(&mut self, requested: Option<Direction>) -> Result<Status, GameError> {
        if self.status.is_over() {
            return Ok(self.status);
        }

        self.steer(requested)?;
        snake::move_step(&mut self.pool, &mut self.grid)?;

        let contact = collision::detect(&self.pool)?;
        match collision::resolve(contact, &mut self.pool, &mut self.grid, &mut self.rng)? {
            Resolution::Moved => {},
            Resolution::Grew => {
                self.score += 1;
                debug!("food eaten, score {}, length {}", self.score, self.pool.segment_count());
            },
            Resolution::BoardFull => {
                self.score += 1;
                self.status = Status::Won;
                info!("board filled, game won with score {}", self.score);
            },
            Resolution::Crashed => {
                self.status = Status::Lost;
                info!("game lost with score {}", self.score);
            },
        }

        Ok(self.status)
    }

    /// Ends the game, releasing the board and every entity, and hands back
    /// the final score.
    pub fn finish(self) -> u32 {
        debug!("releasing {} entities", self.pool.len());
        self.score
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn direction(&self) -> Result<Direction, GameError> {
        match self.pool.head()? {
            Entity::Head { direction, .. } => Ok(*direction),
            _ => Err(PoolError::MissingHead.into()),
        }
    }

    pub fn head_position(&self) -> Result<Position, GameError> {
        Ok(self.pool.head()?.position())
    }

    pub fn food_position(&self) -> Result<Position, GameError> {
        Ok(self.pool.food()?.position())
    }

    /// Segment positions, nearest to the head first.
    pub fn body(&self) -> Vec<Position> {
        self.pool.segments().map(Entity::position).collect()
    }

    pub fn body_len(&self) -> usize {
        self.pool.segment_count()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    /// The bordered board, ready to be put on screen.
    pub fn frame(&self) -> String {
        self.grid.serialize()
    }
}

fn check_size(size: BoardSize) -> Result<(), GameError> {
    if size.cells() < 2 {
        return Err(GameError::BoardTooSmall { width: size.width, height: size.height });
    }
    Ok(())
}
