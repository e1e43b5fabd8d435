use crate::entity::{Entity, EntityPool, PoolError};
use crate::grid::{Glyph, Grid};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// Applies a steering request to the committed direction. A request for the
/// exact reverse is dropped, as is no request at all.
pub fn commit_direction(current: Direction, requested: Option<Direction>) -> Direction {
    match requested {
        Some(new_direction) if new_direction != current.opposite() => new_direction,
        _ => current,
    }
}

/// Moves the head one cell along its direction and drags every segment into
/// the cell its predecessor held before this step, then repaints the movers.
///
/// Entities are visited in spawn order, so a segment's predecessor has
/// always been moved already and its `previous` holds the pre-step position.
pub fn move_step(pool: &mut EntityPool, grid: &mut Grid) -> Result<(), PoolError> {
    let size = grid.size();

    for id in 0..pool.len() {
        let leader_was = match pool.get(id) {
            Some(Entity::Segment { follows, .. }) => pool.get(*follows).map(Entity::previous),
            _ => None,
        };

        match pool.get_mut(id) {
            Some(Entity::Head { position, previous, direction }) => {
                grid.paint(*position, Glyph::Empty);
                *previous = *position;
                *position = position.step(*direction, size);
            },
            Some(Entity::Segment { position, previous, .. }) => {
                grid.paint(*position, Glyph::Empty);
                *previous = *position;
                if let Some(target) = leader_was {
                    *position = target;
                }
            },
            _ => {}
        }
    }

    // Head last so it stays visible on top of whatever it ran into
    for segment in pool.segments() {
        grid.paint(segment.position(), Glyph::Body);
    }
    grid.paint(pool.head()?.position(), Glyph::Head);

    Ok(())
}
