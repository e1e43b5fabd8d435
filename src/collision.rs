use crate::entity::{Entity, EntityId, EntityPool, PoolError};
use crate::grid::{Glyph, Grid, Position};

use log::{debug, trace};
use rand::Rng;
use rand::seq::SliceRandom;

/// Random draws tried before falling back to scanning the whole board.
const FOOD_SAMPLE_ATTEMPTS: usize = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Contact {
    Nothing,
    Food,
    Body(EntityId),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Moved,
    /// Food eaten, one segment added and the food placed elsewhere.
    Grew,
    /// The food was eaten but there is no empty cell left to put it on.
    BoardFull,
    Crashed,
}

/// Compares the head against every other entity after the move, using only
/// positions from this tick. Hitting the body wins over anything else.
pub fn detect(pool: &EntityPool) -> Result<Contact, PoolError> {
    let head_id = pool.head_id()?;
    let head = pool.head()?.position();
    let mut contact = Contact::Nothing;

    for (id, entity) in pool.iter() {
        if id == head_id || entity.position() != head {
            continue;
        }

        match entity {
            Entity::Segment { .. } => return Ok(Contact::Body(id)),
            Entity::Food { .. } => contact = Contact::Food,
            Entity::Head { .. } => {}
        }
    }

    Ok(contact)
}

/// Applies a detected contact. Growth only happens here, after the scan, so
/// the new segment is never looked at in the same tick it was born.
pub fn resolve<R: Rng + ?Sized>(
    contact: Contact,
    pool: &mut EntityPool,
    grid: &mut Grid,
    rng: &mut R,
) -> Result<Resolution, PoolError> {
    match contact {
        Contact::Nothing => Ok(Resolution::Moved),
        Contact::Body(id) => {
            debug!("head ran into segment {}", id);
            Ok(Resolution::Crashed)
        },
        Contact::Food => {
            grow(pool, grid)?;

            match free_cell(grid, rng) {
                Some(pos) => {
                    pool.respawn_food(pos)?;
                    grid.paint(pos, Glyph::Food);
                    Ok(Resolution::Grew)
                },
                None => Ok(Resolution::BoardFull),
            }
        },
    }
}

/// Appends a segment behind the tail, on the cell the tail held before this
/// tick.
pub fn grow(pool: &mut EntityPool, grid: &mut Grid) -> Result<EntityId, PoolError> {
    let tail = pool.tail_id()?;
    let spot = pool.get(tail).map(Entity::previous).ok_or(PoolError::MissingHead)?;

    let id = pool.spawn_segment(spot, tail)?;
    grid.paint(spot, Glyph::Body);
    Ok(id)
}

/// Picks a uniformly random empty cell, or `None` when the board is full.
pub fn free_cell<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Position> {
    let size = grid.size();

    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let pos = Position::random(size, rng);
        if grid.is_empty(pos) {
            return Some(pos);
        }
    }

    trace!("no empty cell after {} draws, scanning the board", FOOD_SAMPLE_ATTEMPTS);
    let choices: Vec<Position> = size.positions().filter(|pos| grid.is_empty(*pos)).collect();
    choices.choose(rng).copied()
}
