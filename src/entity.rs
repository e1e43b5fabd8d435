use crate::grid::{BoardSize, Glyph, Position};
use crate::snake::Direction;

use thiserror::Error;

/// Stable handle to an entity: its index in the pool, in spawn order.
pub type EntityId = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    Head { position: Position, previous: Position, direction: Direction },
    Food { position: Position },
    Segment { position: Position, previous: Position, follows: EntityId },
}

impl Entity {
    pub fn position(&self) -> Position {
        match self {
            Entity::Head { position, .. }
            | Entity::Food { position }
            | Entity::Segment { position, .. } => *position,
        }
    }

    /// Where the entity stood before the last tick. Food never moves, so
    /// that is its current position.
    pub fn previous(&self) -> Position {
        match self {
            Entity::Head { previous, .. } | Entity::Segment { previous, .. } => *previous,
            Entity::Food { position } => *position,
        }
    }

    pub fn glyph(&self) -> Glyph {
        match self {
            Entity::Head { .. } => Glyph::Head,
            Entity::Food { .. } => Glyph::Food,
            Entity::Segment { .. } => Glyph::Body,
        }
    }

    pub fn is_segment(&self) -> bool {
        matches!(self, Entity::Segment { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("entity pool is full ({capacity} entities)")]
    Full { capacity: usize },
    #[error("the pool already holds a head")]
    DuplicateHead,
    #[error("the pool already holds a food pellet")]
    DuplicateFood,
    #[error("no head has been spawned")]
    MissingHead,
    #[error("no food has been spawned")]
    MissingFood,
    #[error("a new segment must follow the tail (entity {expected}), not entity {found}")]
    BrokenChain { expected: EntityId, found: EntityId },
    #[error("cell {0:?} is already occupied")]
    Occupied(Position),
}

/// Owns every game object. Entities are only ever appended, except for the
/// food pellet which is replaced in place.
pub struct EntityPool {
    entities: Vec<Entity>,
    capacity: usize,
    head: Option<EntityId>,
    food: Option<EntityId>,
    tail: Option<EntityId>,
}

impl EntityPool {
    /// Sized for a completely filled board. The meal that fills the last
    /// free cell adds a segment while the food entity still exists, hence
    /// one slot more than there are cells.
    pub fn for_board(size: BoardSize) -> Self {
        Self::with_capacity(size.cells() + 1)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        EntityPool {
            entities: Vec::with_capacity(capacity),
            capacity,
            head: None,
            food: None,
            tail: None,
        }
    }

    pub fn spawn_head(&mut self, position: Position, direction: Direction) -> Result<EntityId, PoolError> {
        if self.head.is_some() {
            return Err(PoolError::DuplicateHead);
        }
        self.ensure_vacant(position)?;

        let id = self.push(Entity::Head { position, previous: position, direction })?;
        self.head = Some(id);
        Ok(id)
    }

    pub fn spawn_food(&mut self, position: Position) -> Result<EntityId, PoolError> {
        if self.food.is_some() {
            return Err(PoolError::DuplicateFood);
        }
        self.ensure_vacant(position)?;

        let id = self.push(Entity::Food { position })?;
        self.food = Some(id);
        Ok(id)
    }

    /// Appends a segment behind `follows`, which has to be the current tail
    /// of the chain (the head while the chain is empty).
    pub fn spawn_segment(&mut self, position: Position, follows: EntityId) -> Result<EntityId, PoolError> {
        let expected = self.tail_id()?;
        if follows != expected {
            return Err(PoolError::BrokenChain { expected, found: follows });
        }

        let id = self.push(Entity::Segment { position, previous: position, follows })?;
        self.tail = Some(id);
        Ok(id)
    }

    /// Replaces the food pellet in place, keeping its handle. Returns the
    /// position it was taken from.
    pub fn respawn_food(&mut self, position: Position) -> Result<Position, PoolError> {
        let id = self.food.ok_or(PoolError::MissingFood)?;
        let old = self.entities[id].position();
        self.entities[id] = Entity::Food { position };
        Ok(old)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Entities in spawn order, with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().enumerate()
    }

    /// Body segments in chain order, nearest to the head first.
    pub fn segments(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_segment())
    }

    pub fn head_id(&self) -> Result<EntityId, PoolError> {
        self.head.ok_or(PoolError::MissingHead)
    }

    pub fn food_id(&self) -> Result<EntityId, PoolError> {
        self.food.ok_or(PoolError::MissingFood)
    }

    /// The last link of the chain: the newest segment, or the head itself.
    pub fn tail_id(&self) -> Result<EntityId, PoolError> {
        self.tail.or(self.head).ok_or(PoolError::MissingHead)
    }

    pub fn head(&self) -> Result<&Entity, PoolError> {
        Ok(&self.entities[self.head_id()?])
    }

    pub fn food(&self) -> Result<&Entity, PoolError> {
        Ok(&self.entities[self.food_id()?])
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.entities.iter().any(|e| e.position() == position)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    ///////////////////////////////////////////////////////////////////////////

    fn push(&mut self, entity: Entity) -> Result<EntityId, PoolError> {
        if self.entities.len() >= self.capacity {
            return Err(PoolError::Full { capacity: self.capacity });
        }

        self.entities.push(entity);
        Ok(self.entities.len() - 1)
    }

    fn ensure_vacant(&self, position: Position) -> Result<(), PoolError> {
        if self.is_occupied(position) {
            Err(PoolError::Occupied(position))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;

    fn pos(x: u16, y: u16) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn spawn_hands_out_indices_in_order() {
        let mut pool = EntityPool::for_board(BoardSize::new(5, 5));

        assert_eq!(pool.spawn_head(pos(2, 2), Right), Ok(0));
        assert_eq!(pool.spawn_food(pos(4, 4)), Ok(1));
        assert_eq!(pool.spawn_segment(pos(1, 2), 0), Ok(2));
        assert_eq!(pool.spawn_segment(pos(0, 2), 2), Ok(3));

        let kinds: Vec<Glyph> = pool.iter().map(|(_, e)| e.glyph()).collect();
        assert_eq!(kinds, vec![Glyph::Head, Glyph::Food, Glyph::Body, Glyph::Body]);
        assert_eq!(pool.tail_id(), Ok(3));
        assert_eq!(pool.segment_count(), 2);
    }

    #[test]
    fn only_one_head_and_one_food() {
        let mut pool = EntityPool::for_board(BoardSize::new(5, 5));
        pool.spawn_head(pos(0, 0), Right).unwrap();
        pool.spawn_food(pos(1, 1)).unwrap();

        assert_eq!(pool.spawn_head(pos(2, 2), Up), Err(PoolError::DuplicateHead));
        assert_eq!(pool.spawn_food(pos(3, 3)), Err(PoolError::DuplicateFood));
    }

    #[test]
    fn food_cannot_spawn_on_the_head() {
        let mut pool = EntityPool::for_board(BoardSize::new(5, 5));
        pool.spawn_head(pos(2, 3), Down).unwrap();

        assert_eq!(pool.spawn_food(pos(2, 3)), Err(PoolError::Occupied(pos(2, 3))));
    }

    #[test]
    fn segments_must_extend_the_tail() {
        let mut pool = EntityPool::for_board(BoardSize::new(5, 5));
        assert_eq!(pool.spawn_segment(pos(0, 0), 0), Err(PoolError::MissingHead));

        pool.spawn_head(pos(2, 2), Right).unwrap();
        pool.spawn_food(pos(4, 4)).unwrap();
        pool.spawn_segment(pos(1, 2), 0).unwrap();

        assert_eq!(
            pool.spawn_segment(pos(0, 2), 0),
            Err(PoolError::BrokenChain { expected: 2, found: 0 })
        );
    }

    #[test]
    fn capacity_is_a_hard_bound() {
        let mut pool = EntityPool::for_board(BoardSize::new(2, 2));
        pool.spawn_head(pos(0, 0), Right).unwrap();
        pool.spawn_food(pos(1, 1)).unwrap();
        pool.spawn_segment(pos(1, 0), 0).unwrap();
        pool.spawn_segment(pos(0, 1), 2).unwrap();
        pool.spawn_segment(pos(0, 0), 3).unwrap();

        assert_eq!(pool.spawn_segment(pos(1, 0), 4), Err(PoolError::Full { capacity: 5 }));
        assert_eq!(pool.len(), pool.capacity());
    }

    #[test]
    fn respawn_food_keeps_the_handle() {
        let mut pool = EntityPool::for_board(BoardSize::new(5, 5));
        pool.spawn_head(pos(0, 0), Right).unwrap();
        let food = pool.spawn_food(pos(3, 3)).unwrap();

        assert_eq!(pool.respawn_food(pos(4, 1)), Ok(pos(3, 3)));
        assert_eq!(pool.food_id(), Ok(food));
        assert_eq!(pool.food().unwrap().position(), pos(4, 1));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn respawn_without_food_fails() {
        let mut pool = EntityPool::with_capacity(4);
        assert_eq!(pool.respawn_food(pos(1, 1)), Err(PoolError::MissingFood));
    }
}
