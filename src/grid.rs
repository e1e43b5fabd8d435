use crate::TermInt;
use crate::snake::Direction;

use rand::Rng;

const BORDER_CORNER: char = '+';
const BORDER_HORIZONTAL: char = '-';
const BORDER_VERTICAL: char = '|';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardSize {
    pub width: TermInt,
    pub height: TermInt,
}

impl BoardSize {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        BoardSize { width, height }
    }

    pub fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Every cell of the board, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

/// A cell on the board. Coordinates always lie in `[0, width) x [0, height)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: TermInt,
    pub y: TermInt,
}

impl Position {
    pub fn new(x: TermInt, y: TermInt) -> Self {
        Position { x, y }
    }

    /// Moves one cell in `direction`, wrapping each axis independently so the
    /// board behaves like a torus.
    pub fn step(self, direction: Direction, size: BoardSize) -> Self {
        let (dx, dy) = direction.delta();
        Position {
            x: wrap_axis(self.x, dx, size.width),
            y: wrap_axis(self.y, dy, size.height),
        }
    }

    pub fn random<R: Rng + ?Sized>(size: BoardSize, rng: &mut R) -> Self {
        Position {
            x: rng.gen_range(0..size.width),
            y: rng.gen_range(0..size.height),
        }
    }
}

fn wrap_axis(value: TermInt, delta: i32, bound: TermInt) -> TermInt {
    (value as i32 + delta).rem_euclid(bound as i32) as TermInt
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Head,
    Food,
    Body,
}

impl Glyph {
    pub fn as_char(self) -> char {
        match self {
            Glyph::Empty => ' ',
            Glyph::Head => 'O',
            Glyph::Food => '@',
            Glyph::Body => 'o',
        }
    }
}

/// Character buffer the engine paints into. Painting is the only way its
/// contents change.
pub struct Grid {
    size: BoardSize,
    cells: Vec<Glyph>,
}

impl Grid {
    pub fn new(size: BoardSize) -> Self {
        Grid { size, cells: vec![Glyph::Empty; size.cells()] }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Glyph::Empty);
    }

    pub fn paint(&mut self, pos: Position, glyph: Glyph) {
        let idx = self.index(pos);
        self.cells[idx] = glyph;
    }

    pub fn glyph_at(&self, pos: Position) -> Glyph {
        self.cells[self.index(pos)]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.glyph_at(pos) == Glyph::Empty
    }

    pub fn count(&self, glyph: Glyph) -> usize {
        self.cells.iter().filter(|cell| **cell == glyph).count()
    }

    /// Row-major rendering of the board surrounded by a border, one line per
    /// row, lines separated by `\n`.
    pub fn serialize(&self) -> String {
        let width = self.size.width as usize;
        let mut horizontal = String::with_capacity(width + 2);
        horizontal.push(BORDER_CORNER);
        horizontal.extend(std::iter::repeat(BORDER_HORIZONTAL).take(width));
        horizontal.push(BORDER_CORNER);

        let mut out = String::with_capacity((width + 3) * (self.size.height as usize + 2));
        out.push_str(&horizontal);

        for row in self.cells.chunks(width) {
            out.push('\n');
            out.push(BORDER_VERTICAL);
            out.extend(row.iter().map(|glyph| glyph.as_char()));
            out.push(BORDER_VERTICAL);
        }

        out.push('\n');
        out.push_str(&horizontal);
        out
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: Position) -> usize {
        debug_assert!(self.size.contains(pos), "{:?} outside {:?}", pos, self.size);
        self.size.width as usize * pos.y as usize + pos.x as usize
    }
}
