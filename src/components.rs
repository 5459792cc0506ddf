#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;

/// The fixed piece catalog. Five templates, picked uniformly at random.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    O,
    I,
    T,
    S,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 5] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::T,
        PieceKind::S,
        PieceKind::L,
    ];

    #[must_use]
    pub fn template(self) -> Shape {
        let rows: &[&[u8]] = match self {
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::I => &[&[1, 1, 1, 1]],
            PieceKind::T => &[&[0, 1, 0], &[1, 1, 1]],
            PieceKind::S => &[&[1, 1, 0], &[0, 1, 1]],
            PieceKind::L => &[&[1, 0], &[1, 0], &[1, 1]],
        };
        Shape::new(rows.iter().map(|row| row.to_vec()).collect())
    }

    #[must_use]
    pub fn color(self) -> ratatui::style::Color {
        match self {
            PieceKind::O => ratatui::style::Color::Yellow,
            PieceKind::I => ratatui::style::Color::Cyan,
            PieceKind::T => ratatui::style::Color::Magenta,
            PieceKind::S => ratatui::style::Color::Green,
            PieceKind::L => ratatui::style::Color::Blue,
        }
    }
}

/// Uniform random piece selection. A seedable resource so tests can pin the
/// piece sequence.
#[derive(Resource, Debug)]
pub struct PieceRng {
    rng: fastrand::Rng,
}

impl PieceRng {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn pick(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.usize(0..PieceKind::ALL.len())]
    }
}

impl Default for PieceRng {
    fn default() -> Self {
        Self::new()
    }
}

/// A rectangular 0/1 cell matrix. Templates are immutable; rotation builds a
/// new shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<Vec<u8>>,
}

impl Shape {
    /// # Panics
    ///
    /// Panics if `rows` is empty or not rectangular.
    #[must_use]
    pub fn new(rows: Vec<Vec<u8>>) -> Self {
        assert!(!rows.is_empty(), "shape must have at least one row");
        let width = rows[0].len();
        assert!(width > 0, "shape rows must not be empty");
        assert!(
            rows.iter().all(|row| row.len() == width),
            "shape rows must all have the same length"
        );
        Self { rows }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Shape-local coordinates of every filled cell.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &value)| value != 0)
                .map(move |(x, _)| (x as i32, y as i32))
        })
    }

    /// 90 degrees clockwise: output row i is input column i read
    /// bottom-to-top, so an RxC shape becomes CxR.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Shape {
        let rows = (0..self.width())
            .map(|x| (0..self.height()).rev().map(|y| self.rows[y][x]).collect())
            .collect();
        Shape { rows }
    }
}

/// Grid-relative offset of a shape's top-left cell.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// The active falling piece. Exactly one entity carries this at any time;
/// locking despawns it and spawns a replacement.
#[derive(Component, Debug, Clone)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl Piece {
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: kind.template(),
        }
    }

    /// The piece rotated a quarter turn clockwise. The caller validates the
    /// result against the board and discards it on collision; there are no
    /// wall kicks.
    #[must_use]
    pub fn rotated(&self) -> Piece {
        Piece {
            kind: self.kind,
            shape: self.shape.rotated_clockwise(),
        }
    }
}

/// The locked-block grid. Row-major, row 0 at the top; `None` is an empty
/// cell, `Some(kind)` a filled one (the kind only feeds the renderer's
/// color). Mutated only by the lock and row-clear operations.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Option<PieceKind>>>,
}

impl Board {
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![vec![None; width]; height],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(None);
        }
    }

    /// Bounds-checked read; `None` for coordinates outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Option<PieceKind>> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// # Panics
    ///
    /// Panics on an out-of-bounds write; correct callers never trigger this.
    pub fn set_cell(&mut self, x: usize, y: usize, value: Option<PieceKind>) {
        assert!(x < self.width && y < self.height, "cell write out of bounds");
        self.cells[y][x] = value;
    }

    /// Whether the shape at the given offset overlaps a wall, the floor, or
    /// a filled cell. Cells above row 0 are deliberately not a collision, so
    /// a shape may extend past the top edge.
    #[must_use]
    pub fn collides(&self, position: Position, shape: &Shape) -> bool {
        for (dx, dy) in shape.filled_cells() {
            let x = position.x + dx;
            let y = position.y + dy;

            if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
                return true;
            }

            if y >= 0 && self.cells[y as usize][x as usize].is_some() {
                return true;
            }
        }

        false
    }

    /// Merge the piece into the grid at its absolute offset.
    pub fn lock_piece(&mut self, position: Position, piece: &Piece) {
        for (dx, dy) in piece.shape.filled_cells() {
            let x = position.x + dx;
            let y = position.y + dy;

            if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
                self.cells[y as usize][x as usize] = Some(piece.kind);
            }
        }
    }

    /// Remove every full row, prepending a fresh empty row at the top for
    /// each, and return how many were removed. The row count never changes.
    pub fn clear_full_rows(&mut self) -> usize {
        let full_rows: Vec<usize> = (0..self.height)
            .filter(|&y| self.cells[y].iter().all(Option::is_some))
            .collect();

        for &y in &full_rows {
            self.cells.remove(y);
            self.cells.insert(0, vec![None; self.width]);
        }

        full_rows.len()
    }
}

/// Discrete player actions, applied one at a time in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

#[derive(Resource, Debug, Clone)]
pub struct GameState {
    pub score: u32,
    pub rows_cleared: u32,
    pub games_lost: u32,
    pub game_over: bool,
    /// Seconds left on the game-over banner.
    pub game_over_flash: f32,
    /// Gravity accumulator, in seconds since the last gravity step.
    pub drop_timer: f32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            rows_cleared: 0,
            games_lost: 0,
            game_over: false,
            game_over_flash: 0.0,
            drop_timer: 0.0,
        }
    }
}

impl GameState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn add_cleared_rows(&mut self, rows: usize) {
        self.score += rows as u32 * crate::game::ROW_SCORE;
        self.rows_cleared += rows as u32;
    }
}
