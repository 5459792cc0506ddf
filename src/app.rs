#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow potential wrapping when casting between types as board coordinates are within reasonable ranges
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;

use crate::Time;
use crate::components::{Board, GameState, Piece, PieceKind, PieceRng, Position};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::systems::spawn_piece;

pub type AppResult<T> = anyhow::Result<T>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(PieceRng::new())
    }

    /// Build an app with a caller-supplied piece source, so tests can make
    /// the piece sequence deterministic.
    #[must_use]
    pub fn with_rng(rng: PieceRng) -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(GameState::default());
        world.insert_resource(Board::new(BOARD_WIDTH, BOARD_HEIGHT));
        world.insert_resource(rng);

        let mut app = Self {
            world,
            should_quit: false,
        };

        spawn_piece(&mut app.world);

        app
    }

    /// Everything the renderer needs to draw: locked cells first, then the
    /// active piece's cells.
    pub fn get_render_blocks(&mut self) -> Vec<(Position, PieceKind)> {
        let mut blocks = Vec::new();

        if let Some(board) = self.world.get_resource::<Board>() {
            for y in 0..board.height {
                for x in 0..board.width {
                    if let Some(kind) = board.cells[y][x] {
                        blocks.push((
                            Position {
                                x: x as i32,
                                y: y as i32,
                            },
                            kind,
                        ));
                    }
                }
            }
        }

        let piece_blocks: Vec<_> = self
            .world
            .query::<(&Piece, &Position)>()
            .iter(&self.world)
            .flat_map(|(piece, position)| {
                let kind = piece.kind;
                piece
                    .shape
                    .filled_cells()
                    .map(|(dx, dy)| {
                        (
                            Position {
                                x: position.x + dx,
                                y: position.y + dy,
                            },
                            kind,
                        )
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        blocks.extend(piece_blocks);
        blocks
    }

    /// Reset to a fresh game: empty board, zeroed score, new piece.
    pub fn reset(&mut self) {
        self.world.resource_mut::<GameState>().reset();
        self.world.resource_mut::<Board>().clear();

        let pieces: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<Piece>>()
            .iter(&self.world)
            .collect();
        for entity in pieces {
            self.world.despawn(entity);
        }

        spawn_piece(&mut self.world);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
