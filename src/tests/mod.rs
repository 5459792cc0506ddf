#![warn(clippy::all, clippy::pedantic)]

pub mod components_tests;

// Shared test utilities
pub mod test_utils {
    use crate::Time;
    use crate::components::{Board, GameState, Piece, PieceKind, PieceRng, Position};
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
    use bevy_ecs::prelude::*;

    // Helper function to create a test world with a seeded piece source
    #[must_use]
    pub fn create_test_world() -> World {
        let mut world = World::new();
        world.init_resource::<GameState>();
        world.insert_resource(Board::new(BOARD_WIDTH, BOARD_HEIGHT));
        world.insert_resource(Time::new());
        world.insert_resource(PieceRng::seeded(42));
        world
    }

    // Fill an entire board row with the given piece kind
    pub fn fill_row(board: &mut Board, y: usize, kind: PieceKind) {
        for x in 0..board.width {
            board.set_cell(x, y, Some(kind));
        }
    }

    // Remove every active piece entity, so a test can place its own
    pub fn despawn_pieces(world: &mut World) {
        let pieces: Vec<Entity> = world
            .query_filtered::<Entity, With<Piece>>()
            .iter(world)
            .collect();
        for entity in pieces {
            world.despawn(entity);
        }
    }

    // The single active piece, cloned out of the world
    #[must_use]
    pub fn active_piece(world: &mut World) -> (Entity, Piece, Position) {
        let mut query = world.query::<(Entity, &Piece, &Position)>();
        let (entity, piece, position) = query
            .iter(world)
            .next()
            .expect("expected an active piece");
        (entity, piece.clone(), *position)
    }
}
