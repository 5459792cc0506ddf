#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::components::{Board, GameInput, GameState, Piece, PieceRng, Position};
use crate::game::{GAME_OVER_FLASH, GRAVITY_INTERVAL};

/// Spawn a freshly picked piece at the grid origin. If it collides
/// immediately the game is over: the board and score reset on the spot and
/// play continues with the new piece on the empty grid.
pub fn spawn_piece(world: &mut World) {
    let kind = world.resource_mut::<PieceRng>().pick();
    let piece = Piece::new(kind);
    let position = Position { x: 0, y: 0 };

    let blocked = world.resource::<Board>().collides(position, &piece.shape);
    if blocked {
        info!("spawn blocked by stack, game over");
        world.resource_mut::<Board>().clear();

        let mut game_state = world.resource_mut::<GameState>();
        game_state.score = 0;
        game_state.rows_cleared = 0;
        game_state.games_lost += 1;
        game_state.game_over = true;
        game_state.game_over_flash = GAME_OVER_FLASH;
    }

    debug!("spawning {kind:?} piece");
    world.spawn((piece, position));
}

/// Lock the piece into the board at its current position, clear any full
/// rows, award score, and hand play to a new piece.
pub fn lock_piece(world: &mut World, entity: Entity, position: Position, piece: &Piece) {
    let cleared = {
        let mut board = world.resource_mut::<Board>();
        board.lock_piece(position, piece);
        board.clear_full_rows()
    };

    if cleared > 0 {
        let mut game_state = world.resource_mut::<GameState>();
        game_state.add_cleared_rows(cleared);
        info!(
            "cleared {cleared} row(s), score now {}",
            game_state.score
        );
    }

    world.despawn(entity);
    spawn_piece(world);
}

fn active_piece(world: &mut World) -> Option<(Entity, Piece, Position)> {
    let mut query = world.query::<(Entity, &Piece, &Position)>();
    query
        .iter(world)
        .next()
        .map(|(entity, piece, position)| (entity, piece.clone(), *position))
}

/// Apply one discrete input. Every transition proposes a new offset or
/// shape, validates it against the board, and commits only if it fits; a
/// soft drop that cannot move down locks the piece, exactly like gravity.
pub fn apply_input(world: &mut World, input: GameInput) {
    let Some((entity, piece, position)) = active_piece(world) else {
        return;
    };

    match input {
        GameInput::MoveLeft | GameInput::MoveRight => {
            let dx = if input == GameInput::MoveLeft { -1 } else { 1 };
            let candidate = Position {
                x: position.x + dx,
                y: position.y,
            };

            if !world.resource::<Board>().collides(candidate, &piece.shape) {
                world.entity_mut(entity).insert(candidate);
            }
        }
        GameInput::SoftDrop => {
            let candidate = Position {
                x: position.x,
                y: position.y + 1,
            };

            if world.resource::<Board>().collides(candidate, &piece.shape) {
                lock_piece(world, entity, position, &piece);
            } else {
                world.entity_mut(entity).insert(candidate);
            }
        }
        GameInput::Rotate => {
            let rotated = piece.rotated();

            if !world.resource::<Board>().collides(position, &rotated.shape) {
                world.entity_mut(entity).insert(rotated);
            }
        }
    }
}

/// Advance the gravity accumulator and, once it crosses the interval, step
/// the active piece down one cell or lock it in place.
pub fn game_tick_system(world: &mut World, delta_seconds: f32) {
    trace!("game tick with delta: {delta_seconds}");

    let should_drop = {
        let mut game_state = world.resource_mut::<GameState>();

        if game_state.game_over {
            game_state.game_over_flash -= delta_seconds;
            if game_state.game_over_flash <= 0.0 {
                game_state.game_over = false;
                game_state.game_over_flash = 0.0;
            }
        }

        game_state.drop_timer += delta_seconds;
        let should_drop = game_state.drop_timer >= GRAVITY_INTERVAL;
        if should_drop {
            game_state.drop_timer = 0.0;
        }
        should_drop
    };

    if !should_drop {
        return;
    }

    let Some((entity, piece, position)) = active_piece(world) else {
        debug!("no active piece, spawning one");
        spawn_piece(world);
        return;
    };

    let candidate = Position {
        x: position.x,
        y: position.y + 1,
    };

    if world.resource::<Board>().collides(candidate, &piece.shape) {
        lock_piece(world, entity, position, &piece);
    } else {
        world.entity_mut(entity).insert(candidate);
    }
}
