#[cfg(test)]
mod shape_tests {
    use crate::components::{PieceKind, Shape};

    #[test]
    fn test_templates_have_four_cells() {
        for kind in PieceKind::ALL {
            let template = kind.template();
            assert_eq!(
                template.filled_cells().count(),
                4,
                "{kind:?} template should have 4 filled cells"
            );
        }
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let i_shape = PieceKind::I.template();
        assert_eq!(i_shape.width(), 4);
        assert_eq!(i_shape.height(), 1);

        let rotated = i_shape.rotated_clockwise();
        assert_eq!(rotated.width(), 1);
        assert_eq!(rotated.height(), 4);
    }

    #[test]
    fn test_rotation_content() {
        // T is [[0,1,0],[1,1,1]]; clockwise it becomes [[1,0],[1,1],[1,0]]
        let rotated = PieceKind::T.template().rotated_clockwise();
        let expected = Shape::new(vec![vec![1, 0], vec![1, 1], vec![1, 0]]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_four_rotations_restore_original() {
        for kind in PieceKind::ALL {
            let original = kind.template();
            let back = original
                .rotated_clockwise()
                .rotated_clockwise()
                .rotated_clockwise()
                .rotated_clockwise();
            assert_eq!(back, original, "{kind:?} should survive four rotations");
        }
    }

    #[test]
    fn test_o_piece_rotation_invariant() {
        let o_shape = PieceKind::O.template();
        assert_eq!(o_shape.rotated_clockwise(), o_shape);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_ragged_shape_rejected() {
        let _ = Shape::new(vec![vec![1, 1], vec![1]]);
    }

    #[test]
    #[should_panic(expected = "at least one row")]
    fn test_empty_shape_rejected() {
        let _ = Shape::new(Vec::new());
    }
}

#[cfg(test)]
mod piece_tests {
    use crate::components::{Piece, PieceKind};

    #[test]
    fn test_piece_starts_from_template() {
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind);
            assert_eq!(piece.kind, kind);
            assert_eq!(piece.shape, kind.template());
        }
    }

    #[test]
    fn test_rotated_piece_keeps_kind() {
        let piece = Piece::new(PieceKind::L);
        let rotated = piece.rotated();
        assert_eq!(rotated.kind, PieceKind::L);
        assert_eq!(rotated.shape, piece.shape.rotated_clockwise());
    }

    #[test]
    fn test_piece_kinds_have_distinct_colors() {
        let colors: Vec<_> = PieceKind::ALL.iter().map(|kind| kind.color()).collect();
        for (i, color) in colors.iter().enumerate() {
            for other in &colors[i + 1..] {
                assert_ne!(color, other);
            }
        }
    }
}

#[cfg(test)]
mod rng_tests {
    use crate::components::PieceRng;

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = PieceRng::seeded(99);
        let mut b = PieceRng::seeded(99);

        let picks_a: Vec<_> = (0..20).map(|_| a.pick()).collect();
        let picks_b: Vec<_> = (0..20).map(|_| b.pick()).collect();

        assert_eq!(picks_a, picks_b);
    }
}

#[cfg(test)]
mod board_tests {
    use crate::components::{Board, Piece, PieceKind, Position, Shape};
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, ROW_SCORE};

    #[test]
    fn test_board_creation() {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);

        assert_eq!(board.width, BOARD_WIDTH);
        assert_eq!(board.height, BOARD_HEIGHT);
        assert_eq!(board.cells.len(), BOARD_HEIGHT);
        assert!(board.cells.iter().all(|row| row.len() == BOARD_WIDTH));
        assert!(board.cells.iter().flatten().all(Option::is_none));
    }

    #[test]
    #[should_panic(expected = "dimensions must be positive")]
    fn test_zero_width_rejected() {
        let _ = Board::new(0, BOARD_HEIGHT);
    }

    #[test]
    fn test_cell_reads() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set_cell(3, 5, Some(PieceKind::T));

        assert_eq!(board.cell(3, 5), Some(Some(PieceKind::T)));
        assert_eq!(board.cell(0, 0), Some(None));

        // Out-of-bounds reads are a defined result, not a fault
        assert_eq!(board.cell(-1, 0), None);
        assert_eq!(board.cell(0, -1), None);
        assert_eq!(board.cell(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.cell(0, BOARD_HEIGHT as i32), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_out_of_bounds_write_rejected() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set_cell(BOARD_WIDTH, 0, Some(PieceKind::O));
    }

    #[test]
    fn test_board_clear() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set_cell(0, 0, Some(PieceKind::I));
        board.set_cell(4, 10, Some(PieceKind::O));

        board.clear();

        assert!(board.cells.iter().flatten().all(Option::is_none));
    }

    #[test]
    fn test_no_collision_inside_empty_board() {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let shape = PieceKind::O.template();

        assert!(!board.collides(Position { x: 0, y: 0 }, &shape));
        assert!(!board.collides(
            Position {
                x: (BOARD_WIDTH - 2) as i32,
                y: (BOARD_HEIGHT - 2) as i32,
            },
            &shape
        ));
    }

    #[test]
    fn test_collision_with_walls_and_floor() {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let shape = PieceKind::O.template();

        // Left wall
        assert!(board.collides(Position { x: -1, y: 0 }, &shape));
        // Right wall: an O at width-1 pokes one cell past the edge
        assert!(board.collides(
            Position {
                x: (BOARD_WIDTH - 1) as i32,
                y: 0,
            },
            &shape
        ));
        // Floor
        assert!(board.collides(
            Position {
                x: 0,
                y: (BOARD_HEIGHT - 1) as i32,
            },
            &shape
        ));
    }

    #[test]
    fn test_cells_above_top_do_not_collide() {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let shape = PieceKind::O.template();

        assert!(!board.collides(Position { x: 0, y: -1 }, &shape));
        assert!(!board.collides(Position { x: 0, y: -2 }, &shape));
    }

    #[test]
    fn test_collision_with_locked_cells() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set_cell(1, 1, Some(PieceKind::I));

        let shape = PieceKind::O.template();
        assert!(board.collides(Position { x: 0, y: 0 }, &shape));
        assert!(!board.collides(Position { x: 2, y: 0 }, &shape));
    }

    #[test]
    fn test_lock_piece_writes_cells() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let piece = Piece::new(PieceKind::T);

        board.lock_piece(Position { x: 2, y: 3 }, &piece);

        // T is [[0,1,0],[1,1,1]] anchored at (2,3)
        assert_eq!(board.cell(3, 3), Some(Some(PieceKind::T)));
        assert_eq!(board.cell(2, 4), Some(Some(PieceKind::T)));
        assert_eq!(board.cell(3, 4), Some(Some(PieceKind::T)));
        assert_eq!(board.cell(4, 4), Some(Some(PieceKind::T)));
        assert_eq!(board.cell(2, 3), Some(None));
    }

    #[test]
    fn test_clear_single_full_row() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let bottom = BOARD_HEIGHT - 1;

        for x in 0..BOARD_WIDTH {
            board.set_cell(x, bottom, Some(PieceKind::I));
        }
        // Partial row above it
        board.set_cell(0, bottom - 1, Some(PieceKind::L));

        let cleared = board.clear_full_rows();

        assert_eq!(cleared, 1);
        assert_eq!(board.cells.len(), BOARD_HEIGHT);
        // Top row is fresh and empty
        assert!(board.cells[0].iter().all(Option::is_none));
        // The partial row shifted down into the bottom row
        assert_eq!(board.cell(0, bottom as i32), Some(Some(PieceKind::L)));
        assert_eq!(board.cell(1, bottom as i32), Some(None));
    }

    #[test]
    fn test_clear_no_full_rows_is_noop() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.set_cell(0, BOARD_HEIGHT - 1, Some(PieceKind::S));

        let before = board.cells.clone();
        let cleared = board.clear_full_rows();

        assert_eq!(cleared, 0);
        assert_eq!(board.cells, before);
    }

    #[test]
    fn test_clear_two_separated_full_rows() {
        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let bottom = BOARD_HEIGHT - 1;

        for x in 0..BOARD_WIDTH {
            board.set_cell(x, bottom, Some(PieceKind::I));
            board.set_cell(x, bottom - 2, Some(PieceKind::I));
        }
        // Markers in the partial rows between and above the full ones
        board.set_cell(0, bottom - 1, Some(PieceKind::L));
        board.set_cell(1, bottom - 3, Some(PieceKind::T));

        let cleared = board.clear_full_rows();

        assert_eq!(cleared, 2);
        assert_eq!(board.cells.len(), BOARD_HEIGHT);
        // Both partial rows kept their contents and shifted to the bottom
        assert_eq!(board.cell(0, bottom as i32), Some(Some(PieceKind::L)));
        assert_eq!(board.cell(1, (bottom - 1) as i32), Some(Some(PieceKind::T)));
        assert!(board.cells[0].iter().all(Option::is_none));
        assert!(board.cells[1].iter().all(Option::is_none));
    }

    #[test]
    fn test_last_gap_scenario_on_tiny_board() {
        // 4x1 grid, bottom row filled except one cell; locking a piece that
        // fills the gap clears the row and scores one row's worth
        let mut board = Board::new(4, 1);
        board.set_cell(0, 0, Some(PieceKind::I));
        board.set_cell(1, 0, Some(PieceKind::I));
        board.set_cell(2, 0, Some(PieceKind::I));

        let plug = Piece {
            kind: PieceKind::I,
            shape: Shape::new(vec![vec![1]]),
        };
        assert!(!board.collides(Position { x: 3, y: 0 }, &plug.shape));

        board.lock_piece(Position { x: 3, y: 0 }, &plug);
        let cleared = board.clear_full_rows();

        assert_eq!(cleared, 1);
        assert!(board.cells.iter().flatten().all(Option::is_none));
        assert_eq!(cleared as u32 * ROW_SCORE, 14);
    }
}

#[cfg(test)]
mod game_state_tests {
    use crate::components::GameState;
    use crate::game::ROW_SCORE;

    #[test]
    fn test_game_state_default() {
        let game_state = GameState::default();

        assert_eq!(game_state.score, 0);
        assert_eq!(game_state.rows_cleared, 0);
        assert_eq!(game_state.games_lost, 0);
        assert!(!game_state.game_over);
        assert_eq!(game_state.drop_timer, 0.0);
    }

    #[test]
    fn test_score_is_flat_per_row() {
        let mut game_state = GameState::default();

        game_state.add_cleared_rows(1);
        assert_eq!(game_state.score, ROW_SCORE);

        // Three rows at once still pay per row, no bonus
        game_state.add_cleared_rows(3);
        assert_eq!(game_state.score, 4 * ROW_SCORE);
        assert_eq!(game_state.rows_cleared, 4);
    }

    #[test]
    fn test_game_state_reset() {
        let mut game_state = GameState::default();
        game_state.score = 140;
        game_state.rows_cleared = 10;
        game_state.game_over = true;
        game_state.drop_timer = 0.7;

        game_state.reset();

        assert_eq!(game_state.score, 0);
        assert_eq!(game_state.rows_cleared, 0);
        assert!(!game_state.game_over);
        assert_eq!(game_state.drop_timer, 0.0);
    }
}
