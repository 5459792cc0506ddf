#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Points awarded per cleared row. A flat award: clearing several rows at
// once pays per row, with no multi-line bonus.
pub const ROW_SCORE: u32 = 14;

// Seconds between gravity steps. Fixed for the whole game; there is no
// level or speed-up mechanic.
pub const GRAVITY_INTERVAL: f32 = 1.0;

// Seconds the game-over banner stays on screen after the board resets.
pub const GAME_OVER_FLASH: f32 = 1.5;
