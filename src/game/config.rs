use serde::{Deserialize, Serialize};

/// Configuration for the game
///
/// The board sizes, tick intervals, and turn-guard variants that used to be
/// separate near-identical state machines are all named parameters here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board extent along x, centered on the origin
    pub board_width: f32,
    /// Board extent along z, centered on the origin
    pub board_height: f32,
    /// Fixed simulation timestep in milliseconds
    pub tick_interval_ms: f32,
    /// Distance the head travels per tick; one grid cell
    pub move_distance: f32,
    /// Reject direction requests that reverse the current heading
    pub reversal_guard: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 2.5,
            board_height: 2.5,
            tick_interval_ms: 300.0,
            move_distance: 0.1,
            reversal_guard: true,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom board size
    pub fn new(board_width: f32, board_height: f32) -> Self {
        Self {
            board_width,
            board_height,
            ..Default::default()
        }
    }
}
