use std::time::Duration;

use super::types::{FieldSize, Point};

pub const GRID_SIZE: usize = 20;
pub const TICK_INTERVAL: Duration = Duration::from_millis(150);
pub const START_POSITION: Point = Point { x: 10, y: 10 };
pub const FOOD_REWARD: u32 = 10;

/// The fixed rules every session plays by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeSessionSettings {
    pub field_size: FieldSize,
    pub tick_interval: Duration,
}

impl Default for SnakeSessionSettings {
    fn default() -> Self {
        Self {
            field_size: FieldSize::square(GRID_SIZE),
            tick_interval: TICK_INTERVAL,
        }
    }
}

impl SnakeSessionSettings {
    /// Where the single segment sits at the start of every game.
    pub fn start_position(&self) -> Point {
        START_POSITION
    }
}
