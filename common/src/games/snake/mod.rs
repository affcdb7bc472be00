mod game_state;
mod session;
mod settings;
mod snake;
mod types;

pub use game_state::{SnakeGameState, StepResult};
pub use session::{GameOverReport, GamePhase, GameSession, SessionSnapshot, TickOutcome};
pub use settings::{FOOD_REWARD, GRID_SIZE, START_POSITION, SnakeSessionSettings, TICK_INTERVAL};
pub use snake::Snake;
pub use types::{Direction, FieldSize, GameEndReason, Point};
