use serde::Serialize;
use tracing::info;

use crate::games::SessionRng;
use crate::identifiers::{PlayerName, ValidationError};
use super::game_state::{SnakeGameState, StepResult};
use super::settings::SnakeSessionSettings;
use super::types::{Direction, GameEndReason, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    NotStarted,
    Running,
    Over,
}

/// Handed out once per transition into [`GamePhase::Over`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverReport {
    pub player_name: PlayerName,
    pub score: u32,
    pub reason: GameEndReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing advanced because the game is not running.
    Idle,
    Advanced,
    AteFood,
    GameOver(GameOverReport),
}

/// Everything the page needs to draw one frame. `snake[0]` is the head.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub player_name: Option<PlayerName>,
    pub score: u32,
    pub direction: Direction,
    pub snake: Vec<Point>,
    pub food: Point,
    pub field_width: usize,
    pub field_height: usize,
    pub end_reason: Option<GameEndReason>,
}

/// One player's game: lifecycle, name and grid state behind the only methods
/// that may mutate them.
#[derive(Debug)]
pub struct GameSession {
    settings: SnakeSessionSettings,
    state: SnakeGameState,
    phase: GamePhase,
    player_name: Option<PlayerName>,
    rng: SessionRng,
}

impl GameSession {
    pub fn new(settings: SnakeSessionSettings, mut rng: SessionRng) -> Self {
        let state = SnakeGameState::new(&settings, &mut rng);
        Self {
            settings,
            state,
            phase: GamePhase::NotStarted,
            player_name: None,
            rng,
        }
    }

    /// A session whose player is already known; the first turn starts it.
    pub fn with_player_name(
        settings: SnakeSessionSettings,
        rng: SessionRng,
        player_name: PlayerName,
    ) -> Self {
        let mut session = Self::new(settings, rng);
        session.player_name = Some(player_name);
        session
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn player_name(&self) -> Option<&PlayerName> {
        self.player_name.as_ref()
    }

    pub fn state(&self) -> &SnakeGameState {
        &self.state
    }

    pub fn settings(&self) -> &SnakeSessionSettings {
        &self.settings
    }

    /// Stores the name and, if the game has not started yet, starts it.
    /// An invalid name leaves the session untouched.
    pub fn submit_name(&mut self, raw_name: &str) -> Result<bool, ValidationError> {
        let name = PlayerName::parse(raw_name)?;
        self.player_name = Some(name);

        if self.phase == GamePhase::NotStarted {
            self.start();
            return Ok(true);
        }
        Ok(false)
    }

    /// Returns whether the turn was accepted.
    pub fn steer(&mut self, direction: Direction) -> bool {
        match self.phase {
            GamePhase::NotStarted => {
                if self.player_name.is_none() {
                    return false;
                }
                self.start();
                self.state.set_direction(direction);
                true
            }
            GamePhase::Running => self.state.set_direction(direction),
            GamePhase::Over => false,
        }
    }

    /// Only a finished game can be restarted.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::Over {
            return false;
        }
        self.state = SnakeGameState::new(&self.settings, &mut self.rng);
        self.start();
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Running {
            return TickOutcome::Idle;
        }

        match self.state.update(&mut self.rng) {
            StepResult::Moved => TickOutcome::Advanced,
            StepResult::AteFood => TickOutcome::AteFood,
            StepResult::Ended(reason) => {
                self.phase = GamePhase::Over;
                let player_name = self
                    .player_name
                    .clone()
                    .expect("A running game always has a player name");
                info!(
                    "game over for {}: {:?}, score {}",
                    player_name,
                    reason,
                    self.state.score()
                );
                TickOutcome::GameOver(GameOverReport {
                    player_name,
                    score: self.state.score(),
                    reason,
                })
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let field_size = self.state.field_size();
        SessionSnapshot {
            phase: self.phase,
            player_name: self.player_name.clone(),
            score: self.state.score(),
            direction: self.state.direction(),
            snake: self.state.snake().segments().copied().collect(),
            food: self.state.food(),
            field_width: field_size.width,
            field_height: field_size.height,
            end_reason: self.state.end_reason(),
        }
    }

    fn start(&mut self) {
        self.phase = GamePhase::Running;
        if let Some(name) = &self.player_name {
            info!("game started for {} (seed {})", name, self.rng.seed());
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut SnakeGameState {
        &mut self.state
    }
}
