use tracing::debug;

use crate::games::SessionRng;
use super::settings::{FOOD_REWARD, SnakeSessionSettings};
use super::snake::Snake;
use super::types::{Direction, FieldSize, GameEndReason, Point};

/// Random draws tried before falling back to scanning the free cells.
const FOOD_SAMPLE_ATTEMPTS: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    Moved,
    AteFood,
    Ended(GameEndReason),
}

#[derive(Clone, Debug)]
pub struct SnakeGameState {
    snake: Snake,
    food: Point,
    direction: Direction,
    pending_direction: Option<Direction>,
    score: u32,
    field_size: FieldSize,
    end_reason: Option<GameEndReason>,
}

impl SnakeGameState {
    pub fn new(settings: &SnakeSessionSettings, rng: &mut SessionRng) -> Self {
        let snake = Snake::new(settings.start_position());
        let food = Self::spawn_food(&snake, &settings.field_size, rng)
            .expect("A fresh field always has a free cell");

        Self {
            snake,
            food,
            direction: Direction::Right,
            pending_direction: None,
            score: 0,
            field_size: settings.field_size,
            end_reason: None,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn field_size(&self) -> FieldSize {
        self.field_size
    }

    pub fn end_reason(&self) -> Option<GameEndReason> {
        self.end_reason
    }

    /// Queues `direction` for the next tick. Reversals are judged against the
    /// active direction, so two quick presses cannot fold the snake onto itself.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.end_reason.is_some() || direction.is_opposite(&self.direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    pub fn update(&mut self, rng: &mut SessionRng) -> StepResult {
        if let Some(reason) = self.end_reason {
            return StepResult::Ended(reason);
        }

        if let Some(new_direction) = self.pending_direction.take() {
            self.direction = new_direction;
        }

        let next_head = match self.next_head_position() {
            Ok(point) => point,
            Err(reason) => return self.end(reason),
        };

        if next_head == self.food {
            self.snake.advance(next_head, true);
            self.score += FOOD_REWARD;
            debug!(
                "ate food at ({}, {}). Score: {}",
                next_head.x, next_head.y, self.score
            );

            match Self::spawn_food(&self.snake, &self.field_size, rng) {
                Some(food) => {
                    self.food = food;
                    StepResult::AteFood
                }
                None => self.end(GameEndReason::BoardFilled),
            }
        } else {
            self.snake.advance(next_head, false);
            StepResult::Moved
        }
    }

    fn end(&mut self, reason: GameEndReason) -> StepResult {
        self.end_reason = Some(reason);
        debug!("game ended: {:?}, score {}", reason, self.score);
        StepResult::Ended(reason)
    }

    fn next_head_position(&self) -> Result<Point, GameEndReason> {
        let next_head = self
            .field_size
            .step(self.snake.head(), self.direction)
            .ok_or(GameEndReason::WallCollision)?;

        // The tail still occupies its cell during this tick, so it counts.
        if self.snake.contains(&next_head) {
            return Err(GameEndReason::SelfCollision);
        }

        Ok(next_head)
    }

    fn spawn_food(snake: &Snake, field_size: &FieldSize, rng: &mut SessionRng) -> Option<Point> {
        for _ in 0..FOOD_SAMPLE_ATTEMPTS {
            let pos = Point::new(
                rng.random_range(0..field_size.width),
                rng.random_range(0..field_size.height),
            );
            if !snake.contains(&pos) {
                return Some(pos);
            }
        }

        let free_cells: Vec<Point> = (0..field_size.height)
            .flat_map(|y| (0..field_size.width).map(move |x| Point::new(x, y)))
            .filter(|p| !snake.contains(p))
            .collect();

        if free_cells.is_empty() {
            return None;
        }
        Some(free_cells[rng.random_range(0..free_cells.len())])
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, segments: &[Point]) {
        self.snake = Snake::from_segments(segments);
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Point) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_active_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.pending_direction = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn create_state(seed: u64) -> (SnakeGameState, SessionRng) {
        let mut rng = SessionRng::new(seed);
        let state = SnakeGameState::new(&SnakeSessionSettings::default(), &mut rng);
        (state, rng)
    }

    fn body(state: &SnakeGameState) -> Vec<Point> {
        state.snake().segments().copied().collect()
    }

    #[test]
    fn test_new_state() {
        let (state, _) = create_state(1);
        assert_eq!(body(&state), vec![Point::new(10, 10)]);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.score(), 0);
        assert_ne!(state.food(), Point::new(10, 10));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let (mut state, mut rng) = create_state(2);
        state.set_food(Point::new(11, 10));

        let result = state.update(&mut rng);

        assert_eq!(result, StepResult::AteFood);
        assert_eq!(body(&state), vec![Point::new(11, 10), Point::new(10, 10)]);
        assert_eq!(state.score(), 10);
        assert_ne!(state.food(), Point::new(11, 10));
        assert_ne!(state.food(), Point::new(10, 10));
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let (mut state, mut rng) = create_state(3);
        state.set_snake(&[Point::new(5, 5), Point::new(4, 5), Point::new(3, 5)]);
        state.set_food(Point::new(0, 0));

        assert_eq!(state.update(&mut rng), StepResult::Moved);
        assert_eq!(
            body(&state),
            vec![Point::new(6, 5), Point::new(5, 5), Point::new(4, 5)]
        );
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_wall_collision_leaves_body_untouched() {
        let (mut state, mut rng) = create_state(4);
        state.set_snake(&[Point::new(0, 5)]);
        state.set_active_direction(Direction::Left);

        let result = state.update(&mut rng);

        assert_eq!(result, StepResult::Ended(GameEndReason::WallCollision));
        assert_eq!(body(&state), vec![Point::new(0, 5)]);
        assert_eq!(state.end_reason(), Some(GameEndReason::WallCollision));
    }

    #[test]
    fn test_self_collision() {
        let (mut state, mut rng) = create_state(5);
        // Head at (5,5) moving up into (5,4), which is part of the body.
        state.set_snake(&[
            Point::new(5, 5),
            Point::new(6, 5),
            Point::new(6, 4),
            Point::new(5, 4),
            Point::new(4, 4),
        ]);
        state.set_active_direction(Direction::Up);
        state.set_food(Point::new(0, 0));
        let before = body(&state);

        let result = state.update(&mut rng);

        assert_eq!(result, StepResult::Ended(GameEndReason::SelfCollision));
        assert_eq!(body(&state), before);
    }

    #[test]
    fn test_moving_into_tail_cell_is_a_collision() {
        let (mut state, mut rng) = create_state(6);
        state.set_snake(&[
            Point::new(5, 5),
            Point::new(6, 5),
            Point::new(6, 4),
            Point::new(5, 4),
        ]);
        state.set_active_direction(Direction::Up);
        state.set_food(Point::new(0, 0));

        assert_eq!(
            state.update(&mut rng),
            StepResult::Ended(GameEndReason::SelfCollision)
        );
    }

    #[test]
    fn test_reversal_is_ignored() {
        let (mut state, mut rng) = create_state(7);
        state.set_food(Point::new(0, 0));

        assert!(!state.set_direction(Direction::Left));
        assert_eq!(state.pending_direction(), None);

        state.update(&mut rng);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.snake().head(), Point::new(11, 10));
    }

    #[test]
    fn test_reversal_checked_against_active_direction() {
        let (mut state, mut rng) = create_state(8);
        state.set_food(Point::new(0, 0));

        assert!(state.set_direction(Direction::Up));
        // Still moving right, so left remains a reversal even with Up pending.
        assert!(!state.set_direction(Direction::Left));
        assert!(state.set_direction(Direction::Down));
        assert_eq!(state.pending_direction(), Some(Direction::Down));

        state.update(&mut rng);
        assert_eq!(state.direction(), Direction::Down);
        assert_eq!(state.snake().head(), Point::new(10, 11));
    }

    #[test]
    fn test_no_updates_after_end() {
        let (mut state, mut rng) = create_state(9);
        state.set_snake(&[Point::new(19, 3)]);

        assert_eq!(
            state.update(&mut rng),
            StepResult::Ended(GameEndReason::WallCollision)
        );
        assert!(!state.set_direction(Direction::Up));
        assert_eq!(
            state.update(&mut rng),
            StepResult::Ended(GameEndReason::WallCollision)
        );
        assert_eq!(body(&state), vec![Point::new(19, 3)]);
    }

    #[test]
    fn test_spawn_food_finds_last_free_cell() {
        let field = FieldSize::square(10);
        let occupied: Vec<Point> = (0..10)
            .flat_map(|y| (0..10).map(move |x| Point::new(x, y)))
            .filter(|p| *p != Point::new(7, 3))
            .collect();
        let snake = Snake::from_segments(&occupied);
        let mut rng = SessionRng::new(10);

        assert_eq!(
            SnakeGameState::spawn_food(&snake, &field, &mut rng),
            Some(Point::new(7, 3))
        );
    }

    #[test]
    fn test_spawn_food_on_full_field() {
        let field = FieldSize::square(10);
        let occupied: Vec<Point> = (0..10)
            .flat_map(|y| (0..10).map(move |x| Point::new(x, y)))
            .collect();
        let snake = Snake::from_segments(&occupied);
        let mut rng = SessionRng::new(11);

        assert_eq!(SnakeGameState::spawn_food(&snake, &field, &mut rng), None);
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let directions = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

        for seed in 0..20u64 {
            let (mut state, mut rng) = create_state(seed);
            let mut eaten = 0u32;

            for step in 0..400usize {
                state.set_direction(directions[(step / 3 + seed as usize) % 4]);
                // Steer toward food often enough to exercise growth.
                let head = state.snake().head();
                let food = state.food();
                if food.x > head.x {
                    state.set_direction(Direction::Right);
                } else if food.x < head.x {
                    state.set_direction(Direction::Left);
                } else if food.y > head.y {
                    state.set_direction(Direction::Down);
                } else {
                    state.set_direction(Direction::Up);
                }

                match state.update(&mut rng) {
                    StepResult::Ended(_) => break,
                    StepResult::AteFood => eaten += 1,
                    StepResult::Moved => {}
                }

                let cells: HashSet<Point> = state.snake().segments().copied().collect();
                assert_eq!(cells.len(), state.snake().len());
                assert!(!state.snake().contains(&state.food()));
                assert_eq!(state.score(), eaten * FOOD_REWARD);
                assert_eq!(state.snake().len() as u32, eaten + 1);
            }
        }
    }
}
