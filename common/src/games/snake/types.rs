use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEndReason {
    WallCollision,
    SelfCollision,
    BoardFilled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSize {
    pub width: usize,
    pub height: usize,
}

impl FieldSize {
    pub fn square(size: usize) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// One step from `from` in `direction`, or `None` when that leaves the field.
    pub fn step(&self, from: Point, direction: Direction) -> Option<Point> {
        match direction {
            Direction::Up => from.y.checked_sub(1).map(|y| Point::new(from.x, y)),
            Direction::Down => (from.y + 1 < self.height).then(|| Point::new(from.x, from.y + 1)),
            Direction::Left => from.x.checked_sub(1).map(|x| Point::new(x, from.y)),
            Direction::Right => (from.x + 1 < self.width).then(|| Point::new(from.x + 1, from.y)),
        }
    }
}
