use std::collections::{HashSet, VecDeque};

use super::types::Point;

/// Head-first body plus a set mirror for O(1) occupancy checks.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    pub fn new(start_pos: Point) -> Self {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();
        body.push_back(start_pos);
        body_set.insert(start_pos);
        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    /// Moves the head to `next_head`. The tail is kept when `grow` is set.
    pub fn advance(&mut self, next_head: Point, grow: bool) {
        self.body.push_front(next_head);
        self.body_set.insert(next_head);

        if !grow {
            let tail = self.body.pop_back().expect("Snake body should never be empty");
            self.body_set.remove(&tail);
        }
    }

    #[cfg(test)]
    pub(crate) fn from_segments(segments: &[Point]) -> Self {
        Self {
            body: segments.iter().copied().collect(),
            body_set: segments.iter().copied().collect(),
        }
    }
}
