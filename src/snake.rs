use std::collections::VecDeque;

use crate::config::{GridSize, SELF_COLLISION_EXEMPT_SEGMENTS};
use crate::input::{Direction, direction_change_is_valid};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// One step in `direction`, wrapping around the grid edges.
    #[must_use]
    pub fn stepped(self, direction: Direction, bounds: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
        .wrapped(bounds)
    }
}

/// Cell every session starts from: the middle of the grid.
#[must_use]
pub fn start_position(bounds: GridSize) -> Position {
    Position {
        x: i32::from(bounds.width / 2),
        y: i32::from(bounds.height / 2),
    }
}

/// Mutable snake state. The head is the front of `body`.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    /// Direction of the last completed move; turns are judged against it.
    moved_direction: Direction,
    pending_growth: bool,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self::from_segments(vec![start], direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// An empty list is treated as a single segment at the origin so the
    /// snake always has a head.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        let mut body = VecDeque::from(segments);
        if body.is_empty() {
            body.push_back(Position { x: 0, y: 0 });
        }

        Self {
            body,
            direction,
            moved_direction: direction,
            pending_growth: false,
        }
    }

    /// Keeps the tail on the next advance.
    pub fn grow_next(&mut self) {
        self.pending_growth = true;
    }

    /// Whether the next advance keeps the tail.
    #[must_use]
    pub fn has_pending_growth(&self) -> bool {
        self.pending_growth
    }

    /// Head cell the next advance will move into.
    #[must_use]
    pub fn next_head(&self, bounds: GridSize) -> Position {
        self.head().stepped(self.direction, bounds)
    }

    /// Moves one cell in the current direction and returns the new head.
    ///
    /// The tail is dropped unless growth was pending, in which case the
    /// length increases by one and the flag is cleared. Collisions are left
    /// to the caller.
    pub fn advance(&mut self, bounds: GridSize) -> Position {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        let next_head = self.next_head(bounds);
        debug_assert!(next_head.is_within_bounds(bounds));
        self.body.push_front(next_head);
        self.moved_direction = self.direction;

        if self.pending_growth {
            self.pending_growth = false;
        } else {
            let _ = self.body.pop_back();
        }

        next_head
    }

    /// Turns the snake unless `direction` would reverse the last move.
    ///
    /// Several turns may arrive between two moves; each one is checked
    /// against the direction actually travelled, so two quick turns can
    /// never fold the head back onto the neck.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.moved_direction, direction) {
            self.direction = direction;
        }
    }

    /// Shrinks back to a single right-facing cell at `start`.
    pub fn reset(&mut self, start: Position) {
        self.body.clear();
        self.body.push_back(start);
        self.direction = Direction::Right;
        self.moved_direction = Direction::Right;
        self.pending_growth = false;
    }

    /// Returns true when moving into `cell` would bite the body.
    ///
    /// Only segments from index [`SELF_COLLISION_EXEMPT_SEGMENTS`] onward
    /// count. The segments nearest the head are exempt as a fixed policy,
    /// whether or not the head could reach them. The tail counts even
    /// though it is about to move.
    #[must_use]
    pub fn bites_body_at(&self, cell: Position) -> bool {
        self.body
            .iter()
            .skip(SELF_COLLISION_EXEMPT_SEGMENTS)
            .any(|segment| *segment == cell)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // The body is never empty: every constructor and `reset` leave a head.
        self.body[0]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake, start_position};

    const BOUNDS: GridSize = GridSize {
        width: 32,
        height: 24,
    };

    #[test]
    fn position_wrapping_keeps_coordinates_inside_bounds() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        let wrapped_left = Position { x: -1, y: 3 }.wrapped(bounds);
        let wrapped_bottom = Position { x: 4, y: 8 }.wrapped(bounds);

        assert_eq!(wrapped_left, Position { x: 9, y: 3 });
        assert_eq!(wrapped_bottom, Position { x: 4, y: 0 });
    }

    #[test]
    fn start_position_is_grid_centre() {
        assert_eq!(start_position(BOUNDS), Position { x: 16, y: 12 });
    }

    #[test]
    fn snake_moves_one_cell_per_advance() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        let head = snake.advance(BOUNDS);

        assert_eq!(head, Position { x: 6, y: 5 });
        assert_eq!(snake.head(), head);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn growth_keeps_previous_tail_once() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right);

        snake.grow_next();
        snake.advance(BOUNDS);
        assert_eq!(snake.len(), 2);
        assert!(!snake.has_pending_growth());

        snake.advance(BOUNDS);
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn advance_wraps_off_every_edge() {
        let cases = [
            (Position { x: 31, y: 4 }, Direction::Right, Position { x: 0, y: 4 }),
            (Position { x: 0, y: 4 }, Direction::Left, Position { x: 31, y: 4 }),
            (Position { x: 7, y: 0 }, Direction::Up, Position { x: 7, y: 23 }),
            (Position { x: 7, y: 23 }, Direction::Down, Position { x: 7, y: 0 }),
        ];

        for (start, direction, expected) in cases {
            let mut snake = Snake::new(start, direction);
            let head = snake.advance(BOUNDS);
            assert_eq!(head, expected);
            assert!(head.is_within_bounds(BOUNDS));
        }
    }

    #[test]
    fn set_direction_rejects_reverse() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Up);

        snake.set_direction(Direction::Down);
        assert_eq!(snake.direction(), Direction::Up);

        snake.advance(BOUNDS);
        assert_eq!(snake.head(), Position { x: 5, y: 4 });
    }

    #[test]
    fn set_direction_applies_turns_immediately() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Up);

        snake.set_direction(Direction::Left);
        assert_eq!(snake.direction(), Direction::Left);

        snake.advance(BOUNDS);
        snake.set_direction(Direction::Down);
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn two_turns_between_moves_cannot_reverse() {
        let mut snake = Snake::from_segments(
            (10..15).map(|y| Position { x: 10, y }).collect(),
            Direction::Up,
        );

        snake.set_direction(Direction::Left);
        snake.set_direction(Direction::Down);
        assert_eq!(snake.direction(), Direction::Left);

        snake.advance(BOUNDS);
        assert_eq!(snake.head(), Position { x: 9, y: 10 });

        let distinct: HashSet<Position> = snake.segments().copied().collect();
        assert_eq!(distinct.len(), snake.len());
    }

    #[test]
    fn reset_truncates_to_single_right_facing_cell() {
        let mut snake = Snake::from_segments(
            vec![
                Position { x: 3, y: 3 },
                Position { x: 3, y: 4 },
                Position { x: 3, y: 5 },
            ],
            Direction::Up,
        );
        snake.grow_next();

        snake.reset(Position { x: 16, y: 12 });

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position { x: 16, y: 12 });
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.has_pending_growth());
    }

    #[test]
    fn segments_near_head_are_exempt_from_bites() {
        let snake = Snake::from_segments(
            (0..6).map(|x| Position { x: 10 - x, y: 0 }).collect(),
            Direction::Right,
        );

        for x in 7..=10 {
            assert!(!snake.bites_body_at(Position { x, y: 0 }));
        }
        assert!(snake.bites_body_at(Position { x: 6, y: 0 }));
        assert!(snake.bites_body_at(Position { x: 5, y: 0 }));
    }

    #[test]
    fn empty_segment_list_still_has_a_head() {
        let snake = Snake::from_segments(Vec::new(), Direction::Left);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position { x: 0, y: 0 });
    }
}
