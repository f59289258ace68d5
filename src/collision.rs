use crate::entity::{Apple, Bomb};
use crate::snake::{Position, Snake};

/// What the head ran into on a tick. At most one applies.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    SelfBite,
    Bomb,
    Apple,
}

/// Classifies the snake's next head cell, checked in priority order:
/// own body, then bombs, then the apple.
///
/// `snake` is the body before the move; `head` is where it is about to go.
#[must_use]
pub fn detect(snake: &Snake, head: Position, bombs: &[Bomb], apple: &Apple) -> Option<Collision> {
    if snake.bites_body_at(head) {
        return Some(Collision::SelfBite);
    }

    if bombs.iter().any(|bomb| bomb.position() == head) {
        return Some(Collision::Bomb);
    }

    apple.is_at(head).then_some(Collision::Apple)
}

#[cfg(test)]
mod tests {
    use crate::entity::{Apple, Bomb};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{Collision, detect};

    fn curled_snake() -> Snake {
        // 2x3 loop; the head at (2,2) moving left re-enters the tail cell.
        Snake::from_segments(
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 1 },
                Position { x: 1, y: 1 },
                Position { x: 0, y: 1 },
                Position { x: 0, y: 2 },
                Position { x: 1, y: 2 },
            ],
            Direction::Left,
        )
    }

    #[test]
    fn open_cell_is_no_collision() {
        let snake = Snake::new(Position { x: 0, y: 0 }, Direction::Right);
        assert_eq!(
            detect(&snake, Position { x: 1, y: 0 }, &[], &Apple::default()),
            None
        );
    }

    #[test]
    fn self_bite_outranks_bomb_and_apple() {
        let snake = curled_snake();
        let head = Position { x: 1, y: 2 };
        let bombs = [Bomb::at(head)];

        assert_eq!(
            detect(&snake, head, &bombs, &Apple::at(head)),
            Some(Collision::SelfBite)
        );
    }

    #[test]
    fn bomb_outranks_apple() {
        let snake = Snake::new(Position { x: 0, y: 0 }, Direction::Right);
        let head = Position { x: 1, y: 0 };

        assert_eq!(
            detect(&snake, head, &[Bomb::at(head)], &Apple::at(head)),
            Some(Collision::Bomb)
        );
    }

    #[test]
    fn apple_detected_when_nothing_else_applies() {
        let snake = Snake::new(Position { x: 0, y: 0 }, Direction::Right);
        let head = Position { x: 1, y: 0 };
        let bombs = [Bomb::at(Position { x: 4, y: 4 })];

        assert_eq!(
            detect(&snake, head, &bombs, &Apple::at(head)),
            Some(Collision::Apple)
        );
    }
}
