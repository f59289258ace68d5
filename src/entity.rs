use std::collections::HashSet;

use rand::Rng;

use crate::config::GridSize;
use crate::snake::Position;
use crate::spawn::random_free_cell;

/// Drawable entity classes. The set is closed, so rendering dispatches on it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EntityKind {
    Snake,
    Apple,
    Bomb,
}

/// The single piece of food on the board.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Apple {
    /// `None` until the first placement.
    pub position: Option<Position>,
}

impl Apple {
    /// Creates an apple already placed at `position`.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Moves the apple to a random cell outside `occupied`.
    ///
    /// Leaves the apple absent when the board has no free cell.
    pub fn randomize_position<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        occupied: &HashSet<Position>,
    ) -> Option<Position> {
        self.position = random_free_cell(rng, bounds, occupied);
        self.position
    }

    #[must_use]
    pub fn is_at(&self, cell: Position) -> bool {
        self.position == Some(cell)
    }
}

/// A permanent hazard cell. Never moves once placed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Bomb {
    position: Position,
}

impl Bomb {
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Places a bomb on a random cell outside `occupied`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        occupied: &HashSet<Position>,
    ) -> Option<Self> {
        random_free_cell(rng, bounds, occupied).map(Self::at)
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }
}
