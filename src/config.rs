/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Axis-aligned rectangle in logical screen pixels.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Maps the continuous screen space onto the discrete cell grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridGeometry {
    pub screen_width: u32,
    pub screen_height: u32,
    pub cell_size: u32,
}

impl GridGeometry {
    /// Grid size implied by the screen and cell dimensions.
    #[must_use]
    pub fn grid(self) -> GridSize {
        GridSize {
            width: axis_cells(self.screen_width, self.cell_size),
            height: axis_cells(self.screen_height, self.cell_size),
        }
    }

    /// Pixel origin and extent of the cell at `(col, row)`.
    #[must_use]
    pub fn cell_rect(self, col: u16, row: u16) -> PixelRect {
        PixelRect {
            x: u32::from(col) * self.cell_size,
            y: u32::from(row) * self.cell_size,
            width: self.cell_size,
            height: self.cell_size,
        }
    }
}

fn axis_cells(pixels: u32, cell_size: u32) -> u16 {
    u16::try_from(pixels / cell_size.max(1)).unwrap_or(u16::MAX)
}

/// Logical screen width in pixels.
pub const SCREEN_WIDTH: u32 = 640;

/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: u32 = 480;

/// Edge length of one grid cell in pixels.
pub const CELL_SIZE: u32 = 20;

pub const GEOMETRY: GridGeometry = GridGeometry {
    screen_width: SCREEN_WIDTH,
    screen_height: SCREEN_HEIGHT,
    cell_size: CELL_SIZE,
};

/// 32 × 24 cells.
pub const DEFAULT_GRID: GridSize = GridSize {
    width: (SCREEN_WIDTH / CELL_SIZE) as u16,
    height: (SCREEN_HEIGHT / CELL_SIZE) as u16,
};

/// Tick interval at the start of every session.
pub const INITIAL_TICK_INTERVAL_MS: u64 = 100;

/// Amount the tick interval shrinks on every speed-up.
pub const TICK_INTERVAL_STEP_MS: u64 = 10;

/// Speed-ups stop here so the frame rate stays finite.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// A bomb is added and the game speeds up every this many apples.
pub const APPLES_PER_BOMB: u32 = 5;

/// Body segments nearest the head that never count as a self-collision.
pub const SELF_COLLISION_EXEMPT_SEGMENTS: usize = 4;

/// How long the game-over message stays on screen before the reset.
pub const GAME_OVER_DELAY_MS: u64 = 2000;

/// Message drawn over the playfield on game over.
pub const GAME_OVER_MESSAGE: &str = "Game over here! Try again";

/// Window (terminal) title.
pub const WINDOW_TITLE: &str = "Snake";

/// Terminal columns used to draw one grid cell, keeping cells roughly square.
pub const TERMINAL_COLUMNS_PER_CELL: u16 = 2;
