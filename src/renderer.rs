use std::io;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::config::{GAME_OVER_MESSAGE, GridGeometry, PixelRect, TERMINAL_COLUMNS_PER_CELL};
use crate::entity::EntityKind;
use crate::game::GameState;
use crate::snake::Position;
use crate::theme::Theme;

/// Where a line of text goes on the screen.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TextPlacement {
    /// Middle of the playfield.
    Center,
    /// Status line under the playfield.
    Hud,
}

/// Drawing capabilities the game needs from a display.
pub trait Canvas {
    fn fill_background(&mut self, color: Color);
    fn fill_rect(&mut self, rect: PixelRect, color: Color);
    fn draw_text(&mut self, text: &str, placement: TextPlacement, color: Color);
}

/// A display that can show one finished frame of the game.
pub trait Screen {
    fn present(
        &mut self,
        state: &GameState,
        theme: &Theme,
        geometry: GridGeometry,
    ) -> io::Result<()>;
}

/// Terminal size needed to show the whole board plus the status line.
#[must_use]
pub fn required_terminal_size(geometry: GridGeometry) -> (u16, u16) {
    let grid = geometry.grid();
    (
        grid.width.saturating_mul(TERMINAL_COLUMNS_PER_CELL),
        grid.height.saturating_add(1),
    )
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme, geometry: GridGeometry) {
    let area = frame.area();
    let mut canvas = TerminalCanvas::new(frame.buffer_mut(), area, geometry);

    draw_scene(&mut canvas, state, theme, geometry);
    if state.death_cause().is_some() {
        draw_game_over(&mut canvas, theme);
    }
}

/// Paints background, snake, bombs, apple and the status line, in that order.
pub fn draw_scene<C: Canvas + ?Sized>(
    canvas: &mut C,
    state: &GameState,
    theme: &Theme,
    geometry: GridGeometry,
) {
    canvas.fill_background(theme.background);

    draw_entity(
        canvas,
        EntityKind::Snake,
        state.snake.segments().copied(),
        theme,
        geometry,
    );
    draw_entity(
        canvas,
        EntityKind::Bomb,
        state.bombs.iter().map(|bomb| bomb.position()),
        theme,
        geometry,
    );
    draw_entity(canvas, EntityKind::Apple, state.apple.position, theme, geometry);

    canvas.draw_text(&hud_line(state), TextPlacement::Hud, theme.hud);
}

/// Overlays the game-over message.
pub fn draw_game_over<C: Canvas + ?Sized>(canvas: &mut C, theme: &Theme) {
    canvas.draw_text(GAME_OVER_MESSAGE, TextPlacement::Center, theme.text);
}

/// Fills one grid cell per position in the color of `kind`.
pub fn draw_entity<C, I>(
    canvas: &mut C,
    kind: EntityKind,
    cells: I,
    theme: &Theme,
    geometry: GridGeometry,
) where
    C: Canvas + ?Sized,
    I: IntoIterator<Item = Position>,
{
    let color = entity_color(kind, theme);
    for cell in cells {
        let (Ok(col), Ok(row)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            continue;
        };
        canvas.fill_rect(geometry.cell_rect(col, row), color);
    }
}

#[must_use]
pub fn entity_color(kind: EntityKind, theme: &Theme) -> Color {
    match kind {
        EntityKind::Snake => theme.snake,
        EntityKind::Apple => theme.apple,
        EntityKind::Bomb => theme.bomb,
    }
}

fn hud_line(state: &GameState) -> String {
    format!(
        "Score: {}  Bombs: {}  Tick: {}ms  [Esc] Quit",
        state.score,
        state.bombs.len(),
        state.tick_interval_ms
    )
}

/// [`Canvas`] over a ratatui buffer. Each grid cell becomes
/// [`TERMINAL_COLUMNS_PER_CELL`] columns by one row.
pub struct TerminalCanvas<'a> {
    buffer: &'a mut Buffer,
    play_area: Rect,
    hud_area: Rect,
    geometry: GridGeometry,
}

impl<'a> TerminalCanvas<'a> {
    /// Lays the board out centred horizontally at the top of `area`.
    pub fn new(buffer: &'a mut Buffer, area: Rect, geometry: GridGeometry) -> Self {
        let (width, height) = required_terminal_size(geometry);
        let width = width.min(area.width);
        let board_height = height.saturating_sub(1).min(area.height);
        let x = area.x + (area.width - width) / 2;

        let play_area = Rect::new(x, area.y, width, board_height);
        let hud_area = Rect::new(
            x,
            area.y + board_height,
            width,
            u16::from(area.height > board_height),
        );

        Self {
            buffer,
            play_area,
            hud_area,
            geometry,
        }
    }

    fn paint(&mut self, area: Rect, color: Color) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ").set_bg(color);
                }
            }
        }
    }

    fn pixel_rect_to_terminal(&self, rect: PixelRect) -> Rect {
        let cell_size = self.geometry.cell_size.max(1);
        let columns = u32::from(TERMINAL_COLUMNS_PER_CELL);
        let to_u16 = |value: u32| u16::try_from(value).unwrap_or(u16::MAX);

        let left = to_u16(rect.x / cell_size * columns);
        let right = to_u16((rect.x + rect.width).div_ceil(cell_size) * columns);
        let top = to_u16(rect.y / cell_size);
        let bottom = to_u16((rect.y + rect.height).div_ceil(cell_size));

        Rect::new(
            self.play_area.x.saturating_add(left),
            self.play_area.y.saturating_add(top),
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        )
        .intersection(self.play_area)
    }
}

impl Canvas for TerminalCanvas<'_> {
    fn fill_background(&mut self, color: Color) {
        let area = self.play_area;
        self.paint(area, color);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let area = self.pixel_rect_to_terminal(rect);
        self.paint(area, color);
    }

    fn draw_text(&mut self, text: &str, placement: TextPlacement, color: Color) {
        let (area, style) = match placement {
            TextPlacement::Center => (
                self.play_area,
                Style::new().fg(color).add_modifier(Modifier::BOLD),
            ),
            TextPlacement::Hud => (self.hud_area, Style::new().fg(color)),
        };
        if area.is_empty() {
            return;
        }

        let text_width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        let x = area.x + area.width.saturating_sub(text_width) / 2;
        let y = area.y + area.height / 2;
        self.buffer
            .set_stringn(x, y, text, usize::from(area.width), style);
    }
}
