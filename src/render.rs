use macroquad::prelude::*;

use crate::config::Settings;
use crate::figure::{Figure, FigureType, Square};
use crate::menu::{Menu, MenuItem};
use crate::play_area::{PlayArea, SessionState};

const BACKGROUND_COLOR: Color = Color::new(253.0 / 255.0, 208.0 / 255.0, 59.0 / 255.0, 1.0);
const GAME_AREA_COLOR: Color = Color::new(0.2, 0.2, 0.2, 1.0);
const LABEL_COLOR: Color = Color::new(0.1, 0.1, 0.1, 1.0);
const OVERLAY_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.6);

const FIELD_X: f32 = 20.0;
const FIELD_Y: f32 = 30.0;
const PANEL_GAP: f32 = 30.0;
const PANEL_WIDTH: f32 = 110.0;
const PREVIEW_BOX: f32 = 80.0;
const MIN_WINDOW_HEIGHT: f32 = 360.0;
const PAUSE_BUTTON: Rect = Rect { x: 3.0, y: 3.0, w: 22.0, h: 22.0 };

pub const MENU_SPACING: f32 = 40.0;
const MENU_FONT_SIZE: f32 = 30.0;
// Menu rows are hit from this far above the text baseline.
const MENU_ROW_ASCENT: f32 = 30.0;

/// Pixel positions of everything drawn around the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub square_size: f32,
    pub field_x: f32,
    pub field_y: f32,
    pub field_w: f32,
    pub field_h: f32,
    pub panel_x: f32,
    pub preview_y: f32,
    pub score_y: f32,
    pub lines_y: f32,
}

impl Layout {
    pub fn new(settings: &Settings) -> Self {
        Self::for_grid(settings.field_width, settings.field_height, settings.square_size)
    }

    /// Layout of a running session, sized by the field's actual grid.
    pub fn of(play_area: &PlayArea) -> Self {
        let field = play_area.field();
        Self::for_grid(field.width(), field.height(), play_area.settings().square_size)
    }

    pub fn for_grid(columns: usize, rows: usize, square_size: f32) -> Self {
        let field_w = columns as f32 * square_size;
        let field_h = rows as f32 * square_size;
        let panel_x = FIELD_X + field_w + PANEL_GAP;
        Layout {
            square_size,
            field_x: FIELD_X,
            field_y: FIELD_Y,
            field_w,
            field_h,
            panel_x,
            preview_y: FIELD_Y,
            score_y: FIELD_Y + PREVIEW_BOX + 60.0,
            lines_y: FIELD_Y + PREVIEW_BOX + 130.0,
        }
    }

    pub fn window_size(&self) -> (f32, f32) {
        let width = self.panel_x + PANEL_WIDTH;
        let height = (self.field_y + self.field_h + 20.0).max(MIN_WINDOW_HEIGHT);
        (width, height)
    }

    pub fn pause_button(&self) -> Rect {
        PAUSE_BUTTON
    }

    fn square_origin(&self, square: Square) -> (f32, f32) {
        (
            self.field_x + square.x as f32 * self.square_size,
            self.field_y + square.y as f32 * self.square_size,
        )
    }
}

/// Baseline of the first menu row.
pub fn menu_top() -> f32 {
    screen_height() / 2.0
}

/// Index of the menu row covering height `y`, if any.
pub fn menu_row_at(rows: usize, top: f32, y: f32) -> Option<usize> {
    let rel = y - (top - MENU_ROW_ASCENT);
    if rel < 0.0 {
        return None;
    }
    let row = (rel / MENU_SPACING) as usize;
    (row < rows).then_some(row)
}

pub fn draw(play_area: &PlayArea) {
    let layout = Layout::of(play_area);
    clear_background(BACKGROUND_COLOR);
    match play_area.state() {
        SessionState::Menu => {
            draw_title("TETRIS");
            draw_menu(play_area.main_menu(), menu_top());
        }
        SessionState::Playing => draw_game(play_area, &layout),
        SessionState::Paused => {
            draw_game(play_area, &layout);
            draw_rectangle(0.0, 0.0, screen_width(), screen_height(), OVERLAY_COLOR);
            draw_title("Paused");
            draw_menu(play_area.pause_menu(), menu_top());
            draw_pause_button(&layout, true);
        }
        SessionState::GameOver => {
            draw_game(play_area, &layout);
            let msg = "Game Over";
            let measure = measure_text(msg, None, 40, 1.0);
            let x = layout.field_x + (layout.field_w - measure.width) / 2.0;
            let y = layout.field_y + layout.field_h / 2.0;
            draw_text(msg, x, y, 40.0, RED);
            draw_text("Enter: menu", x, y + 30.0, 20.0, WHITE);
        }
    }
}

fn draw_game(play_area: &PlayArea, layout: &Layout) {
    let field = play_area.field();
    draw_rectangle(layout.field_x, layout.field_y, layout.field_w, layout.field_h, GAME_AREA_COLOR);
    draw_rectangle_lines(layout.field_x, layout.field_y, layout.field_w, layout.field_h, 2.0, BLACK);

    for (y, row) in field.rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if let Some(kind) = cell {
                let (px, py) = layout.square_origin(Square::new(x as i32, y as i32));
                draw_snes_block(px, py, layout.square_size, kind.color());
            }
        }
    }

    if !field.is_game_over() {
        let figure = field.figure();
        let color = figure.kind().color();
        let ghost_color = Color::new(color.r, color.g, color.b, 0.3);
        for square in field.ghost() {
            let (px, py) = layout.square_origin(square);
            draw_rectangle(px, py, layout.square_size, layout.square_size, ghost_color);
        }
        for &square in figure.squares() {
            let (px, py) = layout.square_origin(square);
            draw_snes_block(px, py, layout.square_size, color);
        }
    }

    draw_pause_button(layout, play_area.state() == SessionState::Paused);
    draw_text("Next", layout.panel_x, layout.preview_y - 8.0, 22.0, LABEL_COLOR);
    draw_rectangle(layout.panel_x, layout.preview_y, PREVIEW_BOX, PREVIEW_BOX, GAME_AREA_COLOR);
    draw_preview(field.next_kind(), layout.panel_x, layout.preview_y, layout.square_size * 0.8);

    let board = play_area.scoreboard();
    draw_text("Score", layout.panel_x, layout.score_y, 26.0, LABEL_COLOR);
    draw_text(&board.score().to_string(), layout.panel_x, layout.score_y + 25.0, 24.0, LABEL_COLOR);
    draw_text("Lines", layout.panel_x, layout.lines_y, 26.0, LABEL_COLOR);
    draw_text(&board.lines().to_string(), layout.panel_x, layout.lines_y + 25.0, 24.0, LABEL_COLOR);
}

fn draw_title(title: &str) {
    let measure = measure_text(title, None, 50, 1.0);
    draw_text(title, (screen_width() - measure.width) / 2.0, screen_height() / 3.0, 50.0, LABEL_COLOR);
}

fn draw_pause_button(layout: &Layout, paused: bool) {
    let button = layout.pause_button();
    draw_rectangle(button.x, button.y, button.w, button.h, GAME_AREA_COLOR);
    draw_rectangle_lines(button.x, button.y, button.w, button.h, 2.0, BLACK);
    let icon = if paused { ">" } else { "II" };
    draw_text(icon, button.x + 5.0, button.y + 16.0, 20.0, WHITE);
    draw_text("Esc", button.x + button.w + 4.0, button.y + 16.0, 18.0, LABEL_COLOR);
}

fn draw_menu<T: MenuItem>(menu: &Menu<T>, start_y: f32) {
    for (i, item) in menu.items().iter().enumerate() {
        let text = item.label();
        let measure = measure_text(text, None, MENU_FONT_SIZE as u16, 1.0);
        let color = if i == menu.selected_index() { WHITE } else { GRAY };
        let x = (screen_width() - measure.width) / 2.0;
        draw_text(text, x, start_y + i as f32 * MENU_SPACING, MENU_FONT_SIZE, color);
    }
}

fn draw_snes_block(x: f32, y: f32, size: f32, color: Color) {
    draw_rectangle(x, y, size, size, color);
    let highlight = Color::new(
        (color.r + 0.4).min(1.0),
        (color.g + 0.4).min(1.0),
        (color.b + 0.4).min(1.0),
        1.0,
    );
    let shadow = Color::new(color.r * 0.5, color.g * 0.5, color.b * 0.5, 1.0);
    let border = size * 0.15;
    draw_rectangle(x, y, size, border, highlight);
    draw_rectangle(x, y, border, size, highlight);
    draw_rectangle(x, y + size - border, size, border, shadow);
    draw_rectangle(x + size - border, y, border, size, shadow);
}

fn draw_preview(kind: FigureType, pos_x: f32, pos_y: f32, tile_size: f32) {
    let figure = Figure::generate(kind, 0);
    let squares = figure.squares();
    let min_x = squares.iter().map(|s| s.x).min().unwrap_or(0);
    let max_x = squares.iter().map(|s| s.x).max().unwrap_or(0);
    let min_y = squares.iter().map(|s| s.y).min().unwrap_or(0);
    let max_y = squares.iter().map(|s| s.y).max().unwrap_or(0);
    let shape_w = (max_x - min_x + 1) as f32 * tile_size;
    let shape_h = (max_y - min_y + 1) as f32 * tile_size;
    let offset_x = pos_x + (PREVIEW_BOX - shape_w) / 2.0;
    let offset_y = pos_y + (PREVIEW_BOX - shape_h) / 2.0;
    for square in squares {
        let draw_x = offset_x + (square.x - min_x) as f32 * tile_size;
        let draw_y = offset_y + (square.y - min_y) as f32 * tile_size;
        draw_snes_block(draw_x, draw_y, tile_size, kind.color());
    }
}
