use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::config::{
    BOARD_BG_COLOR, BOARD_BORDER_COLOR, FOOD_COLORS, SNAKE_BODY_COLOR, SNAKE_HEAD_COLOR,
};
use crate::game::{SessionState, Snapshot};
use crate::grid::{self, Cell, GridSize};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_start_menu};

/// Terminal columns per cell unit; terminal cells are about twice as tall as wide.
const COLUMNS_PER_UNIT: u16 = 2;

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot);

    let cell_size = fit_cell_size(play_area, snapshot.grid);
    let board_area = board_rect(play_area, snapshot.grid, cell_size);

    let block = Block::bordered().border_style(Style::new().fg(BOARD_BORDER_COLOR));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);
    frame
        .buffer_mut()
        .set_style(inner, Style::new().bg(BOARD_BG_COLOR));

    let food_color = FOOD_COLORS[snapshot.food_color % FOOD_COLORS.len()];
    paint_cell(frame, inner, cell_size, snapshot.food, food_color);

    for (index, cell) in snapshot.snake_cells.iter().enumerate() {
        let color = if index == 0 {
            SNAKE_HEAD_COLOR
        } else {
            SNAKE_BODY_COLOR
        };
        paint_cell(frame, inner, cell_size, *cell, color);
    }

    match snapshot.state {
        SessionState::Idle => render_start_menu(frame, board_area, snapshot.high_score),
        SessionState::GameOver => render_game_over_menu(frame, board_area, snapshot),
        SessionState::Running => {}
    }
}

/// Largest whole cell size (in terminal rows) that fits the board into `area`.
fn fit_cell_size(area: Rect, grid_size: GridSize) -> u32 {
    let rows = u32::from(area.height.saturating_sub(2));
    let units_across = u32::from(area.width.saturating_sub(2) / COLUMNS_PER_UNIT);

    grid::cell_size_for(rows.min(units_across), grid_size).max(1)
}

fn board_rect(area: Rect, grid_size: GridSize, cell_size: u32) -> Rect {
    let side = u32::from(grid_size.0).saturating_mul(cell_size);
    let height = u16::try_from(side.saturating_add(2))
        .unwrap_or(u16::MAX)
        .min(area.height);
    let width = u16::try_from(side.saturating_mul(u32::from(COLUMNS_PER_UNIT)).saturating_add(2))
        .unwrap_or(u16::MAX)
        .min(area.width);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn paint_cell(frame: &mut Frame<'_>, inner: Rect, cell_size: u32, cell: Cell, color: Color) {
    let Some(target) = cell_to_terminal(inner, cell, cell_size) else {
        return;
    };

    frame.buffer_mut().set_style(target, Style::new().bg(color));
}

fn cell_to_terminal(inner: Rect, cell: Cell, cell_size: u32) -> Option<Rect> {
    if cell.col < 0 || cell.row < 0 {
        return None;
    }

    let (x, y) = grid::to_pixel(cell, cell_size);
    let x = u16::try_from(x.saturating_mul(u32::from(COLUMNS_PER_UNIT))).ok()?;
    let y = u16::try_from(y).ok()?;
    let size = u16::try_from(cell_size).ok()?;

    let target = Rect {
        x: inner.x.saturating_add(x),
        y: inner.y.saturating_add(y),
        width: size.saturating_mul(COLUMNS_PER_UNIT),
        height: size,
    }
    .intersection(inner);

    (!target.is_empty()).then_some(target)
}
