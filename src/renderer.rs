use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_FOOD, GLYPH_GRID_DOT, GLYPH_MOVING_OBSTACLE,
    GLYPH_POWER_UP, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GLYPH_WALL, THEME, Theme,
};
use crate::controller::GameStatus;
use crate::food::Rgb;
use crate::grid::{GridSize, Position};
use crate::obstacle::ObstacleKind;
use crate::snapshot::GameSnapshot;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from one snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &GameSnapshot) {
    let theme = &THEME;
    let area = frame.area();
    let area = render_hud(frame, area, snapshot, theme);
    let board_area = board_rect(area, snapshot.bounds);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_field(frame, inner, snapshot, theme);
    render_obstacles(frame, inner, snapshot, theme);
    render_items(frame, inner, snapshot);
    render_snake(frame, inner, snapshot, theme);

    match snapshot.status {
        GameStatus::Start => render_start_menu(frame, board_area, snapshot, theme),
        GameStatus::Paused => render_pause_menu(frame, board_area, theme),
        GameStatus::GameOver => render_game_over_menu(frame, board_area, snapshot, theme),
        GameStatus::Playing => {}
    }
}

/// Centers the bordered board inside `area`.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = bounds.height.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    board
}

fn render_field(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot, theme: &Theme) {
    let background = Style::new().bg(theme.play_bg);
    let dot = Style::new().fg(theme.grid_line).bg(theme.play_bg);
    let buffer = frame.buffer_mut();

    for y in inner.top()..inner.bottom() {
        for x in inner.left()..inner.right() {
            buffer.set_string(x, y, " ", background);
        }
    }

    if !snapshot.show_grid {
        return;
    }
    for cell in snapshot.bounds.cells() {
        if let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, cell) {
            buffer.set_string(x, y, GLYPH_GRID_DOT, dot);
        }
    }
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for obstacle in &snapshot.obstacles {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, obstacle.position) else {
            continue;
        };

        let (glyph, color) = match obstacle.kind {
            ObstacleKind::Wall => (GLYPH_WALL, theme.wall),
            ObstacleKind::Moving { .. } => (GLYPH_MOVING_OBSTACLE, theme.moving_obstacle),
        };
        buffer.set_string(x, y, glyph, Style::new().fg(color).bg(theme.play_bg));
    }
}

fn render_items(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot) {
    let buffer = frame.buffer_mut();

    if let Some(food) = snapshot.food {
        if let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, food.position) {
            buffer.set_string(
                x,
                y,
                GLYPH_FOOD,
                Style::new().fg(rgb(food.color)).add_modifier(Modifier::BOLD),
            );
        }
    }

    for power_up in &snapshot.power_ups {
        if let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, power_up.position) {
            buffer.set_string(
                x,
                y,
                GLYPH_POWER_UP,
                Style::new().fg(rgb(power_up.kind.color())),
            );
        }
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot, theme: &Theme) {
    let body_color = if snapshot.ghost {
        theme.snake_ghost
    } else {
        theme.snake_body
    };

    let buffer = frame.buffer_mut();
    // Tail first so the head stays visible when segments overlap.
    for (index, segment) in snapshot.snake.iter().enumerate().rev() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(body_color));
        }
    }
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::controller::GameStatus;
    use crate::grid::{GridSize, Position};
    use crate::simulation::Simulation;
    use crate::snapshot::GameSnapshot;

    use super::{logical_to_terminal, render};

    #[test]
    fn cells_map_two_columns_wide() {
        let inner = Rect::new(1, 1, 40, 20);
        let bounds = GridSize::square(20);

        assert_eq!(logical_to_terminal(inner, bounds, Position::new(0, 0)), Some((1, 1)));
        assert_eq!(logical_to_terminal(inner, bounds, Position::new(3, 2)), Some((7, 3)));
        assert_eq!(logical_to_terminal(inner, bounds, Position::new(-1, 2)), None);
    }

    #[test]
    fn every_status_renders_without_panicking() {
        let sim = Simulation::new_with_seed(GridSize::square(20), 4, 31);
        let backend = TestBackend::new(60, 30);
        let mut terminal = Terminal::new(backend).expect("test terminal");

        for status in [
            GameStatus::Start,
            GameStatus::Playing,
            GameStatus::Paused,
            GameStatus::GameOver,
        ] {
            let snapshot = GameSnapshot::capture(&sim, status, 7, false, true);
            terminal
                .draw(|frame| render(frame, &snapshot))
                .expect("frame draws");
        }
    }
}
