use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::level::LEVEL_COUNT;
use crate::simulation::CollisionKind;
use crate::snapshot::GameSnapshot;

pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, snapshot: &GameSnapshot, theme: &Theme) {
    let lines = vec![
        Line::from("SNAKE").style(
            Style::new()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::from(format!("Level {}: {}", snapshot.level, snapshot.level_name)),
        Line::from(snapshot.level_description),
        Line::from(format!("High score: {}", snapshot.high_score)),
        Line::default(),
        Line::from("[Enter]/[Space] Start"),
        Line::from(format!("[1-{LEVEL_COUNT}] Level  [G] Grid  [Q] Quit")),
        Line::default(),
        Line::from("Arrows/WASD to move, P to pause").style(Style::new().fg(theme.menu_footer)),
    ];
    render_popup(frame, area, " start ", lines);
}

pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from("PAUSED").style(Style::new().fg(theme.menu_title)),
        Line::default(),
        Line::from("[P]/[Esc] Resume"),
        Line::from("[Q] Quit"),
    ];
    render_popup(frame, area, " pause ", lines);
}

/// Shows the final score, the record state and what ended the round.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &GameSnapshot,
    theme: &Theme,
) {
    let record = if snapshot.new_high_score {
        Line::from("NEW HIGH SCORE!").style(Style::new().fg(theme.hud_accent))
    } else {
        Line::from(format!("High score: {}", snapshot.high_score))
    };

    let lines = vec![
        Line::from("GAME OVER").style(Style::new().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Line::default(),
        Line::from(format!("Score: {}", snapshot.score)),
        record,
        Line::from(collision_cause(snapshot.collision)),
        Line::default(),
        Line::from("[Enter]/[Space] Play Again"),
        Line::from(format!("[1-{LEVEL_COUNT}] Level  [Q] Quit")),
    ];
    render_popup(frame, area, " game over ", lines);
}

fn collision_cause(collision: Option<CollisionKind>) -> &'static str {
    match collision {
        Some(CollisionKind::Boundary) => "Cause: hit the edge",
        Some(CollisionKind::SelfCollision) => "Cause: hit yourself",
        Some(CollisionKind::Obstacle) => "Cause: hit an obstacle",
        None => "",
    }
}

/// Clears a box sized to `lines` in the middle of `area` and draws them in it.
fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &'static str, lines: Vec<Line<'_>>) {
    let width = lines
        .iter()
        .map(Line::width)
        .max()
        .unwrap_or_default()
        .saturating_add(4);
    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(u16::try_from(width).unwrap_or(u16::MAX))])
        .flex(Flex::Center)
        .areas(row);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}
