use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::food::Rgb;
use crate::snapshot::{ActivePowerUp, GameSnapshot};

const SEPARATOR: &str = " │ ";

/// Renders the two HUD rows and returns the remaining play area above them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &GameSnapshot, theme: &Theme) -> Rect {
    let [play_area, stats_area, effects_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(stats_line(snapshot, usize::from(stats_area.width), theme))
            .alignment(Alignment::Center),
        stats_area,
    );
    frame.render_widget(
        Paragraph::new(effects_line(&snapshot.active_power_ups, theme)).alignment(Alignment::Center),
        effects_area,
    );

    play_area
}

fn stats_line(snapshot: &GameSnapshot, available_width: usize, theme: &Theme) -> Line<'static> {
    let record = snapshot.new_high_score || snapshot.score > snapshot.high_score;
    let fields = [
        ("Level", format!("{} {}", snapshot.level, snapshot.level_name), false),
        ("Length", snapshot.snake.len().to_string(), false),
        ("Score", snapshot.score.to_string(), record),
        ("Hi", snapshot.high_score.max(snapshot.score).to_string(), record),
        ("Speed", format!("{:.1}", snapshot.speed), false),
    ];

    let widths: Vec<_> = fields
        .iter()
        .map(|(label, value, _)| (*label, value.clone()))
        .collect();
    let compact = line_width(&widths) > available_width;

    let mut spans = Vec::new();
    for (index, (label, value, highlight)) in fields.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, Style::new().fg(theme.hud_label)));
        }
        let label = if compact { &label[..1] } else { label };
        spans.push(Span::styled(format!("{label} "), Style::new().fg(theme.hud_label)));

        let value_color = if highlight {
            theme.hud_accent
        } else {
            theme.hud_value
        };
        spans.push(Span::styled(value, Style::new().fg(value_color)));
    }

    Line::from(spans)
}

fn line_width(fields: &[(&str, String)]) -> usize {
    let separators = SEPARATOR.width() * fields.len().saturating_sub(1);
    fields
        .iter()
        .map(|(label, value)| label.width() + 1 + value.width())
        .sum::<usize>()
        + separators
}

fn effects_line(active: &[ActivePowerUp], theme: &Theme) -> Line<'static> {
    if active.is_empty() {
        return Line::from(Span::styled("no active power-ups", Style::new().fg(theme.hud_label)));
    }

    let mut spans = Vec::new();
    for (index, effect) in active.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        let seconds = effect.remaining_ms as f64 / 1000.0;
        spans.push(Span::styled(
            format!("{} {seconds:.1}s", effect.kind.label()),
            Style::new().fg(rgb(effect.kind.color())),
        ));
    }
    Line::from(spans)
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use crate::powerup::PowerUpKind;
    use crate::snapshot::ActivePowerUp;

    use super::{effects_line, line_width};
    use crate::config::THEME;

    #[test]
    fn width_counts_labels_values_and_separators() {
        let fields = [("Hi", "12".to_owned()), ("Speed", "7.0".to_owned())];

        assert_eq!(line_width(&fields), 2 + 1 + 2 + 3 + 5 + 1 + 3);
    }

    #[test]
    fn effects_line_lists_remaining_time() {
        let line = effects_line(
            &[ActivePowerUp {
                kind: PowerUpKind::GhostMode,
                remaining_ms: 3_240,
            }],
            &THEME,
        );

        assert_eq!(line.spans[0].content, "Ghost Mode! 3.2s");
    }
}
