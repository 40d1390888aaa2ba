/*
[INPUT]:  Dashboard counters and current filter
[OUTPUT]: Counter header panel rendering
[POS]:    TUI UI - dashboard header
[UPDATE]: When counters or filter display change
*/

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::border_style;
use crate::tui::app::AppState;

pub(in crate::tui) fn draw_status_bar(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let counters = &app.counters;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let filter = match app.query().status {
        Some(status) => format!("filter: {status}"),
        None => String::from("filter: all"),
    };

    let line = Line::from(vec![
        Span::styled(format!("Pending {}", counters.pending), bold.fg(Color::LightBlue)),
        Span::raw("  "),
        Span::styled(
            format!("In progress {}", counters.in_progress),
            bold.fg(Color::LightCyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Needs rework {}", counters.needs_rework),
            bold.fg(Color::LightYellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Completed {}", counters.completed),
            bold.fg(Color::LightGreen),
        ),
        Span::raw("  |  "),
        Span::raw(filter),
    ]);

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Dashboard"),
    );
    frame.render_widget(widget, area);
}
