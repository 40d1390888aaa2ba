/*
[INPUT]:  AppState snapshot per frame
[OUTPUT]: Full-frame layout with panels and dialog overlays
[POS]:    TUI UI module root
[UPDATE]: When panel layout or overlay sizing changes
*/

pub(in crate::tui) mod modal;
mod status_bar;
mod task_list;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use self::modal::{build_action_dialog, build_issue_dialog, draw_modal};
use super::app::AppState;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &AppState, log_lines: &[String]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(6),
        ])
        .split(frame.area());

    status_bar::draw_status_bar(frame, chunks[0], app);
    task_list::draw_task_list(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app, log_lines);

    if let Some(action_modal) = &app.modal {
        let area = centered_rect(frame.area(), 70, 80);
        let view = build_action_dialog(action_modal, app.modal_focus, &app.attach_input);
        draw_modal(frame, area, &view);

        if let Some(dialog) = action_modal.issue_dialog() {
            let area = centered_rect(frame.area(), 50, 40);
            let view = build_issue_dialog(dialog, app.issue_focus);
            draw_modal(frame, area, &view);
        }
    }
}

fn draw_footer(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &AppState,
    log_lines: &[String],
) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let keys = Line::from(vec![
        Span::styled("[Up/Down]", key_style),
        Span::raw(" Select  "),
        Span::styled("[Enter]", key_style),
        Span::raw(" Open  "),
        Span::styled("[n/p]", key_style),
        Span::raw(" Page  "),
        Span::styled("[f]", key_style),
        Span::raw(" Filter  "),
        Span::styled("[r]", key_style),
        Span::raw(" Refresh  "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit"),
    ]);

    let mut lines = vec![keys, Line::from(format!("Status: {}", app.status_message))];
    for log_line in log_lines.iter().rev().take(2).rev() {
        lines.push(Line::from(Span::styled(
            log_line.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let widget = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(in crate::tui) fn border_style() -> Style {
    Style::default().fg(Color::Blue)
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
