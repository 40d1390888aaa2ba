/*
[INPUT]:  Current task page and selection state
[OUTPUT]: Task list panel rendering
[POS]:    TUI UI - task list panel
[UPDATE]: When list columns or selection styling change
*/

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use unicode_width::UnicodeWidthStr;

use flowdesk_adapter::{Task, TaskStatus};

use super::border_style;
use crate::tui::app::AppState;

pub(in crate::tui) fn draw_task_list(frame: &mut ratatui::Frame, area: Rect, app: &AppState) {
    let header = Row::new(vec!["Title", "Status", "Priority", "Due", "Assignee"]).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let title_width = (area.width as usize).saturating_sub(46).max(12);
    let rows: Vec<Row> = app
        .tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let mut row = Row::new(vec![
                Cell::from(truncate(&task.title, title_width)),
                Cell::from(task.status.to_string()),
                Cell::from(task.priority.to_string()),
                Cell::from(
                    task.due_date
                        .map(|due| due.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::from(task.assigned_to_id.clone()),
            ]);
            if index == app.selected_index {
                row = row.style(Style::default().add_modifier(Modifier::REVERSED));
            } else if let Some(style) = status_style(task) {
                row = row.style(style);
            }
            row
        })
        .collect();

    let widths = [
        Constraint::Min(12),
        Constraint::Length(13),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Tasks"),
    );
    frame.render_widget(table, area);
}

fn status_style(task: &Task) -> Option<Style> {
    match task.status {
        TaskStatus::NeedsRework => Some(Style::default().fg(Color::LightYellow)),
        TaskStatus::Failed => Some(Style::default().fg(Color::LightRed)),
        TaskStatus::Completed => Some(Style::default().fg(Color::DarkGray)),
        _ => None,
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.width() + 1 >= max_width {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate_keeps_short_titles() {
        assert_eq!(truncate("short", 12), "short");
    }

    #[test]
    fn test_truncate_marks_long_titles() {
        let truncated = truncate("a very long task title indeed", 12);
        assert!(truncated.ends_with('…'));
        assert!(truncated.chars().count() <= 12);
    }
}
