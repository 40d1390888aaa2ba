/*
[INPUT]:  Action/issue dialog state, schema-declared fields, key events
[OUTPUT]: Modal rendering output and modal action results
[POS]:    TUI UI - dialog field framework
[UPDATE]: When field kinds, focus handling, or dialog layout change
*/

use crossterm::event::KeyCode;
use flowdesk_adapter::{ActionKind, FieldKind};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::controller::ActionModal;
use crate::form::FieldValue;
use crate::issue::IssueDialog;

/// Transient view of a dialog, rebuilt per key event and frame.
pub(in crate::tui) struct Modal {
    pub(in crate::tui) title: String,
    pub(in crate::tui) focus_index: usize,
    pub(in crate::tui) fields: Vec<Field>,
    pub(in crate::tui) banner: Option<(String, bool)>,
}

pub(in crate::tui) enum Field {
    TextInput {
        label: String,
        value: String,
        placeholder: Option<String>,
        error: Option<String>,
    },
    Toggle {
        label: String,
        value: bool,
        error: Option<String>,
    },
    Select {
        label: String,
        options: Vec<String>,
        value: String,
        error: Option<String>,
    },
    Button {
        label: String,
        action: ModalAction,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui) enum ModalAction {
    None,
    Cancel,
    Action(ActionKind),
    ReportIssue,
    SubmitIssue,
    Attach,
    Unstage(String),
}

/// Build the action dialog view from controller state.
///
/// Field order matters: `apply_action_dialog` maps values back by the
/// same positions.
pub(in crate::tui) fn build_action_dialog(
    modal: &ActionModal,
    focus_index: usize,
    attach_input: &str,
) -> Modal {
    let task = modal.task();
    let mut fields = Vec::new();

    for def in &task.task_data.form_fields {
        let error = modal.form().error(&def.key).map(str::to_string);
        let field = match def.kind {
            FieldKind::Boolean => Field::Toggle {
                label: def.label.clone(),
                value: modal
                    .form()
                    .value(&def.key)
                    .is_some_and(FieldValue::as_bool),
                error,
            },
            FieldKind::Select => Field::Select {
                label: def.label.clone(),
                options: def.option_list(),
                value: modal
                    .form()
                    .value(&def.key)
                    .map(|value| value.as_text().to_string())
                    .unwrap_or_default(),
                error,
            },
            _ => Field::TextInput {
                label: def.label.clone(),
                value: modal
                    .form()
                    .value(&def.key)
                    .map(|value| value.as_text().to_string())
                    .unwrap_or_default(),
                placeholder: def.placeholder.clone(),
                error,
            },
        };
        fields.push(field);
    }

    fields.push(Field::TextInput {
        label: String::from("Comment"),
        value: modal.comment().to_string(),
        placeholder: None,
        error: None,
    });

    let can_attach = modal.can_action() && task.task_data.allow_file_submission;
    if can_attach {
        let label = match task.task_data.accepted_file_types.as_deref() {
            Some(accepted) => format!("Attach path ({accepted})"),
            None => String::from("Attach path"),
        };
        fields.push(Field::TextInput {
            label,
            value: attach_input.to_string(),
            placeholder: None,
            error: None,
        });
        fields.push(Field::Button {
            label: String::from("Attach"),
            action: ModalAction::Attach,
        });
    }

    for staged in modal.staging().files() {
        fields.push(Field::Button {
            label: format!("Remove {} ({} B)", staged.name, staged.size),
            action: ModalAction::Unstage(staged.name.clone()),
        });
    }

    for action in modal.available_actions() {
        fields.push(Field::Button {
            label: action.label().to_string(),
            action: ModalAction::Action(*action),
        });
    }
    if modal.can_action() {
        fields.push(Field::Button {
            label: String::from("Report Issue"),
            action: ModalAction::ReportIssue,
        });
    }
    fields.push(Field::Button {
        label: String::from("Close"),
        action: ModalAction::Cancel,
    });

    let title = if modal.is_loading() {
        format!("{} (working...)", task.title)
    } else {
        format!("{} [{}]", task.title, task.status)
    };

    Modal {
        title,
        focus_index: focus_index.min(fields.len().saturating_sub(1)),
        fields,
        banner: modal
            .banner()
            .map(|(text, is_error)| (text.to_string(), is_error)),
    }
}

/// Copy edited values back into the controller. Only changed values are
/// written so an untouched field keeps its standing validation error.
pub(in crate::tui) fn apply_action_dialog(
    modal: &mut ActionModal,
    attach_input: &mut String,
    view: &Modal,
) {
    let defs = modal.task().task_data.form_fields.clone();
    for (def, field) in defs.iter().zip(view.fields.iter()) {
        match field {
            Field::Toggle { value, .. } => {
                let current = modal
                    .form()
                    .value(&def.key)
                    .is_some_and(FieldValue::as_bool);
                if current != *value {
                    modal.set_field(&def.key, FieldValue::Bool(*value));
                }
            }
            Field::TextInput { value, .. } | Field::Select { value, .. } => {
                let current = modal
                    .form()
                    .value(&def.key)
                    .map(|current| current.as_text().to_string())
                    .unwrap_or_default();
                if current != *value {
                    modal.set_field(&def.key, FieldValue::Text(value.clone()));
                }
            }
            Field::Button { .. } => {}
        }
    }

    let mut index = defs.len();
    if let Some(Field::TextInput { value, .. }) = view.fields.get(index) {
        if modal.comment() != value {
            modal.set_comment(value.clone());
        }
    }
    index += 1;
    if let Some(Field::TextInput { value, .. }) = view.fields.get(index) {
        *attach_input = value.clone();
    }
}

/// Build the stacked issue dialog view.
pub(in crate::tui) fn build_issue_dialog(dialog: &IssueDialog, focus_index: usize) -> Modal {
    let fields = vec![
        Field::TextInput {
            label: String::from("Description"),
            value: dialog.description().to_string(),
            placeholder: Some(String::from("what is blocking this task?")),
            error: None,
        },
        Field::Button {
            label: String::from("Submit"),
            action: ModalAction::SubmitIssue,
        },
        Field::Button {
            label: String::from("Cancel"),
            action: ModalAction::Cancel,
        },
    ];
    Modal {
        title: String::from("Report Issue"),
        focus_index: focus_index.min(fields.len() - 1),
        fields,
        banner: dialog
            .banner()
            .map(|(text, is_error)| (text.to_string(), is_error)),
    }
}

pub(in crate::tui) fn apply_issue_dialog(dialog: &mut IssueDialog, view: &Modal) {
    if let Some(Field::TextInput { value, .. }) = view.fields.first() {
        if dialog.description() != value {
            dialog.set_description(value.clone());
        }
    }
}

/// Route one key event through the dialog view.
pub(in crate::tui) fn handle_modal_key(modal: &mut Modal, key: KeyCode) -> ModalAction {
    match key {
        KeyCode::Esc => ModalAction::Cancel,
        KeyCode::Tab => {
            if !modal.fields.is_empty() {
                modal.focus_index = (modal.focus_index + 1) % modal.fields.len();
            }
            ModalAction::None
        }
        KeyCode::BackTab => {
            if !modal.fields.is_empty() {
                modal.focus_index =
                    (modal.focus_index + modal.fields.len() - 1) % modal.fields.len();
            }
            ModalAction::None
        }
        KeyCode::Up => {
            if let Some(Field::Select { options, value, .. }) =
                modal.fields.get_mut(modal.focus_index)
            {
                cycle_select(options, value, -1);
            }
            ModalAction::None
        }
        KeyCode::Down => {
            if let Some(Field::Select { options, value, .. }) =
                modal.fields.get_mut(modal.focus_index)
            {
                cycle_select(options, value, 1);
            }
            ModalAction::None
        }
        KeyCode::Char(' ') => {
            match modal.fields.get_mut(modal.focus_index) {
                Some(Field::Toggle { value, .. }) => *value = !*value,
                Some(Field::TextInput { value, .. }) => value.push(' '),
                _ => {}
            }
            ModalAction::None
        }
        KeyCode::Backspace => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.pop();
            }
            ModalAction::None
        }
        KeyCode::Char(ch) => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.push(ch);
            }
            ModalAction::None
        }
        KeyCode::Enter => {
            if let Some(Field::Button { action, .. }) = modal.fields.get(modal.focus_index) {
                return action.clone();
            }
            ModalAction::None
        }
        _ => ModalAction::None,
    }
}

/// Step a select field's value through its option list. An empty (seeded)
/// value stays empty until the operator first cycles it.
fn cycle_select(options: &[String], value: &mut String, step: isize) {
    if options.is_empty() {
        return;
    }
    let next = match options.iter().position(|option| option == value) {
        Some(current) => {
            let len = options.len() as isize;
            ((current as isize + step).rem_euclid(len)) as usize
        }
        None => {
            if step > 0 {
                0
            } else {
                options.len() - 1
            }
        }
    };
    *value = options[next].clone();
}

pub(in crate::tui) fn draw_modal(frame: &mut ratatui::Frame, area: Rect, modal: &Modal) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(modal.title.as_str());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    if let Some((text, is_error)) = &modal.banner {
        let style = if *is_error {
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(text.clone(), style)));
        lines.push(Line::from(""));
    }

    for (index, field) in modal.fields.iter().enumerate() {
        let (content, error) = match field {
            Field::TextInput {
                label,
                value,
                placeholder,
                error,
            } => {
                let shown = if value.is_empty() {
                    placeholder
                        .as_deref()
                        .map(|hint| format!("<{hint}>"))
                        .unwrap_or_default()
                } else {
                    value.clone()
                };
                (format!("{label}: {shown}"), error.as_deref())
            }
            Field::Toggle { label, value, error } => {
                let mark = if *value { "x" } else { " " };
                (format!("[{mark}] {label}"), error.as_deref())
            }
            Field::Select {
                label,
                value,
                error,
                ..
            } => {
                let shown = if value.is_empty() { "-" } else { value.as_str() };
                (format!("{label}: {shown} (Up/Down)"), error.as_deref())
            }
            Field::Button { label, .. } => (format!("[{label}]"), None),
        };

        let style = if index == modal.focus_index {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(content, style)));
        if let Some(message) = error {
            lines.push(Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(Color::LightRed),
            )));
        }
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}
