//! Screen layout:
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Dental Clinic - Patients                     │
//! ├──────────────────────────────────────────────┤
//! │ ID  First name  Last name  Birth date  Phone │
//! │ ...                                          │
//! ├──────────────────────────────────────────────┤
//! │ [a] Add  [e] Edit  [d] Delete  [r] Reload    │
//! └──────────────────────────────────────────────┘
//! ```
//! The editor is drawn as a modal on top of the table.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use super::app::{App, FormBuffer};
use crate::domain::{EditorState, Field, OpenEditor};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    render_header(frame, header);
    render_table(frame, body, app);
    render_footer(frame, footer, app.form.is_some());

    if let (EditorState::Open(editor), Some(form)) = (&app.snapshot.editor, &app.form) {
        render_editor(frame, editor, form);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        " Dental Clinic - Patients ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(["ID", "First name", "Last name", "Birth date", "Phone"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = app.snapshot.patients.iter().map(|p| {
        Row::new([
            p.id.to_string(),
            p.first_name.clone(),
            p.last_name.clone(),
            p.birth_date.clone(),
            p.phone.clone(),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Length(12),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL));

    let mut state = TableState::default();
    if !app.snapshot.patients.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(frame: &mut Frame, area: Rect, editing: bool) {
    let keys: &[(&str, &str)] = if editing {
        &[("Tab", "Next field"), ("Enter", "Save"), ("Esc", "Cancel")]
    } else {
        &[
            ("a", "Add"),
            ("e", "Edit"),
            ("d", "Delete"),
            ("r", "Reload"),
            ("q", "Quit"),
        ]
    };

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(format!(" [{}] ", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_editor(frame: &mut Frame, editor: &OpenEditor, form: &FormBuffer) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    for field in Field::ALL {
        let marker = if form.focus == field { "> " } else { "  " };
        let placeholder = match field {
            Field::BirthDate => "YYYY-MM-DD",
            _ => field.label(),
        };
        let text = form.text(field);
        let value = if text.is_empty() {
            Span::styled(placeholder, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(text)
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<12}", field.label()), Style::default().fg(Color::Cyan)),
            value,
        ]));
        match editor.error_for(field) {
            Some(error) => lines.push(Line::from(Span::styled(
                format!("    {}", error.message),
                Style::default().fg(Color::Red),
            ))),
            None => lines.push(Line::raw("")),
        }
    }
    lines.push(Line::from(Span::styled(
        format!("  [Enter] {}", form.mode.submit_label()),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));

    let modal = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} ", form.mode.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(modal, area);
}

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
