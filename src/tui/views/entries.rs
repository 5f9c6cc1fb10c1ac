//! Entries view
//!
//! Lists committed entries with their tally summary; `d` deletes the
//! highlighted row.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::format_tally_summary;
use crate::tui::app::App;

/// Render the entries table
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let entries = app.wizard.entries();

    let block = Block::default()
        .title(format!(" Entries ({}) [d] delete [Esc] back ", entries.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if entries.is_empty() {
        let text = Paragraph::new("No entries recorded yet.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("#").style(bold),
        Cell::from("Recorded").style(bold),
        Cell::from("Age").style(bold),
        Cell::from("Type").style(bold),
        Cell::from("Taps").style(bold),
        Cell::from("Detail").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow));

    let vocab = app.wizard.vocabulary();
    let layout = app.wizard.layout();
    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(
                    entry
                        .created_at
                        .with_timezone(&chrono::Local)
                        .format("%m-%d %H:%M")
                        .to_string(),
                ),
                Cell::from(entry.age.clone()),
                Cell::from(entry.kind.clone()),
                Cell::from(entry.total().to_string()),
                Cell::from(format_tally_summary(entry, vocab, layout)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_entry_index));
    frame.render_stateful_widget(table, area, &mut state);
}
