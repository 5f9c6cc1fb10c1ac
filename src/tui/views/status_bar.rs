//! Status bar view
//!
//! Shows the entry count, the current message and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{ActiveView, App};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = vec![
        Span::styled(" Entries: ", Style::default().fg(Color::White)),
        Span::styled(
            app.wizard.entries().len().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = match app.active_view {
        ActiveView::Wizard => " │ [j/k] move [Enter] select [⌫] back [r] reset [e] entries [x] export [q] quit",
        ActiveView::Entries => " │ [j/k] move [d] delete [e] wizard [x] export [q] quit",
    };
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
