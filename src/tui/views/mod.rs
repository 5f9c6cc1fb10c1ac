//! TUI Views module
//!
//! Contains the wizard view, the entries view, the step header and the
//! status bar.

pub mod entries;
pub mod status_bar;
pub mod wizard;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;
use crate::models::Step;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);

    match app.active_view {
        ActiveView::Wizard => wizard::render(frame, app, layout.main),
        ActiveView::Entries => entries::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if let ActiveDialog::Alert(message) = &app.active_dialog {
        dialogs::alert::render(frame, message);
    }
}

/// Render the step progress header
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.wizard.step();

    let mut spans = Vec::new();
    for (i, step) in Step::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        let style = if *step == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if step.index() < current.index() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(step.title(), style));
    }

    let title = format!(
        " Field Tally ({}{}) ",
        app.wizard.layout(),
        if app.wizard.is_persistent() { "" } else { ", not saved" }
    );

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
