//! Wizard view
//!
//! One screen per step: a start prompt, option lists for age and type,
//! the amount tally board and the confirmation summary.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::models::{Draft, OptionKind, Step, Vocabulary, UNCATEGORIZED};
use crate::tui::app::App;
use crate::tui::layout::AmountLayout;

/// Render the wizard view for the current step
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.wizard.step() {
        Step::Start => render_start(frame, app, area),
        Step::Age => render_choice(frame, app, area, OptionKind::Age),
        Step::Type => render_choice(frame, app, area, OptionKind::Type),
        Step::Amount => render_amount(frame, app, area),
        Step::Confirm => render_confirm(frame, app, area),
    }
}

fn step_block(step: Step) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", step.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn render_start(frame: &mut Frame, app: &App, area: Rect) {
    let count = app.wizard.entries().len();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} entries recorded", count),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Record a visitor  "),
            Span::styled("[e]", Style::default().fg(Color::Yellow)),
            Span::raw(" Entries  "),
            Span::styled("[x]", Style::default().fg(Color::Yellow)),
            Span::raw(" Export"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(step_block(Step::Start))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_choice(frame: &mut Frame, app: &App, area: Rect, kind: OptionKind) {
    let current = match kind {
        OptionKind::Age => app.wizard.draft().age.as_deref(),
        OptionKind::Type => app.wizard.draft().kind.as_deref(),
        _ => None,
    };

    let items: Vec<ListItem> = app
        .wizard
        .vocabulary()
        .options(kind)
        .iter()
        .map(|label| {
            let style = if Some(label.as_str()) == current {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(label.as_str(), style)))
        })
        .collect();

    let list = List::new(items)
        .block(step_block(app.wizard.step()))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_amount(frame: &mut Frame, app: &App, area: Rect) {
    let vocab = app.wizard.vocabulary();
    let draft = app.wizard.draft();
    let with_categories = app.wizard.layout().has_categories();
    let layout = AmountLayout::new(area, with_categories);

    if with_categories {
        let selected = draft
            .category
            .as_ref()
            .and_then(|c| vocab.categories.iter().position(|x| x == c))
            .unwrap_or(0);
        let titles: Vec<Line> = vocab
            .categories
            .iter()
            .map(|category| {
                let total = draft.tallies.get(category).map(|t| t.total()).unwrap_or(0);
                if total > 0 {
                    Line::from(format!("{} ({})", category, total))
                } else {
                    Line::from(category.as_str())
                }
            })
            .collect();

        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .title(" Category [c] ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, layout.categories);
    }

    let last = draft.active_last_selected();
    let items: Vec<ListItem> = vocab
        .amounts
        .iter()
        .map(|bucket| {
            let count = draft.active_count(bucket);
            let marker = if Some(bucket) == last { "*" } else { " " };
            let style = if count > 0 {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<12}", bucket), style),
                Span::styled(format!("{:>4}", count), style.add_modifier(Modifier::BOLD)),
                Span::styled(format!(" {}", marker), Style::default().fg(Color::Yellow)),
            ]))
        })
        .collect();

    let title = format!(
        " {} - {} taps [+/-] next [n] ",
        Step::Amount.title(),
        draft.total()
    );
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(list, layout.buckets, &mut state);
}

fn render_confirm(frame: &mut Frame, app: &App, area: Rect) {
    let draft = app.wizard.draft();
    let vocab = app.wizard.vocabulary();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Age:  ", label),
            Span::styled(draft.age.clone().unwrap_or_default(), value),
        ]),
        Line::from(vec![
            Span::styled("Type: ", label),
            Span::styled(draft.kind.clone().unwrap_or_default(), value),
        ]),
        Line::from(""),
    ];

    let with_categories = app.wizard.layout().has_categories();
    lines.extend(
        tally_lines(draft, vocab, with_categories)
            .into_iter()
            .map(Line::from),
    );

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save entry  "),
        Span::styled("[Backspace]", Style::default().fg(Color::Yellow)),
        Span::raw(" Back"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(step_block(Step::Confirm))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Draft tallies in vocabulary order, one line per category with counts
fn tally_lines(draft: &Draft, vocab: &Vocabulary, with_categories: bool) -> Vec<String> {
    let scopes: Vec<&str> = if with_categories {
        vocab.categories.iter().map(String::as_str).collect()
    } else {
        vec![UNCATEGORIZED]
    };

    scopes
        .into_iter()
        .filter_map(|category| {
            let tally = draft.tallies.get(category).filter(|t| t.is_positive())?;
            let counts: Vec<String> = vocab
                .amounts
                .iter()
                .filter(|bucket| tally.get(bucket) > 0)
                .map(|bucket| format!("{} x{}", bucket, tally.get(bucket)))
                .collect();
            Some(if with_categories {
                format!("{}: {}", category, counts.join(", "))
            } else {
                counts.join(", ")
            })
        })
        .collect()
}
