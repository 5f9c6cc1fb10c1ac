//! Entry display formatting
//!
//! Formats committed entries for terminal output.

use chrono::Local;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Entry, Layout, Vocabulary, UNCATEGORIZED};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Recorded")]
    recorded: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Taps")]
    total: u32,
    #[tabled(rename = "Detail")]
    detail: String,
}

/// One-line summary of an entry's tallies, in vocabulary order
pub fn format_tally_summary(entry: &Entry, vocab: &Vocabulary, layout: Layout) -> String {
    let describe = |scope: &str| -> Vec<String> {
        vocab
            .amounts
            .iter()
            .filter_map(|amount| {
                let count = entry.count(scope, amount);
                (count > 0).then(|| format!("{} x{}", amount, count))
            })
            .collect()
    };

    match layout {
        Layout::Flat | Layout::Single => describe(UNCATEGORIZED).join(", "),
        Layout::Breakdown => vocab
            .categories
            .iter()
            .filter_map(|category| {
                let parts = describe(category);
                (!parts.is_empty()).then(|| format!("{}: {}", category, parts.join(", ")))
            })
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// Format entries as a table, numbered from 1
pub fn format_entry_table(entries: &[Entry], vocab: &Vocabulary, layout: Layout) -> String {
    if entries.is_empty() {
        return "No entries recorded yet.\n\nRun 'fieldtally start' to begin an observation."
            .to_string();
    }

    let rows: Vec<EntryRow> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| EntryRow {
            position: i + 1,
            recorded: entry
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            age: entry.age.clone(),
            kind: entry.kind.clone(),
            total: entry.total(),
            detail: format_tally_summary(entry, vocab, layout),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n{} entr{}", table, entries.len(), if entries.len() == 1 { "y" } else { "ies" })
}
