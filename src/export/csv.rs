//! CSV projection of committed entries
//!
//! One header row followed by one row per entry in insertion order. Labels
//! come from the validated vocabulary and are written without quoting.

use crate::error::{TallyError, TallyResult};
use crate::models::{Entry, Layout, Vocabulary};

/// Column labels for a layout
pub fn header(vocab: &Vocabulary, layout: Layout) -> Vec<String> {
    let mut columns = vec!["Age".to_string(), "Type".to_string()];

    match layout {
        Layout::Flat | Layout::Single => columns.extend(vocab.amounts.iter().cloned()),
        Layout::Breakdown => {
            for category in &vocab.categories {
                for amount in &vocab.amounts {
                    columns.push(format!("{} {}", category, amount));
                }
                columns.push(format!("{} Total", category));
            }
        }
    }

    columns
}

/// Cells of one entry, aligned with `header`
pub fn row(entry: &Entry, vocab: &Vocabulary, layout: Layout) -> Vec<String> {
    let mut cells = vec![entry.age.clone(), entry.kind.clone()];

    match layout {
        Layout::Flat | Layout::Single => {
            let counts = entry
                .uncategorized()
                .map(|tally| tally.counts_in(&vocab.amounts))
                .unwrap_or_else(|| vec![0; vocab.amounts.len()]);
            cells.extend(counts.iter().map(u32::to_string));
        }
        Layout::Breakdown => {
            for category in &vocab.categories {
                let mut total = 0u32;
                for amount in &vocab.amounts {
                    let count = entry.count(category, amount);
                    total = total.saturating_add(count);
                    cells.push(count.to_string());
                }
                cells.push(total.to_string());
            }
        }
    }

    cells
}

/// Render committed entries as CSV text
pub fn project(entries: &[Entry], vocab: &Vocabulary, layout: Layout) -> TallyResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(header(vocab, layout))
        .map_err(|e| TallyError::Export(e.to_string()))?;

    for entry in entries {
        writer
            .write_record(row(entry, vocab, layout))
            .map_err(|e| TallyError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TallyError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TallyError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryTallies, UNCATEGORIZED};

    fn flat_entry(age: &str, kind: &str, counts: &[(&str, u32)]) -> Entry {
        let mut tallies = CategoryTallies::new();
        let tally = tallies.entry(UNCATEGORIZED.to_string()).or_default();
        for (amount, count) in counts {
            tally.set(amount, *count);
        }
        Entry::new(age, kind, tallies)
    }

    #[test]
    fn test_flat_projection() {
        let vocab = Vocabulary::default();
        let entries = vec![
            flat_entry("20-30", "Asian", &[("$5 - 10", 2)]),
            flat_entry("60+", "Local", &[("$0 - 5", 1), ("$20+", 3)]),
        ];

        let csv = project(&entries, &vocab, Layout::Flat).unwrap();
        assert_eq!(
            csv,
            "Age,Type,$0 - 5,$5 - 10,$10 - 20,$20+\n\
             20-30,Asian,0,2,0,0\n\
             60+,Local,1,0,0,3\n"
        );
    }

    #[test]
    fn test_empty_projection_is_header_only() {
        let vocab = Vocabulary::default();
        let csv = project(&[], &vocab, Layout::Flat).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_single_projection_matches_flat() {
        let vocab = Vocabulary::default();
        let entries = vec![
            flat_entry("30-40", "Western", &[("$10 - 20", 3)]),
            flat_entry("30-40", "Western", &[]),
        ];

        let csv = project(&entries, &vocab, Layout::Single).unwrap();
        assert_eq!(
            csv,
            "Age,Type,$0 - 5,$5 - 10,$10 - 20,$20+\n30-40,Western,0,0,3,0\n30-40,Western,0,0,0,0\n"
        );
        assert_eq!(csv, project(&entries, &vocab, Layout::Flat).unwrap());
    }

    #[test]
    fn test_breakdown_projection_has_totals() {
        let vocab = Vocabulary::default();
        let mut tallies = CategoryTallies::new();
        tallies.entry("Food".into()).or_default().set("$0 - 5", 2);
        tallies.entry("Food".into()).or_default().set("$20+", 1);
        tallies.entry("Other".into()).or_default().set("$5 - 10", 4);
        let entries = vec![Entry::new("10-20", "Other", tallies)];

        let csv = project(&entries, &vocab, Layout::Breakdown).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);

        let header: Vec<_> = lines[0].split(',').collect();
        let cells: Vec<_> = lines[1].split(',').collect();
        // 2 fixed columns + 4 categories x (4 buckets + total)
        assert_eq!(header.len(), 22);
        assert_eq!(cells.len(), header.len());

        let cell = |name: &str| {
            let idx = header.iter().position(|h| *h == name).unwrap();
            cells[idx]
        };
        assert_eq!(cell("Food $0 - 5"), "2");
        assert_eq!(cell("Food $20+"), "1");
        assert_eq!(cell("Food Total"), "3");
        assert_eq!(cell("Other $5 - 10"), "4");
        assert_eq!(cell("Clothes Total"), "0");
    }

    #[test]
    fn test_header_order_for_flat_layout() {
        let vocab = Vocabulary::default();
        let mut expected = vec!["Age".to_string(), "Type".to_string()];
        expected.extend(vocab.amounts.iter().cloned());
        assert_eq!(header(&vocab, Layout::Flat), expected);
    }
}
