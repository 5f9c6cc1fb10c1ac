//! Observation wizard state machine
//!
//! ```text
//! start -> age -> type -> amount -> confirm -> start
//! ```
//!
//! Forward edges are guarded; an intent whose guard fails is ignored and the
//! method returns `false`. Backward edges discard the state owned by the step
//! being left. Every applied intent is written to the store, if one is
//! attached; a failed write is logged and the in-memory change stands.

use log::{debug, info, warn};

use crate::config::settings::Settings;
use crate::error::TallyResult;
use crate::export::csv::project;
use crate::models::{Draft, Entry, Layout, OptionKind, Step, Vocabulary, UNCATEGORIZED};
use crate::storage::kv::{probe, KeyValueStore};
use crate::storage::snapshot::{self, Snapshot};

/// Owns the wizard step, the draft, and the committed entries
pub struct WizardController {
    vocab: Vocabulary,
    layout: Layout,
    step: Step,
    draft: Draft,
    entries: Vec<Entry>,
    store: Option<Box<dyn KeyValueStore>>,
}

impl WizardController {
    /// Create a memory-only controller
    pub fn new(vocab: Vocabulary, layout: Layout) -> Self {
        let draft = empty_draft(&vocab, layout);
        Self {
            vocab,
            layout,
            step: Step::Start,
            draft,
            entries: Vec::new(),
            store: None,
        }
    }

    /// Create a controller backed by `store`, restoring any saved state
    ///
    /// The store is probed with a write/delete round-trip first. If the probe
    /// fails the controller runs memory-only and never touches the store.
    pub fn open(mut store: Box<dyn KeyValueStore>, vocab: Vocabulary, layout: Layout) -> Self {
        let mut controller = Self::new(vocab, layout);

        match probe(store.as_mut()) {
            Ok(()) => {
                let snapshot = Snapshot::load(store.as_ref(), &controller.vocab);
                controller.restore(snapshot);
                controller.store = Some(store);
            }
            Err(e) => {
                warn!("Storage unavailable, running memory-only: {}", e);
            }
        }

        controller
    }

    /// Create a controller using the layout and vocabulary from settings
    pub fn from_settings(settings: &Settings, store: Option<Box<dyn KeyValueStore>>) -> Self {
        let vocab = settings.vocabulary.clone();
        match store {
            Some(store) => Self::open(store, vocab, settings.layout),
            None => Self::new(vocab, settings.layout),
        }
    }

    // ------------------------------------------------------------------
    // Read access for display and export
    // ------------------------------------------------------------------

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Whether state changes are being written to a store
    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Whether the amount step may advance to confirmation
    pub fn can_proceed(&self) -> bool {
        self.step == Step::Amount && self.draft.has_positive_tally()
    }

    /// Whether the draft may be committed
    pub fn can_confirm(&self) -> bool {
        self.draft.is_complete()
    }

    /// CSV projection of the committed entries
    pub fn csv(&self) -> TallyResult<String> {
        project(&self.entries, &self.vocab, self.layout)
    }

    // ------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------

    /// Leave the start screen
    pub fn start(&mut self) -> bool {
        if self.step != Step::Start {
            return self.ignore("start");
        }
        self.step = Step::Age;
        self.persist();
        true
    }

    /// Record the visitor age bracket and move on to the type step
    pub fn select_age(&mut self, label: &str) -> bool {
        if !matches!(self.step, Step::Start | Step::Age)
            || !self.vocab.contains(OptionKind::Age, label)
        {
            return self.ignore("select age");
        }
        self.draft.age = Some(label.to_string());
        self.step = Step::Type;
        self.persist();
        true
    }

    /// Record the visitor type and move on to the amount step
    pub fn select_type(&mut self, label: &str) -> bool {
        if self.step != Step::Type || !self.vocab.contains(OptionKind::Type, label) {
            return self.ignore("select type");
        }
        self.draft.kind = Some(label.to_string());
        self.draft.category = default_category(&self.vocab, self.layout);
        self.step = Step::Amount;
        self.persist();
        true
    }

    /// Switch which category subsequent amount taps affect
    pub fn select_category(&mut self, label: &str) -> bool {
        if self.step != Step::Amount
            || !self.layout.has_categories()
            || !self.vocab.contains(OptionKind::Category, label)
        {
            return self.ignore("select category");
        }
        self.draft.category = Some(label.to_string());
        self.persist();
        true
    }

    /// Tap an amount bucket
    pub fn increment_amount(&mut self, label: &str) -> bool {
        self.increment_amount_by(label, 1)
    }

    /// Tap an amount bucket `times` times, saving once at the end
    pub fn increment_amount_by(&mut self, label: &str, times: u32) -> bool {
        if times == 0
            || self.step != Step::Amount
            || !self.vocab.contains(OptionKind::Amount, label)
        {
            return self.ignore("increment amount");
        }

        let tally = self.draft.active_tally_mut();
        for _ in 0..times {
            tally.increment(label);
        }
        let key = self.draft.active_key().to_string();
        self.draft.last_selected.insert(key, label.to_string());

        self.persist();
        true
    }

    /// Take one tap back from an amount bucket, never below zero
    ///
    /// Returns `false` when the bucket was already empty.
    pub fn decrement_amount(&mut self, label: &str) -> bool {
        if self.step != Step::Amount
            || !self.vocab.contains(OptionKind::Amount, label)
            || self.draft.active_count(label) == 0
        {
            return self.ignore("decrement amount");
        }

        let remaining = self.draft.active_tally_mut().decrement(label);

        if remaining == 0 && self.draft.active_last_selected().map(String::as_str) == Some(label) {
            let key = self.draft.active_key().to_string();
            self.draft.last_selected.remove(&key);
        }

        self.persist();
        true
    }

    /// Advance from the amount step once at least one count is positive
    pub fn proceed_to_confirm(&mut self) -> bool {
        if !self.can_proceed() {
            return self.ignore("proceed to confirm");
        }
        self.step = Step::Confirm;
        self.persist();
        true
    }

    /// Commit the draft as a new entry and return to the start screen
    pub fn confirm(&mut self) -> bool {
        if !self.can_confirm() {
            return self.ignore("confirm");
        }

        let (Some(age), Some(kind)) = (self.draft.age.clone(), self.draft.kind.clone()) else {
            return self.ignore("confirm");
        };
        let entry = Entry::new(age, kind, self.draft.committed_tallies());
        info!(
            "Committed entry #{}: {} / {} ({} taps)",
            self.entries.len() + 1,
            entry.age,
            entry.kind,
            entry.total()
        );
        self.entries.push(entry);

        self.draft = empty_draft(&self.vocab, self.layout);
        self.step = Step::Start;
        self.persist();
        true
    }

    /// Step back, discarding what the step being left owns
    pub fn back(&mut self) -> bool {
        let Some(previous) = self.step.previous() else {
            return self.ignore("back");
        };

        match self.step {
            Step::Age | Step::Type => {
                self.draft.age = None;
            }
            Step::Amount => {
                self.draft.kind = None;
                self.draft.category = default_category(&self.vocab, self.layout);
                self.draft.clear_tallies();
            }
            Step::Confirm | Step::Start => {}
        }

        self.step = previous;
        self.persist();
        true
    }

    /// Remove the committed entry at `index` (0-based)
    pub fn delete_entry(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            self.ignore("delete entry");
            return None;
        }
        let removed = self.entries.remove(index);
        info!("Deleted entry #{}", index + 1);
        self.persist();
        Some(removed)
    }

    /// Discard the draft and return to the start screen
    ///
    /// Committed entries are left untouched.
    pub fn reset(&mut self) -> bool {
        let empty = empty_draft(&self.vocab, self.layout);
        if self.step == Step::Start && self.draft == empty {
            return self.ignore("reset");
        }
        self.draft = empty;
        self.step = Step::Start;
        self.persist();
        true
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    fn ignore(&self, intent: &str) -> bool {
        debug!("Ignored '{}' at step {}", intent, self.step);
        false
    }

    fn persist(&mut self) {
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = snapshot::save(store.as_mut(), &self.entries, &self.draft, self.step) {
                warn!("Failed to persist wizard state: {}", e);
            }
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        let mut draft = snapshot.draft();
        self.normalize_draft(&mut draft);

        let step = supported_step(snapshot.step, &draft);
        if step != snapshot.step {
            debug!("Restored step {} pulled back to {}", snapshot.step, step);
        }

        // Drop state owned by steps the wizard has not reached
        match step {
            Step::Start | Step::Age => draft = empty_draft(&self.vocab, self.layout),
            Step::Type => {
                let age = draft.age.take();
                draft = empty_draft(&self.vocab, self.layout);
                draft.age = age;
            }
            Step::Amount | Step::Confirm => {}
        }

        self.entries = snapshot.entries;
        self.draft = draft;
        self.step = step;
    }

    /// Fit restored tallies to the configured layout
    fn normalize_draft(&self, draft: &mut Draft) {
        if self.layout.has_categories() {
            draft.tallies.remove(UNCATEGORIZED);
            draft.last_selected.remove(UNCATEGORIZED);
            if draft.category.is_none() {
                draft.category = default_category(&self.vocab, self.layout);
            }
        } else {
            draft.tallies.retain(|key, _| key == UNCATEGORIZED);
            draft.last_selected.retain(|key, _| key == UNCATEGORIZED);
            draft.category = None;
        }
    }
}

fn default_category(vocab: &Vocabulary, layout: Layout) -> Option<String> {
    if layout.has_categories() {
        vocab.first_category().cloned()
    } else {
        None
    }
}

fn empty_draft(vocab: &Vocabulary, layout: Layout) -> Draft {
    Draft {
        category: default_category(vocab, layout),
        ..Draft::default()
    }
}

/// Furthest step, not beyond `wanted`, that the draft supports
fn supported_step(wanted: Step, draft: &Draft) -> Step {
    let mut step = wanted;
    loop {
        let supported = match step {
            Step::Start | Step::Age => true,
            Step::Type => draft.age.is_some(),
            Step::Amount => draft.age.is_some() && draft.kind.is_some(),
            Step::Confirm => draft.is_complete(),
        };
        if supported {
            return step;
        }
        match step.previous() {
            Some(previous) => step = previous,
            None => return Step::Start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TallyError;
    use crate::storage::keys;
    use crate::storage::kv::MemoryStore;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Store whose contents survive the controller, for restart tests
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<HashMap<String, String>>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> TallyResult<Option<String>> {
            Ok(self.0.borrow().get(key).cloned())
        }
        fn set(&mut self, key: &str, value: &str) -> TallyResult<()> {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
        fn remove(&mut self, key: &str) -> TallyResult<()> {
            self.0.borrow_mut().remove(key);
            Ok(())
        }
    }

    /// Store that refuses every write
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> TallyResult<Option<String>> {
            Ok(None)
        }
        fn set(&mut self, key: &str, _value: &str) -> TallyResult<()> {
            Err(TallyError::Storage(format!("read-only: {}", key)))
        }
        fn remove(&mut self, _key: &str) -> TallyResult<()> {
            Ok(())
        }
    }

    /// Store that accepts the availability check, then refuses writes
    #[derive(Default)]
    struct FailingWritesStore {
        writes: usize,
    }

    impl KeyValueStore for FailingWritesStore {
        fn get(&self, _key: &str) -> TallyResult<Option<String>> {
            Ok(None)
        }
        fn set(&mut self, key: &str, _value: &str) -> TallyResult<()> {
            self.writes += 1;
            if self.writes > 1 {
                return Err(TallyError::Storage(format!("disk full: {}", key)));
            }
            Ok(())
        }
        fn remove(&mut self, _key: &str) -> TallyResult<()> {
            Ok(())
        }
    }

    /// Store that counts writes
    struct CountingStore(Rc<Cell<usize>>);

    impl KeyValueStore for CountingStore {
        fn get(&self, _key: &str) -> TallyResult<Option<String>> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> TallyResult<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
        fn remove(&mut self, _key: &str) -> TallyResult<()> {
            Ok(())
        }
    }

    fn flat() -> WizardController {
        WizardController::new(Vocabulary::default(), Layout::Flat)
    }

    fn breakdown() -> WizardController {
        WizardController::new(Vocabulary::default(), Layout::Breakdown)
    }

    fn to_amount_step(wizard: &mut WizardController) {
        assert!(wizard.start());
        assert!(wizard.select_age("20-30"));
        assert!(wizard.select_type("Asian"));
        assert_eq!(wizard.step(), Step::Amount);
    }

    #[test]
    fn test_full_pass_produces_entry_and_csv_row() {
        let mut wizard = flat();
        to_amount_step(&mut wizard);
        assert!(wizard.increment_amount("$5 - 10"));
        assert!(wizard.increment_amount("$5 - 10"));
        assert!(wizard.proceed_to_confirm());
        assert!(wizard.confirm());

        assert_eq!(wizard.entries().len(), 1);
        let entry = &wizard.entries()[0];
        assert_eq!(entry.age, "20-30");
        assert_eq!(entry.kind, "Asian");
        assert_eq!(entry.count(UNCATEGORIZED, "$5 - 10"), 2);
        assert_eq!(entry.total(), 2);

        assert_eq!(wizard.step(), Step::Start);
        assert_eq!(wizard.draft(), &Draft::default());

        let csv = wizard.csv().unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "20-30,Asian,0,2,0,0");
    }

    #[test]
    fn test_select_age_allowed_from_start_and_age() {
        let mut wizard = flat();
        assert!(wizard.select_age("0-10"));
        assert_eq!(wizard.step(), Step::Type);

        let mut wizard = flat();
        wizard.start();
        assert!(!wizard.select_age("not an age"));
        assert_eq!(wizard.step(), Step::Age);
        assert!(wizard.select_age("60+"));
        assert_eq!(wizard.draft().age.as_deref(), Some("60+"));
    }

    #[test]
    fn test_intents_out_of_step_are_ignored() {
        let mut wizard = flat();
        assert!(!wizard.select_type("Asian"));
        assert!(!wizard.increment_amount("$5 - 10"));
        assert!(!wizard.proceed_to_confirm());
        assert!(!wizard.back());
        assert_eq!(wizard.step(), Step::Start);

        wizard.start();
        assert!(!wizard.start());
    }

    #[test]
    fn test_unknown_amount_is_ignored() {
        let mut wizard = flat();
        to_amount_step(&mut wizard);
        assert!(!wizard.increment_amount("$1000+"));
        assert!(!wizard.draft().has_positive_tally());
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        let mut wizard = flat();
        to_amount_step(&mut wizard);
        wizard.increment_amount("$0 - 5");
        assert!(wizard.decrement_amount("$0 - 5"));
        assert!(!wizard.decrement_amount("$0 - 5"));
        assert_eq!(wizard.draft().active_count("$0 - 5"), 0);
        assert!(wizard.draft().active_last_selected().is_none());
    }

    #[test]
    fn test_increment_records_last_selected() {
        let mut wizard = flat();
        to_amount_step(&mut wizard);
        wizard.increment_amount("$0 - 5");
        wizard.increment_amount("$20+");
        assert_eq!(
            wizard.draft().active_last_selected().map(String::as_str),
            Some("$20+")
        );
    }

    #[test]
    fn test_proceed_requires_positive_tally() {
        let mut wizard = flat();
        to_amount_step(&mut wizard);
        assert!(!wizard.proceed_to_confirm());
        wizard.increment_amount("$20+");
        wizard.decrement_amount("$20+");
        assert!(!wizard.proceed_to_confirm());
        assert_eq!(wizard.step(), Step::Amount);
    }

    #[test]
    fn test_confirm_is_noop_when_incomplete() {
        let mut wizard = flat();
        to_amount_step(&mut wizard);
        let before_step = wizard.step();
        let before_draft = wizard.draft().clone();

        assert!(!wizard.confirm());
        assert!(wizard.entries().is_empty());
        assert_eq!(wizard.step(), before_step);
        assert_eq!(wizard.draft(), &before_draft);
    }

    #[test]
    fn test_back_from_amount_clears_type_and_tallies() {
        let mut wizard = breakdown();
        to_amount_step(&mut wizard);
        wizard.select_category("Food");
        wizard.increment_amount("$5 - 10");
        wizard.select_category("Souvenirs");
        wizard.increment_amount("$20+");

        assert!(wizard.back());
        assert_eq!(wizard.step(), Step::Type);
        assert!(wizard.draft().kind.is_none());
        assert!(wizard.draft().tallies.is_empty());
        assert!(wizard.draft().last_selected.is_empty());
        assert_eq!(wizard.draft().category.as_deref(), Some("Clothes"));
        assert_eq!(wizard.draft().age.as_deref(), Some("20-30"));
    }

    #[test]
    fn test_back_from_type_clears_age() {
        let mut wizard = flat();
        wizard.start();
        wizard.select_age("20-30");
        assert!(wizard.back());
        assert_eq!(wizard.step(), Step::Age);
        assert!(wizard.draft().age.is_none());
    }

    #[test]
    fn test_back_from_confirm_keeps_tallies() {
        let mut wizard = flat();
        to_amount_step(&mut wizard);
        wizard.increment_amount("$10 - 20");
        wizard.proceed_to_confirm();
        assert!(wizard.back());
        assert_eq!(wizard.step(), Step::Amount);
        assert_eq!(wizard.draft().active_count("$10 - 20"), 1);
    }

    #[test]
    fn test_breakdown_tallies_per_category() {
        let mut wizard = breakdown();
        to_amount_step(&mut wizard);
        assert_eq!(wizard.draft().category.as_deref(), Some("Clothes"));

        wizard.increment_amount("$0 - 5");
        assert!(wizard.select_category("Food"));
        wizard.increment_amount("$0 - 5");
        wizard.increment_amount("$0 - 5");
        assert!(!wizard.select_category("Jewelry"));

        assert!(wizard.proceed_to_confirm());
        assert!(wizard.confirm());

        let entry = &wizard.entries()[0];
        assert_eq!(entry.count("Clothes", "$0 - 5"), 1);
        assert_eq!(entry.count("Food", "$0 - 5"), 2);
        assert_eq!(wizard.draft().category.as_deref(), Some("Clothes"));
    }

    #[test]
    fn test_select_category_ignored_without_categories() {
        let mut wizard = flat();
        to_amount_step(&mut wizard);
        assert!(!wizard.select_category("Food"));
        assert!(wizard.draft().category.is_none());
    }

    #[test]
    fn test_single_layout_counts_like_flat() {
        let mut wizard = WizardController::new(Vocabulary::default(), Layout::Single);
        to_amount_step(&mut wizard);
        wizard.increment_amount("$5 - 10");
        wizard.increment_amount("$5 - 10");
        wizard.increment_amount("$10 - 20");

        assert_eq!(wizard.draft().active_count("$5 - 10"), 2);
        assert_eq!(wizard.draft().active_count("$10 - 20"), 1);
        assert!(wizard.draft().category.is_none());

        assert!(wizard.decrement_amount("$5 - 10"));
        assert_eq!(wizard.draft().active_count("$5 - 10"), 1);
        assert!(!wizard.decrement_amount("$0 - 5"));

        wizard.proceed_to_confirm();
        assert!(wizard.confirm());
        assert_eq!(
            wizard.csv().unwrap(),
            "Age,Type,$0 - 5,$5 - 10,$10 - 20,$20+\n20-30,Asian,0,1,1,0\n"
        );
    }

    #[test]
    fn test_delete_entry_preserves_order() {
        let mut wizard = flat();
        for age in ["0-10", "10-20", "20-30"] {
            wizard.start();
            wizard.select_age(age);
            wizard.select_type("Local");
            wizard.increment_amount("$20+");
            wizard.proceed_to_confirm();
            wizard.confirm();
        }
        assert_eq!(wizard.entries().len(), 3);

        let removed = wizard.delete_entry(1).unwrap();
        assert_eq!(removed.age, "10-20");
        let ages: Vec<_> = wizard.entries().iter().map(|e| e.age.as_str()).collect();
        assert_eq!(ages, vec!["0-10", "20-30"]);

        assert!(wizard.delete_entry(2).is_none());
        assert_eq!(wizard.entries().len(), 2);
    }

    #[test]
    fn test_reset_keeps_entries() {
        let mut wizard = flat();
        to_amount_step(&mut wizard);
        wizard.increment_amount("$20+");
        wizard.proceed_to_confirm();
        wizard.confirm();

        to_amount_step(&mut wizard);
        wizard.increment_amount("$0 - 5");
        assert!(wizard.reset());
        assert_eq!(wizard.step(), Step::Start);
        assert_eq!(wizard.draft(), &Draft::default());
        assert_eq!(wizard.entries().len(), 1);
        assert!(!wizard.reset());
    }

    #[test]
    fn test_state_survives_restart() {
        let store = SharedStore::default();

        let mut wizard = WizardController::open(
            Box::new(store.clone()),
            Vocabulary::default(),
            Layout::Flat,
        );
        assert!(wizard.is_persistent());
        to_amount_step(&mut wizard);
        wizard.increment_amount("$5 - 10");
        wizard.proceed_to_confirm();
        wizard.confirm();
        to_amount_step(&mut wizard);
        wizard.increment_amount("$20+");

        let restored =
            WizardController::open(Box::new(store), Vocabulary::default(), Layout::Flat);
        assert_eq!(restored.entries().len(), 1);
        assert_eq!(restored.step(), Step::Amount);
        assert_eq!(restored.draft().age.as_deref(), Some("20-30"));
        assert_eq!(restored.draft().active_count("$20+"), 1);
    }

    #[test]
    fn test_restore_pulls_back_inconsistent_step() {
        let store = SharedStore::default();
        {
            let mut seed = store.clone();
            seed.set(keys::STEP, "\"confirm\"").unwrap();
            seed.set(keys::FORM, r#"{"age": "20-30", "type": "Asian"}"#).unwrap();
            seed.set(keys::TALLIES, r#"{"$99": 4}"#).unwrap();
        }

        let wizard = WizardController::open(Box::new(store), Vocabulary::default(), Layout::Flat);
        assert_eq!(wizard.step(), Step::Amount);
        assert!(!wizard.draft().has_positive_tally());
    }

    #[test]
    fn test_restore_at_start_discards_stray_draft() {
        let mut store = MemoryStore::new();
        store.set(keys::STEP, "\"start\"").unwrap();
        store.set(keys::FORM, r#"{"age": "20-30"}"#).unwrap();

        let wizard = WizardController::open(Box::new(store), Vocabulary::default(), Layout::Flat);
        assert_eq!(wizard.step(), Step::Start);
        assert!(wizard.draft().age.is_none());
    }

    #[test]
    fn test_unavailable_store_falls_back_to_memory() {
        let mut wizard =
            WizardController::open(Box::new(ReadOnlyStore), Vocabulary::default(), Layout::Flat);
        assert!(!wizard.is_persistent());
        to_amount_step(&mut wizard);
        wizard.increment_amount("$0 - 5");
        assert_eq!(wizard.draft().active_count("$0 - 5"), 1);
    }

    #[test]
    fn test_confirm_is_noop_without_type() {
        let mut wizard = flat();
        wizard.start();
        wizard.select_age("20-30");

        assert!(!wizard.confirm());
        assert!(wizard.entries().is_empty());
        assert_eq!(wizard.step(), Step::Type);
        assert_eq!(wizard.draft().age.as_deref(), Some("20-30"));
    }

    #[test]
    fn test_confirm_is_noop_when_restored_form_lacks_age_or_type() {
        for form in [r#"{"type": "Asian"}"#, r#"{"age": "20-30"}"#] {
            let mut store = MemoryStore::new();
            store.set(keys::STEP, "\"confirm\"").unwrap();
            store.set(keys::FORM, form).unwrap();
            store.set(keys::TALLIES, r#"{"$5 - 10": 2}"#).unwrap();

            let mut wizard =
                WizardController::open(Box::new(store), Vocabulary::default(), Layout::Flat);
            let step = wizard.step();

            assert!(!wizard.confirm(), "confirmed with form {}", form);
            assert!(wizard.entries().is_empty());
            assert_eq!(wizard.step(), step);
        }
    }

    #[test]
    fn test_failed_save_keeps_in_memory_change() {
        let mut wizard = WizardController::open(
            Box::new(FailingWritesStore::default()),
            Vocabulary::default(),
            Layout::Flat,
        );
        assert!(wizard.is_persistent());

        assert!(wizard.start());
        assert!(wizard.select_age("20-30"));
        assert_eq!(wizard.step(), Step::Type);
        assert_eq!(wizard.draft().age.as_deref(), Some("20-30"));
        assert!(wizard.is_persistent());
    }

    #[test]
    fn test_repeated_taps_save_once() {
        let writes = Rc::new(Cell::new(0));
        let mut wizard = WizardController::open(
            Box::new(CountingStore(Rc::clone(&writes))),
            Vocabulary::default(),
            Layout::Flat,
        );
        to_amount_step(&mut wizard);

        // One save writes the five state keys
        let before = writes.get();
        assert!(wizard.increment_amount_by("$5 - 10", 4));
        assert_eq!(wizard.draft().active_count("$5 - 10"), 4);
        assert_eq!(writes.get() - before, 5);

        assert!(!wizard.increment_amount_by("$5 - 10", 0));
        assert_eq!(writes.get() - before, 5);
    }
}
