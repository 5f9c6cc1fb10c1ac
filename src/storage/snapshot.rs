//! Persisted wizard snapshot
//!
//! Each key is decoded independently by its own parser. A parser takes the
//! raw stored string (if any) and returns its key's default merged with every
//! field it recognizes, so a stale or corrupted value for one key never
//! prevents the others from loading.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TallyResult;
use crate::models::{CategoryTallies, Draft, Entry, OptionKind, Step, Tally, Vocabulary, UNCATEGORIZED};

use super::keys;
use super::kv::KeyValueStore;

/// Draft form fields as persisted under the `form` key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub age: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
}

/// Everything the wizard restores on startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub entries: Vec<Entry>,
    pub tallies: CategoryTallies,
    pub form: FormSnapshot,
    pub step: Step,
    pub last_selected: BTreeMap<String, String>,
}

impl Snapshot {
    /// Load every key from the store, falling back per key on failure
    pub fn load(store: &dyn KeyValueStore, vocab: &Vocabulary) -> Self {
        let read = |key: &str| match store.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read '{}' from store: {}", key, e);
                None
            }
        };

        Self {
            entries: parse_entries(read(keys::ENTRIES).as_deref(), vocab),
            tallies: parse_tallies(read(keys::TALLIES).as_deref(), vocab),
            form: parse_form(read(keys::FORM).as_deref(), vocab),
            step: parse_step(read(keys::STEP).as_deref()),
            last_selected: parse_last_selected(read(keys::LAST_SELECTED).as_deref(), vocab),
        }
    }

    /// Rebuild the draft these fields describe
    pub fn draft(&self) -> Draft {
        Draft {
            age: self.form.age.clone(),
            kind: self.form.kind.clone(),
            category: self.form.category.clone(),
            tallies: self.tallies.clone(),
            last_selected: self.last_selected.clone(),
        }
    }
}

/// Write the full wizard state to the store
///
/// Every key is attempted; the first failure is returned.
pub fn save(
    store: &mut dyn KeyValueStore,
    entries: &[Entry],
    draft: &Draft,
    step: Step,
) -> TallyResult<()> {
    let form = FormSnapshot {
        age: draft.age.clone(),
        kind: draft.kind.clone(),
        category: draft.category.clone(),
    };

    let values = [
        (keys::ENTRIES, serde_json::to_string(entries)?),
        (keys::TALLIES, serde_json::to_string(&draft.tallies)?),
        (keys::FORM, serde_json::to_string(&form)?),
        (keys::STEP, serde_json::to_string(&step)?),
        (keys::LAST_SELECTED, serde_json::to_string(&draft.last_selected)?),
    ];

    let mut first_error = None;
    for (key, value) in values.iter() {
        if let Err(e) = store.set(key, value) {
            warn!("Failed to write '{}' to store: {}", key, e);
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn parse_value(raw: Option<&str>, key: &str) -> Option<Value> {
    let raw = raw?;
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring malformed '{}' value: {}", key, e);
            None
        }
    }
}

/// Coerce a stored count to a non-negative integer
///
/// Negative, fractional and non-numeric values become 0.
fn parse_count(value: &Value) -> u32 {
    let count = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            })
            .unwrap_or(0),
        _ => 0,
    };
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Read one bucket map, keeping known amount labels with positive counts
fn parse_bucket_map(map: &Map<String, Value>, vocab: &Vocabulary) -> Tally {
    let mut tally = Tally::new();
    for (label, value) in map {
        if !vocab.contains(OptionKind::Amount, label) {
            debug!("Dropping unknown amount bucket '{}'", label);
        }
        tally.set(label, parse_count(value));
    }
    tally.retain_known(&vocab.amounts);
    tally
}

/// Tally shapes accepted: flat `{amount: n}` or nested `{category: {amount: n}}`
fn tallies_from_value(value: &Value, vocab: &Vocabulary) -> CategoryTallies {
    let mut tallies = CategoryTallies::new();
    let Some(map) = value.as_object() else {
        return tallies;
    };

    let mut flat = Map::new();
    for (key, value) in map {
        match value {
            Value::Object(nested) => {
                if key != UNCATEGORIZED && !vocab.contains(OptionKind::Category, key) {
                    debug!("Dropping unknown tally category '{}'", key);
                    continue;
                }
                let tally = parse_bucket_map(nested, vocab);
                if !tally.is_empty() {
                    tallies.insert(key.clone(), tally);
                }
            }
            other => {
                flat.insert(key.clone(), other.clone());
            }
        }
    }

    if !flat.is_empty() {
        let tally = parse_bucket_map(&flat, vocab);
        if !tally.is_empty() {
            let slot = tallies.entry(UNCATEGORIZED.to_string()).or_default();
            for (label, count) in tally.iter() {
                let merged = slot.get(label).saturating_add(*count);
                slot.set(label, merged);
            }
        }
    }

    tallies
}

/// Parse the `tallies` key
pub fn parse_tallies(raw: Option<&str>, vocab: &Vocabulary) -> CategoryTallies {
    parse_value(raw, keys::TALLIES)
        .map(|value| tallies_from_value(&value, vocab))
        .unwrap_or_default()
}

fn known_label(value: Option<&Value>, kind: OptionKind, vocab: &Vocabulary) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|label| vocab.contains(kind, label))
        .map(str::to_string)
}

/// Parse the `form` key
pub fn parse_form(raw: Option<&str>, vocab: &Vocabulary) -> FormSnapshot {
    let Some(Value::Object(map)) = parse_value(raw, keys::FORM) else {
        return FormSnapshot::default();
    };

    FormSnapshot {
        age: known_label(map.get("age"), OptionKind::Age, vocab),
        kind: known_label(map.get("type"), OptionKind::Type, vocab),
        category: known_label(map.get("category"), OptionKind::Category, vocab),
    }
}

/// Parse the `step` key
pub fn parse_step(raw: Option<&str>) -> Step {
    let Some(raw) = raw else {
        return Step::default();
    };

    // Accept both a JSON string and a bare identifier
    let name = match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(s)) => s,
        _ => raw.to_string(),
    };
    name.parse().unwrap_or_else(|e| {
        warn!("Ignoring persisted step: {}", e);
        Step::default()
    })
}

/// Parse the `last_selected` key
pub fn parse_last_selected(raw: Option<&str>, vocab: &Vocabulary) -> BTreeMap<String, String> {
    let mut selected = BTreeMap::new();

    match parse_value(raw, keys::LAST_SELECTED) {
        Some(Value::Object(map)) => {
            for (scope, value) in map {
                if let Some(amount) = known_label(Some(&value), OptionKind::Amount, vocab) {
                    selected.insert(scope, amount);
                }
            }
        }
        // A single highlighted amount from a layout without categories
        Some(value @ Value::String(_)) => {
            if let Some(amount) = known_label(Some(&value), OptionKind::Amount, vocab) {
                selected.insert(UNCATEGORIZED.to_string(), amount);
            }
        }
        _ => {}
    }

    selected
}

fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

fn entry_from_value(value: &Value, vocab: &Vocabulary, loaded_at: DateTime<Utc>) -> Option<Entry> {
    let map = value.as_object()?;

    let text = |field: &str| {
        map.get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let age = text("age")?;
    let kind = text("type")?;

    let tallies = ["tallies", "tally", "amounts"]
        .iter()
        .find_map(|field| map.get(*field))
        .map(|value| tallies_from_value(value, vocab))
        .unwrap_or_default();

    let created_at = parse_timestamp(map.get("created_at").or_else(|| map.get("timestamp")))
        .unwrap_or(loaded_at);

    Some(Entry {
        age,
        kind,
        tallies,
        created_at,
    })
}

/// Parse the `entries` key
pub fn parse_entries(raw: Option<&str>, vocab: &Vocabulary) -> Vec<Entry> {
    let Some(Value::Array(items)) = parse_value(raw, keys::ENTRIES) else {
        return Vec::new();
    };

    let loaded_at = Utc::now();
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let entry = entry_from_value(item, vocab, loaded_at);
            if entry.is_none() {
                warn!("Skipping malformed stored entry at position {}", i + 1);
            }
            entry
        })
        .collect()
}
