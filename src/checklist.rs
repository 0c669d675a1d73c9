use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Step id → completion flag, as persisted.
///
/// Values are kept as raw JSON so that whatever an older page version wrote
/// survives a round trip; only a literal `true` counts as completed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ChecklistState(BTreeMap<String, Value>);

impl ChecklistState {
    pub fn is_completed(&self, step_id: &str) -> bool {
        matches!(self.0.get(step_id), Some(Value::Bool(true)))
    }

    /// Flips a step and returns the new flag. Absent counts as `false`.
    pub fn toggle(&mut self, step_id: &str) -> bool {
        let next = !self.0.get(step_id).map(is_truthy).unwrap_or(false);
        self.0.insert(step_id.to_string(), Value::Bool(next));
        next
    }

    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|v| **v == Value::Bool(true)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// JavaScript truthiness, so stray non-boolean values flip the way `!value` would.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Aggregate progress over the rendered checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistStats {
    pub completed: usize,
    pub total: usize,
    /// `None` when there is nothing to measure against (`total == 0`).
    pub percentage: Option<u32>,
}

/// Reads the persisted state. Any failure yields an empty state.
pub fn load(storage: &impl KeyValueStore, key: &str) -> ChecklistState {
    match try_load(storage, key) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Failed to load checklist state: {}", e);
            ChecklistState::default()
        }
    }
}

fn try_load(storage: &impl KeyValueStore, key: &str) -> Result<ChecklistState, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(ChecklistState::default());
    };
    if raw.is_empty() {
        return Ok(ChecklistState::default());
    }
    Ok(serde_json::from_str(&raw)?)
}

fn save(storage: &impl KeyValueStore, key: &str, state: &ChecklistState) -> Result<(), StorageError> {
    let raw = serde_json::to_string(state)?;
    storage.set(key, &raw)
}

/// Computes progress. `total_steps` is what the page currently renders, not
/// the number of stored keys.
pub fn stats(state: &ChecklistState, total_steps: usize) -> ChecklistStats {
    let completed = state.completed_count();
    let percentage = (total_steps > 0)
        .then(|| ((completed as f64 / total_steps as f64) * 100.0).round() as u32);
    ChecklistStats {
        completed,
        total: total_steps,
        percentage,
    }
}

/// Checklist state bound to its storage slot.
pub struct ChecklistStore<S> {
    storage: S,
    key: String,
    state: ChecklistState,
}

impl<S: KeyValueStore> ChecklistStore<S> {
    /// Loads the saved state once. Later reads are served from memory.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = load(&storage, &key);
        Self {
            storage,
            key,
            state,
        }
    }

    pub fn state(&self) -> &ChecklistState {
        &self.state
    }

    pub fn is_completed(&self, step_id: &str) -> bool {
        self.state.is_completed(step_id)
    }

    /// Flips a step and writes the whole map back. A failed write is logged;
    /// the in-memory flip stands.
    pub fn toggle(&mut self, step_id: &str) -> bool {
        let next = self.state.toggle(step_id);
        if let Err(e) = save(&self.storage, &self.key, &self.state) {
            log::warn!("Failed to save checklist state: {}", e);
        }
        next
    }

    pub fn stats(&self, total_steps: usize) -> ChecklistStats {
        stats(&self.state, total_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const KEY: &str = "steps";

    #[test]
    fn untouched_steps_are_not_completed() {
        let store = ChecklistStore::open(MemoryStore::new(), KEY);
        assert!(!store.is_completed("e-devlet"));
        assert!(store.state().is_empty());
    }

    #[test]
    fn toggle_parity_decides_the_flag() {
        let mut store = ChecklistStore::open(MemoryStore::new(), KEY);
        assert!(store.toggle("a"));
        assert!(!store.toggle("a"));
        assert!(!store.is_completed("a"));
        assert!(store.toggle("a"));
        assert!(store.is_completed("a"));
    }

    #[test]
    fn toggle_writes_explicit_booleans_and_persists() {
        let storage = MemoryStore::new();
        let mut store = ChecklistStore::open(&storage, KEY);
        store.toggle("a");
        store.toggle("b");
        store.toggle("b");
        assert_eq!(
            storage.get(KEY).unwrap().as_deref(),
            Some(r#"{"a":true,"b":false}"#)
        );

        let reopened = ChecklistStore::open(&storage, KEY);
        assert!(reopened.is_completed("a"));
        assert!(!reopened.is_completed("b"));
    }

    #[test]
    fn corrupt_or_non_object_storage_loads_empty() {
        for raw in ["{not json", "null", "[true]", "42", ""] {
            let storage = MemoryStore::new().with_item(KEY, raw);
            let store = ChecklistStore::open(storage, KEY);
            assert!(store.state().is_empty(), "raw value {:?}", raw);
        }
    }

    #[test]
    fn failed_write_keeps_in_memory_toggle() {
        let storage = MemoryStore::read_only();
        let mut store = ChecklistStore::open(&storage, KEY);
        assert!(store.toggle("a"));
        assert!(store.is_completed("a"));
        assert_eq!(storage.get(KEY).unwrap(), None);
    }

    #[test]
    fn non_boolean_values_never_count_as_completed() {
        let storage = MemoryStore::new().with_item(KEY, r#"{"a":1,"b":"yes","c":true,"d":0}"#);
        let mut store = ChecklistStore::open(storage, KEY);
        assert!(!store.is_completed("a"));
        assert!(!store.is_completed("b"));
        assert!(store.is_completed("c"));
        assert_eq!(store.stats(4).completed, 1);

        // `!1` is false, `!0` is true.
        assert!(!store.toggle("a"));
        assert!(store.toggle("d"));
    }

    #[test]
    fn stats_rounds_half_up() {
        let mut state = ChecklistState::default();
        state.toggle("a");
        assert_eq!(stats(&state, 3).percentage, Some(33));
        state.toggle("b");
        assert_eq!(stats(&state, 3).percentage, Some(67));
        assert_eq!(stats(&state, 8).percentage, Some(25));
        assert_eq!(stats(&state, 16).percentage, Some(13));
    }

    #[test]
    fn stats_with_no_steps_has_no_percentage() {
        let state = ChecklistState::default();
        let s = stats(&state, 0);
        assert_eq!(s.completed, 0);
        assert_eq!(s.total, 0);
        assert_eq!(s.percentage, None);
    }

    #[test]
    fn percentage_stays_within_bounds() {
        for total in 1..=12usize {
            let mut state = ChecklistState::default();
            for done in 0..=total {
                let p = stats(&state, total).percentage.unwrap();
                assert!(p <= 100, "{}/{} gave {}", done, total, p);
                state.toggle(&format!("step-{}", done));
            }
        }
    }
}
