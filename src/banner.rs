use crate::storage::KeyValueStore;

const DISMISSED: &str = "true";

/// Whether the legal notice was closed on an earlier visit.
pub fn is_dismissed(storage: &impl KeyValueStore, key: &str) -> bool {
    match storage.get(key) {
        Ok(value) => value.as_deref() == Some(DISMISSED),
        Err(e) => {
            log::warn!("Failed to read legal banner flag: {}", e);
            false
        }
    }
}

/// Remembers that the notice was closed. The banner hides either way.
pub fn dismiss(storage: &impl KeyValueStore, key: &str) {
    if let Err(e) = storage.set(key, DISMISSED) {
        log::warn!("Failed to persist legal banner flag: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn dismiss_is_remembered() {
        let storage = MemoryStore::new();
        assert!(!is_dismissed(&storage, "k"));
        dismiss(&storage, "k");
        assert!(is_dismissed(&storage, "k"));
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn only_the_literal_true_counts() {
        let storage = MemoryStore::new().with_item("k", "1");
        assert!(!is_dismissed(&storage, "k"));
    }

    #[test]
    fn failed_write_is_absorbed() {
        let storage = MemoryStore::read_only();
        dismiss(&storage, "k");
        assert!(!is_dismissed(&storage, "k"));
    }
}
