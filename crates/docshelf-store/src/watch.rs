//! Watched flags, persisted as the set of watched identifiers.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use docshelf_core::{Article, DocshelfError, Result};

use crate::kv::KeyValueStore;

/// Key holding the JSON array of watched identifiers.
pub const WATCHED_KEY: &str = "watchedArticles";

/// Identifier to watched flag, backed by a [`KeyValueStore`].
///
/// The set is read once in [`WatchStateStore::load`] and written in full on
/// every toggle. Identifiers never toggled are unwatched.
#[derive(Debug)]
pub struct WatchStateStore<S> {
    store: S,
    watched: BTreeSet<String>,
}

impl<S: KeyValueStore> WatchStateStore<S> {
    /// Read the persisted set. A value that is not a JSON array of strings
    /// is logged and treated as empty.
    pub fn load(store: S) -> Self {
        let watched = match store.get(WATCHED_KEY) {
            None => BTreeSet::new(),
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    warn!(key = WATCHED_KEY, error = %e, "watched list is corrupt; treating as empty");
                    BTreeSet::new()
                }
            },
        };
        debug!(count = watched.len(), "watch state loaded");
        Self { store, watched }
    }

    #[must_use]
    pub fn is_watched(&self, identifier: &str) -> bool {
        self.watched.contains(identifier)
    }

    /// Flip the flag for `identifier` and persist the whole set.
    ///
    /// Returns the new flag. If persisting fails the in-memory flag is
    /// restored, so state and store never disagree.
    ///
    /// # Errors
    ///
    /// Propagates the store's write error.
    pub fn toggle(&mut self, identifier: &str) -> Result<bool> {
        let now_watched = if self.watched.remove(identifier) {
            false
        } else {
            self.watched.insert(identifier.to_string());
            true
        };

        if let Err(e) = self.persist() {
            if now_watched {
                self.watched.remove(identifier);
            } else {
                self.watched.insert(identifier.to_string());
            }
            return Err(e);
        }
        debug!(identifier, watched = now_watched, "watch state toggled");
        Ok(now_watched)
    }

    /// Set each article's `watched` flag from the store.
    pub fn hydrate(&self, articles: &mut [Article]) {
        for article in articles.iter_mut() {
            article.watched = self.is_watched(&article.identifier);
        }
    }

    /// Watched identifiers in sorted order.
    pub fn watched(&self) -> impl Iterator<Item = &str> {
        self.watched.iter().map(String::as_str)
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<()> {
        let ids: Vec<&String> = self.watched.iter().collect();
        let json =
            serde_json::to_string(&ids).map_err(|e| DocshelfError::Serialization(e.to_string()))?;
        self.store.set(WATCHED_KEY, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{JsonFileStore, MemoryStore};
    use chrono::Utc;
    use docshelf_core::DateSource;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&mut self, _key: &str, _value: String) -> Result<()> {
            Err(DocshelfError::Store("read-only".to_string()))
        }
        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(DocshelfError::Store("read-only".to_string()))
        }
    }

    #[test]
    fn absent_identifiers_are_unwatched() {
        let state = WatchStateStore::load(MemoryStore::new());
        assert!(!state.is_watched("a.htm"));
    }

    #[test]
    fn toggle_flips_and_persists_full_set() {
        let mut store = MemoryStore::new();
        let mut state = WatchStateStore::load(&mut store);
        assert!(state.toggle("b.htm").unwrap());
        assert!(state.toggle("a.htm").unwrap());
        assert!(state.is_watched("a.htm"));
        drop(state);

        assert_eq!(
            store.get(WATCHED_KEY).as_deref(),
            Some(r#"["a.htm","b.htm"]"#)
        );
    }

    #[test]
    fn toggle_twice_restores_state_and_persisted_set() {
        let mut store = MemoryStore::new();
        store.set(WATCHED_KEY, r#"["x.htm"]"#.to_string()).unwrap();
        let mut state = WatchStateStore::load(&mut store);

        assert!(state.toggle("y.htm").unwrap());
        assert!(!state.toggle("y.htm").unwrap());
        assert!(!state.is_watched("y.htm"));
        assert!(state.is_watched("x.htm"));
        drop(state);
        assert_eq!(store.get(WATCHED_KEY).as_deref(), Some(r#"["x.htm"]"#));
    }

    #[test]
    fn corrupt_list_is_treated_as_empty() {
        let mut store = MemoryStore::new();
        store.set(WATCHED_KEY, "{\"oops\": 1}".to_string()).unwrap();
        let mut state = WatchStateStore::load(store);
        assert_eq!(state.watched().count(), 0);
        assert!(state.toggle("a.htm").unwrap());
        assert_eq!(
            state.into_inner().get(WATCHED_KEY).as_deref(),
            Some(r#"["a.htm"]"#)
        );
    }

    #[test]
    fn failed_write_leaves_state_unchanged() {
        let mut state = WatchStateStore::load(FailingStore);
        assert!(state.toggle("a.htm").is_err());
        assert!(!state.is_watched("a.htm"));
    }

    #[test]
    fn hydrate_sets_flags_from_store() {
        let mut store = MemoryStore::new();
        store.set(WATCHED_KEY, r#"["b.htm"]"#.to_string()).unwrap();
        let state = WatchStateStore::load(store);

        let mut articles = vec![
            Article::new("a.htm", Utc::now(), DateSource::Now),
            Article::new("b.htm", Utc::now(), DateSource::Now),
        ];
        articles[0].watched = true;
        state.hydrate(&mut articles);
        assert!(!articles[0].watched);
        assert!(articles[1].watched);
    }

    #[test]
    fn watched_set_survives_reopen_of_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = WatchStateStore::load(JsonFileStore::open(&path).unwrap());
        state.toggle("A Crash Course in Docker.htm").unwrap();

        let reopened = WatchStateStore::load(JsonFileStore::open(&path).unwrap());
        assert!(reopened.is_watched("A Crash Course in Docker.htm"));
        assert!(!reopened.is_watched("API Gateway.htm"));
    }
}
