//! The user's favorites set.
//!
//! [`FavoritesStore`] is an explicitly owned container: the caller creates it
//! and hands it to [`AppState::new`](crate::app::AppState::new), so tests and
//! alternative front-ends can start from any set they like. It lives only for
//! the session and is never written to disk.
//!
//! Every mutation reports whether the set actually changed. The event handler
//! uses that flag to decide whether views showing favorite markers need to be
//! re-rendered.

use crate::domain::MediaId;

/// Set of favorite media identifiers, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesStore {
    ids: Vec<MediaId>,
}

impl FavoritesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing identifiers, dropping duplicates.
    ///
    /// ```
    /// use yamiyume::app::FavoritesStore;
    ///
    /// let store = FavoritesStore::from_ids([3, 1, 3]);
    /// assert_eq!(store.ids(), &[3, 1]);
    /// ```
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = MediaId>) -> Self {
        let mut store = Self::new();
        for id in ids {
            store.add(id);
        }
        store
    }

    #[must_use]
    pub fn contains(&self, id: MediaId) -> bool {
        self.ids.contains(&id)
    }

    /// Adds `id` when absent, removes it when present.
    ///
    /// Returns `true` when the id is a favorite afterwards.
    pub fn toggle(&mut self, id: MediaId) -> bool {
        if self.remove(id) {
            tracing::debug!(id, "favorite removed");
            false
        } else {
            self.ids.push(id);
            tracing::debug!(id, count = self.ids.len(), "favorite added");
            true
        }
    }

    /// Adds `id`. Returns `false` if it was already a favorite.
    pub fn add(&mut self, id: MediaId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id`. Returns `false` if it was not a favorite.
    pub fn remove(&mut self, id: MediaId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&existing| existing != id);
        self.ids.len() != before
    }

    #[must_use]
    pub fn ids(&self) -> &[MediaId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_parity() {
        let mut store = FavoritesStore::new();
        for n in 1..=5 {
            store.toggle(42);
            assert_eq!(store.contains(42), n % 2 == 1, "after {n} toggles");
        }
    }

    #[test]
    fn remove_clears_membership() {
        let mut store = FavoritesStore::from_ids([1, 2, 3]);
        assert!(store.remove(2));
        assert!(!store.contains(2));
        assert!(!store.remove(2));
        assert_eq!(store.ids(), &[1, 3]);
    }

    #[test]
    fn add_never_duplicates() {
        let mut store = FavoritesStore::new();
        assert!(store.add(7));
        assert!(!store.add(7));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn toggle_keeps_insertion_order() {
        let mut store = FavoritesStore::new();
        store.toggle(5);
        store.toggle(9);
        store.toggle(1);
        store.toggle(9);
        store.toggle(9);
        assert_eq!(store.ids(), &[5, 1, 9]);
    }

    #[test]
    fn new_store_is_empty() {
        let store = FavoritesStore::new();
        assert!(store.is_empty());
        assert!(!store.contains(1));
    }
}
