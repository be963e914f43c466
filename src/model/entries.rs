//! Ordered, duplicate-free collections backing each command.

use std::fmt;

use crate::error::CliError;

/// An element that can be registered on a command.
pub trait Keyed {
    /// Sort key; collections are kept ascending by it.
    type Key: Ord + ?Sized;

    /// Kind of element named in [`CliError::NotUnique`].
    const KIND: &'static str;

    fn key(&self) -> &Self::Key;

    /// Returns true if `other` may not coexist with `self` on one command.
    fn conflicts_with(&self, other: &Self) -> bool {
        self.key() == other.key()
    }

    /// Human readable identity used in error messages.
    fn display_key(&self) -> String;
}

/// Insertion-sorted sequence that rejects conflicting elements.
pub struct Entries<T> {
    items: Vec<T>,
}

impl<T: Keyed> Entries<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Inserts `item` at its sorted position.
    ///
    /// The whole collection is checked for conflicts, not only the
    /// neighbours of the insertion point.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NotUnique`] if any registered element conflicts
    /// with `item`; the collection is left unchanged.
    pub fn insert(&mut self, item: T) -> Result<(), CliError> {
        let mut position = None;

        for (index, existing) in self.items.iter().enumerate() {
            if existing.conflicts_with(&item) {
                return Err(CliError::NotUnique {
                    kind: T::KIND,
                    key: item.display_key(),
                });
            }

            if position.is_none() && existing.key() > item.key() {
                position = Some(index);
            }
        }

        let position = position.unwrap_or(self.items.len());
        self.items.insert(position, item);
        Ok(())
    }

    /// Inserts each item in turn, stopping at the first failure.
    ///
    /// Items inserted before the failure stay registered.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`Entries::insert`].
    pub fn insert_all(&mut self, items: impl IntoIterator<Item = T>) -> Result<(), CliError> {
        items.into_iter().try_for_each(|item| self.insert(item))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the element whose key equals `key`.
    #[must_use]
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }
}

impl<T: Keyed> Default for Entries<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'e, T> IntoIterator for &'e Entries<T> {
    type Item = &'e T;
    type IntoIter = std::slice::Iter<'e, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Entries<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Minimal element: sorted by name, conflicting on name or alias.
    #[derive(Debug)]
    struct Named {
        name: &'static str,
        alias: Option<&'static str>,
    }

    fn named(name: &'static str) -> Named {
        Named { name, alias: None }
    }

    impl Keyed for Named {
        type Key = str;
        const KIND: &'static str = "entry";

        fn key(&self) -> &str {
            self.name
        }

        fn conflicts_with(&self, other: &Self) -> bool {
            self.name == other.name || (self.alias.is_some() && self.alias == other.alias)
        }

        fn display_key(&self) -> String {
            self.name.to_string()
        }
    }

    fn keys(entries: &Entries<Named>) -> Vec<&str> {
        entries.iter().map(|e| e.name).collect()
    }

    #[test]
    fn insert_keeps_sorted_order() {
        let mut entries = Entries::new();
        for name in ["m", "c", "x", "a", "n"] {
            entries.insert(named(name)).unwrap();
        }
        assert_eq!(keys(&entries), ["a", "c", "m", "n", "x"]);
    }

    #[test]
    fn insert_rejects_equal_key() {
        let mut entries = Entries::new();
        entries.insert(named("init")).unwrap();
        let err = entries.insert(named("init")).unwrap_err();
        assert!(matches!(err, CliError::NotUnique { kind: "entry", ref key } if key == "init"));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn conflicts_past_the_insertion_point_are_found() {
        let mut entries = Entries::new();
        entries.insert(named("a")).unwrap();
        entries
            .insert(Named {
                name: "z",
                alias: Some("dup"),
            })
            .unwrap();

        // Sorts before "z" but conflicts with it through the alias.
        let err = entries
            .insert(Named {
                name: "m",
                alias: Some("dup"),
            })
            .unwrap_err();
        assert!(matches!(err, CliError::NotUnique { .. }));
        assert_eq!(keys(&entries), ["a", "z"]);
    }

    #[test]
    fn insert_all_commits_prefix_before_failure() {
        let mut entries = Entries::new();
        let result = entries.insert_all([named("b"), named("a"), named("b"), named("c")]);
        assert!(result.is_err());
        assert_eq!(keys(&entries), ["a", "b"]);
    }

    #[test]
    fn get_finds_by_key() {
        let mut entries = Entries::new();
        entries.insert_all([named("init"), named("longlong")]).unwrap();
        assert_eq!(entries.get("longlong").map(|e| e.name), Some("longlong"));
        assert!(entries.get("bogus").is_none());
        assert!(!entries.is_empty());
        assert_eq!(entries.as_slice().len(), 2);
    }
}
