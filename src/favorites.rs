use std::collections::BTreeSet;

/// Outcome of toggling a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

impl FavoriteChange {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Added => "added to",
            Self::Removed => "removed from",
        }
    }
}

/// Ids of the systems the user starred this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: BTreeSet<u32>,
}

impl FavoriteSet {
    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn toggle(&mut self, id: u32) -> FavoriteChange {
        if self.ids.remove(&id) {
            FavoriteChange::Removed
        } else {
            self.ids.insert(id);
            FavoriteChange::Added
        }
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<u32> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_toggle_reports_change() {
        let mut favs = FavoriteSet::from_iter([1, 2]);
        assert_eq!(favs.toggle(3), FavoriteChange::Added);
        assert!(favs.contains(3));
        assert_eq!(favs.toggle(1), FavoriteChange::Removed);
        assert!(!favs.contains(1));
        assert_eq!(favs.ids().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let favs = FavoriteSet::from_iter([5, 5, 1]);
        assert_eq!(favs.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_double_toggle_is_identity(
            start in proptest::collection::btree_set(0u32..10, 0..10),
            id in 0u32..12,
        ) {
            let original = FavoriteSet::from_iter(start);
            let mut favs = original.clone();
            let first = favs.toggle(id);
            let second = favs.toggle(id);
            prop_assert_ne!(first, second);
            prop_assert_eq!(favs, original);
        }
    }
}
