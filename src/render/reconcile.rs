//! Keyed enter/update/exit reconciliation of retained shape state.

use std::hash::Hash;

use indexmap::IndexMap;

/// Counts from one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

impl ReconcileStats {
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            entered: self.entered + other.entered,
            updated: self.updated + other.updated,
            exited: self.exited + other.exited,
        }
    }
}

/// Ordered map from a stable key to owned shape state.
///
/// Surviving entries keep their position, new entries append at the end.
/// Iteration order is paint order.
#[derive(Debug, Clone)]
pub struct KeyedSet<K, S> {
    entries: IndexMap<K, S>,
}

impl<K, S> Default for KeyedSet<K, S> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq, S> KeyedSet<K, S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the set in line with `items`.
    ///
    /// Keys absent from `items` are dropped, known keys go through `update`,
    /// unknown keys are built with `create`. If a key repeats in `items` only
    /// its first occurrence counts.
    pub fn reconcile<D, I, C, U>(
        &mut self,
        items: I,
        mut create: C,
        mut update: U,
    ) -> ReconcileStats
    where
        I: IntoIterator<Item = (K, D)>,
        C: FnMut(&K, D) -> S,
        U: FnMut(&K, &mut S, D),
    {
        let mut incoming: IndexMap<K, D> = IndexMap::new();
        for (key, datum) in items {
            incoming.entry(key).or_insert(datum);
        }

        let before = self.entries.len();
        self.entries.retain(|key, _| incoming.contains_key(key));
        let mut stats = ReconcileStats {
            exited: before - self.entries.len(),
            ..ReconcileStats::default()
        };

        for (key, datum) in incoming {
            if let Some(state) = self.entries.get_mut(&key) {
                update(&key, state, datum);
                stats.updated += 1;
            } else {
                let state = create(&key, datum);
                self.entries.insert(key, state);
                stats.entered += 1;
            }
        }
        stats
    }

    /// Moves entries matching `predicate` to the top of paint order.
    ///
    /// Relative order inside both groups is kept.
    pub fn raise<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&K, &S) -> bool,
    {
        let entries = std::mem::take(&mut self.entries);
        let (raised, rest): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|(key, state)| predicate(key, state));
        self.entries = rest.into_iter().chain(raised).collect();
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&S> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut S> {
        self.entries.get_mut(key)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &S)> {
        self.entries.iter()
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &S> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Disposes every entry; returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }
}
