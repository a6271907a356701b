// SPDX-License-Identifier: MPL-2.0

//! A store of value *sets*, with per-element operations.
//!
//! Where a [`DataStore`] holds one value per region, a [`MultiValueStore`]
//! holds a set of them and lets callers add or remove single elements over
//! an interval without caring how the underlying set-valued records are
//! carved up.

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::diff::DiffAction;
use crate::interval::IntervalLike;
use crate::store::DataStore;
use crate::valid_data::ValidData;

/// The set representation used for multi-value records. Ordered, so records
/// holding the same elements always compare and hash identically.
pub type ValueSet<V> = BTreeSet<V>;

/// Bounds every multi-store element type must satisfy.
///
/// Blanket-implemented; user code never implements it directly.
pub trait ElementLike: Clone + Ord + Hash + Debug {}

impl<V: Clone + Ord + Hash + Debug> ElementLike for V {}

/// A store associating intervals with sets of values.
///
/// ```
/// use intervalidus::{interval, MultiValueStore};
///
/// let mut store: MultiValueStore<&str, _> = MultiValueStore::new();
/// store.add_one(&interval(1, 9), "a");
/// store.add_one(&interval(5, 12), "b");
///
/// assert_eq!(store.values_at(&7.into()), vec![&"a", &"b"]);
/// assert_eq!(store.values_at(&11.into()), vec![&"b"]);
/// ```
#[derive(Debug, Clone)]
pub struct MultiValueStore<V: Ord, I: IntervalLike> {
    inner: DataStore<ValueSet<V>, I>,
}

impl<V: ElementLike, I: IntervalLike> PartialEq for MultiValueStore<V, I> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<V: ElementLike, I: IntervalLike> Eq for MultiValueStore<V, I> {}

impl<V: ElementLike, I: IntervalLike> MultiValueStore<V, I> {
    /// An empty multi-value store.
    pub fn new() -> Self {
        Self {
            inner: DataStore::new(),
        }
    }

    /// A multi-value store holding `data`, compressed.
    ///
    /// # Panics
    ///
    /// Panics when two of the given records have intersecting intervals.
    pub fn from_data(data: impl IntoIterator<Item = ValidData<ValueSet<V>, I>>) -> Self {
        Self {
            inner: DataStore::from_data(data),
        }
    }

    /// Add `value` to the set valid over every part of `interval`: existing
    /// sets gain the element, uncovered parts become singleton sets.
    pub fn add_one(&mut self, interval: &I, value: V) {
        self.inner.update_or_remove(interval, |set| {
            let mut grown = set.clone();
            grown.insert(value.clone());
            Some(grown)
        });
        self.inner
            .fill(ValidData::new(interval.clone(), ValueSet::from([value])));
    }

    /// Remove `value` from the set valid over every part of `interval`.
    /// Regions whose set becomes empty become undefined.
    pub fn remove_one(&mut self, interval: &I, value: &V) {
        self.inner.update_or_remove(interval, |set| {
            let mut shrunk = set.clone();
            shrunk.remove(value);
            if shrunk.is_empty() {
                None
            } else {
                Some(shrunk)
            }
        });
    }

    /// The set valid at `domain`, if any.
    pub fn get_at(&self, domain: &I::Domain) -> Option<&ValueSet<V>> {
        self.inner.get_at(domain)
    }

    /// The elements valid at `domain`, in order; empty when undefined.
    pub fn values_at(&self, domain: &I::Domain) -> Vec<&V> {
        self.get_at(domain)
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }

    /// All set-valued records in start-ascending order.
    pub fn get_all(&self) -> impl Iterator<Item = &ValidData<ValueSet<V>, I>> {
        self.inner.get_all()
    }

    /// See [`DataStore::get_intersecting`].
    pub fn get_intersecting(&self, interval: &I) -> Vec<&ValidData<ValueSet<V>, I>> {
        self.inner.get_intersecting(interval)
    }

    /// See [`DataStore::intersects`].
    pub fn intersects(&self, interval: &I) -> bool {
        self.inner.intersects(interval)
    }

    /// See [`DataStore::domain`].
    pub fn domain(&self) -> Vec<I> {
        self.inner.domain()
    }

    /// See [`DataStore::set`]: replace whole sets over `data.interval`.
    pub fn set(&mut self, data: ValidData<ValueSet<V>, I>) {
        self.inner.set(data);
    }

    /// See [`DataStore::remove`].
    pub fn remove(&mut self, interval: &I) {
        self.inner.remove(interval);
    }

    /// See [`DataStore::diff_actions_from`].
    pub fn diff_actions_from(&self, old: &Self) -> Vec<DiffAction<ValueSet<V>, I>> {
        self.inner.diff_actions_from(&old.inner)
    }

    /// See [`DataStore::apply_diff_actions`].
    pub fn apply_diff_actions(
        &mut self,
        actions: impl IntoIterator<Item = DiffAction<ValueSet<V>, I>>,
    ) {
        self.inner.apply_diff_actions(actions);
    }

    /// The underlying set-valued store.
    pub fn as_store(&self) -> &DataStore<ValueSet<V>, I> {
        &self.inner
    }
}

impl<V: ElementLike, I: IntervalLike> Default for MultiValueStore<V, I> {
    fn default() -> Self {
        Self::new()
    }
}
