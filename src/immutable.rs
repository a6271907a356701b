// SPDX-License-Identifier: MPL-2.0

//! Copy-on-write surface over the dimensional store.
//!
//! Same semantics as [`DataStore`], different calling convention: every
//! mutation takes `&self`, clones, mutates the clone, and returns it. Use
//! whichever surface fits the call site and convert freely between the two.

use crate::diff::DiffAction;
use crate::error::IntervalidusError;
use crate::interval::IntervalLike;
use crate::store::{DataStore, ValueLike};
use crate::type_aliases::Map;
use crate::valid_data::ValidData;

/// An immutable dimensional store; mutations return new stores.
///
/// ```
/// use intervalidus::{interval, ImmutableStore, ValidData};
///
/// let empty: ImmutableStore<&str, _> = ImmutableStore::new();
/// let one = empty.set(ValidData::new(interval(1, 5), "a"));
/// let two = one.remove(&interval(3, 8));
///
/// assert!(empty.is_empty());
/// assert_eq!(one.get_at(&4.into()), Some(&"a"));
/// assert_eq!(two.get_at(&4.into()), None);
/// ```
#[derive(Debug, Clone)]
pub struct ImmutableStore<V, I: IntervalLike> {
    inner: DataStore<V, I>,
}

impl<V: ValueLike, I: IntervalLike> PartialEq for ImmutableStore<V, I> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<V: ValueLike, I: IntervalLike> Eq for ImmutableStore<V, I> {}

impl<V: ValueLike, I: IntervalLike> Default for ImmutableStore<V, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ValueLike, I: IntervalLike> ImmutableStore<V, I> {
    /// An empty immutable store.
    pub fn new() -> Self {
        DataStore::new().into()
    }

    /// An immutable store holding `data`, compressed.
    ///
    /// # Panics
    ///
    /// Panics when two of the given records have intersecting intervals.
    pub fn from_data(data: impl IntoIterator<Item = ValidData<V, I>>) -> Self {
        DataStore::from_data(data).into()
    }

    /// A mutable copy with the same record set.
    pub fn to_mutable(&self) -> DataStore<V, I> {
        self.inner.clone()
    }

    fn updated(&self, mutate: impl FnOnce(&mut DataStore<V, I>)) -> Self {
        let mut copy = self.inner.clone();
        mutate(&mut copy);
        copy.into()
    }

    // -- reads, delegated ------------------------------------------------

    /// See [`DataStore::get_at`].
    pub fn get_at(&self, domain: &I::Domain) -> Option<&V> {
        self.inner.get_at(domain)
    }

    /// See [`DataStore::value_at`].
    pub fn value_at(&self, domain: &I::Domain) -> Result<&V, IntervalidusError> {
        self.inner.value_at(domain)
    }

    /// See [`DataStore::is_defined_at`].
    pub fn is_defined_at(&self, domain: &I::Domain) -> bool {
        self.inner.is_defined_at(domain)
    }

    /// See [`DataStore::get_intersecting`].
    pub fn get_intersecting(&self, interval: &I) -> Vec<&ValidData<V, I>> {
        self.inner.get_intersecting(interval)
    }

    /// See [`DataStore::intersects`].
    pub fn intersects(&self, interval: &I) -> bool {
        self.inner.intersects(interval)
    }

    /// See [`DataStore::get_all`].
    pub fn get_all(&self) -> impl Iterator<Item = &ValidData<V, I>> {
        self.inner.get_all()
    }

    /// See [`DataStore::len`].
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// See [`DataStore::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// See [`DataStore::domain`].
    pub fn domain(&self) -> Vec<I> {
        self.inner.domain()
    }

    /// See [`DataStore::domain_by_value`].
    pub fn domain_by_value(&self) -> Map<V, Vec<I>> {
        self.inner.domain_by_value()
    }

    /// See [`DataStore::domain_complement`].
    pub fn domain_complement(&self) -> Vec<I> {
        self.inner.domain_complement()
    }

    /// See [`DataStore::diff_actions_from`].
    pub fn diff_actions_from(&self, old: &Self) -> Vec<DiffAction<V, I>> {
        self.inner.diff_actions_from(&old.inner)
    }

    // -- mutations, copy-on-write ----------------------------------------

    /// See [`DataStore::update_or_remove`].
    pub fn update_or_remove(&self, target: &I, f: impl Fn(&V) -> Option<V>) -> Self {
        self.updated(|store| store.update_or_remove(target, f))
    }

    /// See [`DataStore::set`].
    pub fn set(&self, data: ValidData<V, I>) -> Self {
        self.updated(|store| store.set(data))
    }

    /// See [`DataStore::set_if_no_conflict`]; `None` on conflict.
    pub fn set_if_no_conflict(&self, data: ValidData<V, I>) -> Option<Self> {
        if self.inner.intersects(&data.interval) {
            return None;
        }
        Some(self.updated(|store| {
            store.set_if_no_conflict(data);
        }))
    }

    /// See [`DataStore::remove`].
    pub fn remove(&self, interval: &I) -> Self {
        self.updated(|store| store.remove(interval))
    }

    /// See [`DataStore::update`].
    pub fn update(&self, interval: &I, value: V) -> Self {
        self.updated(|store| store.update(interval, value))
    }

    /// See [`DataStore::fill`].
    pub fn fill(&self, data: ValidData<V, I>) -> Self {
        self.updated(|store| store.fill(data))
    }

    /// See [`DataStore::merge`].
    pub fn merge(&self, that: &Self, merge_values: impl Fn(&V, &V) -> V) -> Self {
        self.updated(|store| store.merge(&that.inner, merge_values))
    }

    /// See [`DataStore::zip`].
    pub fn zip<W: ValueLike>(&self, that: &ImmutableStore<W, I>) -> ImmutableStore<(V, W), I> {
        self.inner.zip(&that.inner).into()
    }

    /// See [`DataStore::zip_all`].
    pub fn zip_all<W: ValueLike>(
        &self,
        that: &ImmutableStore<W, I>,
        this_default: V,
        that_default: W,
    ) -> ImmutableStore<(V, W), I> {
        self.inner
            .zip_all(&that.inner, this_default, that_default)
            .into()
    }

    /// See [`DataStore::apply_diff_actions`].
    pub fn apply_diff_actions(
        &self,
        actions: impl IntoIterator<Item = DiffAction<V, I>>,
    ) -> Self {
        self.updated(|store| store.apply_diff_actions(actions))
    }

    /// See [`DataStore::sync_with`].
    pub fn sync_with(&self, that: &Self) -> Self {
        self.updated(|store| store.sync_with(&that.inner))
    }

    /// See [`DataStore::recompress`].
    pub fn recompress(&self) -> Self {
        self.updated(DataStore::recompress)
    }
}

impl<V: ValueLike, I: IntervalLike> From<DataStore<V, I>> for ImmutableStore<V, I> {
    fn from(inner: DataStore<V, I>) -> Self {
        Self { inner }
    }
}

impl<V: ValueLike, I: IntervalLike> From<ImmutableStore<V, I>> for DataStore<V, I> {
    fn from(immutable: ImmutableStore<V, I>) -> Self {
        immutable.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::interval;

    #[test]
    fn mutations_leave_the_original_untouched() {
        let base = ImmutableStore::from_data([ValidData::new(interval(1, 5), "a")]);
        let changed = base.set(ValidData::new(interval(3, 4), "b"));

        assert_eq!(base.get_at(&3.into()), Some(&"a"));
        assert_eq!(changed.get_at(&3.into()), Some(&"b"));
        assert_eq!(changed.get_at(&5.into()), Some(&"a"));
    }

    #[test]
    fn conversions_preserve_the_record_set() {
        let base = ImmutableStore::from_data([ValidData::new(interval(1, 5), "a")]);
        let mut mutable = base.to_mutable();
        mutable.remove(&interval(1, 2));
        let back: ImmutableStore<_, _> = mutable.into();
        assert_eq!(back.get_at(&1.into()), None);
        assert_eq!(back.get_at(&4.into()), Some(&"a"));
        // the original is unaffected by what the copy did
        assert_eq!(base.get_at(&1.into()), Some(&"a"));
    }

    #[test]
    fn set_if_no_conflict_returns_none_on_overlap() {
        let base = ImmutableStore::from_data([ValidData::new(interval(1, 5), "a")]);
        assert!(base
            .set_if_no_conflict(ValidData::new(interval(4, 9), "b"))
            .is_none());
        let extended = base
            .set_if_no_conflict(ValidData::new(interval(6, 9), "b"))
            .expect("no overlap");
        assert_eq!(extended.len(), 2);
    }
}
