// SPDX-License-Identifier: MPL-2.0

//! Dimensional stores with a branching-free version history.
//!
//! A [`VersionedStore`] wraps a store with one extra integer dimension, the
//! *version* dimension, which never leaks through the public surface.
//! Approved data is valid from the version it was written at up to `Top`;
//! superseding a record at a later version shortens the old record's version
//! interval instead of destroying it, so every earlier version remains
//! readable. Unapproved (staged) data lives at
//! [`UNAPPROVED_START_VERSION`], far above any reachable current version.
//!
//! Every operation observes the history through a [`VersionSelection`]:
//! the current version, the unapproved view (what things would look like if
//! all staged data were approved), or a specific version. Reads slice the
//! history at the selected version; writes supersede records from the
//! selected version onward.

use std::fmt::Debug;

use log::{debug, info};

use crate::diff::DiffAction;
use crate::domain::Domain1D;
use crate::domain_value::DomainValueLike;
use crate::error::IntervalidusError;
use crate::interval::{interval_at, interval_from, interval_to, Interval1D, IntervalLike};
use crate::interval2d::Interval2D;
use crate::interval3d::Interval3D;
use crate::store::{DataStore, ValueLike};
use crate::valid_data::ValidData;

/// The version at which unapproved data starts. No current version can
/// reach it.
pub const UNAPPROVED_START_VERSION: i32 = i32::MAX;

/// Which slice of the version history an operation observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionSelection {
    /// The store's current version.
    #[default]
    Current,
    /// The view as if all staged data were approved.
    Unapproved,
    /// A specific version, usually one reached earlier.
    Specific(i32),
}

/// An interval carrying a hidden trailing version dimension.
///
/// Implemented by [`Interval2D`] over 1-D data and [`Interval3D`] over 2-D
/// data; the versioned store is generic over this trait, so the layering is
/// written once.
pub trait WithVersion: IntervalLike {
    /// The public-facing interval type, without the version dimension.
    type Base: IntervalLike;

    /// Attach a version interval to a base interval.
    fn from_parts(base: Self::Base, version: Interval1D<i32>) -> Self;

    /// The base interval, version dimension dropped.
    fn base(&self) -> Self::Base;

    /// The version interval.
    fn version(&self) -> Interval1D<i32>;

    /// Attach a version bound to a base domain.
    fn domain_from_parts(
        base: <Self::Base as IntervalLike>::Domain,
        version: Domain1D<i32>,
    ) -> Self::Domain;
}

impl<T: DomainValueLike> WithVersion for Interval2D<T, i32> {
    type Base = Interval1D<T>;

    fn from_parts(base: Interval1D<T>, version: Interval1D<i32>) -> Self {
        Interval2D::new(base, version)
    }

    fn base(&self) -> Interval1D<T> {
        self.horizontal.clone()
    }

    fn version(&self) -> Interval1D<i32> {
        self.vertical.clone()
    }

    fn domain_from_parts(base: Domain1D<T>, version: Domain1D<i32>) -> Self::Domain {
        crate::domain::Domain2D::new(base, version)
    }
}

impl<A: DomainValueLike, B: DomainValueLike> WithVersion for Interval3D<A, B, i32> {
    type Base = Interval2D<A, B>;

    fn from_parts(base: Interval2D<A, B>, version: Interval1D<i32>) -> Self {
        Interval3D::new(base.horizontal, base.vertical, version)
    }

    fn base(&self) -> Interval2D<A, B> {
        Interval2D::new(self.horizontal.clone(), self.vertical.clone())
    }

    fn version(&self) -> Interval1D<i32> {
        self.depth.clone()
    }

    fn domain_from_parts(
        base: crate::domain::Domain2D<A, B>,
        version: Domain1D<i32>,
    ) -> Self::Domain {
        crate::domain::Domain3D::new(base.horizontal, base.vertical, version)
    }
}

type BaseOf<U> = <U as WithVersion>::Base;
type BaseDomain<U> = <<U as WithVersion>::Base as IntervalLike>::Domain;

/// Versioned store over one-dimensional data.
pub type Versioned1D<V, T> = VersionedStore<V, Interval2D<T, i32>>;

/// Versioned store over two-dimensional data.
pub type Versioned2D<V, A, B> = VersionedStore<V, Interval3D<A, B, i32>>;

/// A dimensional store whose writes accumulate as a version history.
///
/// ```
/// use intervalidus::{interval, ValidData, Versioned1D, VersionSelection};
///
/// let mut store: Versioned1D<&str, i32> = Versioned1D::new();
/// store.set(ValidData::new(interval(1, 10), "a"), VersionSelection::Current);
/// store.increment_current_version().unwrap();
/// store.set(ValidData::new(interval(5, 8), "b"), VersionSelection::Current);
///
/// // the current slice sees the overwrite, version 0 does not
/// assert_eq!(store.get_at(&6.into(), VersionSelection::Current), Some(&"b"));
/// assert_eq!(store.get_at(&6.into(), VersionSelection::Specific(0)), Some(&"a"));
/// ```
#[derive(Debug, Clone)]
pub struct VersionedStore<V, U: WithVersion> {
    underlying: DataStore<V, U>,
    initial_version: i32,
    current_version: i32,
}

impl<V: ValueLike, U: WithVersion> VersionedStore<V, U> {
    /// An empty versioned store starting at version 0.
    pub fn new() -> Self {
        Self::with_initial_version(0)
    }

    /// An empty versioned store starting at the given version.
    ///
    /// # Panics
    ///
    /// Panics when `initial` is at or past [`UNAPPROVED_START_VERSION`].
    pub fn with_initial_version(initial: i32) -> Self {
        assert!(
            initial < UNAPPROVED_START_VERSION,
            "initial version must leave room for versioning"
        );
        Self {
            underlying: DataStore::new(),
            initial_version: initial,
            current_version: initial,
        }
    }

    /// The version this store began at.
    pub fn initial_version(&self) -> i32 {
        self.initial_version
    }

    /// The version reads and writes observe under
    /// [`VersionSelection::Current`].
    pub fn current_version(&self) -> i32 {
        self.current_version
    }

    /// The version boundary a selection denotes for this store.
    fn boundary(&self, selection: VersionSelection) -> i32 {
        match selection {
            VersionSelection::Current => self.current_version,
            VersionSelection::Unapproved => UNAPPROVED_START_VERSION,
            VersionSelection::Specific(version) => version,
        }
    }

    fn write_target(&self, base: BaseOf<U>, selection: VersionSelection) -> U {
        // writes supersede from the boundary onward
        U::from_parts(base, interval_from(self.boundary(selection)))
    }

    // -- reads -----------------------------------------------------------

    /// The value valid at `domain` in the selected slice.
    pub fn get_at(&self, domain: &BaseDomain<U>, selection: VersionSelection) -> Option<&V> {
        let probe = U::domain_from_parts(domain.clone(), Domain1D::at(self.boundary(selection)));
        self.underlying.get_at(&probe)
    }

    /// The value valid at `domain` in the selected slice, or
    /// [`NotDefined`](IntervalidusError::NotDefined).
    pub fn value_at(
        &self,
        domain: &BaseDomain<U>,
        selection: VersionSelection,
    ) -> Result<&V, IntervalidusError> {
        self.get_at(domain, selection)
            .ok_or_else(|| IntervalidusError::NotDefined(domain.to_string()))
    }

    /// True when `domain` has a valid value in the selected slice.
    pub fn is_defined_at(&self, domain: &BaseDomain<U>, selection: VersionSelection) -> bool {
        self.get_at(domain, selection).is_some()
    }

    /// The selected slice as a plain dimensional store: records whose
    /// version interval contains the boundary, projected down to the base
    /// dimensions and recompressed.
    pub fn selected(&self, selection: VersionSelection) -> DataStore<V, BaseOf<U>> {
        let boundary = Domain1D::at(self.boundary(selection));
        DataStore::from_data(self.underlying.get_all().filter_map(|record| {
            record
                .interval
                .version()
                .contains(&boundary)
                .then(|| ValidData::new(record.interval.base(), record.value.clone()))
        }))
    }

    /// All records of the selected slice, in start-ascending order.
    pub fn get_all(&self, selection: VersionSelection) -> Vec<ValidData<V, BaseOf<U>>> {
        self.selected(selection).get_all().cloned().collect()
    }

    /// Records of the selected slice intersecting `interval`.
    pub fn get_intersecting(
        &self,
        interval: &BaseOf<U>,
        selection: VersionSelection,
    ) -> Vec<ValidData<V, BaseOf<U>>> {
        let selected = self.selected(selection);
        selected
            .get_intersecting(interval)
            .into_iter()
            .cloned()
            .collect()
    }

    /// True when anything in the selected slice intersects `interval`.
    pub fn intersects(&self, interval: &BaseOf<U>, selection: VersionSelection) -> bool {
        let at = interval_at(self.boundary(selection));
        let target = U::from_parts(interval.clone(), at);
        self.underlying.intersects(&target)
    }

    /// Compressed cover of everything valid in the selected slice.
    pub fn domain(&self, selection: VersionSelection) -> Vec<BaseOf<U>> {
        self.selected(selection).domain()
    }

    // -- writes ----------------------------------------------------------

    /// Make `data.value` valid over `data.interval` from the selected
    /// version onward, superseding whatever was valid there.
    pub fn set(&mut self, data: ValidData<V, BaseOf<U>>, selection: VersionSelection) {
        let target = self.write_target(data.interval, selection);
        self.underlying.set(ValidData::new(target, data.value));
    }

    /// Like [set](Self::set), but only when the region is free in the
    /// selected slice. Returns whether the record was stored.
    pub fn set_if_no_conflict(
        &mut self,
        data: ValidData<V, BaseOf<U>>,
        selection: VersionSelection,
    ) -> bool {
        if self.intersects(&data.interval, selection) {
            return false;
        }
        self.set(data, selection);
        true
    }

    /// Remove whatever is valid in `interval` from the selected version
    /// onward.
    pub fn remove(&mut self, interval: &BaseOf<U>, selection: VersionSelection) {
        let target = self.write_target(interval.clone(), selection);
        self.underlying.remove(&target);
    }

    /// Replace the value wherever something is valid in `interval`, from
    /// the selected version onward.
    pub fn update(&mut self, interval: &BaseOf<U>, value: V, selection: VersionSelection) {
        let target = self.write_target(interval.clone(), selection);
        self.underlying.update(&target, value);
    }

    /// Fill the currently-undefined parts of `interval` from the selected
    /// version onward.
    pub fn fill(&mut self, data: ValidData<V, BaseOf<U>>, selection: VersionSelection) {
        let target = self.write_target(data.interval, selection);
        self.underlying.fill(ValidData::new(target, data.value));
    }

    // -- version arithmetic ----------------------------------------------

    /// Move the current version to `version`.
    pub fn set_current_version(&mut self, version: i32) -> Result<(), IntervalidusError> {
        if version >= UNAPPROVED_START_VERSION {
            return Err(IntervalidusError::VersionTooLarge);
        }
        if version < self.initial_version {
            return Err(IntervalidusError::VersionTooSmall);
        }
        info!("current version set to {version}");
        self.current_version = version;
        Ok(())
    }

    /// Move to the next version, under which the current state remains
    /// unchanged until the next write.
    pub fn increment_current_version(&mut self) -> Result<(), IntervalidusError> {
        let next = self
            .current_version
            .checked_add(1)
            .filter(|next| *next != UNAPPROVED_START_VERSION)
            .ok_or(IntervalidusError::RanOutOfVersions)?;
        info!("current version incremented to {next}");
        self.current_version = next;
        Ok(())
    }

    /// Roll the history back to `version`: discard records that only exist
    /// later, reopen records that were superseded later (they become valid
    /// to `Top` again), and make `version` current.
    pub fn reset_to_version(&mut self, version: i32) -> Result<(), IntervalidusError> {
        if version >= UNAPPROVED_START_VERSION {
            return Err(IntervalidusError::VersionTooLarge);
        }
        if version < self.initial_version {
            return Err(IntervalidusError::VersionTooSmall);
        }
        info!("resetting version history to {version}");
        let keep_versions = interval_to(version);
        let boundary = Domain1D::at(version);
        let records: Vec<ValidData<V, U>> = self
            .underlying
            .get_all()
            .filter(|record| record.interval.version().intersects(&keep_versions))
            .map(|record| {
                let version_span = record.interval.version();
                // records still alive at `version` become open-ended again;
                // records superseded before it stay closed
                let reopened = if version_span.end().cmp_end(&boundary) == std::cmp::Ordering::Less
                {
                    version_span
                } else {
                    Interval1D::new(version_span.start().clone(), Domain1D::Top)
                };
                ValidData::new(
                    U::from_parts(record.interval.base(), reopened),
                    record.value.clone(),
                )
            })
            .collect();
        self.underlying = DataStore::from_data(records);
        self.current_version = version;
        Ok(())
    }

    // -- approval --------------------------------------------------------

    /// Promote the staged record matching `data` exactly (same base
    /// interval, same value) into the approved history at the current
    /// version.
    pub fn approve(&mut self, data: ValidData<V, BaseOf<U>>) -> Result<(), IntervalidusError> {
        let staged = U::from_parts(
            data.interval.clone(),
            interval_from(UNAPPROVED_START_VERSION),
        );
        let matches = self
            .underlying
            .get_intersecting(&staged)
            .into_iter()
            .any(|record| record.interval == staged && record.value == data.value);
        if !matches {
            return Err(IntervalidusError::ApprovalConflict(format!(
                "no unapproved record matching {data}"
            )));
        }
        debug!("approving {data}");
        self.underlying.remove(&staged);
        self.set(data, VersionSelection::Current);
        Ok(())
    }

    /// Promote every staged record intersecting `interval`, whole records
    /// at a time. Returns how many were approved.
    pub fn approve_all(&mut self, interval: &BaseOf<U>) -> usize {
        let staged: Vec<ValidData<V, BaseOf<U>>> = self
            .underlying
            .get_all()
            .filter(|record| {
                let version_span = record.interval.version();
                version_span.start() == &Domain1D::at(UNAPPROVED_START_VERSION)
                    && record.interval.base().intersects(interval)
            })
            .map(|record| ValidData::new(record.interval.base(), record.value.clone()))
            .collect();
        let approved = staged.len();
        for data in staged {
            self.approve(data)
                .expect("staged records match themselves");
        }
        approved
    }

    // -- history management ----------------------------------------------

    /// Forget the history: keep only the current slice, valid from the
    /// initial version to `Top`, and make the initial version current.
    pub fn collapse_version_history(&mut self) {
        info!("collapsing version history at version {}", self.current_version);
        let snapshot = self.selected(VersionSelection::Current);
        let from_initial = interval_from(self.initial_version);
        self.underlying = DataStore::from_data(snapshot.get_all().map(|record| {
            ValidData::new(
                U::from_parts(record.interval.clone(), from_initial.clone()),
                record.value.clone(),
            )
        }));
        self.current_version = self.initial_version;
    }

    /// The actions that turn `old`'s history into this one's.
    pub fn diff_actions_from(&self, old: &Self) -> Vec<DiffAction<V, U>> {
        self.underlying.diff_actions_from(&old.underlying)
    }

    /// Interpret a diff-action stream against the underlying history.
    pub fn apply_diff_actions(&mut self, actions: impl IntoIterator<Item = DiffAction<V, U>>) {
        self.underlying.apply_diff_actions(actions);
    }

    /// Make this store equal to `that`, history and version counters
    /// included.
    pub fn sync_with(&mut self, that: &Self) {
        self.underlying.sync_with(&that.underlying);
        self.initial_version = that.initial_version;
        self.current_version = that.current_version;
    }

    /// The underlying store, version dimension exposed. Read-only; writing
    /// through it could break the versioned invariants.
    pub fn as_underlying(&self) -> &DataStore<V, U> {
        &self.underlying
    }
}

impl<V: ValueLike, U: WithVersion> Default for VersionedStore<V, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ValueLike, U: WithVersion> PartialEq for VersionedStore<V, U> {
    fn eq(&self, other: &Self) -> bool {
        self.underlying == other.underlying
            && self.initial_version == other.initial_version
            && self.current_version == other.current_version
    }
}

impl<V: ValueLike, U: WithVersion> Eq for VersionedStore<V, U> {}

/// Copy-on-write surface over [`VersionedStore`]; mutations return new
/// stores, fallible ones behind `Result`.
#[derive(Debug, Clone)]
pub struct ImmutableVersionedStore<V, U: WithVersion> {
    inner: VersionedStore<V, U>,
}

impl<V: ValueLike, U: WithVersion> ImmutableVersionedStore<V, U> {
    /// An empty immutable versioned store starting at version 0.
    pub fn new() -> Self {
        VersionedStore::new().into()
    }

    /// A mutable copy with the same history and counters.
    pub fn to_mutable(&self) -> VersionedStore<V, U> {
        self.inner.clone()
    }

    fn updated(&self, mutate: impl FnOnce(&mut VersionedStore<V, U>)) -> Self {
        let mut copy = self.inner.clone();
        mutate(&mut copy);
        copy.into()
    }

    fn try_updated(
        &self,
        mutate: impl FnOnce(&mut VersionedStore<V, U>) -> Result<(), IntervalidusError>,
    ) -> Result<Self, IntervalidusError> {
        let mut copy = self.inner.clone();
        mutate(&mut copy)?;
        Ok(copy.into())
    }

    /// See [`VersionedStore::current_version`].
    pub fn current_version(&self) -> i32 {
        self.inner.current_version()
    }

    /// See [`VersionedStore::get_at`].
    pub fn get_at(&self, domain: &BaseDomain<U>, selection: VersionSelection) -> Option<&V> {
        self.inner.get_at(domain, selection)
    }

    /// See [`VersionedStore::get_all`].
    pub fn get_all(&self, selection: VersionSelection) -> Vec<ValidData<V, BaseOf<U>>> {
        self.inner.get_all(selection)
    }

    /// See [`VersionedStore::selected`].
    pub fn selected(&self, selection: VersionSelection) -> DataStore<V, BaseOf<U>> {
        self.inner.selected(selection)
    }

    /// See [`VersionedStore::set`].
    pub fn set(&self, data: ValidData<V, BaseOf<U>>, selection: VersionSelection) -> Self {
        self.updated(|store| store.set(data, selection))
    }

    /// See [`VersionedStore::remove`].
    pub fn remove(&self, interval: &BaseOf<U>, selection: VersionSelection) -> Self {
        self.updated(|store| store.remove(interval, selection))
    }

    /// See [`VersionedStore::increment_current_version`].
    pub fn increment_current_version(&self) -> Result<Self, IntervalidusError> {
        self.try_updated(VersionedStore::increment_current_version)
    }

    /// See [`VersionedStore::reset_to_version`].
    pub fn reset_to_version(&self, version: i32) -> Result<Self, IntervalidusError> {
        self.try_updated(|store| store.reset_to_version(version))
    }

    /// See [`VersionedStore::approve`].
    pub fn approve(&self, data: ValidData<V, BaseOf<U>>) -> Result<Self, IntervalidusError> {
        self.try_updated(|store| store.approve(data))
    }

    /// See [`VersionedStore::collapse_version_history`].
    pub fn collapse_version_history(&self) -> Self {
        self.updated(VersionedStore::collapse_version_history)
    }

    /// See [`VersionedStore::sync_with`].
    pub fn sync_with(&self, that: &Self) -> Self {
        self.updated(|store| store.sync_with(&that.inner))
    }
}

impl<V: ValueLike, U: WithVersion> Default for ImmutableVersionedStore<V, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ValueLike, U: WithVersion> PartialEq for ImmutableVersionedStore<V, U> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<V: ValueLike, U: WithVersion> Eq for ImmutableVersionedStore<V, U> {}

impl<V: ValueLike, U: WithVersion> From<VersionedStore<V, U>> for ImmutableVersionedStore<V, U> {
    fn from(inner: VersionedStore<V, U>) -> Self {
        Self { inner }
    }
}

impl<V: ValueLike, U: WithVersion> From<ImmutableVersionedStore<V, U>> for VersionedStore<V, U> {
    fn from(immutable: ImmutableVersionedStore<V, U>) -> Self {
        immutable.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::interval;

    type Store = Versioned1D<&'static str, i32>;

    #[test]
    fn writes_supersede_without_erasing_history() {
        let mut store = Store::new();
        store.set(ValidData::new(interval(1, 10), "a"), VersionSelection::Current);
        store.increment_current_version().unwrap();
        store.set(ValidData::new(interval(5, 8), "b"), VersionSelection::Current);

        assert_eq!(store.get_at(&6.into(), VersionSelection::Current), Some(&"b"));
        assert_eq!(store.get_at(&2.into(), VersionSelection::Current), Some(&"a"));
        assert_eq!(
            store.get_at(&6.into(), VersionSelection::Specific(0)),
            Some(&"a")
        );
    }

    #[test]
    fn unapproved_data_is_invisible_until_approved() {
        let mut store = Store::new();
        store.set(ValidData::new(interval(1, 4), "a"), VersionSelection::Current);
        store.set(
            ValidData::new(interval(6, 9), "b"),
            VersionSelection::Unapproved,
        );

        assert_eq!(store.get_at(&7.into(), VersionSelection::Current), None);
        assert_eq!(
            store.get_at(&7.into(), VersionSelection::Unapproved),
            Some(&"b")
        );

        store
            .approve(ValidData::new(interval(6, 9), "b"))
            .expect("staged record exists");
        assert_eq!(store.get_at(&7.into(), VersionSelection::Current), Some(&"b"));
    }

    #[test]
    fn approve_requires_an_exact_staged_match() {
        let mut store = Store::new();
        store.set(
            ValidData::new(interval(6, 9), "b"),
            VersionSelection::Unapproved,
        );
        assert_eq!(
            store.approve(ValidData::new(interval(6, 8), "b")),
            Err(IntervalidusError::ApprovalConflict(
                "no unapproved record matching [6..8] -> \"b\"".to_string()
            ))
        );
        assert!(store.approve(ValidData::new(interval(6, 9), "b")).is_ok());
    }

    #[test]
    fn approve_all_promotes_intersecting_staged_records() {
        let mut store = Store::new();
        store.set(
            ValidData::new(interval(1, 3), "a"),
            VersionSelection::Unapproved,
        );
        store.set(
            ValidData::new(interval(5, 7), "b"),
            VersionSelection::Unapproved,
        );
        store.set(
            ValidData::new(interval(20, 25), "c"),
            VersionSelection::Unapproved,
        );

        assert_eq!(store.approve_all(&interval(1, 10)), 2);
        assert_eq!(store.get_at(&2.into(), VersionSelection::Current), Some(&"a"));
        assert_eq!(store.get_at(&6.into(), VersionSelection::Current), Some(&"b"));
        assert_eq!(store.get_at(&22.into(), VersionSelection::Current), None);
    }

    #[test]
    fn version_arithmetic_is_bounded() {
        let mut store = Store::new();
        assert_eq!(
            store.set_current_version(UNAPPROVED_START_VERSION),
            Err(IntervalidusError::VersionTooLarge)
        );
        assert_eq!(
            store.set_current_version(-1),
            Err(IntervalidusError::VersionTooSmall)
        );
        store
            .set_current_version(UNAPPROVED_START_VERSION - 1)
            .unwrap();
        assert_eq!(
            store.increment_current_version(),
            Err(IntervalidusError::RanOutOfVersions)
        );
    }

    #[test]
    fn reset_reopens_superseded_records() {
        let mut store = Store::new();
        store.set(ValidData::new(interval(1, 10), "a"), VersionSelection::Current);
        store.increment_current_version().unwrap();
        store.set(ValidData::new(interval(5, 8), "b"), VersionSelection::Current);

        store.reset_to_version(0).unwrap();
        assert_eq!(store.current_version(), 0);
        let slice = store.get_all(VersionSelection::Current);
        assert_eq!(slice.len(), 1);
        assert_eq!(slice[0].interval, interval(1, 10));
        assert_eq!(slice[0].value, "a");

        // the superseding write is gone even when moving forward again
        store.increment_current_version().unwrap();
        assert_eq!(store.get_at(&6.into(), VersionSelection::Current), Some(&"a"));
    }

    #[test]
    fn collapse_forgets_history() {
        let mut store = Store::new();
        store.set(ValidData::new(interval(1, 10), "a"), VersionSelection::Current);
        store.increment_current_version().unwrap();
        store.set(ValidData::new(interval(5, 8), "b"), VersionSelection::Current);

        store.collapse_version_history();
        assert_eq!(store.current_version(), store.initial_version());
        assert_eq!(store.get_at(&6.into(), VersionSelection::Current), Some(&"b"));
        // history before the collapse is gone
        assert_eq!(
            store.get_at(&6.into(), VersionSelection::Specific(0)),
            Some(&"b")
        );
    }

    #[test]
    fn immutable_facade_leaves_the_original_untouched() {
        let base: ImmutableVersionedStore<&str, Interval2D<i32, i32>> =
            ImmutableVersionedStore::new();
        let one = base.set(ValidData::new(interval(1, 5), "a"), VersionSelection::Current);
        assert!(base.get_all(VersionSelection::Current).is_empty());
        assert_eq!(one.get_at(&3.into(), VersionSelection::Current), Some(&"a"));

        let rolled = one
            .increment_current_version()
            .unwrap()
            .remove(&interval(1, 2), VersionSelection::Current);
        assert_eq!(
            rolled.get_at(&1.into(), VersionSelection::Specific(0)),
            Some(&"a")
        );
        assert_eq!(rolled.get_at(&1.into(), VersionSelection::Current), None);
        assert_eq!(one.get_at(&1.into(), VersionSelection::Current), Some(&"a"));
    }

    #[test]
    fn sync_with_copies_history_and_counters() {
        let mut a = Store::new();
        a.set(ValidData::new(interval(1, 4), "a"), VersionSelection::Current);

        let mut b = Store::new();
        b.set(ValidData::new(interval(9, 12), "z"), VersionSelection::Current);
        b.increment_current_version().unwrap();

        a.sync_with(&b);
        assert_eq!(a, b);
    }
}
