// SPDX-License-Identifier: MPL-2.0

//! The dimensional data store.
//!
//! A [`DataStore`] holds a finite set of `(interval, value)` records that is
//! always *disjoint* (no two stored intervals intersect) and *value-wise
//! compressed* as values are written: every operation merges records holding
//! the value it wrote whose intervals are adjacent in exactly one dimension
//! while equivalent in the others. Values a rewrite merely carved around
//! keep their tiling until [`compress`](DataStore::compress) or
//! [`recompress`](DataStore::recompress) canonicalizes them. Three
//! synchronized views exist over the same record set:
//!
//! | index      | key                      | purpose                          |
//! |------------|--------------------------|----------------------------------|
//! | `by_start` | interval start           | canonical enumeration and lookup |
//! | `by_value` | value                    | deterministic compression        |
//! | `spatial`  | box in ordered-hash space| point and range probes           |
//!
//! `by_start` owns the records; the other two hold start keys only.
//!
//! All mutations funnel through [`update_or_remove`](DataStore::update_or_remove),
//! which rewrites the overlapped parts of existing records and restores both
//! invariants before returning. Mutation requires `&mut self`, so a store
//! needs no internal locking; wrap it in a mutex for multi-threaded use, or
//! better, ship [diff actions](crate::DiffAction) between per-thread stores.
//!
//! Should a value-mapping closure panic mid-rewrite, the store's indices may
//! disagree; that state is undefined and must not be reused.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use log::debug;

use crate::diff::DiffAction;
use crate::domain::{DomainLike, StartOrdered};
use crate::error::IntervalidusError;
use crate::interval::IntervalLike;
use crate::spatial::SpatialIndexing;
use crate::type_aliases::{Map, Set};
use crate::valid_data::ValidData;

/// Bounds every stored value type must satisfy.
///
/// Blanket-implemented; user code never implements it directly.
pub trait ValueLike: Clone + Eq + Hash + Debug {}

impl<V: Clone + Eq + Hash + Debug> ValueLike for V {}

type Key<I> = StartOrdered<<I as IntervalLike>::Domain>;

/// A store of values valid over disjoint intervals of any dimensionality.
///
/// ```
/// use intervalidus::{interval, DataStore, ValidData};
///
/// let mut store: DataStore<&str, _> = DataStore::new();
/// store.set(ValidData::new(interval(1, 3), "a"));
/// store.set(ValidData::new(interval(4, 5), "a"));
///
/// // value-wise compression keeps a single record
/// assert_eq!(store.get_all().count(), 1);
/// assert_eq!(store.get_at(&1.into()), Some(&"a"));
/// assert_eq!(store.get_at(&9.into()), None);
/// ```
#[derive(Debug, Clone)]
pub struct DataStore<V, I: IntervalLike> {
    by_start: BTreeMap<Key<I>, ValidData<V, I>>,
    by_value: IndexMap<V, BTreeSet<Key<I>>>,
    spatial: SpatialIndexing<I::Domain>,
}

impl<V: ValueLike, I: IntervalLike> Default for DataStore<V, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ValueLike, I: IntervalLike> DataStore<V, I> {
    /// An empty store with box-tree backed spatial queries.
    pub fn new() -> Self {
        Self {
            by_start: BTreeMap::new(),
            by_value: IndexMap::new(),
            spatial: SpatialIndexing::tree(),
        }
    }

    /// An empty store that answers spatial probes by scanning the start
    /// index instead of keeping a box tree. Identical semantics, slower
    /// misses; useful to rule the spatial index out when debugging.
    pub fn without_search_tree() -> Self {
        Self {
            by_start: BTreeMap::new(),
            by_value: IndexMap::new(),
            spatial: SpatialIndexing::scan(),
        }
    }

    /// A store holding `data`, compressed.
    ///
    /// # Panics
    ///
    /// Panics when two of the given records have intersecting intervals.
    pub fn from_data(data: impl IntoIterator<Item = ValidData<V, I>>) -> Self {
        let mut store = Self::new();
        for record in data {
            assert!(
                !store.intersects(&record.interval),
                "initial data overlaps at {}",
                record.interval
            );
            store.add_record(record);
        }
        store.compress_all();
        store
    }

    // -- record lifecycle, keeping the three indices in lockstep ---------

    pub(crate) fn add_record(&mut self, data: ValidData<V, I>) {
        let key = StartOrdered(data.key());
        debug_assert!(
            !self.by_start.contains_key(&key),
            "two records share the start {}",
            key.0
        );
        self.spatial.add(&key, &data.interval);
        self.by_value
            .entry(data.value.clone())
            .or_default()
            .insert(key.clone());
        self.by_start.insert(key, data);
    }

    pub(crate) fn remove_record(&mut self, key: &Key<I>) -> Option<ValidData<V, I>> {
        let data = self.by_start.remove(key)?;
        if let Some(keys) = self.by_value.get_mut(&data.value) {
            keys.remove(key);
            if keys.is_empty() {
                self.by_value.shift_remove(&data.value);
            }
        }
        self.spatial.remove(key, &data.interval);
        Some(data)
    }

    /// Replace the record at `key` with `data`, which must share its start.
    pub(crate) fn update_record(&mut self, key: &Key<I>, data: ValidData<V, I>) {
        debug_assert!(data.key() == key.0, "update must preserve the record key");
        self.remove_record(key);
        self.add_record(data);
    }

    fn clear_records(&mut self) {
        self.by_start.clear();
        self.by_value.clear();
        self.spatial.clear();
    }

    /// Start keys of all records intersecting `interval`, in start order.
    fn keys_intersecting(&self, interval: &I) -> Vec<Key<I>> {
        match self.spatial.candidates_intersecting(interval) {
            Some(mut candidates) => {
                candidates.retain(|key| {
                    self.by_start
                        .get(key)
                        .is_some_and(|data| data.interval.intersects(interval))
                });
                candidates.sort();
                candidates
            }
            None => self
                .by_start
                .iter()
                .filter(|(_, data)| data.interval.intersects(interval))
                .map(|(key, _)| key.clone())
                .collect(),
        }
    }

    // -- reads -----------------------------------------------------------

    /// The value valid at `domain`, if any. Open points are never contained.
    pub fn get_at(&self, domain: &I::Domain) -> Option<&V> {
        if !domain.is_closed_or_unbounded() {
            return None;
        }
        let found = match self.spatial.candidates_at(domain) {
            Some(candidates) => candidates
                .into_iter()
                .filter_map(|key| self.by_start.get(&key))
                .find(|data| data.interval.contains(domain)),
            None => self
                .by_start
                .values()
                .find(|data| data.interval.contains(domain)),
        };
        found.map(|data| &data.value)
    }

    /// The value valid at `domain`, or
    /// [`NotDefined`](IntervalidusError::NotDefined) when there is none.
    pub fn value_at(&self, domain: &I::Domain) -> Result<&V, IntervalidusError> {
        self.get_at(domain)
            .ok_or_else(|| IntervalidusError::NotDefined(domain.to_string()))
    }

    /// True when `domain` has a valid value.
    pub fn is_defined_at(&self, domain: &I::Domain) -> bool {
        self.get_at(domain).is_some()
    }

    /// All records whose interval intersects `interval`, in start order.
    pub fn get_intersecting(&self, interval: &I) -> Vec<&ValidData<V, I>> {
        self.keys_intersecting(interval)
            .iter()
            .map(|key| {
                self.by_start
                    .get(key)
                    .expect("intersecting key is present")
            })
            .collect()
    }

    /// True when any record's interval intersects `interval`.
    pub fn intersects(&self, interval: &I) -> bool {
        !self.keys_intersecting(interval).is_empty()
    }

    /// All records in start-ascending order.
    pub fn get_all(&self) -> impl Iterator<Item = &ValidData<V, I>> {
        self.by_start.values()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }

    /// A compressed, disjoint cover of everything currently valid.
    pub fn domain(&self) -> Vec<I> {
        compress_intervals(
            self.by_start
                .values()
                .map(|data| data.interval.clone())
                .collect(),
        )
    }

    /// For each stored value, a compressed, disjoint cover of the space
    /// where it is valid, independent of how the records happen to be
    /// carved up internally.
    pub fn domain_by_value(&self) -> Map<V, Vec<I>> {
        self.by_value
            .iter()
            .map(|(value, keys)| {
                let cover = compress_intervals(
                    keys.iter()
                        .map(|key| {
                            self.by_start
                                .get(key)
                                .expect("value index key is present")
                                .interval
                                .clone()
                        })
                        .collect(),
                );
                (value.clone(), cover)
            })
            .collect()
    }

    /// A compressed, disjoint cover of everything *not* currently valid.
    /// Together with [domain](Self::domain) it tiles the unbounded interval.
    pub fn domain_complement(&self) -> Vec<I> {
        let mut gaps = vec![I::unbounded()];
        for interval in self.domain() {
            gaps = gaps
                .into_iter()
                .flat_map(|gap| match gap.intersection_with(&interval) {
                    None => vec![gap],
                    Some(common) => gap.subtract(&common),
                })
                .collect();
        }
        compress_intervals(gaps)
    }

    // -- mutation --------------------------------------------------------

    /// The rewrite engine behind every mutation. For each record
    /// intersecting `target`:
    ///
    /// 1. the overlapped part is carved out along the target's boundaries,
    /// 2. the parts outside the target keep the record's value (reusing the
    ///    record's slot when one of them retains its start),
    /// 3. the overlapped part itself is replaced by `f(value)`, or removed
    ///    when `f` returns `None`.
    ///
    /// Afterwards every value written by `f` is recompressed; the remainder
    /// pieces keep the tiling the carve produced.
    pub fn update_or_remove(&mut self, target: &I, f: impl Fn(&V) -> Option<V>) {
        let overlap_keys = self.keys_intersecting(target);
        if overlap_keys.is_empty() {
            return;
        }
        debug!(
            "update_or_remove: {} record(s) intersect {}",
            overlap_keys.len(),
            target
        );
        let mut written: Set<V> = Set::default();
        for key in overlap_keys {
            let overlap = self
                .by_start
                .get(&key)
                .cloned()
                .expect("intersecting key is present");
            let common = overlap
                .interval
                .intersection_with(target)
                .expect("candidate intersects target");
            let mut remainder = overlap.interval.subtract(&common);

            if let Some(at) = remainder
                .iter()
                .position(|piece| piece.start() == overlap.interval.start())
            {
                // a remainder piece keeps the original start: shrink in place
                let keeper = remainder.swap_remove(at);
                self.update_record(&key, ValidData::new(keeper, overlap.value.clone()));
            } else {
                self.remove_record(&key);
            }
            for piece in remainder {
                self.add_record(ValidData::new(piece, overlap.value.clone()));
            }
            if let Some(new_value) = f(&overlap.value) {
                written.insert(new_value.clone());
                self.add_record(ValidData::new(common, new_value));
            }
        }
        for value in &written {
            self.compress(value);
        }
    }

    /// Make `data.value` valid over exactly `data.interval`, removing
    /// whatever was valid there before.
    pub fn set(&mut self, data: ValidData<V, I>) {
        self.update_or_remove(&data.interval, |_| None);
        let value = data.value.clone();
        self.add_record(data);
        self.compress(&value);
    }

    /// Like [set](Self::set), but only when nothing is valid anywhere in
    /// `data.interval`. Returns whether the record was stored.
    pub fn set_if_no_conflict(&mut self, data: ValidData<V, I>) -> bool {
        if self.intersects(&data.interval) {
            return false;
        }
        let value = data.value.clone();
        self.add_record(data);
        self.compress(&value);
        true
    }

    /// Remove whatever is valid in `interval`.
    pub fn remove(&mut self, interval: &I) {
        self.update_or_remove(interval, |_| None);
    }

    /// Replace the value wherever something is valid in `interval`. Regions
    /// of `interval` with no current value stay undefined.
    pub fn update(&mut self, interval: &I, value: V) {
        self.update_or_remove(interval, |_| Some(value.clone()));
    }

    /// Make `data.value` valid in the parts of `data.interval` that have no
    /// valid value yet, leaving everything else untouched.
    pub fn fill(&mut self, data: ValidData<V, I>) {
        let mut gaps = vec![data.interval.clone()];
        for key in self.keys_intersecting(&data.interval) {
            let existing = self
                .by_start
                .get(&key)
                .expect("intersecting key is present")
                .interval
                .clone();
            gaps = gaps
                .into_iter()
                .flat_map(|gap| match gap.intersection_with(&existing) {
                    None => vec![gap],
                    Some(common) => gap.subtract(&common),
                })
                .collect();
        }
        for gap in gaps {
            self.add_record(ValidData::new(gap, data.value.clone()));
        }
        self.compress(&data.value);
    }

    /// Fold `that` into this store: where both are valid the values are
    /// merged with `merge_values`, where only `that` is valid its value is
    /// taken as-is.
    pub fn merge(&mut self, that: &Self, merge_values: impl Fn(&V, &V) -> V) {
        let records: Vec<ValidData<V, I>> = that.by_start.values().cloned().collect();
        for data in records {
            self.update_or_remove(&data.interval, |value| {
                Some(merge_values(value, &data.value))
            });
            self.fill(data);
        }
    }

    // -- zipping ---------------------------------------------------------

    /// A store of value pairs over the regions where *both* stores have a
    /// valid value.
    pub fn zip<W: ValueLike>(&self, that: &DataStore<W, I>) -> DataStore<(V, W), I> {
        self.zip_records(that, |left, right| Some((left?.clone(), right?.clone())))
    }

    /// A store of value pairs over the regions where *either* store has a
    /// valid value, substituting the given placeholders on the undefined
    /// side.
    pub fn zip_all<W: ValueLike>(
        &self,
        that: &DataStore<W, I>,
        this_default: V,
        that_default: W,
    ) -> DataStore<(V, W), I> {
        self.zip_records(that, move |left, right| match (left, right) {
            (None, None) => None,
            (left, right) => Some((
                left.cloned().unwrap_or_else(|| this_default.clone()),
                right.cloned().unwrap_or_else(|| that_default.clone()),
            )),
        })
    }

    fn zip_records<W: ValueLike, Z: ValueLike>(
        &self,
        that: &DataStore<W, I>,
        combine: impl Fn(Option<&V>, Option<&W>) -> Option<Z>,
    ) -> DataStore<Z, I> {
        let mut intervals: Vec<I> = self
            .by_start
            .values()
            .map(|data| data.interval.clone())
            .collect();
        intervals.extend(that.by_start.values().map(|data| data.interval.clone()));

        let mut zipped = DataStore::new();
        // pieces are atomic with respect to both stores, so any intersecting
        // record covers the piece entirely
        for piece in I::unique_intervals(&intervals) {
            let left = self
                .get_intersecting(&piece)
                .into_iter()
                .next()
                .map(|data| &data.value);
            let right = that
                .get_intersecting(&piece)
                .into_iter()
                .next()
                .map(|data| &data.value);
            if let Some(value) = combine(left, right) {
                zipped.add_record(ValidData::new(piece, value));
            }
        }
        zipped.compress_all();
        zipped
    }

    // -- diff protocol ---------------------------------------------------

    /// The actions that turn `old` into this store, keyed by record starts
    /// and emitted in start order.
    pub fn diff_actions_from(&self, old: &Self) -> Vec<DiffAction<V, I>> {
        let mut actions = Vec::new();
        let mut new_iter = self.by_start.iter().peekable();
        let mut old_iter = old.by_start.iter().peekable();
        loop {
            match (new_iter.peek(), old_iter.peek()) {
                (Some((new_key, new_data)), Some((old_key, old_data))) => {
                    match new_key.cmp(old_key) {
                        std::cmp::Ordering::Less => {
                            actions.push(DiffAction::Create((*new_data).clone()));
                            new_iter.next();
                        }
                        std::cmp::Ordering::Greater => {
                            actions.push(DiffAction::Delete(old_key.0.clone()));
                            old_iter.next();
                        }
                        std::cmp::Ordering::Equal => {
                            if new_data != old_data {
                                actions.push(DiffAction::Update((*new_data).clone()));
                            }
                            new_iter.next();
                            old_iter.next();
                        }
                    }
                }
                (Some((_, new_data)), None) => {
                    actions.push(DiffAction::Create((*new_data).clone()));
                    new_iter.next();
                }
                (None, Some((old_key, _))) => {
                    actions.push(DiffAction::Delete(old_key.0.clone()));
                    old_iter.next();
                }
                (None, None) => break,
            }
        }
        actions
    }

    /// Interpret a diff-action stream in order. Applying
    /// `b.diff_actions_from(a)` to a copy of `a` yields a store equal to
    /// `b`.
    pub fn apply_diff_actions(&mut self, actions: impl IntoIterator<Item = DiffAction<V, I>>) {
        for action in actions {
            match action {
                DiffAction::Create(data) => self.add_record(data),
                DiffAction::Update(data) => {
                    let key = StartOrdered(data.key());
                    self.update_record(&key, data);
                }
                DiffAction::Delete(domain) => {
                    self.remove_record(&StartOrdered(domain));
                }
            }
        }
    }

    /// Make this store equal to `that` by applying the diff between them.
    pub fn sync_with(&mut self, that: &Self) {
        self.apply_diff_actions(that.diff_actions_from(self));
    }

    // -- compression -----------------------------------------------------

    /// Merge every pair of records holding `value` whose intervals are
    /// adjacent in exactly one dimension and equivalent in the others, until
    /// no such pair is left.
    ///
    /// Candidates are found through
    /// [`right_adjacent_keys`](IntervalLike::right_adjacent_keys), so each
    /// pass is linear in the number of records holding the value.
    pub fn compress(&mut self, value: &V) {
        loop {
            let Some(keys) = self.by_value.get(value) else {
                return;
            };
            let keys: Vec<Key<I>> = keys.iter().cloned().collect();
            let mut merged_any = false;
            'records: for key in keys {
                // the record may have been merged away earlier in this pass
                let Some(record) = self.by_start.get(&key) else {
                    continue;
                };
                let interval = record.interval.clone();
                for adjacent_start in interval.right_adjacent_keys() {
                    let adjacent_key = StartOrdered(adjacent_start);
                    let Some(candidate) = self.by_start.get(&adjacent_key) else {
                        continue;
                    };
                    if candidate.value == *value
                        && interval.is_left_adjacent_to(&candidate.interval)
                    {
                        let joined = interval.joined_with(&candidate.interval);
                        self.remove_record(&adjacent_key);
                        self.update_record(&key, ValidData::new(joined, value.clone()));
                        merged_any = true;
                        continue 'records;
                    }
                }
            }
            if !merged_any {
                return;
            }
        }
    }

    /// Run [compress](Self::compress) for every stored value.
    pub fn compress_all(&mut self) {
        let values: Vec<V> = self.by_value.keys().cloned().collect();
        for value in values {
            self.compress(&value);
        }
    }

    /// Canonicalize the representation: split every record along the finest
    /// common splitting of all stored intervals, then compress every value.
    /// Two stores holding the same valid values compare equal after both
    /// are recompressed.
    pub fn recompress(&mut self) {
        let intervals: Vec<I> = self
            .by_start
            .values()
            .map(|data| data.interval.clone())
            .collect();
        let pieces = I::unique_intervals(&intervals);
        let records: Vec<ValidData<V, I>> = self.by_start.values().cloned().collect();
        self.clear_records();
        for record in records {
            for piece in &pieces {
                if piece.intersects(&record.interval) {
                    self.add_record(ValidData::new(piece.clone(), record.value.clone()));
                }
            }
        }
        self.compress_all();
    }
}

impl<V: ValueLike, I: IntervalLike> PartialEq for DataStore<V, I> {
    /// Stores are equal when they hold the same record set; the spatial
    /// structure behind them does not matter.
    fn eq(&self, other: &Self) -> bool {
        self.by_start == other.by_start
    }
}

impl<V: ValueLike, I: IntervalLike> Eq for DataStore<V, I> {}

impl<V: ValueLike, I: IntervalLike> FromIterator<ValidData<V, I>> for DataStore<V, I> {
    fn from_iter<T: IntoIterator<Item = ValidData<V, I>>>(iter: T) -> Self {
        Self::from_data(iter)
    }
}

/// Compress a collection of disjoint intervals, merging pairs adjacent in
/// exactly one dimension and equivalent in the others until none are left.
pub(crate) fn compress_intervals<I: IntervalLike>(intervals: Vec<I>) -> Vec<I> {
    let mut by_start: BTreeMap<StartOrdered<I::Domain>, I> = intervals
        .into_iter()
        .map(|interval| (StartOrdered(interval.start()), interval))
        .collect();
    loop {
        let keys: Vec<StartOrdered<I::Domain>> = by_start.keys().cloned().collect();
        let mut merged_any = false;
        'intervals: for key in keys {
            let Some(interval) = by_start.get(&key).cloned() else {
                continue;
            };
            for adjacent_start in interval.right_adjacent_keys() {
                let adjacent_key = StartOrdered(adjacent_start);
                let Some(candidate) = by_start.get(&adjacent_key) else {
                    continue;
                };
                if interval.is_left_adjacent_to(candidate) {
                    let joined = interval.joined_with(candidate);
                    by_start.remove(&adjacent_key);
                    by_start.insert(key.clone(), joined);
                    merged_any = true;
                    continue 'intervals;
                }
            }
        }
        if !merged_any {
            break;
        }
    }
    by_start.into_values().collect()
}
