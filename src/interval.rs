// SPDX-License-Identifier: MPL-2.0

//! One-dimensional intervals and the operations every dimensionality shares.
//!
//! An [`Interval1D`] is a pair of [`Domain1D`] bounds with at least one
//! value between them (a closed singleton is the smallest valid interval).
//! The interesting operations are the ones the dimensional store's rewrite
//! engine is built from: [`excluding`](Interval1D::excluding) with its
//! three-way [`Remainder`], [`separate_using`](Interval1D::separate_using),
//! unique-interval splitting, and compression of interval collections.
//!
//! [`IntervalLike`] lifts the shared surface over 1-D, 2-D and 3-D
//! intervals so the store can be written once.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use smallvec::{smallvec, SmallVec};

use crate::domain::{Domain1D, DomainLike};
use crate::domain_value::DomainValueLike;
use crate::error::IntervalidusError;

/// An interval along one dimension: all values from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval1D<T> {
    start: Domain1D<T>,
    end: Domain1D<T>,
}

/// Interval from one value to another, both included.
pub fn interval<T: DomainValueLike>(from: T, to: T) -> Interval1D<T> {
    Interval1D::new(Domain1D::at(from), Domain1D::at(to))
}

/// Interval from a value (included) up to the top of the dimension.
pub fn interval_from<T: DomainValueLike>(from: T) -> Interval1D<T> {
    Interval1D::new(Domain1D::at(from), Domain1D::Top)
}

/// Interval from the bottom of the dimension up to a value (included).
pub fn interval_to<T: DomainValueLike>(to: T) -> Interval1D<T> {
    Interval1D::new(Domain1D::Bottom, Domain1D::at(to))
}

/// Singleton interval holding exactly one value.
pub fn interval_at<T: DomainValueLike>(at: T) -> Interval1D<T> {
    Interval1D::new(Domain1D::at(at.clone()), Domain1D::at(at))
}

impl<T: DomainValueLike> Interval1D<T> {
    /// Interval from explicit bounds.
    ///
    /// # Panics
    ///
    /// Panics when the bounds are invalid, i.e. when no value fits between
    /// them. Use [try_new](Self::try_new) for checked construction.
    pub fn new(start: impl Into<Domain1D<T>>, end: impl Into<Domain1D<T>>) -> Self {
        match Self::try_new(start, end) {
            Ok(interval) => interval,
            Err(message) => panic!("{message}"),
        }
    }

    /// Interval from explicit bounds, rejecting empty ones.
    pub fn try_new(
        start: impl Into<Domain1D<T>>,
        end: impl Into<Domain1D<T>>,
    ) -> Result<Self, IntervalidusError> {
        let start = start.into();
        let end = end.into();
        if Self::valid_bounds(&start, &end) {
            Ok(Self { start, end })
        } else {
            Err(IntervalidusError::InvalidBounds(format!(
                "{} and {}",
                start.to_code_like_string(),
                end.to_code_like_string()
            )))
        }
    }

    /// The interval covering the whole dimension.
    pub fn unbounded() -> Self {
        Self {
            start: Domain1D::Bottom,
            end: Domain1D::Top,
        }
    }

    /// A valid pair of bounds has at least one value between them. Closed
    /// singletons are allowed; `(Bottom, Bottom)` and `(Top, Top)` are not.
    pub fn valid_bounds(start: &Domain1D<T>, end: &Domain1D<T>) -> bool {
        use Domain1D::{Bottom, OpenPoint, Point, Top};
        match (start, end) {
            (Bottom, Bottom) | (Top, Top) | (Top, _) | (_, Bottom) => false,
            (Bottom, _) | (_, Top) => true,
            (Point(s), Point(e)) => s <= e,
            (Point(s), OpenPoint(e)) | (OpenPoint(s), Point(e)) | (OpenPoint(s), OpenPoint(e)) => {
                s < e
            }
        }
    }

    /// Start bound.
    pub fn start(&self) -> &Domain1D<T> {
        &self.start
    }

    /// End bound.
    pub fn end(&self) -> &Domain1D<T> {
        &self.end
    }

    /// True when `domain` falls between the bounds, comparing starts with
    /// the start ordering and ends with the end ordering so open endpoints
    /// are respected against closed ones at the same value.
    pub fn contains(&self, domain: &Domain1D<T>) -> bool {
        self.start.cmp_start(domain) != Ordering::Greater
            && domain.cmp_end(&self.end) != Ordering::Greater
    }

    /// True when some value lies in both intervals.
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection_with(other).is_some()
    }

    /// The values lying in both intervals: later start crossed with earlier
    /// end, when still valid.
    pub fn intersection_with(&self, other: &Self) -> Option<Self> {
        let start = if self.start.cmp_start(&other.start) == Ordering::Less {
            other.start.clone()
        } else {
            self.start.clone()
        };
        let end = if self.end.cmp_end(&other.end) == Ordering::Greater {
            other.end.clone()
        } else {
            self.end.clone()
        };
        if Self::valid_bounds(&start, &end) {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Earliest start to latest end. Includes the gap when the intervals do
    /// not touch.
    pub fn joined_with(&self, other: &Self) -> Self {
        let start = if self.start.cmp_start(&other.start) == Ordering::Greater {
            other.start.clone()
        } else {
            self.start.clone()
        };
        let end = if self.end.cmp_end(&other.end) == Ordering::Less {
            other.end.clone()
        } else {
            self.end.clone()
        };
        Self { start, end }
    }

    /// True when `other` begins exactly where this interval leaves off, with
    /// no gap and no overlap.
    pub fn is_left_adjacent_to(&self, other: &Self) -> bool {
        self.end.right_adjacent() == other.start
    }

    /// Mirror image of [is_left_adjacent_to](Self::is_left_adjacent_to).
    pub fn is_right_adjacent_to(&self, other: &Self) -> bool {
        other.is_left_adjacent_to(self)
    }

    /// True when both intervals share the same start bound.
    pub fn has_same_start_as(&self, other: &Self) -> bool {
        self.start == other.start
    }

    /// The part of this interval strictly before `boundary`.
    /// Undefined unless `boundary` is strictly after the start.
    pub fn to_before(&self, boundary: &Domain1D<T>) -> Self {
        Self {
            start: self.start.clone(),
            end: boundary.left_adjacent(),
        }
    }

    /// The part of this interval strictly after `boundary`.
    /// Undefined unless `boundary` is strictly before the end.
    pub fn from_after(&self, boundary: &Domain1D<T>) -> Self {
        Self {
            start: boundary.right_adjacent(),
            end: self.end.clone(),
        }
    }

    /// What is left of this interval once `other` is taken out of it.
    pub fn excluding(&self, other: &Self) -> Remainder<Self> {
        match self.intersection_with(other) {
            None => Remainder::Single(self.clone()),
            Some(common) => {
                let has_before = common.start.cmp_start(&self.start) == Ordering::Greater;
                let has_after = common.end.cmp_end(&self.end) == Ordering::Less;
                match (has_before, has_after) {
                    (true, true) => Remainder::Split(
                        self.to_before(&common.start),
                        self.from_after(&common.end),
                    ),
                    (true, false) => Remainder::Single(self.to_before(&common.start)),
                    (false, true) => Remainder::Single(self.from_after(&common.end)),
                    (false, false) => Remainder::None,
                }
            }
        }
    }

    /// Split this interval at the boundaries of `other`: one to three
    /// disjoint sub-intervals covering exactly this interval, of which at
    /// most one intersects `other` (and equals the intersection).
    pub fn separate_using(&self, other: &Self) -> Vec<Self> {
        match self.intersection_with(other) {
            None => vec![self.clone()],
            Some(common) => {
                let mut parts = Vec::with_capacity(3);
                if common.start.cmp_start(&self.start) == Ordering::Greater {
                    parts.push(self.to_before(&common.start));
                }
                parts.push(common.clone());
                if common.end.cmp_end(&self.end) == Ordering::Less {
                    parts.push(self.from_after(&common.end));
                }
                parts
            }
        }
    }

    /// The interval strictly between this one and `other`, if any.
    pub fn gap_with(&self, other: &Self) -> Option<Self> {
        if self.intersects(other) {
            return None;
        }
        let (first, second) = if self.start.cmp_start(&other.start) == Ordering::Greater {
            (other, self)
        } else {
            (self, other)
        };
        let start = first.end.right_adjacent();
        let end = second.start.left_adjacent();
        if Self::valid_bounds(&start, &end) {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// The finest splitting induced by a collection: every boundary of every
    /// input becomes a boundary of the result, consecutive pieces are
    /// adjacent, and each input interval is a union of consecutive pieces.
    /// Pieces span from the earliest input start to the latest input end.
    pub fn unique_intervals(items: &[Self]) -> Vec<Self> {
        let Some(first) = items.first() else {
            return Vec::new();
        };
        let mut max_end = first.end.clone();
        let mut starts: Vec<Domain1D<T>> = Vec::with_capacity(items.len() * 2);
        for item in items {
            starts.push(item.start.clone());
            if item.end != Domain1D::Top {
                starts.push(item.end.right_adjacent());
            }
            if item.end.cmp_end(&max_end) == Ordering::Greater {
                max_end = item.end.clone();
            }
        }
        starts.sort_by(|a, b| a.cmp_start(b));
        starts.dedup();

        let mut pieces = Vec::with_capacity(starts.len());
        for pair in starts.windows(2) {
            if let Ok(piece) = Self::try_new(pair[0].clone(), pair[1].left_adjacent()) {
                pieces.push(piece);
            }
        }
        if let Some(last) = starts.last() {
            if let Ok(piece) = Self::try_new(last.clone(), max_end) {
                pieces.push(piece);
            }
        }
        pieces
    }

    /// Merge every pair of intersecting or adjacent intervals until the
    /// collection is a set of maximal disjoint spans, returned in start
    /// order.
    pub fn compress(items: impl IntoIterator<Item = Self>) -> Vec<Self> {
        let mut sorted: Vec<Self> = items.into_iter().collect();
        sorted.sort_by(|a, b| a.start.cmp_start(&b.start));
        let mut merged: Vec<Self> = Vec::with_capacity(sorted.len());
        for item in sorted {
            match merged.last_mut() {
                Some(last) if last.intersects(&item) || last.is_left_adjacent_to(&item) => {
                    *last = last.joined_with(&item);
                }
                _ => merged.push(item),
            }
        }
        merged
    }

    /// Constructor-style rendering, e.g. `interval(1, 5)` or
    /// `interval_from(3)`.
    pub fn to_code_like_string(&self) -> String {
        use Domain1D::{Bottom, Point, Top};
        match (&self.start, &self.end) {
            (Bottom, Top) => "unbounded()".to_string(),
            (Bottom, Point(e)) => format!("interval_to({e})"),
            (Point(s), Top) => format!("interval_from({s})"),
            (Point(s), Point(e)) if s == e => format!("interval_at({s})"),
            (Point(s), Point(e)) => format!("interval({s}, {e})"),
            (s, e) => format!(
                "Interval1D::new({}, {})",
                s.to_code_like_string(),
                e.to_code_like_string()
            ),
        }
    }
}

impl<T: DomainValueLike> Display for Interval1D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.start.left_brace(),
            self.start,
            T::PUNCTUATION,
            self.end,
            self.end.right_brace()
        )
    }
}

/// What is left of an interval after another interval is excluded from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remainder<I> {
    /// Nothing remains: the excluded interval covered this one.
    None,
    /// One piece remains (possibly the whole interval, when there was no
    /// overlap to begin with).
    Single(I),
    /// The excluded interval cut a hole; pieces remain on both sides.
    Split(I, I),
}

/// Operations an interval of any dimensionality offers the dimensional
/// store. Every operation is the per-dimension lift of its 1-D counterpart
/// unless noted otherwise.
pub trait IntervalLike: Clone + Eq + Hash + Debug + Display {
    /// The domain type marking a position inside this interval.
    type Domain: DomainLike;

    /// Start bounds across all dimensions.
    fn start(&self) -> Self::Domain;

    /// End bounds across all dimensions.
    fn end(&self) -> Self::Domain;

    /// The interval covering everything.
    fn unbounded() -> Self;

    /// True when `domain` falls inside this interval in every dimension.
    fn contains(&self, domain: &Self::Domain) -> bool;

    /// True when some position lies in both intervals.
    fn intersects(&self, other: &Self) -> bool {
        self.intersection_with(other).is_some()
    }

    /// The region lying in both intervals, when non-empty in every
    /// dimension.
    fn intersection_with(&self, other: &Self) -> Option<Self>;

    /// Smallest interval covering both (gaps included).
    fn joined_with(&self, other: &Self) -> Self;

    /// True when exactly one dimension of `other` starts right where the
    /// same dimension of this interval ends, and every other dimension is
    /// equivalent.
    fn is_left_adjacent_to(&self, other: &Self) -> bool;

    /// Start keys of every interval that could be right-adjacent to this
    /// one: per dimension, the end's right neighbor combined with the
    /// remaining dimensions' starts. At most one key per dimension, which
    /// is what keeps compression linear instead of pairwise.
    fn right_adjacent_keys(&self) -> SmallVec<[Self::Domain; 3]>;

    /// Tile this interval so that the intersection with `other` (if any) is
    /// one tile and every other tile misses `other` entirely. The Cartesian
    /// product of the per-dimension separations.
    fn separate_using(&self, other: &Self) -> Vec<Self>;

    /// Tile everything of this interval *except* `inner`, which must be a
    /// sub-interval of it. Adjacent tiles along the traversal order are
    /// pre-merged, so callers get close to the minimal tiling.
    fn subtract(&self, inner: &Self) -> Vec<Self> {
        let pieces = self
            .separate_using(inner)
            .into_iter()
            .filter(|piece| !piece.intersects(inner))
            .collect();
        coalesce_adjacent(pieces)
    }

    /// The finest common splitting of a collection, per dimension; see
    /// [`Interval1D::unique_intervals`].
    fn unique_intervals(items: &[Self]) -> Vec<Self>;

    /// Constructor-style rendering.
    fn to_code_like_string(&self) -> String;
}

/// Single-lookback merge: fold each piece into the previous one when the
/// two are adjacent. Enough to undo the fragmentation a Cartesian split
/// introduces along its traversal order.
pub(crate) fn coalesce_adjacent<I: IntervalLike>(pieces: Vec<I>) -> Vec<I> {
    let mut merged: Vec<I> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match merged.last_mut() {
            Some(last) if last.is_left_adjacent_to(&piece) => {
                *last = last.joined_with(&piece);
            }
            Some(last) if piece.is_left_adjacent_to(last) => {
                *last = last.joined_with(&piece);
            }
            _ => merged.push(piece),
        }
    }
    merged
}

impl<T: DomainValueLike> IntervalLike for Interval1D<T> {
    type Domain = Domain1D<T>;

    fn start(&self) -> Domain1D<T> {
        self.start.clone()
    }

    fn end(&self) -> Domain1D<T> {
        self.end.clone()
    }

    fn unbounded() -> Self {
        Interval1D::unbounded()
    }

    fn contains(&self, domain: &Domain1D<T>) -> bool {
        Interval1D::contains(self, domain)
    }

    fn intersection_with(&self, other: &Self) -> Option<Self> {
        Interval1D::intersection_with(self, other)
    }

    fn joined_with(&self, other: &Self) -> Self {
        Interval1D::joined_with(self, other)
    }

    fn is_left_adjacent_to(&self, other: &Self) -> bool {
        Interval1D::is_left_adjacent_to(self, other)
    }

    fn right_adjacent_keys(&self) -> SmallVec<[Domain1D<T>; 3]> {
        smallvec![self.end.right_adjacent()]
    }

    fn separate_using(&self, other: &Self) -> Vec<Self> {
        Interval1D::separate_using(self, other)
    }

    fn unique_intervals(items: &[Self]) -> Vec<Self> {
        Interval1D::unique_intervals(items)
    }

    fn to_code_like_string(&self) -> String {
        Interval1D::to_code_like_string(self)
    }
}
