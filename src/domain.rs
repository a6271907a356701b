// SPDX-License-Identifier: MPL-2.0

//! One-dimensional domain bounds and their products.
//!
//! A [`Domain1D`] is one bound along one dimension. Two total orders are
//! defined on it, differing only in how an open and a closed point at the
//! same value compare:
//!
//! ```text
//! start ordering:   [5----   before   (5----
//! end ordering:     ----5)   before   ----5]
//! ```
//!
//! Used as an interval *start*, an open point means "strictly after the
//! value", so it sorts after the closed point; used as an *end* it means
//! "strictly before the value" and sorts before it. Both orders place
//! [`Bottom`](Domain1D::Bottom) first and [`Top`](Domain1D::Top) last.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use box_tree::Coords;
use smallvec::smallvec;

use crate::domain_value::{ContinuousValue, DomainValueLike};

/// One bound along one dimension of domain values of type `T`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain1D<T> {
    /// Strictly below every representable value.
    Bottom,
    /// A closed point: the value itself belongs to the bound.
    Point(T),
    /// An open point: everything arbitrarily close to the value but not the
    /// value itself. Only continuous domains construct these.
    OpenPoint(T),
    /// Strictly above every representable value.
    Top,
}

use Domain1D::{Bottom, OpenPoint, Point, Top};

impl<T: DomainValueLike> Domain1D<T> {
    /// Closed point at `value`. Same as `Domain1D::from(value)`.
    pub fn at(value: T) -> Self {
        Point(value)
    }

    /// Open point at `value`. Only continuous domains have open points, so
    /// the constructor is bounded on the continuous capability.
    pub fn open(value: T) -> Self
    where
        T: ContinuousValue,
    {
        OpenPoint(value)
    }

    /// True for `Bottom` and `Top`.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bottom | Top)
    }

    /// True unless this is an open point.
    pub fn is_closed_or_unbounded(&self) -> bool {
        !matches!(self, OpenPoint(_))
    }

    /// Brace rendered before this bound when it is an interval start.
    pub fn left_brace(&self) -> char {
        match self {
            Point(_) => '[',
            _ => '(',
        }
    }

    /// Brace rendered after this bound when it is an interval end.
    pub fn right_brace(&self) -> char {
        match self {
            Point(_) => ']',
            _ => ')',
        }
    }

    /// Total order treating the bound as an interval start: at equal values
    /// an open point starts *after* the closed point.
    pub fn cmp_start(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Bottom, Bottom) | (Top, Top) => Ordering::Equal,
            (Bottom, _) => Ordering::Less,
            (_, Bottom) => Ordering::Greater,
            (Top, _) => Ordering::Greater,
            (_, Top) => Ordering::Less,
            (Point(a), Point(b)) | (OpenPoint(a), OpenPoint(b)) => a.cmp(b),
            (Point(a), OpenPoint(b)) => a.cmp(b).then(Ordering::Less),
            (OpenPoint(a), Point(b)) => a.cmp(b).then(Ordering::Greater),
        }
    }

    /// Total order treating the bound as an interval end: at equal values an
    /// open point ends *before* the closed point.
    pub fn cmp_end(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Point(a), OpenPoint(b)) => a.cmp(b).then(Ordering::Greater),
            (OpenPoint(a), Point(b)) => a.cmp(b).then(Ordering::Less),
            _ => self.cmp_start(other),
        }
    }

    /// The closest bound strictly to the right, such that no value fits
    /// between the two.
    ///
    /// Discrete domains step to the successor value (`Top` past the last
    /// one); continuous domains flip open and closed at the same value.
    /// `Bottom` and `Top` are their own neighbors.
    pub fn right_adjacent(&self) -> Self {
        match self {
            Bottom => Bottom,
            Top => Top,
            Point(v) => {
                if T::CONTINUOUS {
                    OpenPoint(v.clone())
                } else {
                    v.successor().map_or(Top, Point)
                }
            }
            OpenPoint(v) => Point(v.clone()),
        }
    }

    /// Mirror image of [right_adjacent](Self::right_adjacent).
    pub fn left_adjacent(&self) -> Self {
        match self {
            Bottom => Bottom,
            Top => Top,
            Point(v) => {
                if T::CONTINUOUS {
                    OpenPoint(v.clone())
                } else {
                    v.predecessor().map_or(Bottom, Point)
                }
            }
            OpenPoint(v) => Point(v.clone()),
        }
    }

    /// The bound's position on the ordered-hash axis. Unbounded ends take
    /// the hash of the corresponding extreme value.
    pub fn ordered_hash(&self) -> f64 {
        match self {
            Bottom => T::min_value().ordered_hash(),
            Top => T::max_value().ordered_hash(),
            Point(v) | OpenPoint(v) => v.ordered_hash(),
        }
    }

    /// Constructor-style rendering, e.g. `Point(3)` or `Top`.
    pub fn to_code_like_string(&self) -> String {
        match self {
            Bottom => "Bottom".to_string(),
            Top => "Top".to_string(),
            Point(v) => format!("Point({v})"),
            OpenPoint(v) => format!("OpenPoint({v})"),
        }
    }
}

impl<T: DomainValueLike> From<T> for Domain1D<T> {
    fn from(value: T) -> Self {
        Point(value)
    }
}

impl<T: DomainValueLike> Display for Domain1D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bottom => write!(f, "-\u{221e}"),
            Top => write!(f, "+\u{221e}"),
            Point(v) | OpenPoint(v) => write!(f, "{v}"),
        }
    }
}

/// Operations a domain of any dimensionality offers the dimensional store.
///
/// Implemented by [`Domain1D`] and its products [`Domain2D`] and
/// [`Domain3D`]; every operation is the per-dimension lift of the 1-D one.
pub trait DomainLike: Clone + Eq + Hash + Debug + Display {
    /// Number of dimensions.
    const DIMENSIONS: usize;

    /// Lexicographic combination of the per-dimension start orderings.
    fn cmp_start(&self, other: &Self) -> Ordering;

    /// True when no dimension is an open point. Only such domains can be
    /// contained in an interval.
    fn is_closed_or_unbounded(&self) -> bool;

    /// Per-dimension ordered hashes, the domain's position in box space.
    fn coordinates(&self) -> Coords;

    /// Lower corner of the representable box space.
    fn min_coordinates() -> Coords;

    /// Upper corner of the representable box space.
    fn max_coordinates() -> Coords;

    /// Constructor-style rendering with dimensions joined by `x`.
    fn to_code_like_string(&self) -> String;
}

impl<T: DomainValueLike> DomainLike for Domain1D<T> {
    const DIMENSIONS: usize = 1;

    fn cmp_start(&self, other: &Self) -> Ordering {
        Domain1D::cmp_start(self, other)
    }

    fn is_closed_or_unbounded(&self) -> bool {
        Domain1D::is_closed_or_unbounded(self)
    }

    fn coordinates(&self) -> Coords {
        smallvec![self.ordered_hash()]
    }

    fn min_coordinates() -> Coords {
        smallvec![T::min_value().ordered_hash()]
    }

    fn max_coordinates() -> Coords {
        smallvec![T::max_value().ordered_hash()]
    }

    fn to_code_like_string(&self) -> String {
        Domain1D::to_code_like_string(self)
    }
}

/// A two-dimensional domain: one bound per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain2D<A, B> {
    /// Bound along the first dimension.
    pub horizontal: Domain1D<A>,
    /// Bound along the second dimension.
    pub vertical: Domain1D<B>,
}

impl<A: DomainValueLike, B: DomainValueLike> Domain2D<A, B> {
    /// Domain from its two per-dimension bounds.
    pub fn new(horizontal: Domain1D<A>, vertical: Domain1D<B>) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl<A: DomainValueLike, B: DomainValueLike> From<(A, B)> for Domain2D<A, B> {
    fn from((a, b): (A, B)) -> Self {
        Self::new(Point(a), Point(b))
    }
}

impl<A: DomainValueLike, B: DomainValueLike> Display for Domain2D<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.horizontal, self.vertical)
    }
}

impl<A: DomainValueLike, B: DomainValueLike> DomainLike for Domain2D<A, B> {
    const DIMENSIONS: usize = 2;

    fn cmp_start(&self, other: &Self) -> Ordering {
        self.horizontal
            .cmp_start(&other.horizontal)
            .then_with(|| self.vertical.cmp_start(&other.vertical))
    }

    fn is_closed_or_unbounded(&self) -> bool {
        self.horizontal.is_closed_or_unbounded() && self.vertical.is_closed_or_unbounded()
    }

    fn coordinates(&self) -> Coords {
        smallvec![self.horizontal.ordered_hash(), self.vertical.ordered_hash()]
    }

    fn min_coordinates() -> Coords {
        smallvec![
            A::min_value().ordered_hash(),
            B::min_value().ordered_hash()
        ]
    }

    fn max_coordinates() -> Coords {
        smallvec![
            A::max_value().ordered_hash(),
            B::max_value().ordered_hash()
        ]
    }

    fn to_code_like_string(&self) -> String {
        format!(
            "{} x {}",
            self.horizontal.to_code_like_string(),
            self.vertical.to_code_like_string()
        )
    }
}

/// A three-dimensional domain: one bound per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain3D<A, B, C> {
    /// Bound along the first dimension.
    pub horizontal: Domain1D<A>,
    /// Bound along the second dimension.
    pub vertical: Domain1D<B>,
    /// Bound along the third dimension.
    pub depth: Domain1D<C>,
}

impl<A: DomainValueLike, B: DomainValueLike, C: DomainValueLike> Domain3D<A, B, C> {
    /// Domain from its three per-dimension bounds.
    pub fn new(horizontal: Domain1D<A>, vertical: Domain1D<B>, depth: Domain1D<C>) -> Self {
        Self {
            horizontal,
            vertical,
            depth,
        }
    }
}

impl<A: DomainValueLike, B: DomainValueLike, C: DomainValueLike> From<(A, B, C)>
    for Domain3D<A, B, C>
{
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::new(Point(a), Point(b), Point(c))
    }
}

impl<A: DomainValueLike, B: DomainValueLike, C: DomainValueLike> Display for Domain3D<A, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.horizontal, self.vertical, self.depth)
    }
}

impl<A: DomainValueLike, B: DomainValueLike, C: DomainValueLike> DomainLike for Domain3D<A, B, C> {
    const DIMENSIONS: usize = 3;

    fn cmp_start(&self, other: &Self) -> Ordering {
        self.horizontal
            .cmp_start(&other.horizontal)
            .then_with(|| self.vertical.cmp_start(&other.vertical))
            .then_with(|| self.depth.cmp_start(&other.depth))
    }

    fn is_closed_or_unbounded(&self) -> bool {
        self.horizontal.is_closed_or_unbounded()
            && self.vertical.is_closed_or_unbounded()
            && self.depth.is_closed_or_unbounded()
    }

    fn coordinates(&self) -> Coords {
        smallvec![
            self.horizontal.ordered_hash(),
            self.vertical.ordered_hash(),
            self.depth.ordered_hash()
        ]
    }

    fn min_coordinates() -> Coords {
        smallvec![
            A::min_value().ordered_hash(),
            B::min_value().ordered_hash(),
            C::min_value().ordered_hash()
        ]
    }

    fn max_coordinates() -> Coords {
        smallvec![
            A::max_value().ordered_hash(),
            B::max_value().ordered_hash(),
            C::max_value().ordered_hash()
        ]
    }

    fn to_code_like_string(&self) -> String {
        format!(
            "{} x {} x {}",
            self.horizontal.to_code_like_string(),
            self.vertical.to_code_like_string(),
            self.depth.to_code_like_string()
        )
    }
}

/// Key wrapper ordering domains by the start ordering, so they can live in
/// ordered collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct StartOrdered<D>(pub(crate) D);

impl<D: DomainLike> PartialOrd for StartOrdered<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: DomainLike> Ord for StartOrdered<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_start(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_orderings_agree_on_distinct_values() {
        let lo: Domain1D<i32> = Domain1D::at(1);
        let hi: Domain1D<i32> = Domain1D::at(2);
        assert_eq!(lo.cmp_start(&hi), Ordering::Less);
        assert_eq!(lo.cmp_end(&hi), Ordering::Less);
        assert_eq!(Domain1D::<i32>::Bottom.cmp_start(&lo), Ordering::Less);
        assert_eq!(hi.cmp_end(&Domain1D::Top), Ordering::Less);
    }

    #[test]
    fn discrete_adjacency_steps_by_one() {
        let five: Domain1D<i32> = Domain1D::at(5);
        assert_eq!(five.right_adjacent(), Domain1D::at(6));
        assert_eq!(five.left_adjacent(), Domain1D::at(4));
        assert_eq!(Domain1D::at(i32::MAX).right_adjacent(), Domain1D::Top);
        assert_eq!(Domain1D::at(i32::MIN).left_adjacent(), Domain1D::Bottom);
        assert_eq!(Domain1D::<i32>::Top.right_adjacent(), Domain1D::Top);
        assert_eq!(Domain1D::<i32>::Bottom.left_adjacent(), Domain1D::Bottom);
    }

    #[cfg(feature = "float")]
    #[test]
    fn continuous_adjacency_flips_openness() {
        use ordered_float::OrderedFloat;
        let closed = Domain1D::at(OrderedFloat(2.5));
        let open = Domain1D::open(OrderedFloat(2.5));
        assert_eq!(closed.right_adjacent(), open);
        assert_eq!(open.right_adjacent(), closed);
        assert_eq!(closed.left_adjacent(), open);

        // As a start the open point comes later, as an end it comes earlier.
        assert_eq!(closed.cmp_start(&open), Ordering::Less);
        assert_eq!(closed.cmp_end(&open), Ordering::Greater);
    }

    #[test]
    fn braces_reflect_openness() {
        let p: Domain1D<i32> = Domain1D::at(3);
        assert_eq!(p.left_brace(), '[');
        assert_eq!(p.right_brace(), ']');
        assert_eq!(Domain1D::<i32>::Top.right_brace(), ')');
    }
}
