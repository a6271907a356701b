// SPDX-License-Identifier: MPL-2.0

//! Three-dimensional intervals: a product of three [`Interval1D`]s.

use std::fmt::{self, Display};

use smallvec::{smallvec, SmallVec};

use crate::domain::Domain3D;
use crate::domain_value::DomainValueLike;
use crate::interval::{Interval1D, IntervalLike, Remainder};

/// An axis-aligned cuboid in a three-dimensional domain space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval3D<A, B, C> {
    /// Extent along the first dimension.
    pub horizontal: Interval1D<A>,
    /// Extent along the second dimension.
    pub vertical: Interval1D<B>,
    /// Extent along the third dimension.
    pub depth: Interval1D<C>,
}

impl<A: DomainValueLike, B: DomainValueLike, C: DomainValueLike> Interval3D<A, B, C> {
    /// Cuboid from its three per-dimension extents.
    pub fn new(
        horizontal: Interval1D<A>,
        vertical: Interval1D<B>,
        depth: Interval1D<C>,
    ) -> Self {
        Self {
            horizontal,
            vertical,
            depth,
        }
    }

    /// Per-dimension exclusion, as in [`Interval2D::excluding`]
    /// (crate::Interval2D::excluding).
    pub fn excluding(
        &self,
        other: &Self,
    ) -> (
        Remainder<Interval1D<A>>,
        Remainder<Interval1D<B>>,
        Remainder<Interval1D<C>>,
    ) {
        (
            self.horizontal.excluding(&other.horizontal),
            self.vertical.excluding(&other.vertical),
            self.depth.excluding(&other.depth),
        )
    }
}

impl<A: DomainValueLike, B: DomainValueLike, C: DomainValueLike> Display for Interval3D<A, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} x {}", self.horizontal, self.vertical, self.depth)
    }
}

impl<A: DomainValueLike, B: DomainValueLike, C: DomainValueLike> IntervalLike
    for Interval3D<A, B, C>
{
    type Domain = Domain3D<A, B, C>;

    fn start(&self) -> Domain3D<A, B, C> {
        Domain3D::new(
            self.horizontal.start().clone(),
            self.vertical.start().clone(),
            self.depth.start().clone(),
        )
    }

    fn end(&self) -> Domain3D<A, B, C> {
        Domain3D::new(
            self.horizontal.end().clone(),
            self.vertical.end().clone(),
            self.depth.end().clone(),
        )
    }

    fn unbounded() -> Self {
        Self::new(
            Interval1D::unbounded(),
            Interval1D::unbounded(),
            Interval1D::unbounded(),
        )
    }

    fn contains(&self, domain: &Domain3D<A, B, C>) -> bool {
        self.horizontal.contains(&domain.horizontal)
            && self.vertical.contains(&domain.vertical)
            && self.depth.contains(&domain.depth)
    }

    fn intersection_with(&self, other: &Self) -> Option<Self> {
        let horizontal = self.horizontal.intersection_with(&other.horizontal)?;
        let vertical = self.vertical.intersection_with(&other.vertical)?;
        let depth = self.depth.intersection_with(&other.depth)?;
        Some(Self::new(horizontal, vertical, depth))
    }

    fn joined_with(&self, other: &Self) -> Self {
        Self::new(
            self.horizontal.joined_with(&other.horizontal),
            self.vertical.joined_with(&other.vertical),
            self.depth.joined_with(&other.depth),
        )
    }

    fn is_left_adjacent_to(&self, other: &Self) -> bool {
        let mut adjacent = 0;
        let mut equivalent = 0;
        if self.horizontal.is_left_adjacent_to(&other.horizontal) {
            adjacent += 1;
        } else if self.horizontal == other.horizontal {
            equivalent += 1;
        }
        if self.vertical.is_left_adjacent_to(&other.vertical) {
            adjacent += 1;
        } else if self.vertical == other.vertical {
            equivalent += 1;
        }
        if self.depth.is_left_adjacent_to(&other.depth) {
            adjacent += 1;
        } else if self.depth == other.depth {
            equivalent += 1;
        }
        adjacent == 1 && equivalent == 2
    }

    fn right_adjacent_keys(&self) -> SmallVec<[Domain3D<A, B, C>; 3]> {
        smallvec![
            Domain3D::new(
                self.horizontal.end().right_adjacent(),
                self.vertical.start().clone(),
                self.depth.start().clone()
            ),
            Domain3D::new(
                self.horizontal.start().clone(),
                self.vertical.end().right_adjacent(),
                self.depth.start().clone()
            ),
            Domain3D::new(
                self.horizontal.start().clone(),
                self.vertical.start().clone(),
                self.depth.end().right_adjacent()
            ),
        ]
    }

    fn separate_using(&self, other: &Self) -> Vec<Self> {
        let horizontal = self.horizontal.separate_using(&other.horizontal);
        let vertical = self.vertical.separate_using(&other.vertical);
        let depth = self.depth.separate_using(&other.depth);
        let mut parts = Vec::with_capacity(horizontal.len() * vertical.len() * depth.len());
        for h in &horizontal {
            for v in &vertical {
                for d in &depth {
                    parts.push(Self::new(h.clone(), v.clone(), d.clone()));
                }
            }
        }
        parts
    }

    fn unique_intervals(items: &[Self]) -> Vec<Self> {
        let horizontal: Vec<Interval1D<A>> =
            items.iter().map(|i| i.horizontal.clone()).collect();
        let vertical: Vec<Interval1D<B>> = items.iter().map(|i| i.vertical.clone()).collect();
        let depth: Vec<Interval1D<C>> = items.iter().map(|i| i.depth.clone()).collect();
        let horizontal = Interval1D::unique_intervals(&horizontal);
        let vertical = Interval1D::unique_intervals(&vertical);
        let depth = Interval1D::unique_intervals(&depth);
        let mut parts = Vec::with_capacity(horizontal.len() * vertical.len() * depth.len());
        for h in &horizontal {
            for v in &vertical {
                for d in &depth {
                    parts.push(Self::new(h.clone(), v.clone(), d.clone()));
                }
            }
        }
        parts
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::interval;

    fn cube(
        h: (i32, i32),
        v: (i32, i32),
        d: (i32, i32),
    ) -> Interval3D<i32, i32, i32> {
        Interval3D::new(interval(h.0, h.1), interval(v.0, v.1), interval(d.0, d.1))
    }

    #[test]
    fn adjacency_counts_one_moved_dimension() {
        let base = cube((1, 5), (1, 5), (1, 5));
        assert!(base.is_left_adjacent_to(&cube((6, 9), (1, 5), (1, 5))));
        assert!(base.is_left_adjacent_to(&cube((1, 5), (1, 5), (6, 9))));
        assert!(!base.is_left_adjacent_to(&cube((6, 9), (6, 9), (1, 5))));
        assert!(!base.is_left_adjacent_to(&cube((6, 9), (1, 4), (1, 5))));
    }

    #[test]
    fn subtraction_tiles_the_complement() {
        let base = cube((1, 9), (1, 9), (1, 9));
        let hole = cube((4, 6), (4, 6), (4, 6));
        let pieces = base.subtract(&hole);
        for piece in &pieces {
            assert!(!piece.intersects(&hole));
        }
        for h in 1..=9 {
            for v in 1..=9 {
                for d in 1..=9 {
                    let probe = Domain3D::from((h, v, d));
                    let in_hole = hole.contains(&probe);
                    let covering = pieces.iter().filter(|p| p.contains(&probe)).count();
                    assert_eq!(covering, usize::from(!in_hole));
                }
            }
        }
    }

    #[test]
    fn intersection_is_per_dimension() {
        let a = cube((1, 5), (1, 5), (1, 5));
        let b = cube((3, 9), (0, 2), (5, 5));
        assert_eq!(
            a.intersection_with(&b),
            Some(cube((3, 5), (1, 2), (5, 5)))
        );
        assert!(!a.intersects(&cube((6, 9), (1, 5), (1, 5))));
    }
}
