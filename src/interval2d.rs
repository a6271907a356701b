// SPDX-License-Identifier: MPL-2.0

//! Two-dimensional intervals: a product of two [`Interval1D`]s.

use std::fmt::{self, Display};

use smallvec::{smallvec, SmallVec};

use crate::domain::Domain2D;
use crate::domain_value::DomainValueLike;
use crate::interval::{coalesce_adjacent, Interval1D, IntervalLike, Remainder};

/// An axis-aligned rectangle in a two-dimensional domain space.
///
/// Bounds validity is per dimension, so any product of two valid 1-D
/// intervals is valid and the fields are freely accessible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval2D<A, B> {
    /// Extent along the first dimension.
    pub horizontal: Interval1D<A>,
    /// Extent along the second dimension.
    pub vertical: Interval1D<B>,
}

impl<A: DomainValueLike, B: DomainValueLike> Interval2D<A, B> {
    /// Rectangle from its two per-dimension extents.
    pub fn new(horizontal: Interval1D<A>, vertical: Interval1D<B>) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Per-dimension exclusion: what is left of each extent once the other
    /// rectangle's corresponding extent is taken out.
    pub fn excluding(
        &self,
        other: &Self,
    ) -> (Remainder<Interval1D<A>>, Remainder<Interval1D<B>>) {
        (
            self.horizontal.excluding(&other.horizontal),
            self.vertical.excluding(&other.vertical),
        )
    }
}

impl<A: DomainValueLike, B: DomainValueLike> Display for Interval2D<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.horizontal, self.vertical)
    }
}

impl<A: DomainValueLike, B: DomainValueLike> IntervalLike for Interval2D<A, B> {
    type Domain = Domain2D<A, B>;

    fn start(&self) -> Domain2D<A, B> {
        Domain2D::new(self.horizontal.start().clone(), self.vertical.start().clone())
    }

    fn end(&self) -> Domain2D<A, B> {
        Domain2D::new(self.horizontal.end().clone(), self.vertical.end().clone())
    }

    fn unbounded() -> Self {
        Self::new(Interval1D::unbounded(), Interval1D::unbounded())
    }

    fn contains(&self, domain: &Domain2D<A, B>) -> bool {
        self.horizontal.contains(&domain.horizontal) && self.vertical.contains(&domain.vertical)
    }

    fn intersection_with(&self, other: &Self) -> Option<Self> {
        let horizontal = self.horizontal.intersection_with(&other.horizontal)?;
        let vertical = self.vertical.intersection_with(&other.vertical)?;
        Some(Self::new(horizontal, vertical))
    }

    fn joined_with(&self, other: &Self) -> Self {
        Self::new(
            self.horizontal.joined_with(&other.horizontal),
            self.vertical.joined_with(&other.vertical),
        )
    }

    fn is_left_adjacent_to(&self, other: &Self) -> bool {
        let horizontal_adjacent = self.horizontal.is_left_adjacent_to(&other.horizontal)
            && self.vertical == other.vertical;
        let vertical_adjacent = self.vertical.is_left_adjacent_to(&other.vertical)
            && self.horizontal == other.horizontal;
        horizontal_adjacent || vertical_adjacent
    }

    fn right_adjacent_keys(&self) -> SmallVec<[Domain2D<A, B>; 3]> {
        smallvec![
            Domain2D::new(
                self.horizontal.end().right_adjacent(),
                self.vertical.start().clone()
            ),
            Domain2D::new(
                self.horizontal.start().clone(),
                self.vertical.end().right_adjacent()
            ),
        ]
    }

    fn separate_using(&self, other: &Self) -> Vec<Self> {
        let horizontal = self.horizontal.separate_using(&other.horizontal);
        let vertical = self.vertical.separate_using(&other.vertical);
        let mut parts = Vec::with_capacity(horizontal.len() * vertical.len());
        for h in &horizontal {
            for v in &vertical {
                parts.push(Self::new(h.clone(), v.clone()));
            }
        }
        parts
    }

    /// Direct rectangular subtraction, case by case on the per-dimension
    /// remainders. Strips taken out of the vertical extent run the full
    /// width, pieces beside the removed region only span its height. A
    /// strictly interior hole (both dimensions split) leaves five pieces:
    /// the full-width strip below, a bite on either side, and the region
    /// above carved at the hole's left edge.
    fn subtract(&self, inner: &Self) -> Vec<Self> {
        match self.excluding(inner) {
            (Remainder::Split(left, right), Remainder::Split(below, above)) => vec![
                Self::new(self.horizontal.clone(), below),
                Self::new(left.clone(), inner.vertical.clone()),
                Self::new(right.clone(), inner.vertical.clone()),
                Self::new(left, above.clone()),
                Self::new(inner.horizontal.joined_with(&right), above),
            ],
            (horizontal, vertical) => {
                let mut parts = Vec::with_capacity(4);
                let push_v = |parts: &mut Vec<Self>, piece: Interval1D<B>| {
                    parts.push(Self::new(self.horizontal.clone(), piece));
                };
                match vertical {
                    Remainder::None => {}
                    Remainder::Single(piece) => push_v(&mut parts, piece),
                    Remainder::Split(below, above) => {
                        push_v(&mut parts, below);
                        push_v(&mut parts, above);
                    }
                }
                let push_h = |parts: &mut Vec<Self>, piece: Interval1D<A>| {
                    parts.push(Self::new(piece, inner.vertical.clone()));
                };
                match horizontal {
                    Remainder::None => {}
                    Remainder::Single(piece) => push_h(&mut parts, piece),
                    Remainder::Split(left, right) => {
                        push_h(&mut parts, left);
                        push_h(&mut parts, right);
                    }
                }
                coalesce_adjacent(parts)
            }
        }
    }

    fn unique_intervals(items: &[Self]) -> Vec<Self> {
        let horizontal: Vec<Interval1D<A>> =
            items.iter().map(|i| i.horizontal.clone()).collect();
        let vertical: Vec<Interval1D<B>> = items.iter().map(|i| i.vertical.clone()).collect();
        let horizontal = Interval1D::unique_intervals(&horizontal);
        let vertical = Interval1D::unique_intervals(&vertical);
        let mut parts = Vec::with_capacity(horizontal.len() * vertical.len());
        for h in &horizontal {
            for v in &vertical {
                parts.push(Self::new(h.clone(), v.clone()));
            }
        }
        parts
    }

    fn to_code_like_string(&self) -> String {
        format!(
            "{} x {}",
            self.horizontal.to_code_like_string(),
            self.vertical.to_code_like_string()
        )
    }
}
