// SPDX-License-Identifier: MPL-2.0

//! Spatial indexing of records in ordered-hash space.
//!
//! Every domain maps to a coordinate tuple through its per-dimension ordered
//! hashes, and every interval to the box between its start and end
//! coordinates. Because ordered hashes may collide (and unbounded ends
//! collapse onto the extreme values' hashes), box queries are *superset*
//! filters: the store always re-checks candidates with a real
//! [`intersects`](crate::IntervalLike::intersects) before using them.

use box_tree::{BoxBounds, BoxTree};

use crate::domain::{DomainLike, StartOrdered};
use crate::interval::IntervalLike;

/// The box approximating `interval` in ordered-hash space.
pub(crate) fn bounding_box<I: IntervalLike>(interval: &I) -> BoxBounds {
    BoxBounds::new(
        interval.start().coordinates(),
        interval.end().coordinates(),
    )
}

/// Which structure backs a store's spatial queries.
///
/// The box tree answers point and box probes in roughly logarithmic time.
/// The scan substitute keeps no structure at all and makes the store fall
/// back to walking its start index; slower on misses, identical in
/// semantics, and free of spatial state. It exists to rule the spatial
/// index out when chasing a suspected indexing bug.
#[derive(Debug, Clone)]
pub(crate) enum SpatialIndexing<D> {
    /// Box-tree backed queries.
    Tree(BoxTree<StartOrdered<D>>),
    /// No spatial structure; callers scan the start index.
    Scan,
}

impl<D: DomainLike> SpatialIndexing<D> {
    pub(crate) fn tree() -> Self {
        let boundary = BoxBounds::new(D::min_coordinates(), D::max_coordinates());
        SpatialIndexing::Tree(BoxTree::new(boundary))
    }

    pub(crate) fn scan() -> Self {
        SpatialIndexing::Scan
    }

    pub(crate) fn add<I>(&mut self, key: &StartOrdered<D>, interval: &I)
    where
        I: IntervalLike<Domain = D>,
    {
        if let SpatialIndexing::Tree(tree) = self {
            tree.add(key.clone(), bounding_box(interval));
        }
    }

    pub(crate) fn remove<I>(&mut self, key: &StartOrdered<D>, interval: &I)
    where
        I: IntervalLike<Domain = D>,
    {
        if let SpatialIndexing::Tree(tree) = self {
            let removed = tree.remove(key, &bounding_box(interval));
            debug_assert!(removed, "spatial index lost a record");
        }
    }

    pub(crate) fn clear(&mut self) {
        if let SpatialIndexing::Tree(tree) = self {
            tree.clear();
        }
    }

    /// Candidate keys for records intersecting `interval`, or `None` when
    /// the caller should scan instead.
    pub(crate) fn candidates_intersecting<I>(&self, interval: &I) -> Option<Vec<StartOrdered<D>>>
    where
        I: IntervalLike<Domain = D>,
    {
        match self {
            SpatialIndexing::Tree(tree) => Some(tree.get(&bounding_box(interval))),
            SpatialIndexing::Scan => None,
        }
    }

    /// Candidate keys for records containing `domain`, or `None` when the
    /// caller should scan instead.
    pub(crate) fn candidates_at(&self, domain: &D) -> Option<Vec<StartOrdered<D>>> {
        match self {
            SpatialIndexing::Tree(tree) => Some(tree.get_at(&domain.coordinates())),
            SpatialIndexing::Scan => None,
        }
    }
}
