// SPDX-License-Identifier: MPL-2.0

//! This crate contains a small in-memory spatial index for payloads keyed by
//! axis-aligned bounding boxes with `f64` coordinates.
//!
//! A [`BoxTree`] is built over a fixed boundary region and holds
//! `(payload, box)` pairs. Nodes hold up to a fixed number of items; an
//! overfull node splits its region at the midpoint of every dimension into
//! `2^n` children and pushes down every item that fits entirely inside one
//! child. Items straddling a midpoint stay at the node that split, so a box
//! is always stored exactly once.
//!
//! Queries are *superset* filters: [`get`](BoxTree::get) returns every
//! payload whose box intersects the query box (closed-box test), and
//! [`get_at`](BoxTree::get_at) every payload whose box contains the query
//! point. Callers that need open/closed endpoint distinctions are expected
//! to post-filter the candidates themselves.
//!
//! Coordinates must be finite (no NaN); comparisons are plain `f64`
//! comparisons.
//!
//! ## Optional features
//!
//! * `proptest`: Exports a proptest strategy for two-dimensional [`BoxBounds`].

use smallvec::SmallVec;

#[cfg(any(feature = "proptest", test))]
use proptest::prelude::*;

/// Coordinate tuple of a corner, one entry per dimension.
///
/// Three slots cover every dimensionality used in practice without spilling
/// to the heap.
pub type Coords = SmallVec<[f64; 3]>;

/// An axis-aligned box, closed on every side.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxBounds {
    min: Coords,
    max: Coords,
}

impl BoxBounds {
    /// Box from its minimum and maximum corners.
    ///
    /// Both corners must have the same dimension count and `min[d] <= max[d]`
    /// must hold in every dimension.
    pub fn new(min: Coords, max: Coords) -> Self {
        debug_assert_eq!(min.len(), max.len());
        debug_assert!(min.iter().zip(max.iter()).all(|(lo, hi)| lo <= hi));
        Self { min, max }
    }

    /// Degenerate box covering a single point.
    pub fn from_point(point: Coords) -> Self {
        Self {
            min: point.clone(),
            max: point,
        }
    }

    /// Number of dimensions of this box.
    pub fn dimensions(&self) -> usize {
        self.min.len()
    }

    /// Minimum corner.
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    /// Maximum corner.
    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// Closed-box intersection test.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min
            .iter()
            .zip(other.max.iter())
            .all(|(lo, hi)| lo <= hi)
            && other
                .min
                .iter()
                .zip(self.max.iter())
                .all(|(lo, hi)| lo <= hi)
    }

    /// True if `point` lies inside this box (boundary included).
    pub fn contains_point(&self, point: &[f64]) -> bool {
        self.min.iter().zip(point.iter()).all(|(lo, p)| lo <= p)
            && point.iter().zip(self.max.iter()).all(|(p, hi)| p <= hi)
    }

    /// True if `other` lies entirely inside this box.
    pub fn contains_box(&self, other: &Self) -> bool {
        self.min
            .iter()
            .zip(other.min.iter())
            .all(|(lo, o)| lo <= o)
            && other
                .max
                .iter()
                .zip(self.max.iter())
                .all(|(o, hi)| o <= hi)
    }

    /// The `2^n` sub-boxes obtained by cutting every dimension at its
    /// midpoint. Sub-box `mask` takes the upper half of dimension `d` when
    /// bit `d` of `mask` is set.
    fn halvings(&self) -> Vec<BoxBounds> {
        let n = self.dimensions();
        (0..1usize << n)
            .map(|mask| {
                let mut min = Coords::new();
                let mut max = Coords::new();
                for d in 0..n {
                    let mid = (self.min[d] + self.max[d]) / 2.0;
                    if mask & (1 << d) == 0 {
                        min.push(self.min[d]);
                        max.push(mid);
                    } else {
                        min.push(mid);
                        max.push(self.max[d]);
                    }
                }
                BoxBounds::new(min, max)
            })
            .collect()
    }
}

/// How many items a node holds before it splits.
const DEFAULT_NODE_CAPACITY: usize = 16;

/// How deep the tree may grow. Bounds the recursion when many congruent
/// boxes pile onto the same midpoints.
const DEFAULT_DEPTH_LIMIT: usize = 12;

#[derive(Debug, Clone)]
struct Node<P> {
    region: BoxBounds,
    items: Vec<(P, BoxBounds)>,
    /// Empty for leaves, otherwise exactly `2^n` children.
    children: Vec<Node<P>>,
}

impl<P: Clone + PartialEq> Node<P> {
    fn leaf(region: BoxBounds) -> Self {
        Self {
            region,
            items: Vec::new(),
            children: Vec::new(),
        }
    }

    fn add(&mut self, payload: P, bounds: BoxBounds, capacity: usize, depth_remaining: usize) {
        if self.children.is_empty() {
            self.items.push((payload, bounds));
            if self.items.len() > capacity && depth_remaining > 0 {
                self.split(capacity, depth_remaining);
            }
        } else if let Some(child) = self
            .children
            .iter_mut()
            .find(|c| c.region.contains_box(&bounds))
        {
            child.add(payload, bounds, capacity, depth_remaining - 1);
        } else {
            self.items.push((payload, bounds));
        }
    }

    fn split(&mut self, capacity: usize, depth_remaining: usize) {
        self.children = self.region.halvings().into_iter().map(Node::leaf).collect();
        let items = std::mem::take(&mut self.items);
        for (payload, bounds) in items {
            match self
                .children
                .iter_mut()
                .find(|c| c.region.contains_box(&bounds))
            {
                Some(child) => child.add(payload, bounds, capacity, depth_remaining - 1),
                None => self.items.push((payload, bounds)),
            }
        }
    }

    fn remove(&mut self, payload: &P, bounds: &BoxBounds) -> bool {
        if let Some(at) = self
            .items
            .iter()
            .position(|(p, b)| p == payload && b == bounds)
        {
            self.items.remove(at);
            return true;
        }
        self.children
            .iter_mut()
            .filter(|c| c.region.contains_box(bounds))
            .any(|c| c.remove(payload, bounds))
    }

    fn collect_intersecting(&self, query: &BoxBounds, out: &mut Vec<P>) {
        for (payload, bounds) in &self.items {
            if bounds.intersects(query) {
                out.push(payload.clone());
            }
        }
        for child in &self.children {
            if child.region.intersects(query) {
                child.collect_intersecting(query, out);
            }
        }
    }

    fn collect_at(&self, point: &[f64], out: &mut Vec<P>) {
        for (payload, bounds) in &self.items {
            if bounds.contains_point(point) {
                out.push(payload.clone());
            }
        }
        for child in &self.children {
            if child.region.contains_point(point) {
                child.collect_at(point, out);
            }
        }
    }
}

/// Spatial index over `(payload, box)` pairs within a fixed boundary region.
#[derive(Debug, Clone)]
pub struct BoxTree<P> {
    root: Node<P>,
    capacity: usize,
    depth_limit: usize,
    len: usize,
}

impl<P: Clone + PartialEq> BoxTree<P> {
    /// Empty tree over the given boundary region with default node capacity
    /// and depth limit.
    pub fn new(boundary: BoxBounds) -> Self {
        Self::with_capacity(boundary, DEFAULT_NODE_CAPACITY, DEFAULT_DEPTH_LIMIT)
    }

    /// Empty tree with explicit node capacity and depth limit.
    pub fn with_capacity(boundary: BoxBounds, capacity: usize, depth_limit: usize) -> Self {
        Self {
            root: Node::leaf(boundary),
            capacity: capacity.max(1),
            depth_limit,
            len: 0,
        }
    }

    /// The boundary region this tree was built over.
    pub fn boundary(&self) -> &BoxBounds {
        &self.root.region
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no item is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `payload` under `bounds`.
    pub fn add(&mut self, payload: P, bounds: BoxBounds) {
        debug_assert_eq!(bounds.dimensions(), self.root.region.dimensions());
        self.root.add(payload, bounds, self.capacity, self.depth_limit);
        self.len += 1;
    }

    /// Store every `(payload, box)` pair of `items`.
    pub fn add_all(&mut self, items: impl IntoIterator<Item = (P, BoxBounds)>) {
        for (payload, bounds) in items {
            self.add(payload, bounds);
        }
    }

    /// Remove the item stored as exactly `(payload, bounds)`. Returns false
    /// when no such item exists.
    pub fn remove(&mut self, payload: &P, bounds: &BoxBounds) -> bool {
        let removed = self.root.remove(payload, bounds);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Drop every stored item, keeping the boundary region.
    pub fn clear(&mut self) {
        let region = self.root.region.clone();
        self.root = Node::leaf(region);
        self.len = 0;
    }

    /// Payloads whose box intersects `query` (closed-box test).
    pub fn get(&self, query: &BoxBounds) -> Vec<P> {
        let mut out = Vec::new();
        self.root.collect_intersecting(query, &mut out);
        out
    }

    /// Payloads whose box contains `point`.
    pub fn get_at(&self, point: &[f64]) -> Vec<P> {
        let mut out = Vec::new();
        self.root.collect_at(point, &mut out);
        out
    }
}

/// Generate two-dimensional boxes inside `[-1000, 1000]^2` from two corner
/// draws per dimension.
#[cfg(any(feature = "proptest", test))]
pub fn proptest_strategy() -> impl Strategy<Value = BoxBounds> {
    let coord = -1000.0f64..1000.0f64;
    (coord.clone(), coord.clone(), coord.clone(), coord).prop_map(|(x1, x2, y1, y2)| {
        BoxBounds::new(
            Coords::from_slice(&[x1.min(x2), y1.min(y2)]),
            Coords::from_slice(&[x1.max(x2), y1.max(y2)]),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary() -> BoxBounds {
        BoxBounds::new(
            Coords::from_slice(&[-1000.0, -1000.0]),
            Coords::from_slice(&[1000.0, 1000.0]),
        )
    }

    #[test]
    fn add_then_query_point() {
        let mut tree = BoxTree::new(boundary());
        tree.add(
            1usize,
            BoxBounds::new(
                Coords::from_slice(&[0.0, 0.0]),
                Coords::from_slice(&[10.0, 10.0]),
            ),
        );
        assert_eq!(tree.get_at(&[5.0, 5.0]), vec![1]);
        assert!(tree.get_at(&[11.0, 5.0]).is_empty());
    }

    #[test]
    fn remove_is_exact() {
        let b = BoxBounds::new(
            Coords::from_slice(&[0.0, 0.0]),
            Coords::from_slice(&[1.0, 1.0]),
        );
        let other = BoxBounds::new(
            Coords::from_slice(&[0.0, 0.0]),
            Coords::from_slice(&[2.0, 2.0]),
        );
        let mut tree = BoxTree::new(boundary());
        tree.add(7usize, b.clone());
        assert!(!tree.remove(&7, &other));
        assert!(tree.remove(&7, &b));
        assert!(tree.is_empty());
    }

    #[test]
    fn split_keeps_straddlers_findable() {
        // Low capacity forces splits; boxes across the midpoint must still
        // be stored exactly once and stay reachable.
        let mut tree = BoxTree::with_capacity(boundary(), 2, 8);
        for i in 0..100i32 {
            let lo = f64::from(i) - 0.5;
            let hi = f64::from(i) + 0.5;
            tree.add(
                i,
                BoxBounds::new(Coords::from_slice(&[lo, lo]), Coords::from_slice(&[hi, hi])),
            );
        }
        assert_eq!(tree.len(), 100);
        for i in 0..100i32 {
            let p = [f64::from(i), f64::from(i)];
            assert!(tree.get_at(&p).contains(&i));
        }
    }

    proptest! {
        #[test]
        fn get_matches_brute_force(
            boxes in proptest::collection::vec(proptest_strategy(), 1..60),
            query in proptest_strategy(),
        ) {
            let mut tree = BoxTree::with_capacity(boundary(), 4, 8);
            tree.add_all(boxes.iter().cloned().enumerate());

            let mut expected: Vec<usize> = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| b.intersects(&query))
                .map(|(i, _)| i)
                .collect();
            let mut actual = tree.get(&query);
            expected.sort_unstable();
            actual.sort_unstable();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn get_at_matches_brute_force(
            boxes in proptest::collection::vec(proptest_strategy(), 1..60),
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
        ) {
            let mut tree = BoxTree::with_capacity(boundary(), 4, 8);
            tree.add_all(boxes.iter().cloned().enumerate());

            let point = [x, y];
            let mut expected: Vec<usize> = boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| b.contains_point(&point))
                .map(|(i, _)| i)
                .collect();
            let mut actual = tree.get_at(&point);
            expected.sort_unstable();
            actual.sort_unstable();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn remove_undoes_add(
            boxes in proptest::collection::vec(proptest_strategy(), 1..40),
        ) {
            let mut tree = BoxTree::with_capacity(boundary(), 4, 8);
            tree.add_all(boxes.iter().cloned().enumerate());
            for (i, b) in boxes.iter().enumerate() {
                prop_assert!(tree.remove(&i, b));
            }
            prop_assert!(tree.is_empty());
            prop_assert!(tree.get(&boundary()).is_empty());
        }
    }
}
