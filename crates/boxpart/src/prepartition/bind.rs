//! Bounded union: refine every box of a prepartition by its own prepartition.
//!
//! Given `π` and, for each `J ∈ π`, a prepartition `πᵢ(J)` of `J`, the
//! bounded union collects all boxes of all `πᵢ(J)`. Boxes coming from
//! different parents are disjoint because the parents are; boxes with the
//! same parent are disjoint because `πᵢ(J)` is a prepartition.
//!
//! Every box of the result has exactly one parent. [`IndexedBiUnion`] keeps
//! that parent alongside each box, so the lookup is a binary search rather
//! than a scan over `π`.

use tracing::debug;

use super::Prepartition;
use crate::error::{Result, Violation};
use crate::geometry::BoxN;
use crate::scalar::Coordinate;

/// A bounded union together with the parent of each of its boxes.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedBiUnion<T> {
    union: Prepartition<T>,
    parents: Vec<BoxN<T>>,
}

impl<T: Coordinate> IndexedBiUnion<T> {
    /// The bounded union itself.
    #[inline]
    #[must_use]
    pub fn prepartition(&self) -> &Prepartition<T> {
        &self.union
    }

    /// Drop the parent index.
    #[must_use]
    pub fn into_prepartition(self) -> Prepartition<T> {
        self.union
    }

    /// The box of the original prepartition that `j` came from.
    ///
    /// `None` if `j` is not a box of the bounded union.
    #[must_use]
    pub fn parent_of(&self, j: &BoxN<T>) -> Option<&BoxN<T>> {
        self.union.position(j).map(|k| &self.parents[k])
    }

    /// Iterate over `(box, parent)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&BoxN<T>, &BoxN<T>)> {
        self.union.boxes.iter().zip(&self.parents)
    }
}

impl<T: Coordinate> Prepartition<T> {
    /// Bounded union without checking the roots of the children.
    ///
    /// Callers guarantee that every box of `f(J)` is a sub-box of `J`.
    /// Returns the union and, aligned with its boxes, their parents.
    pub(crate) fn bind_with<F>(&self, f: F) -> (Self, Vec<BoxN<T>>)
    where
        F: FnMut(&BoxN<T>) -> Prepartition<T>,
    {
        let children = self.boxes.iter().map(f).collect();
        self.assemble(children)
    }

    /// Merge `children[k]` (a prepartition of `self.boxes[k]`) into one
    /// prepartition of the root.
    fn assemble(&self, children: Vec<Prepartition<T>>) -> (Self, Vec<BoxN<T>>) {
        let mut pairs: Vec<(BoxN<T>, BoxN<T>)> = self
            .boxes
            .iter()
            .zip(children)
            .flat_map(|(j, child)| child.boxes.into_iter().map(move |k| (k, j.clone())))
            .collect();
        pairs.sort_by(|a, b| a.0.canonical_cmp(&b.0));
        let (boxes, parents) = pairs.into_iter().unzip();
        let union = Self {
            root: self.root.clone(),
            boxes,
        };
        debug_assert!(union.check_invariants().is_ok(), "bounded union overlaps");
        (union, parents)
    }

    /// Bounded union of `f(J)` over the boxes `J` of `self`.
    ///
    /// The union of the result equals the union of `f(J)` over all `J`; in
    /// particular it equals `union(self)` when every `f(J)` is a partition
    /// of `J`.
    ///
    /// # Errors
    ///
    /// [`crate::BoxError::DimensionMismatch`] if some `f(J)` lives in
    /// another dimension than `J`;
    /// [`Violation::RootMismatch`] if some `f(J)` is not a prepartition of
    /// `J`.
    pub fn bi_union<F>(&self, f: F) -> Result<Self>
    where
        F: FnMut(&BoxN<T>) -> Prepartition<T>,
    {
        self.bi_union_indexed(f).map(IndexedBiUnion::into_prepartition)
    }

    /// [`Prepartition::bi_union`], keeping the parent of every box.
    ///
    /// # Errors
    ///
    /// Same as [`Prepartition::bi_union`].
    pub fn bi_union_indexed<F>(&self, mut f: F) -> Result<IndexedBiUnion<T>>
    where
        F: FnMut(&BoxN<T>) -> Prepartition<T>,
    {
        let mut children = Vec::with_capacity(self.boxes.len());
        for j in &self.boxes {
            let child = f(j);
            child.root().check_dim(j.dim())?;
            if child.root() != j {
                debug!(parent = %j, child_root = %child.root(), "bounded union root mismatch");
                return Err(Violation::RootMismatch.into());
            }
            children.push(child);
        }
        let (union, parents) = self.assemble(children);
        Ok(IndexedBiUnion { union, parents })
    }
}
