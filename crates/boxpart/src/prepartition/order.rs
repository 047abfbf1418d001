//! The refinement order.
//!
//! `π₁ ≤ π₂` ("π₁ refines π₂") when every box of `π₁` sits inside some box
//! of `π₂`. Over a fixed root this is a partial order with
//! [`Prepartition::top`] as its greatest and [`Prepartition::bottom`] as
//! its least element.

use core::cmp::Ordering;

use super::Prepartition;
use crate::geometry::BoxN;
use crate::scalar::Coordinate;

impl<T: Coordinate> Prepartition<T> {
    /// `true` if every box of `self` is a sub-box of some box of `other`.
    #[must_use]
    pub fn refines(&self, other: &Self) -> bool {
        self.boxes.iter().all(|j| other.enclosing(j).is_some())
    }

    /// The box of `self` that contains `j`, if any.
    ///
    /// Unique whenever it exists, since the boxes of `self` are disjoint.
    #[must_use]
    pub fn enclosing(&self, j: &BoxN<T>) -> Option<&BoxN<T>> {
        self.boxes.iter().find(|k| j.is_subbox_of(k))
    }

    /// The refinement order via overlaps and unions.
    ///
    /// `true` when every pair `J ∈ self`, `J' ∈ other` whose interiors meet
    /// satisfies `J ≤ J'`, and `union(self) ⊆ union(other)`. Agrees with
    /// [`Prepartition::refines`] on prepartitions of the same root.
    #[must_use]
    pub fn refines_by_overlaps(&self, other: &Self) -> bool {
        let nested = self.boxes.iter().all(|j| {
            other
                .boxes
                .iter()
                .all(|k| j.is_disjoint(k) || j.is_subbox_of(k))
        });
        nested && self.union_subset(other)
    }
}

impl<T: Coordinate> PartialOrd for Prepartition<T> {
    /// Refinement order; prepartitions of different roots are incomparable.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.root != other.root {
            None
        } else if self == other {
            Some(Ordering::Equal)
        } else if self.refines(other) {
            Some(Ordering::Less)
        } else if other.refines(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}
