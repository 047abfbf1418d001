//! The partition predicate and exact union comparisons.
//!
//! A prepartition of `I` is a partition when the cells of its boxes cover
//! the cell of `I`. Every question about unions here is decided on a grid
//! cut by the face planes of the boxes involved: each grid cell lies inside
//! one box of a prepartition or misses its union entirely, so a union
//! comparison becomes a finite check over cells. Only comparisons of
//! coordinates are needed, never arithmetic, so the answers are exact for
//! floating-point corners too.
//!
//! Closure properties:
//!
//! - `top(I)` is a partition;
//! - `bi_union(π, πᵢ)` is a partition when `π` and every `πᵢ(J)` are;
//! - `restrict(π, J)` is a partition of `J` when `π` is and `J ≤ I`;
//! - `inf(π₁, π₂)` is a partition when both are;
//! - `disj_union(π, π.compl())` is always a partition.

use tracing::debug;

use super::Prepartition;
use crate::scalar::Coordinate;

impl<T: Coordinate> Prepartition<T> {
    /// `true` if the boxes cover the root: every point of the root's cell
    /// lies in the cell of some box.
    #[must_use]
    pub fn is_partition(&self) -> bool {
        if self.boxes.is_empty() {
            return false;
        }
        let grid = Self::common_grid(&self.root, [self]);
        let covered = grid.boxes.iter().all(|cell| self.enclosing(cell).is_some());
        debug!(boxes = self.boxes.len(), cells = grid.len(), covered, "is_partition");
        covered
    }

    /// `union(self) ⊆ union(other)`.
    #[must_use]
    pub fn union_subset(&self, other: &Self) -> bool {
        let grid = Self::common_grid(&self.root, [self, other]);
        grid.boxes
            .iter()
            .filter(|cell| self.enclosing(cell).is_some())
            .all(|cell| other.enclosing(cell).is_some())
    }

    /// `union(self) == union(other)`.
    #[must_use]
    pub fn union_eq(&self, other: &Self) -> bool {
        self.union_subset(other) && other.union_subset(self)
    }

    /// `union(self) ∩ union(other) = ∅`.
    #[must_use]
    pub fn union_disjoint(&self, other: &Self) -> bool {
        self.boxes
            .iter()
            .all(|a| other.boxes.iter().all(|b| a.is_disjoint(b)))
    }

    /// A prepartition of the root whose union is `root \ union(self)`.
    ///
    /// Built from the grid cells that miss `union(self)`.
    #[must_use]
    pub fn compl(&self) -> Self {
        Self::common_grid(&self.root, [self]).filter(|cell| self.enclosing(cell).is_none())
    }
}
