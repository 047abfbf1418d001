//! Restriction, filtering, disjoint union and meet.

use tracing::debug;

use super::Prepartition;
use crate::error::{Result, Violation};
use crate::geometry::BoxN;
use crate::scalar::Coordinate;

impl<T: Coordinate> Prepartition<T> {
    /// Restrict to a box `J`, producing a prepartition of `J`.
    ///
    /// Each box is intersected with `J`; empty intersections are dropped.
    /// The union of the result is `J ∩ union(self)`. `J` need not be a
    /// sub-box of the root.
    #[must_use]
    pub fn restrict(&self, j: &BoxN<T>) -> Self {
        Self::from_options(j.clone(), self.boxes.iter().map(|k| j.intersect(k)))
    }

    /// Keep the boxes satisfying `pred`.
    #[must_use]
    pub fn filter<P>(&self, mut pred: P) -> Self
    where
        P: FnMut(&BoxN<T>) -> bool,
    {
        Self {
            root: self.root.clone(),
            boxes: self.boxes.iter().filter(|j| pred(j)).cloned().collect(),
        }
    }

    /// Union of two prepartitions of the same root whose unions are
    /// disjoint.
    ///
    /// # Errors
    ///
    /// [`crate::BoxError::DimensionMismatch`] if the roots live in different
    /// dimensions;
    /// [`Violation::RootMismatch`] if the roots differ;
    /// [`Violation::Overlapping`] if some box of `self` (index `first`)
    /// meets some box of `other` (index `second`).
    pub fn disj_union(&self, other: &Self) -> Result<Self> {
        other.root.check_dim(self.root.dim())?;
        if self.root != other.root {
            return Err(Violation::RootMismatch.into());
        }
        for (first, a) in self.boxes.iter().enumerate() {
            if let Some(second) = other.boxes.iter().position(|b| !a.is_disjoint(b)) {
                debug!(first, second, "disjoint union of overlapping prepartitions");
                return Err(Violation::Overlapping { first, second }.into());
            }
        }
        let boxes = self.boxes.iter().chain(&other.boxes).cloned().collect();
        Ok(Self::from_parts(self.root.clone(), boxes))
    }

    /// Meet in the refinement order: `J ↦ other.restrict(J)` bound over
    /// the boxes of `self`.
    ///
    /// Idempotent, commutative and associative, with `inf(a, b) ≤ a`,
    /// `inf(a, b) ≤ b`, and `π ≤ inf(a, b)` whenever `π ≤ a` and `π ≤ b`.
    /// The result keeps the root of `self`. Boxes of another dimension
    /// never meet, so two prepartitions of different dimensions have the
    /// empty prepartition of `self.root()` as their meet.
    #[must_use]
    pub fn inf(&self, other: &Self) -> Self {
        self.bind_with(|j| other.restrict(j)).0
    }
}
