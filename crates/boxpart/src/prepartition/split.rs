//! Hyperplane splitting.
//!
//! A split plane `(i, x)` cuts every box it crosses into the part below and
//! the part above `x_i = x`. [`Prepartition::split_many`] applies a list of
//! planes to every box in turn; planes that miss a box leave it whole.
//!
//! Splitting the root by all the planes carried by the boxes of `π`
//! ([`Prepartition::split_planes`]) produces a grid whose cells each lie
//! either inside one box of `π` or outside `union(π)`. That grid is the
//! common refinement used to compare unions and to reconcile sums of
//! box-additive maps.

use tracing::{debug, trace};

use super::Prepartition;
use crate::error::{BoxError, Result};
use crate::geometry::BoxN;
use crate::scalar::{total_cmp, Coordinate};

/// A split instruction: cut along axis `.0` at coordinate `.1`.
pub type SplitPlane<T> = (usize, T);

impl<T: Coordinate> Prepartition<T> {
    /// The partition of `root` into the (at most two) pieces of
    /// [`BoxN::split_at`].
    ///
    /// # Errors
    ///
    /// [`BoxError::AxisOutOfRange`] if `i >= root.dim()`.
    pub fn split(root: &BoxN<T>, i: usize, x: &T) -> Result<Self> {
        Self::top(root).split_many(&[(i, x.clone())])
    }

    /// Split every box by every plane, in order.
    ///
    /// Partitions stay partitions, and the result always refines `self`.
    /// The outcome does not depend on the order of `planes`.
    ///
    /// # Errors
    ///
    /// [`BoxError::AxisOutOfRange`] if some plane's axis is not below the
    /// root's dimension.
    pub fn split_many(&self, planes: &[SplitPlane<T>]) -> Result<Self> {
        let dim = self.root.dim();
        if let Some(&(axis, _)) = planes.iter().find(|(axis, _)| *axis >= dim) {
            return Err(BoxError::AxisOutOfRange { axis, dim });
        }
        Ok(self.apply_planes(planes))
    }

    /// The splitting loop. Planes on axes outside the root's dimension
    /// leave every box whole.
    fn apply_planes(&self, planes: &[SplitPlane<T>]) -> Self {
        let mut boxes = self.boxes.clone();
        for (axis, at) in planes {
            let before = boxes.len();
            boxes = boxes
                .iter()
                .flat_map(|j| {
                    let (lo, hi) = j.split_at(*axis, at);
                    lo.into_iter().chain(hi)
                })
                .collect();
            trace!(axis, ?at, before, after = boxes.len(), "split step");
        }
        debug!(
            planes = planes.len(),
            from = self.boxes.len(),
            to = boxes.len(),
            "split_many"
        );
        Self::from_parts(self.root.clone(), boxes)
    }

    /// All hyperplanes carried by the faces of the boxes that cut the root
    /// strictly inside, sorted by axis then coordinate, without repeats.
    #[must_use]
    pub fn split_planes(&self) -> Vec<SplitPlane<T>> {
        let mut planes: Vec<SplitPlane<T>> = self
            .face_planes()
            .filter(|p| cuts(&self.root, p))
            .collect();
        sort_planes(&mut planes);
        planes
    }

    /// Every face hyperplane of every box, unfiltered.
    fn face_planes(&self) -> impl Iterator<Item = SplitPlane<T>> + '_ {
        self.boxes.iter().flat_map(|j| {
            (0..j.dim())
                .flat_map(move |i| [(i, j.lower()[i].clone()), (i, j.upper()[i].clone())])
        })
    }

    /// The root split by the planes of every prepartition in `family`.
    ///
    /// Each cell of the grid lies inside a single box of each member, or
    /// outside that member's union.
    pub(crate) fn common_grid<'a, I>(root: &BoxN<T>, family: I) -> Self
    where
        T: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        let mut planes: Vec<SplitPlane<T>> = family
            .into_iter()
            .flat_map(|p| p.face_planes())
            .filter(|p| cuts(root, p))
            .collect();
        sort_planes(&mut planes);
        Self::top(root).apply_planes(&planes)
    }

    /// The split planes of every member of `family`, merged.
    pub(crate) fn shared_planes<'a, I>(family: I) -> Vec<SplitPlane<T>>
    where
        T: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        let mut planes: Vec<SplitPlane<T>> =
            family.into_iter().flat_map(Self::split_planes).collect();
        sort_planes(&mut planes);
        planes
    }
}

/// `true` if the plane passes strictly through the interior of `root`.
fn cuts<T: Coordinate>(root: &BoxN<T>, (i, x): &SplitPlane<T>) -> bool {
    *i < root.dim() && &root.lower()[*i] < x && x < &root.upper()[*i]
}

fn sort_planes<T: Coordinate>(planes: &mut Vec<SplitPlane<T>>) {
    planes.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| total_cmp(&a.1, &b.1)));
    planes.dedup_by(|a, b| a.0 == b.0 && a.1 == b.1);
}
