//! Prepartitions: finite families of pairwise-disjoint sub-boxes of a root.
//!
//! A [`Prepartition`] over a root box `I` holds a set of boxes such that
//!
//! - (a) every box is a sub-box of `I`, and
//! - (b) distinct boxes have disjoint interiors.
//!
//! Values are immutable; every operation returns a new prepartition built
//! by a constructor that maintains (a) and (b). The boxes are kept in a
//! canonical order without duplicates, so two prepartitions holding the
//! same set of boxes compare equal regardless of how they were built.
//!
//! # Operations
//!
//! | Module | Operations |
//! |--------|------------|
//! | this one | `top`, `bottom`, `single`, `from_boxes`, `union`, `distortion`, `multiplicity_at` |
//! | `order` | refinement order (`PartialOrd`), `refines`, `refines_by_overlaps` |
//! | `ops` | `restrict`, `filter`, `disj_union`, `inf` |
//! | `bind` | `bi_union`, `bi_union_indexed` |
//! | `split` | `split`, `split_many`, `split_planes` |
//! | `partition` | `is_partition`, union comparisons, `compl` |
//!
//! # Example
//!
//! ```
//! use boxpart::{BoxN, Prepartition};
//!
//! let i = BoxN::new(vec![0.0, 0.0], vec![2.0, 2.0]).unwrap();
//! let halves = Prepartition::split(&i, 0, &1.0).unwrap();
//! assert_eq!(halves.len(), 2);
//! assert!(halves.is_partition());
//! assert!(halves <= Prepartition::top(&i));
//! ```

mod bind;
mod ops;
mod order;
mod partition;
mod split;

pub use bind::IndexedBiUnion;
pub use split::SplitPlane;

use core::fmt;

use crate::error::{Result, Violation};
use crate::geometry::BoxN;
use crate::scalar::{max_of, Coordinate};

/// A finite set of pairwise-disjoint sub-boxes of a root box.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawPrepartition<T>",
        bound(deserialize = "T: Coordinate + serde::Deserialize<'de>")
    )
)]
pub struct Prepartition<T> {
    root: BoxN<T>,
    boxes: Vec<BoxN<T>>,
}

/// Unvalidated wire form of a prepartition.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(bound(deserialize = "T: Coordinate + serde::Deserialize<'de>"))]
struct RawPrepartition<T> {
    root: BoxN<T>,
    boxes: Vec<BoxN<T>>,
}

#[cfg(feature = "serde")]
impl<T: Coordinate> TryFrom<RawPrepartition<T>> for Prepartition<T> {
    type Error = crate::error::BoxError;

    fn try_from(raw: RawPrepartition<T>) -> Result<Self> {
        Self::from_boxes(&raw.root, raw.boxes)
    }
}

impl<T: Coordinate> Prepartition<T> {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Assemble from boxes already known to satisfy (a) and (b).
    ///
    /// Sorts into canonical order and drops exact duplicates.
    pub(crate) fn from_parts(root: BoxN<T>, mut boxes: Vec<BoxN<T>>) -> Self {
        boxes.sort_by(BoxN::canonical_cmp);
        boxes.dedup();
        let p = Self { root, boxes };
        debug_assert!(p.check_invariants().is_ok(), "prepartition invariant violated");
        p
    }

    /// Assemble from possibly-empty boxes, discarding the empty ones.
    pub(crate) fn from_options<I>(root: BoxN<T>, boxes: I) -> Self
    where
        I: IntoIterator<Item = Option<BoxN<T>>>,
    {
        Self::from_parts(root, boxes.into_iter().flatten().collect())
    }

    /// The one-box prepartition `{I}`; top of the refinement order.
    #[must_use]
    pub fn top(root: &BoxN<T>) -> Self {
        Self {
            root: root.clone(),
            boxes: vec![root.clone()],
        }
    }

    /// The empty prepartition; bottom of the refinement order.
    #[must_use]
    pub fn bottom(root: &BoxN<T>) -> Self {
        Self {
            root: root.clone(),
            boxes: Vec::new(),
        }
    }

    /// The one-box prepartition `{J}` of `I`.
    ///
    /// # Errors
    ///
    /// [`crate::BoxError::DimensionMismatch`] if `J` and `I` differ in dimension,
    /// [`Violation::NotContained`] if `J` is not a sub-box of `I`.
    pub fn single(root: &BoxN<T>, j: BoxN<T>) -> Result<Self> {
        j.check_dim(root.dim())?;
        if !j.is_subbox_of(root) {
            return Err(Violation::NotContained { index: 0 }.into());
        }
        Ok(Self {
            root: root.clone(),
            boxes: vec![j],
        })
    }

    /// Checked constructor from an arbitrary collection of boxes.
    ///
    /// Duplicates of the same box are collapsed before the disjointness
    /// check. Overlap detection sweeps along the first axis, so families
    /// spread out along it are checked in close to linear time.
    ///
    /// # Errors
    ///
    /// [`crate::BoxError::DimensionMismatch`] for a box whose dimension differs
    /// from the root's,
    /// [`Violation::NotContained`] for a box outside the root,
    /// [`Violation::Overlapping`] for two distinct boxes sharing interior
    /// points. Indices refer to positions in `boxes`.
    pub fn from_boxes<I>(root: &BoxN<T>, boxes: I) -> Result<Self>
    where
        I: IntoIterator<Item = BoxN<T>>,
    {
        let boxes: Vec<BoxN<T>> = boxes.into_iter().collect();
        for j in &boxes {
            j.check_dim(root.dim())?;
        }
        if let Some(index) = boxes.iter().position(|j| !j.is_subbox_of(root)) {
            return Err(Violation::NotContained { index }.into());
        }
        let mut order: Vec<usize> = (0..boxes.len()).collect();
        order.sort_by(|&a, &b| boxes[a].canonical_cmp(&boxes[b]));
        order.dedup_by(|a, b| boxes[*a] == boxes[*b]);
        if let Some((first, second)) = first_overlap(&boxes, &order) {
            return Err(Violation::Overlapping { first, second }.into());
        }
        let kept = order.into_iter().map(|k| boxes[k].clone()).collect();
        Ok(Self {
            root: root.clone(),
            boxes: kept,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The root box `I`.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &BoxN<T> {
        &self.root
    }

    /// The boxes, in canonical order.
    #[inline]
    #[must_use]
    pub fn boxes(&self) -> &[BoxN<T>] {
        &self.boxes
    }

    /// Number of boxes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// `true` for the bottom element.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Iterate over the boxes.
    pub fn iter(&self) -> core::slice::Iter<'_, BoxN<T>> {
        self.boxes.iter()
    }

    /// `true` if `j` is one of the boxes.
    #[must_use]
    pub fn contains_box(&self, j: &BoxN<T>) -> bool {
        self.position(j).is_some()
    }

    /// Position of `j` in [`Prepartition::boxes`].
    pub(crate) fn position(&self, j: &BoxN<T>) -> Option<usize> {
        self.boxes.binary_search_by(|b| b.canonical_cmp(j)).ok()
    }

    /// Consume into the box list.
    #[must_use]
    pub fn into_boxes(self) -> Vec<BoxN<T>> {
        self.boxes
    }

    // ========================================================================
    // Invariants
    // ========================================================================

    /// Re-validate containment and pairwise disjointness.
    ///
    /// # Errors
    ///
    /// The first violated invariant, with indices into [`Prepartition::boxes`].
    pub fn check_invariants(&self) -> Result<()> {
        if let Some(index) = self.boxes.iter().position(|j| !j.is_subbox_of(&self.root)) {
            return Err(Violation::NotContained { index }.into());
        }
        let order: Vec<usize> = (0..self.boxes.len()).collect();
        match first_overlap(&self.boxes, &order) {
            Some((first, second)) => Err(Violation::Overlapping { first, second }.into()),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Derived quantities
    // ========================================================================

    /// The union of the boxes' cells, as a membership view.
    #[must_use]
    pub fn union(&self) -> Union<'_, T> {
        Union { boxes: &self.boxes }
    }

    /// Largest distortion of any box; `0` for the empty prepartition.
    #[must_use]
    pub fn distortion(&self) -> T {
        self.boxes
            .iter()
            .map(BoxN::distortion)
            .fold(T::zero(), |acc, d| max_of(&acc, &d))
    }

    /// Number of boxes whose closed hull contains `x`.
    ///
    /// Never exceeds `2^dim`: two distinct boxes whose hulls both contain
    /// `x` cannot agree, on every axis, on whether their lower bound lies
    /// strictly below `x` (if they did, both would contain a common small
    /// box next to `x`, contradicting disjointness).
    #[must_use]
    pub fn multiplicity_at(&self, x: &[T]) -> usize {
        self.boxes.iter().filter(|j| j.mem_closed(x)).count()
    }

    /// The side pattern of `j` at `x`: entry `i` is `lower i < x i`.
    /// Injective on the boxes counted by [`Prepartition::multiplicity_at`].
    #[must_use]
    pub fn side_pattern(j: &BoxN<T>, x: &[T]) -> Vec<bool> {
        j.lower().iter().zip(x).map(|(l, xi)| l < xi).collect()
    }
}

/// First overlapping pair among `boxes[order[..]]`, reported as original
/// indices in ascending order.
///
/// `order` must list indices of distinct boxes sorted canonically, i.e. by
/// ascending lower bound on axis 0 first; the inner scan stops once the
/// candidate starts beyond the current box on that axis.
fn first_overlap<T: Coordinate>(boxes: &[BoxN<T>], order: &[usize]) -> Option<(usize, usize)> {
    for (pos, &a) in order.iter().enumerate() {
        for &b in &order[pos + 1..] {
            if boxes[a].dim() > 0 && boxes[b].lower()[0] >= boxes[a].upper()[0] {
                break;
            }
            if !boxes[a].is_disjoint(&boxes[b]) {
                return Some((a.min(b), a.max(b)));
            }
        }
    }
    None
}

impl<T: fmt::Debug> fmt::Debug for Prepartition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prepartition")
            .field("root", &self.root)
            .field("boxes", &self.boxes)
            .finish()
    }
}

impl<'a, T: Coordinate> IntoIterator for &'a Prepartition<T> {
    type Item = &'a BoxN<T>;
    type IntoIter = core::slice::Iter<'a, BoxN<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

/// Point-set view of the union of a prepartition's cells.
#[derive(Clone, Copy, Debug)]
pub struct Union<'a, T> {
    boxes: &'a [BoxN<T>],
}

impl<T: Coordinate> Union<'_, T> {
    /// `true` if `x` lies in the cell of some box.
    #[must_use]
    pub fn contains(&self, x: &[T]) -> bool {
        self.boxes.iter().any(|j| j.mem(x))
    }

    /// The box whose cell contains `x`, if any. Unique by disjointness.
    #[must_use]
    pub fn locate(&self, x: &[T]) -> Option<&BoxN<T>> {
        self.boxes.iter().find(|j| j.mem(x))
    }
}
