//! Axis-aligned boxes with strictly increasing corners.
//!
//! A [`BoxN`] is the product `∏ᵢ (lower i, upper i]` in `n`-dimensional space.
//! Three point sets hang off a box:
//!
//! | Method | Set |
//! |--------|-----|
//! | [`BoxN::contains_point`] | open interior `lower < x < upper` |
//! | [`BoxN::mem`] | half-open cell `lower < x <= upper` |
//! | [`BoxN::mem_closed`] | closed hull `lower <= x <= upper` |
//!
//! Unions and partitions are stated in terms of the half-open cell: the two
//! pieces of a split tile their parent with no gaps and no overlap. Two boxes
//! have disjoint cells exactly when their interiors are disjoint.
//!
//! `PartialOrd` on boxes is inclusion: `J <= I` iff `J` is a sub-box of `I`.
//!
//! # Example
//!
//! ```
//! use boxpart::BoxN;
//!
//! let i = BoxN::new(vec![0.0, 0.0], vec![2.0, 2.0]).unwrap();
//! let (lo, hi) = i.split_at(0, &1.0);
//! let (lo, hi) = (lo.unwrap(), hi.unwrap());
//! assert!(lo <= i && hi <= i);
//! assert!(lo.mem(&[1.0, 1.0]) && !hi.mem(&[1.0, 1.0]));
//! assert!(lo.intersect(&hi).is_none());
//! ```

use core::cmp::Ordering;
use core::fmt;

use crate::error::{BoxError, Result};
use crate::scalar::{max_of, midpoint, min_of, total_cmp, Coordinate};

/// An axis-aligned box in `dim()`-dimensional space.
///
/// # Invariant
///
/// `lower.len() == upper.len()` and `lower[i] < upper[i]` for every axis.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawBox<T>",
        bound(deserialize = "T: Coordinate + serde::Deserialize<'de>")
    )
)]
pub struct BoxN<T> {
    lower: Vec<T>,
    upper: Vec<T>,
}

/// Unvalidated wire form of a box.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBox<T> {
    lower: Vec<T>,
    upper: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T: Coordinate> TryFrom<RawBox<T>> for BoxN<T> {
    type Error = BoxError;

    fn try_from(raw: RawBox<T>) -> Result<Self> {
        Self::new(raw.lower, raw.upper)
    }
}

impl<T: Coordinate> BoxN<T> {
    /// Build a box from its corners.
    ///
    /// # Errors
    ///
    /// [`BoxError::LengthMismatch`] if the corners have different lengths,
    /// [`BoxError::InvalidBox`] if `lower[i] >= upper[i]` (or the pair is
    /// not comparable) on some axis.
    pub fn new(lower: Vec<T>, upper: Vec<T>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(BoxError::LengthMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        let increasing = |i: usize| lower[i].partial_cmp(&upper[i]) == Some(Ordering::Less);
        if let Some(axis) = (0..lower.len()).find(|&i| !increasing(i)) {
            return Err(BoxError::InvalidBox {
                axis,
                lower: format!("{:?}", lower[axis]),
                upper: format!("{:?}", upper[axis]),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Build a box from `(lower, upper)` pairs, one per axis.
    ///
    /// # Errors
    ///
    /// Same as [`BoxN::new`].
    pub fn from_intervals<I>(intervals: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, T)>,
    {
        let (lower, upper) = intervals.into_iter().unzip();
        Self::new(lower, upper)
    }

    /// The unit cube `(0, 1]^dim`.
    #[must_use]
    pub fn unit(dim: usize) -> Self {
        Self {
            lower: vec![T::zero(); dim],
            upper: vec![T::one(); dim],
        }
    }

    /// Corners that are known to satisfy the invariant.
    pub(crate) fn from_valid(lower: Vec<T>, upper: Vec<T>) -> Self {
        debug_assert!(lower.len() == upper.len());
        debug_assert!(lower.iter().zip(&upper).all(|(l, u)| l < u));
        Self { lower, upper }
    }

    /// `Some(box)` if the corners form a valid box, `None` if any axis
    /// degenerates.
    fn non_degenerate(lower: Vec<T>, upper: Vec<T>) -> Option<Self> {
        if lower.iter().zip(&upper).all(|(l, u)| l < u) {
            Some(Self { lower, upper })
        } else {
            None
        }
    }

    /// Number of axes.
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    /// Lower corner.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> &[T] {
        &self.lower
    }

    /// Upper corner.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> &[T] {
        &self.upper
    }

    /// `upper i - lower i`, or `None` when `i >= dim()`.
    #[inline]
    #[must_use]
    pub fn side_length(&self, i: usize) -> Option<T> {
        (i < self.dim()).then(|| self.side(i))
    }

    /// Unchecked side length for axes already known to be in range.
    #[inline]
    pub(crate) fn side(&self, i: usize) -> T {
        self.upper[i].clone() - self.lower[i].clone()
    }

    /// Require that this box lives in dimension `expected`.
    ///
    /// # Errors
    ///
    /// [`BoxError::DimensionMismatch`] if `dim() != expected`.
    #[inline]
    pub fn check_dim(&self, expected: usize) -> Result<()> {
        if self.dim() == expected {
            Ok(())
        } else {
            Err(BoxError::DimensionMismatch {
                expected,
                found: self.dim(),
            })
        }
    }

    /// Product of side lengths; `1` for a zero-dimensional box.
    #[must_use]
    pub fn volume(&self) -> T {
        (0..self.dim()).fold(T::one(), |acc, i| acc * self.side(i))
    }

    /// Open-interior membership: `lower i < x i < upper i` on every axis.
    ///
    /// Points of the wrong dimension are never contained.
    #[must_use]
    pub fn contains_point(&self, x: &[T]) -> bool {
        x.len() == self.dim()
            && x.iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(xi, (l, u))| l < xi && xi < u)
    }

    /// Half-open cell membership: `lower i < x i <= upper i` on every axis.
    #[must_use]
    pub fn mem(&self, x: &[T]) -> bool {
        x.len() == self.dim()
            && x.iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(xi, (l, u))| l < xi && xi <= u)
    }

    /// Closed-hull membership: `lower i <= x i <= upper i` on every axis.
    #[must_use]
    pub fn mem_closed(&self, x: &[T]) -> bool {
        x.len() == self.dim()
            && x.iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(xi, (l, u))| l <= xi && xi <= u)
    }

    /// Sub-box test: `self` is contained in `other`.
    ///
    /// Equivalent to `self <= other`. Boxes of different dimension are
    /// never comparable.
    #[must_use]
    pub fn is_subbox_of(&self, other: &Self) -> bool {
        self.dim() == other.dim()
            && (0..self.dim())
                .all(|i| other.lower[i] <= self.lower[i] && self.upper[i] <= other.upper[i])
    }

    /// Meet in the lattice of possibly-empty boxes.
    ///
    /// Returns the box with pointwise-max lower and pointwise-min upper
    /// corners, or `None` when that collapses on some axis (or the
    /// dimensions differ).
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if self.dim() != other.dim() {
            return None;
        }
        let lower = self
            .lower
            .iter()
            .zip(&other.lower)
            .map(|(a, b)| max_of(a, b))
            .collect();
        let upper = self
            .upper
            .iter()
            .zip(&other.upper)
            .map(|(a, b)| min_of(a, b))
            .collect();
        Self::non_degenerate(lower, upper)
    }

    /// `true` if the two boxes share no interior point.
    #[inline]
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersect(other).is_none()
    }

    /// The part of `self` below the hyperplane `x_i = x`.
    ///
    /// `upper i` is clipped to `min(upper i, x)`. `None` when `x <= lower i`.
    /// An out-of-range axis cuts nothing and returns the whole box.
    #[must_use]
    pub fn split_lower(&self, i: usize, x: &T) -> Option<Self> {
        if i >= self.dim() {
            return Some(self.clone());
        }
        let mut upper = self.upper.clone();
        upper[i] = min_of(&self.upper[i], x);
        Self::non_degenerate(self.lower.clone(), upper)
    }

    /// The part of `self` above the hyperplane `x_i = x`.
    ///
    /// `lower i` is clipped to `max(lower i, x)`. `None` when `x >= upper i`
    /// or the axis is out of range.
    #[must_use]
    pub fn split_upper(&self, i: usize, x: &T) -> Option<Self> {
        if i >= self.dim() {
            return None;
        }
        let mut lower = self.lower.clone();
        lower[i] = max_of(&self.lower[i], x);
        Self::non_degenerate(lower, self.upper.clone())
    }

    /// Split along axis `i` at threshold `x`.
    ///
    /// Both parts are `Some` exactly when `lower i < x < upper i`; then
    /// their cells tile the cell of `self`. Otherwise the vanishing side is
    /// `None` and the other side is `self`.
    #[must_use]
    pub fn split_at(&self, i: usize, x: &T) -> (Option<Self>, Option<Self>) {
        (self.split_lower(i, x), self.split_upper(i, x))
    }

    /// Halve every side at its midpoint, yielding up to `2^dim` boxes.
    ///
    /// Each piece has the same distortion as `self`. With integer
    /// coordinates a unit side cannot be halved and is kept whole.
    #[must_use]
    pub fn split_center(&self) -> Vec<Self> {
        let mut pieces = vec![self.clone()];
        for i in 0..self.dim() {
            let mid = midpoint(&self.lower[i], &self.upper[i]);
            pieces = pieces
                .iter()
                .flat_map(|b| {
                    let (lo, hi) = b.split_at(i, &mid);
                    lo.into_iter().chain(hi)
                })
                .collect();
        }
        pieces
    }

    /// The box obtained by dropping axis `i`.
    ///
    /// # Errors
    ///
    /// [`BoxError::AxisOutOfRange`] if `i >= dim()`.
    pub fn face(&self, i: usize) -> Result<Self> {
        if i >= self.dim() {
            return Err(BoxError::AxisOutOfRange {
                axis: i,
                dim: self.dim(),
            });
        }
        let mut lower = self.lower.clone();
        let mut upper = self.upper.clone();
        lower.remove(i);
        upper.remove(i);
        Ok(Self::from_valid(lower, upper))
    }

    /// Shape quality: longest side over shortest side.
    ///
    /// `1` for a cube, grows without bound for thin slabs, `0` for a
    /// zero-dimensional box.
    #[must_use]
    pub fn distortion(&self) -> T {
        let mut sides = (0..self.dim()).map(|i| self.side(i));
        let Some(first) = sides.next() else {
            return T::zero();
        };
        let (longest, shortest) = sides.fold((first.clone(), first), |(hi, lo), s| {
            (max_of(&hi, &s), min_of(&lo, &s))
        });
        longest / shortest
    }

    /// Lexicographic order on `(lower, upper)`; used only to store boxes
    /// in a canonical sequence.
    pub(crate) fn canonical_cmp(&self, other: &Self) -> Ordering {
        let by = |a: &[T], b: &[T]| {
            a.iter()
                .zip(b)
                .map(|(x, y)| total_cmp(x, y))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or_else(|| a.len().cmp(&b.len()))
        };
        by(&self.lower, &other.lower).then_with(|| by(&self.upper, &other.upper))
    }
}

impl<T: Coordinate> PartialOrd for BoxN<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.is_subbox_of(other) {
            Some(Ordering::Less)
        } else if other.is_subbox_of(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BoxN<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<T: fmt::Debug> fmt::Display for BoxN<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lower.is_empty() {
            return f.write_str("()");
        }
        for (i, (l, u)) in self.lower.iter().zip(&self.upper).enumerate() {
            if i > 0 {
                f.write_str(" × ")?;
            }
            write!(f, "({l:?}, {u:?}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use num_rational::Rational64;

    fn b2(x0: f64, x1: f64, y0: f64, y1: f64) -> BoxN<f64> {
        BoxN::new(vec![x0, y0], vec![x1, y1]).unwrap()
    }

    #[test]
    fn constructor_rejects_degenerate_axis() {
        let err = BoxN::new(vec![0.0, 1.0], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, BoxError::InvalidBox { axis: 1, .. }));
        assert!(BoxN::new(vec![0.0, f64::NAN], vec![1.0, 2.0]).is_err());
        assert_eq!(
            BoxN::new(vec![0.0], vec![1.0, 2.0]).unwrap_err(),
            BoxError::LengthMismatch { lower: 1, upper: 2 }
        );
    }

    #[test]
    fn zero_dimensional_box_is_a_point() {
        let p: BoxN<f64> = BoxN::new(vec![], vec![]).unwrap();
        assert_eq!(p.volume(), 1.0);
        assert_eq!(p.distortion(), 0.0);
        assert!(p.mem(&[]));
    }

    #[test]
    fn inclusion_is_a_partial_order() {
        let big = b2(0.0, 2.0, 0.0, 2.0);
        let left = b2(0.0, 1.0, 0.0, 2.0);
        let right = b2(1.0, 2.0, 0.0, 2.0);
        assert!(left <= big && right <= big && big <= big);
        assert!(big > left);
        assert_eq!(left.partial_cmp(&right), None);
    }

    #[test]
    fn intersection_is_meet() {
        let a = b2(0.0, 2.0, 0.0, 2.0);
        let b = b2(1.0, 3.0, 1.0, 3.0);
        assert_eq!(a.intersect(&b), Some(b2(1.0, 2.0, 1.0, 2.0)));
        let touching = b2(2.0, 3.0, 0.0, 1.0);
        assert_eq!(a.intersect(&touching), None);
        assert!(a.is_disjoint(&touching));
    }

    #[test]
    fn split_inside_gives_two_pieces() {
        let i = b2(0.0, 2.0, 0.0, 2.0);
        let (lo, hi) = i.split_at(0, &0.5);
        assert_eq!(lo, Some(b2(0.0, 0.5, 0.0, 2.0)));
        assert_eq!(hi, Some(b2(0.5, 2.0, 0.0, 2.0)));
    }

    #[test]
    fn split_at_boundary_or_outside_keeps_one_side() {
        let i = b2(0.0, 2.0, 0.0, 2.0);
        assert_eq!(i.split_at(1, &0.0), (None, Some(i.clone())));
        assert_eq!(i.split_at(1, &2.0), (Some(i.clone()), None));
        assert_eq!(i.split_at(1, &7.0), (Some(i.clone()), None));
        assert_eq!(i.split_at(1, &-7.0), (None, Some(i.clone())));
        assert_eq!(i.split_at(5, &1.0), (Some(i.clone()), None));
    }

    #[test]
    fn membership_flavours() {
        let i = b2(0.0, 1.0, 0.0, 1.0);
        assert!(!i.contains_point(&[1.0, 0.5]));
        assert!(i.mem(&[1.0, 0.5]));
        assert!(!i.mem(&[0.0, 0.5]));
        assert!(i.mem_closed(&[0.0, 0.5]));
        assert!(!i.mem_closed(&[0.5]));
    }

    #[test]
    fn face_drops_axis() {
        let i = BoxN::new(vec![0, 1, 2], vec![5, 6, 7]).unwrap();
        let f = i.face(1).unwrap();
        assert_eq!(f.lower(), &[0, 2]);
        assert_eq!(f.upper(), &[5, 7]);
        assert!(matches!(
            i.face(3),
            Err(BoxError::AxisOutOfRange { axis: 3, dim: 3 })
        ));
    }

    #[test]
    fn check_dim_reports_both_dimensions() {
        let i = b2(0.0, 1.0, 0.0, 1.0);
        assert!(i.check_dim(2).is_ok());
        assert_eq!(
            i.check_dim(3).unwrap_err(),
            BoxError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn side_length_is_checked() {
        let i = b2(0.0, 3.0, 1.0, 2.0);
        assert_eq!(i.side_length(0), Some(3.0));
        assert_eq!(i.side_length(1), Some(1.0));
        assert_eq!(i.side_length(2), None);
        assert_eq!(i.side_length(usize::MAX), None);
    }

    #[test]
    fn distortion_is_side_ratio() {
        let r = |n, d| Rational64::new(n, d);
        let i = BoxN::new(vec![r(0, 1), r(0, 1)], vec![r(4, 1), r(1, 1)]).unwrap();
        assert_eq!(i.distortion(), r(4, 1));
        for piece in i.split_center() {
            assert_eq!(piece.distortion(), i.distortion());
        }
        assert_eq!(i.split_center().len(), 4);
    }

    #[test]
    fn canonical_order_is_total_on_valid_boxes() {
        let a = b2(0.0, 1.0, 0.0, 1.0);
        let b = b2(0.0, 1.0, 1.0, 2.0);
        assert_eq!(a.canonical_cmp(&b), Ordering::Less);
        assert_eq!(b.canonical_cmp(&a), Ordering::Greater);
        assert_eq!(a.canonical_cmp(&a), Ordering::Equal);
    }

    #[test]
    fn display_renders_half_open_cells() {
        assert_eq!(b2(0.0, 1.0, 2.0, 3.0).to_string(), "(0.0, 1.0] × (2.0, 3.0]");
    }
}
