//! Sweeping a face family along one axis.
//!
//! Given a box `I₀`, an axis `i` and, for every `y` between `I₀.lower i`
//! and `I₀.upper i`, a box-additive map `F(y)` on the faces of `I₀`
//! (dimension one lower), the map
//!
//! ```text
//! J ↦ F(J.upper i)(face_i J) − F(J.lower i)(face_i J)
//! ```
//!
//! is box-additive on sub-boxes of `I₀`. A two-piece split of `J` either
//!
//! - cuts along `i` at `x`: the two differences telescope,
//!   `(F(x) − F(l)) + (F(u) − F(x)) = F(u) − F(l)`; or
//! - cuts along another axis: the face is split by the matching face
//!   axis, `F(l)` and `F(u)` are each additive over that split, and the
//!   differences recombine.
//!
//! This is how an `n`-dimensional functional is built from `(n−1)`-dimensional
//! ones; see [`crate::volume_by_sweep`].

use core::ops::Sub;
use std::rc::Rc;

use super::BoxAdditiveMap;
use crate::error::{BoxError, Result, Violation};
use crate::geometry::{BoxN, Scope};
use crate::scalar::{AddMonoid, Coordinate};

type FaceFamily<T, M> = Rc<dyn Fn(&T) -> BoxAdditiveMap<T, M>>;

/// The difference of a face family between the two ends of a box along
/// one axis.
pub struct UpperSubLower<T, M> {
    i0: BoxN<T>,
    axis: usize,
    fb: FaceFamily<T, M>,
}

impl<T, M> UpperSubLower<T, M>
where
    T: Coordinate + 'static,
    M: AddMonoid + Sub<Output = M> + 'static,
{
    /// Sweep `fb` along `axis` of `i0`.
    ///
    /// Each `fb(y)` must be box-additive on the faces of `i0` for the
    /// result to be box-additive.
    ///
    /// # Errors
    ///
    /// [`BoxError::AxisOutOfRange`] if `axis >= i0.dim()`.
    pub fn new<F>(i0: BoxN<T>, axis: usize, fb: F) -> Result<Self>
    where
        F: Fn(&T) -> BoxAdditiveMap<T, M> + 'static,
    {
        if axis >= i0.dim() {
            return Err(BoxError::AxisOutOfRange {
                axis,
                dim: i0.dim(),
            });
        }
        Ok(Self {
            i0,
            axis,
            fb: Rc::new(fb),
        })
    }

    /// The swept axis.
    #[inline]
    #[must_use]
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// The axis of the face that axis `i` of a full box lands on, or
    /// `None` for the swept axis itself.
    #[must_use]
    pub fn face_axis(&self, i: usize) -> Option<usize> {
        match i.cmp(&self.axis) {
            core::cmp::Ordering::Less => Some(i),
            core::cmp::Ordering::Equal => None,
            core::cmp::Ordering::Greater => Some(i - 1),
        }
    }

    /// `F(J.upper i)(face J) − F(J.lower i)(face J)`; zero for a box that
    /// has no swept axis.
    #[must_use]
    pub fn value(&self, j: &BoxN<T>) -> M {
        match j.face(self.axis) {
            Ok(face) => {
                let top = (self.fb)(&j.upper()[self.axis]).apply(&face);
                let bottom = (self.fb)(&j.lower()[self.axis]).apply(&face);
                top - bottom
            }
            Err(_) => M::zero(),
        }
    }

    /// The swept map, box-additive on sub-boxes of `I₀`.
    #[must_use]
    pub fn into_map(self) -> BoxAdditiveMap<T, M> {
        let scope = Scope::SubboxesOf(self.i0.clone());
        BoxAdditiveMap::of_split_law(scope, move |j| self.value(j))
    }

    /// [`UpperSubLower::verify_split`] with every identity decided by `eq`,
    /// including the ones delegated to the face maps.
    ///
    /// # Errors
    ///
    /// Same as [`UpperSubLower::verify_split`].
    pub fn verify_split_with<E>(&self, j: &BoxN<T>, i: usize, x: &T, eq: E) -> Result<()>
    where
        E: Fn(&M, &M) -> bool,
    {
        if i >= j.dim() {
            return Err(BoxError::AxisOutOfRange { axis: i, dim: j.dim() });
        }
        j.check_dim(self.i0.dim())?;
        if !j.is_subbox_of(&self.i0) {
            return Err(Violation::OutOfScope.into());
        }
        let (Some(lo), Some(hi)) = j.split_at(i, x) else {
            return Ok(());
        };
        match self.face_axis(i) {
            None => {
                // Telescoping: F(x) cancels.
                if eq(&(self.value(&lo) + self.value(&hi)), &self.value(j)) {
                    Ok(())
                } else {
                    Err(Violation::SplitLaw { axis: i }.into())
                }
            }
            Some(fi) => {
                let face = j.face(self.axis)?;
                for y in [&j.lower()[self.axis], &j.upper()[self.axis]] {
                    (self.fb)(y)
                        .verify_split_with(&face, fi, x, &eq)
                        .map_err(|e| match e {
                            BoxError::InvariantViolation(Violation::SplitLaw { .. }) => {
                                Violation::SplitLaw { axis: i }.into()
                            }
                            other => other,
                        })?;
                }
                Ok(())
            }
        }
    }
}

impl<T, M> UpperSubLower<T, M>
where
    T: Coordinate + 'static,
    M: AddMonoid + Sub<Output = M> + PartialEq + 'static,
{
    /// Check the two-piece law for the split of `j` at `x_i = x`, by the
    /// case analysis on `i`. Values are compared with `==`; see
    /// [`UpperSubLower::verify_split_with`] for inexact types.
    ///
    /// # Errors
    ///
    /// [`BoxError::AxisOutOfRange`] for a bad axis,
    /// [`BoxError::DimensionMismatch`] if `j` and `I₀` differ in dimension,
    /// [`Violation::OutOfScope`] if `j` is not a sub-box of `I₀` or its
    /// face lies outside a face map's scope, [`Violation::SplitLaw`] (on
    /// axis `i`) if the law fails.
    pub fn verify_split(&self, j: &BoxN<T>, i: usize, x: &T) -> Result<()> {
        self.verify_split_with(j, i, x, |a: &M, b: &M| a == b)
    }
}

impl<T: core::fmt::Debug, M> core::fmt::Debug for UpperSubLower<T, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UpperSubLower")
            .field("i0", &self.i0)
            .field("axis", &self.axis)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::prepartition::Prepartition;
    use num_rational::Rational64;

    type Q = Rational64;

    fn q(n: i64) -> Q {
        Q::from_integer(n)
    }

    fn interval(a: i64, b: i64) -> BoxN<Q> {
        BoxN::new(vec![q(a)], vec![q(b)]).unwrap()
    }

    fn bq(x0: i64, x1: i64, y0: i64, y1: i64) -> BoxN<Q> {
        BoxN::new(vec![q(x0), q(y0)], vec![q(x1), q(y1)]).unwrap()
    }

    /// `F(y)(K) = y · len(K)`: sweeping it along axis 0 gives area.
    fn area_sweep() -> UpperSubLower<Q, Q> {
        let i0 = bq(0, 4, 0, 4);
        let faces = Scope::SubboxesOf(interval(0, 4));
        UpperSubLower::new(i0, 0, move |y: &Q| {
            let y = *y;
            BoxAdditiveMap::new(faces.clone(), move |k: &BoxN<Q>| y * k.side(0))
        })
        .unwrap()
    }

    #[test]
    fn sweep_of_lengths_is_area() {
        let sweep = area_sweep();
        assert_eq!(sweep.value(&bq(1, 3, 0, 2)), q(4));
        assert!(sweep.verify_split(&bq(1, 3, 0, 2), 0, &q(2)).is_ok());
        assert!(sweep.verify_split(&bq(1, 3, 0, 2), 1, &q(1)).is_ok());
        let area = sweep.into_map();
        let pi = Prepartition::from_boxes(
            &bq(0, 4, 0, 4),
            vec![bq(0, 1, 0, 4), bq(1, 4, 0, 3), bq(1, 4, 3, 4)],
        )
        .unwrap();
        assert_eq!(area.reconcile(&pi).unwrap(), q(16));
    }

    #[test]
    fn non_additive_face_family_fails_off_axis_only() {
        let faces = Scope::SubboxesOf(interval(0, 4));
        let sweep = UpperSubLower::new(bq(0, 4, 0, 4), 0, move |y: &Q| {
            let y = *y;
            BoxAdditiveMap::new(faces.clone(), move |_: &BoxN<Q>| y * y)
        })
        .unwrap();
        let j = bq(0, 2, 0, 2);
        assert!(sweep.verify_split(&j, 0, &q(1)).is_ok());
        assert_eq!(
            sweep.verify_split(&j, 1, &q(1)).unwrap_err(),
            BoxError::from(Violation::SplitLaw { axis: 1 })
        );
    }

    #[test]
    fn face_axes_skip_the_swept_one() {
        let cube = BoxN::new(vec![q(0); 3], vec![q(2); 3]).unwrap();
        let faces = Scope::SubboxesOf(cube.face(1).unwrap());
        let sweep = UpperSubLower::new(cube.clone(), 1, move |y: &Q| {
            let y = *y;
            BoxAdditiveMap::new(faces.clone(), move |k: &BoxN<Q>| y * k.volume())
        })
        .unwrap();
        assert_eq!(sweep.face_axis(0), Some(0));
        assert_eq!(sweep.face_axis(1), None);
        assert_eq!(sweep.face_axis(2), Some(1));
        assert_eq!(sweep.axis(), 1);
        for i in 0..3 {
            assert!(sweep.verify_split(&cube, i, &q(1)).is_ok(), "axis {i}");
        }
        assert_eq!(sweep.value(&cube), q(8));
    }

    #[test]
    fn construction_and_scope_errors() {
        let err = UpperSubLower::new(bq(0, 1, 0, 1), 2, |_: &Q| {
            BoxAdditiveMap::<Q, Q>::zero(Scope::All)
        })
        .unwrap_err();
        assert_eq!(err, BoxError::AxisOutOfRange { axis: 2, dim: 2 });
        assert_eq!(
            area_sweep().verify_split(&bq(0, 5, 0, 1), 0, &q(1)).unwrap_err(),
            BoxError::from(Violation::OutOfScope)
        );
        let cube = BoxN::new(vec![q(0); 3], vec![q(1); 3]).unwrap();
        assert_eq!(
            area_sweep().verify_split(&cube, 0, &Q::new(1, 2)).unwrap_err(),
            BoxError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn float_sweep_checks_with_a_tolerance() {
        let i0 = BoxN::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let faces = Scope::SubboxesOf(BoxN::new(vec![0.0], vec![1.0]).unwrap());
        let sweep = UpperSubLower::new(i0, 0, move |y: &f64| {
            let y = *y;
            BoxAdditiveMap::new(faces.clone(), move |k: &BoxN<f64>| y * k.side(0))
        })
        .unwrap();
        let j = BoxN::new(vec![0.0, 0.0], vec![0.3, 0.1]).unwrap();
        let close = |a: &f64, b: &f64| (a - b).abs() <= 1e-12;
        for i in 0..2 {
            assert!(sweep.verify_split_with(&j, i, &0.1, close).is_ok(), "axis {i}");
            assert!(sweep.verify_split_with(&j, i, &0.05, close).is_ok(), "axis {i}");
        }
    }
}
