//! Measures restricted to boxes.
//!
//! A [`BoxMeasure`] assigns each box a finite, non-negative value that is
//! additive over partitions. [`to_box_additive`] turns one into a
//! [`BoxAdditiveMap`]. The canonical instance is [`Lebesgue`], whose value
//! on a box is the product of its side lengths.

use num_traits::Zero;
use tracing::debug;

use super::{BoxAdditiveMap, UpperSubLower};
use crate::error::Result;
use crate::geometry::{BoxN, Scope};
use crate::scalar::{AddMonoid, Coordinate};

/// A finite, non-negative, box-additive set function.
///
/// Implementors guarantee, for every box `J`:
///
/// - `measure(J) >= 0`;
/// - `Σ_{K∈π} measure(K) = measure(J)` for every partition `π` of `J`.
pub trait BoxMeasure<T> {
    /// Value type of the measure.
    type Value: AddMonoid + PartialOrd;

    /// The measure of `j`.
    fn measure(&self, j: &BoxN<T>) -> Self::Value;
}

/// Lebesgue measure: `J ↦ ∏ᵢ (upper i − lower i)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lebesgue;

impl<T: Coordinate> BoxMeasure<T> for Lebesgue {
    type Value = T;

    #[inline]
    fn measure(&self, j: &BoxN<T>) -> T {
        j.volume()
    }
}

/// The box-additive map `J ↦ measure(J)` on `scope`.
#[must_use]
pub fn to_box_additive<T, B>(measure: B, scope: Scope<T>) -> BoxAdditiveMap<T, B::Value>
where
    T: Coordinate + 'static,
    B: BoxMeasure<T> + 'static,
    B::Value: 'static,
{
    BoxAdditiveMap::new(scope, move |j| {
        let v = measure.measure(j);
        debug_assert!(v >= <B::Value as Zero>::zero(), "box measure is negative");
        v
    })
}

/// Volume on `scope`: Lebesgue measure as a box-additive map.
#[must_use]
pub fn volume<T: Coordinate + 'static>(scope: Scope<T>) -> BoxAdditiveMap<T, T> {
    to_box_additive(Lebesgue, scope)
}

/// Volume on sub-boxes of `i0`, rebuilt by sweeping lower-dimensional
/// volumes along axis 0.
///
/// A zero-dimensional box has volume `1`; in dimension `n` the face family
/// is `y ↦ y · vol_{n-1}`, so the sweep gives `(u₀ − l₀) · vol_{n-1}(face)`.
/// Agrees with [`volume`] on every sub-box of `i0`.
///
/// # Errors
///
/// Propagates construction errors of the sweep; none occur for a valid
/// `i0`.
pub fn volume_by_sweep<T: Coordinate + 'static>(i0: &BoxN<T>) -> Result<BoxAdditiveMap<T, T>> {
    if i0.dim() == 0 {
        return Ok(BoxAdditiveMap::new(Scope::SubboxesOf(i0.clone()), |_| T::one()));
    }
    let lower = volume_by_sweep(&i0.face(0)?)?;
    debug!(dim = i0.dim(), "volume sweep");
    let sweep = UpperSubLower::new(i0.clone(), 0, move |y: &T| lower.smul(y.clone()))?;
    Ok(sweep.into_map())
}
