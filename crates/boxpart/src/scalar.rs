//! Interfaces consumed from the environment.
//!
//! The engine never does arithmetic of its own beyond comparisons, midpoints
//! and the side-length products used by volume. It consumes:
//!
//! - [`Coordinate`]: a totally ordered field-like scalar for box corners
//!   (`f64`, `f32`, integers, `num_rational::Ratio<_>`).
//! - [`AddMonoid`]: the value type of a box-additive map. Anything with an
//!   associative, commutative `+` and a `zero()`.
//!
//! Both are blanket-implemented over `num_traits`, so downstream types only
//! need the usual `num_traits` impls to participate.

use core::cmp::Ordering;
use core::fmt::Debug;
use num_traits::{Num, Zero};

/// Scalar type for box corners.
///
/// `PartialOrd` is enough: the box constructor rejects any pair that is not
/// strictly increasing, which rules out NaN, so every stored coordinate is
/// comparable with every other one.
///
/// # Example
///
/// ```
/// use boxpart::Coordinate;
///
/// fn mid<T: Coordinate>(a: T, b: T) -> T {
///     boxpart::scalar::midpoint(&a, &b)
/// }
/// assert_eq!(mid(1.0, 3.0), 2.0);
/// ```
pub trait Coordinate: Num + Clone + PartialOrd + Debug {}

impl<T> Coordinate for T where T: Num + Clone + PartialOrd + Debug {}

/// Value type of a box-additive map: a commutative additive monoid.
///
/// Commutativity and associativity are not checkable by the compiler; they
/// are assumed, exactly as `num_traits::Zero` assumes the identity law.
pub trait AddMonoid: Zero + Clone {}

impl<M> AddMonoid for M where M: Zero + Clone {}

/// Total comparison for coordinates that passed box validation.
#[inline]
pub(crate) fn total_cmp<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// The larger of two coordinates (left-biased on ties).
#[inline]
pub(crate) fn max_of<T: Coordinate>(a: &T, b: &T) -> T {
    if b > a {
        b.clone()
    } else {
        a.clone()
    }
}

/// The smaller of two coordinates (left-biased on ties).
#[inline]
pub(crate) fn min_of<T: Coordinate>(a: &T, b: &T) -> T {
    if b < a {
        b.clone()
    } else {
        a.clone()
    }
}

/// Midpoint of `a` and `b`, computed as `a + (b - a) / 2`.
///
/// The sum `a + b` is never formed, so integer corners near the top of
/// their range do not overflow. For integer coordinates with `a <= b` the
/// halving rounds towards `a`, so the midpoint of a unit interval
/// coincides with its lower end.
#[inline]
#[must_use]
pub fn midpoint<T: Coordinate>(a: &T, b: &T) -> T {
    a.clone() + (b.clone() - a.clone()) / (T::one() + T::one())
}
