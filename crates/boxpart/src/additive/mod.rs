//! Box-additive maps.
//!
//! A [`BoxAdditiveMap`] is a function `f : Box → M` into a commutative
//! additive monoid, together with a domain ([`Scope`]) on which it obeys
//!
//! ```text
//! Σ_{K ∈ π} f(K) = f(J)     for every J in the domain and every partition π of J.
//! ```
//!
//! The law is a precondition of [`BoxAdditiveMap::new`]. The executable
//! checks live next to the constructors that need them:
//!
//! | Module | Operations |
//! |--------|------------|
//! | this one | `new`, `apply`, `sum_boxes`, `sum_partition`, `restrict`, `map` |
//! | `algebra` | `zero`, `checked_add`, `neg`, `checked_sub`, `smul`, `to_smul` |
//! | `split_law` | `of_split_law`, `verify_split`, `reconcile`, `congr_on_equal_union`, and their `_with` forms |
//! | `upper_sub_lower` | [`UpperSubLower`]: `J ↦ F(upper i)(face J) − F(lower i)(face J)` |
//! | `measure` | [`BoxMeasure`], [`Lebesgue`], `to_box_additive`, `volume`, `volume_by_sweep` |
//!
//! The split-law checks compare values with `==`, which is only reliable
//! for exact value types such as integers and `num_rational::Ratio`. For
//! floating point, pass a tolerance to the `_with` forms.
//!
//! # Example
//!
//! ```
//! use boxpart::{volume, BoxN, Prepartition, Scope};
//!
//! let i = BoxN::new(vec![0.0, 0.0], vec![2.0, 2.0]).unwrap();
//! let vol = volume::<f64>(Scope::All);
//! let halves = Prepartition::split(&i, 0, &1.0).unwrap();
//! assert_eq!(vol.sum_partition(&halves).unwrap(), 4.0);
//! assert_eq!(vol.reconcile(&halves).unwrap(), vol.apply(&i));
//! ```

mod algebra;
mod measure;
mod split_law;
mod upper_sub_lower;

pub use measure::{to_box_additive, volume, volume_by_sweep, BoxMeasure, Lebesgue};
pub use upper_sub_lower::UpperSubLower;

use core::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::{Result, Violation};
use crate::geometry::{BoxN, Scope};
use crate::prepartition::Prepartition;
use crate::scalar::{AddMonoid, Coordinate};

/// The boxed function behind a [`BoxAdditiveMap`].
type BoxFn<T, M> = Rc<dyn Fn(&BoxN<T>) -> M>;

/// A function on boxes that is additive over partitions of every box in
/// its scope.
///
/// Cloning shares the underlying function.
pub struct BoxAdditiveMap<T, M> {
    scope: Scope<T>,
    f: BoxFn<T, M>,
}

impl<T: Coordinate + 'static, M: AddMonoid + 'static> BoxAdditiveMap<T, M> {
    /// Bundle `f` with its scope.
    ///
    /// The caller guarantees the additivity law on every box of `scope`.
    /// Use [`BoxAdditiveMap::of_split_law`] together with
    /// [`BoxAdditiveMap::reconcile`] to check it on concrete partitions.
    #[must_use]
    pub fn new<F>(scope: Scope<T>, f: F) -> Self
    where
        F: Fn(&BoxN<T>) -> M + 'static,
    {
        Self {
            scope,
            f: Rc::new(f),
        }
    }

    /// The domain on which the law holds.
    #[inline]
    #[must_use]
    pub fn scope(&self) -> &Scope<T> {
        &self.scope
    }

    /// `f(J)`.
    #[inline]
    #[must_use]
    pub fn apply(&self, j: &BoxN<T>) -> M {
        (self.f)(j)
    }

    /// `Σ_{K ∈ π} f(K)`, with no check on `π`.
    #[must_use]
    pub fn sum_boxes(&self, pi: &Prepartition<T>) -> M {
        pi.iter().fold(M::zero(), |acc, k| acc + self.apply(k))
    }

    /// The law as a checked accessor: the sum over a partition `π` of a
    /// box `J` in scope. Equals `f(J)`.
    ///
    /// # Errors
    ///
    /// [`crate::BoxError::DimensionMismatch`] if the scope is bounded by a
    /// box of another dimension;
    /// [`Violation::OutOfScope`] if the root of `π` is outside the scope;
    /// [`Violation::NotAPartition`] if `π` does not cover its root.
    pub fn sum_partition(&self, pi: &Prepartition<T>) -> Result<M> {
        self.check_partition(pi)?;
        Ok(self.sum_boxes(pi))
    }

    /// Shared precondition of the partition-based accessors.
    fn check_partition(&self, pi: &Prepartition<T>) -> Result<()> {
        self.scope.check_dim(pi.root())?;
        if !self.scope.contains(pi.root()) {
            debug!(root = %pi.root(), "partition root outside scope");
            return Err(Violation::OutOfScope.into());
        }
        if !pi.is_partition() {
            return Err(Violation::NotAPartition.into());
        }
        Ok(())
    }

    /// The same function on a smaller domain.
    ///
    /// # Errors
    ///
    /// [`Violation::OutOfScope`] if `scope` is not contained in the current
    /// scope.
    pub fn restrict(&self, scope: Scope<T>) -> Result<Self> {
        if !scope.is_within(&self.scope) {
            return Err(Violation::OutOfScope.into());
        }
        Ok(Self {
            scope,
            f: Rc::clone(&self.f),
        })
    }

    /// Post-compose with `g`.
    ///
    /// `g` must be an additive-monoid homomorphism (`g(0) = 0`,
    /// `g(a + b) = g(a) + g(b)`) for the result to be box-additive.
    #[must_use]
    pub fn map<N, G>(&self, g: G) -> BoxAdditiveMap<T, N>
    where
        N: AddMonoid + 'static,
        G: Fn(M) -> N + 'static,
    {
        let f = Rc::clone(&self.f);
        BoxAdditiveMap {
            scope: self.scope.clone(),
            f: Rc::new(move |j: &BoxN<T>| g(f(j))),
        }
    }
}

impl<T: Clone, M> Clone for BoxAdditiveMap<T, M> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            f: Rc::clone(&self.f),
        }
    }
}

impl<T: fmt::Debug, M> fmt::Debug for BoxAdditiveMap<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxAdditiveMap")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
