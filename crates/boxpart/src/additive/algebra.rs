//! Pointwise algebra on box-additive maps over a fixed scope.
//!
//! Sums, negations and scalar multiples of box-additive maps are
//! box-additive: the sum over a partition distributes over each pointwise
//! operation. Combining maps of different scopes is rejected with
//! [`BoxError::ScopeMismatch`].

use core::ops::{Mul, Neg, Sub};
use std::rc::Rc;

use super::BoxAdditiveMap;
use crate::error::{BoxError, Result};
use crate::geometry::Scope;
use crate::scalar::{AddMonoid, Coordinate};

impl<T: Coordinate + 'static, M: AddMonoid + 'static> BoxAdditiveMap<T, M> {
    /// The identically-zero map; identity for [`BoxAdditiveMap::checked_add`].
    #[must_use]
    pub fn zero(scope: Scope<T>) -> Self {
        Self::new(scope, |_| M::zero())
    }

    /// Pointwise sum `J ↦ f(J) + g(J)`.
    ///
    /// # Errors
    ///
    /// [`BoxError::ScopeMismatch`] if the scopes differ.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Pointwise `J ↦ op(f(J), g(J))` over a shared scope.
    fn zip_with<Op>(&self, other: &Self, op: Op) -> Result<Self>
    where
        Op: Fn(M, M) -> M + 'static,
    {
        if self.scope != other.scope {
            return Err(BoxError::ScopeMismatch);
        }
        let (f, g) = (Rc::clone(&self.f), Rc::clone(&other.f));
        Ok(Self::new(self.scope.clone(), move |j| op(f(j), g(j))))
    }

    /// Pointwise negation.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn neg(&self) -> Self
    where
        M: Neg<Output = M>,
    {
        self.map(|v: M| -v)
    }

    /// Pointwise difference `J ↦ f(J) - g(J)`.
    ///
    /// # Errors
    ///
    /// [`BoxError::ScopeMismatch`] if the scopes differ.
    pub fn checked_sub(&self, other: &Self) -> Result<Self>
    where
        M: Sub<Output = M>,
    {
        self.zip_with(other, |a, b| a - b)
    }

    /// Pointwise scalar action `J ↦ c · f(J)`.
    #[must_use]
    pub fn smul<C>(&self, c: C) -> Self
    where
        C: Mul<M, Output = M> + Clone + 'static,
    {
        self.map(move |v| c.clone() * v)
    }

    /// Lift a scalar map to a vector-valued one: `J ↦ f(J) · v`.
    ///
    /// With `M = f64` and `v` a fixed linear operator this is the family
    /// `J ↦ f(J) • L`, box-additive because `· v` is additive.
    #[must_use]
    pub fn to_smul<V, W>(&self, v: V) -> BoxAdditiveMap<T, W>
    where
        V: Clone + 'static,
        M: Mul<V, Output = W>,
        W: AddMonoid + 'static,
    {
        self.map(move |s| s * v.clone())
    }
}
