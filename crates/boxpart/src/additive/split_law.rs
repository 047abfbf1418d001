//! Box-additivity from the two-piece splitting law.
//!
//! If `f(lower) + f(upper) = f(J)` for every box `J` in scope and every
//! split of `J` into two pieces, then `f` is additive over every partition.
//! The derivation has two steps, and [`BoxAdditiveMap::reconcile`] runs
//! both of them on a concrete partition:
//!
//! 1. Splitting a box `K` by a list of planes one plane at a time replaces
//!    one box by two at each step, so by induction on the list the sum of
//!    `f` over the pieces is `f(K)`. Each step is a single two-piece
//!    identity and is checked as it is taken.
//! 2. For a partition `π` of `J`, split `J` and every `K ∈ π` by all the
//!    face planes of `π`. The pieces of the `K`s are exactly the pieces of
//!    `J`, so `Σ_{K∈π} f(K)` and `f(J)` are both the sum over that common
//!    grid.
//!
//! [`BoxAdditiveMap::congr_on_equal_union`] applies step 2 to two
//! prepartitions with the same union.

use tracing::{debug, trace};

use super::BoxAdditiveMap;
use crate::error::{BoxError, Result, Violation};
use crate::geometry::{BoxN, Scope};
use crate::prepartition::{Prepartition, SplitPlane};
use crate::scalar::{AddMonoid, Coordinate};

impl<T: Coordinate + 'static, M: AddMonoid + 'static> BoxAdditiveMap<T, M> {
    /// A box-additive map from a function satisfying the two-piece law on
    /// `scope`:
    ///
    /// ```text
    /// f(J.split_lower(i, x)) + f(J.split_upper(i, x)) = f(J)
    ///     for every J in scope, axis i and lower i < x < upper i.
    /// ```
    ///
    /// The law is a precondition. [`BoxAdditiveMap::verify_split`] checks
    /// one instance of it, and [`BoxAdditiveMap::reconcile`] checks every
    /// instance that the derivation for a given partition relies on.
    #[must_use]
    pub fn of_split_law<F>(scope: Scope<T>, f: F) -> Self
    where
        F: Fn(&BoxN<T>) -> M + 'static,
    {
        Self::new(scope, f)
    }
}

impl<T, M> BoxAdditiveMap<T, M>
where
    T: Coordinate + 'static,
    M: AddMonoid + 'static,
{
    /// [`BoxAdditiveMap::verify_split`] with the identity decided by `eq`
    /// instead of `==`.
    ///
    /// # Errors
    ///
    /// Same as [`BoxAdditiveMap::verify_split`].
    pub fn verify_split_with<E>(&self, j: &BoxN<T>, i: usize, x: &T, eq: E) -> Result<()>
    where
        E: Fn(&M, &M) -> bool,
    {
        if i >= j.dim() {
            return Err(BoxError::AxisOutOfRange { axis: i, dim: j.dim() });
        }
        self.scope.check_dim(j)?;
        if !self.scope.contains(j) {
            return Err(Violation::OutOfScope.into());
        }
        match j.split_at(i, x) {
            (Some(lo), Some(hi)) => self.check_pieces(j, i, &lo, &hi, &eq),
            _ => Ok(()),
        }
    }

    fn check_pieces<E>(
        &self,
        j: &BoxN<T>,
        axis: usize,
        lo: &BoxN<T>,
        hi: &BoxN<T>,
        eq: &E,
    ) -> Result<()>
    where
        E: Fn(&M, &M) -> bool,
    {
        if eq(&(self.apply(lo) + self.apply(hi)), &self.apply(j)) {
            Ok(())
        } else {
            debug!(%j, axis, "two-piece law fails");
            Err(Violation::SplitLaw { axis }.into())
        }
    }

    /// Split `k` by `planes` in order, checking the two-piece law at every
    /// step that cuts a box. Returns the number of pieces.
    fn telescope<E>(&self, k: &BoxN<T>, planes: &[SplitPlane<T>], eq: &E) -> Result<usize>
    where
        E: Fn(&M, &M) -> bool,
    {
        let mut pieces = vec![k.clone()];
        for (axis, x) in planes {
            let mut next = Vec::with_capacity(pieces.len() * 2);
            for piece in &pieces {
                match piece.split_at(*axis, x) {
                    (Some(lo), Some(hi)) => {
                        self.check_pieces(piece, *axis, &lo, &hi, eq)?;
                        next.push(lo);
                        next.push(hi);
                    }
                    (lo, hi) => next.extend(lo.into_iter().chain(hi)),
                }
            }
            pieces = next;
        }
        trace!(%k, pieces = pieces.len(), "telescoped");
        Ok(pieces.len())
    }

    /// Run step 1 on every box of `a` and `b` over their joint planes.
    fn check_common_grid<E>(&self, a: &Prepartition<T>, b: &Prepartition<T>, eq: &E) -> Result<()>
    where
        E: Fn(&M, &M) -> bool,
    {
        let planes = Prepartition::shared_planes([a, b]);
        let mut cells = 0;
        for k in a.iter().chain(b.iter()) {
            cells += self.telescope(k, &planes, eq)?;
        }
        debug!(
            boxes = a.len() + b.len(),
            planes = planes.len(),
            cells,
            "common grid reconciled"
        );
        Ok(())
    }

    /// [`BoxAdditiveMap::reconcile`] with the two-piece identities decided
    /// by `eq`. Use this for inexact values such as `f64`, passing a
    /// tolerance comparison.
    ///
    /// ```
    /// use boxpart::{volume, BoxN, Prepartition, Scope};
    ///
    /// let i = BoxN::new(vec![0.0, 0.0], vec![0.3, 0.1]).unwrap();
    /// let pi = Prepartition::split(&i, 0, &0.1).unwrap();
    /// let close = |a: &f64, b: &f64| (a - b).abs() <= 1e-12;
    /// let total = volume::<f64>(Scope::All).reconcile_with(&pi, close).unwrap();
    /// assert!(close(&total, &0.03));
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`BoxAdditiveMap::reconcile`].
    pub fn reconcile_with<E>(&self, pi: &Prepartition<T>, eq: E) -> Result<M>
    where
        E: Fn(&M, &M) -> bool,
    {
        self.check_partition(pi)?;
        self.check_common_grid(&Prepartition::top(pi.root()), pi, &eq)?;
        Ok(self.sum_boxes(pi))
    }

    /// [`BoxAdditiveMap::congr_on_equal_union`] with the two-piece
    /// identities decided by `eq`.
    ///
    /// # Errors
    ///
    /// Same as [`BoxAdditiveMap::congr_on_equal_union`].
    pub fn congr_on_equal_union_with<E>(
        &self,
        a: &Prepartition<T>,
        b: &Prepartition<T>,
        eq: E,
    ) -> Result<M>
    where
        E: Fn(&M, &M) -> bool,
    {
        b.root().check_dim(a.root().dim())?;
        if !a.union_eq(b) {
            return Err(Violation::UnionMismatch.into());
        }
        self.scope.check_dim(a.root())?;
        if !a.iter().chain(b.iter()).all(|k| self.scope.contains(k)) {
            return Err(Violation::OutOfScope.into());
        }
        self.check_common_grid(a, b, &eq)?;
        Ok(self.sum_boxes(a))
    }
}

/// Exact checks. These compare with `==`, so they are meant for exact
/// value types (integers, `num_rational::Ratio`); `f64` sums that differ
/// in the last bit are reported as [`Violation::SplitLaw`]. The `_with`
/// variants take a comparison instead.
impl<T, M> BoxAdditiveMap<T, M>
where
    T: Coordinate + 'static,
    M: AddMonoid + PartialEq + 'static,
{
    /// Check `f(lower) + f(upper) = f(J)` for the split of `j` at `x_i = x`.
    ///
    /// A split that leaves `j` whole is trivially fine.
    ///
    /// # Errors
    ///
    /// [`BoxError::AxisOutOfRange`] for a bad axis,
    /// [`BoxError::DimensionMismatch`] if `j` and the scope's box differ
    /// in dimension,
    /// [`Violation::OutOfScope`] if `j` is outside the scope,
    /// [`Violation::SplitLaw`] if the identity fails.
    pub fn verify_split(&self, j: &BoxN<T>, i: usize, x: &T) -> Result<()> {
        self.verify_split_with(j, i, x, |a: &M, b: &M| a == b)
    }

    /// `Σ_{K∈π} f(K)` for a partition `π` of a box in scope, after checking
    /// every two-piece identity that shows it equals `f(root)`.
    ///
    /// # Errors
    ///
    /// [`BoxError::DimensionMismatch`], [`Violation::OutOfScope`],
    /// [`Violation::NotAPartition`] as for
    /// [`BoxAdditiveMap::sum_partition`]; [`Violation::SplitLaw`] if `f`
    /// breaks the two-piece law on the common grid.
    pub fn reconcile(&self, pi: &Prepartition<T>) -> Result<M> {
        self.reconcile_with(pi, |a: &M, b: &M| a == b)
    }

    /// The common sum of `f` over two prepartitions covering the same
    /// region, after checking the two-piece identities that make the sums
    /// agree.
    ///
    /// # Errors
    ///
    /// [`BoxError::DimensionMismatch`] if the roots (or the scope's box)
    /// live in different dimensions,
    /// [`Violation::UnionMismatch`] if the unions differ,
    /// [`Violation::OutOfScope`] if a box lies outside the scope,
    /// [`Violation::SplitLaw`] if `f` breaks the two-piece law.
    pub fn congr_on_equal_union(&self, a: &Prepartition<T>, b: &Prepartition<T>) -> Result<M> {
        self.congr_on_equal_union_with(a, b, |x: &M, y: &M| x == y)
    }
}
