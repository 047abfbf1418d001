//! Domain restriction for box-additive maps.

use crate::error::Result;
use crate::geometry::BoxN;
use crate::scalar::Coordinate;

/// The set of boxes on which a box-additive map is required to be additive.
///
/// Ordered by inclusion: `All` is the top element.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "T: Coordinate + serde::Deserialize<'de>"))
)]
pub enum Scope<T> {
    /// Every box of the right dimension.
    All,
    /// Sub-boxes of a fixed box.
    SubboxesOf(BoxN<T>),
}

impl<T: Coordinate> Scope<T> {
    /// `true` if `j` belongs to the domain.
    #[must_use]
    pub fn contains(&self, j: &BoxN<T>) -> bool {
        match self {
            Self::All => true,
            Self::SubboxesOf(i0) => j.is_subbox_of(i0),
        }
    }

    /// Require that `j` has the dimension of the scope's box. `All` admits
    /// every dimension.
    ///
    /// # Errors
    ///
    /// [`crate::BoxError::DimensionMismatch`] if `j` and the bounding box
    /// differ in dimension.
    pub fn check_dim(&self, j: &BoxN<T>) -> Result<()> {
        match self {
            Self::All => Ok(()),
            Self::SubboxesOf(i0) => j.check_dim(i0.dim()),
        }
    }

    /// `true` if every box of `self` also belongs to `other`.
    #[must_use]
    pub fn is_within(&self, other: &Self) -> bool {
        match (self, other) {
            (_, Self::All) => true,
            (Self::All, Self::SubboxesOf(_)) => false,
            (Self::SubboxesOf(a), Self::SubboxesOf(b)) => a.is_subbox_of(b),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn all_is_top() {
        let unit = BoxN::<f64>::unit(2);
        let sub = Scope::SubboxesOf(unit.clone());
        assert!(sub.is_within(&Scope::All));
        assert!(!Scope::All.is_within(&sub));
        assert!(sub.contains(&unit));
        assert!(!sub.contains(&BoxN::new(vec![0.0, 0.0], vec![2.0, 1.0]).unwrap()));
    }

    #[test]
    fn bounded_scope_checks_dimension() {
        let sub = Scope::SubboxesOf(BoxN::<f64>::unit(2));
        assert!(sub.check_dim(&BoxN::unit(2)).is_ok());
        assert!(Scope::All.check_dim(&BoxN::<f64>::unit(3)).is_ok());
        assert_eq!(
            sub.check_dim(&BoxN::unit(3)).unwrap_err(),
            crate::BoxError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
    }
}
