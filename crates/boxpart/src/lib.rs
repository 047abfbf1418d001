//! Box partitions - axis-aligned boxes, prepartitions and box-additive maps.
//!
//! `boxpart` represents axis-aligned boxes in `n`-dimensional space, cuts
//! them into finite families of pairwise-disjoint sub-boxes, decides
//! whether such a family covers its root exactly, and carries functions
//! on boxes that are additive over every such covering.
//!
//! # Layers
//!
//! ```text
//! BoxN            box with lower < upper on every axis
//!   └─ Prepartition   disjoint sub-boxes of a root, refinement order
//!        └─ is_partition  the family covers its root
//!             └─ BoxAdditiveMap  f(J) = Σ f(K) over every partition of J
//! ```
//!
//! | Type | Role |
//! |------|------|
//! | [`BoxN`] | box `∏ (lower i, upper i]`, ordered by inclusion |
//! | [`Prepartition`] | immutable family of disjoint sub-boxes of a root |
//! | [`IndexedBiUnion`] | bounded union with a parent lookup per box |
//! | [`Scope`] | domain of a box-additive map |
//! | [`BoxAdditiveMap`] | function on boxes, additive over partitions |
//! | [`UpperSubLower`] | sweep of a face family along one axis |
//! | [`BoxMeasure`] | finite non-negative box-additive measures |
//!
//! # Point sets
//!
//! Unions, coverage and point membership use the half-open cell
//! `lower < x <= upper` of each box, so the two pieces of a split tile
//! their parent exactly. Disjointness of cells and of open interiors
//! coincide, and the closed hull is used for multiplicity counts.
//!
//! # Example: split, cover, sum
//!
//! ```
//! use boxpart::{volume, BoxN, Prepartition, Scope};
//!
//! let i = BoxN::new(vec![0.0, 0.0], vec![2.0, 2.0]).unwrap();
//! let halves = Prepartition::split(&i, 0, &1.0).unwrap();
//! assert!(halves.is_partition());
//! assert!(halves.union_eq(&Prepartition::top(&i)));
//!
//! let vol = volume::<f64>(Scope::All);
//! assert_eq!(vol.reconcile(&halves).unwrap(), 4.0);
//! ```
//!
//! # Example: meet of two partitions
//!
//! ```
//! use boxpart::{BoxN, Prepartition};
//!
//! let i = BoxN::new(vec![0.0, 0.0], vec![2.0, 2.0]).unwrap();
//! let v = Prepartition::split(&i, 0, &1.0).unwrap();
//! let h = Prepartition::split(&i, 1, &1.0).unwrap();
//! let q = v.inf(&h);
//! assert_eq!(q.len(), 4);
//! assert!(q <= v && q <= h);
//! assert_eq!(q.multiplicity_at(&[1.0, 1.0]), 4);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`BoxN`], [`Scope`] and
//!   [`Prepartition`]. Deserialization re-validates every invariant.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

// Error taxonomy (BoxError, Violation)
pub mod error;

// Coordinate and value interfaces
pub mod scalar;

// Boxes and domains
pub mod geometry;

// Prepartitions, refinement, splitting, partition predicate
pub mod prepartition;

// Box-additive maps and measures
pub mod additive;

pub use additive::{
    to_box_additive, volume, volume_by_sweep, BoxAdditiveMap, BoxMeasure, Lebesgue, UpperSubLower,
};
pub use error::{BoxError, Result, Violation};
pub use geometry::{BoxN, Scope};
pub use prepartition::{IndexedBiUnion, Prepartition, SplitPlane, Union};
pub use scalar::{AddMonoid, Coordinate};

/// Prelude module for convenient imports.
///
/// ```
/// use boxpart::prelude::*;
///
/// let top = Prepartition::top(&BoxN::<f64>::unit(3));
/// assert!(top.is_partition());
/// ```
pub mod prelude {
    pub use crate::additive::{volume, BoxAdditiveMap, BoxMeasure, Lebesgue, UpperSubLower};
    pub use crate::error::{BoxError, Violation};
    pub use crate::geometry::{BoxN, Scope};
    pub use crate::prepartition::{IndexedBiUnion, Prepartition, SplitPlane};
    pub use crate::scalar::{AddMonoid, Coordinate};
}
