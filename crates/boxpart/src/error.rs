//! Error taxonomy for the box-partition engine.
//!
//! Only two things can go wrong:
//!
//! | Kind | When |
//! |------|------|
//! | [`BoxError::InvalidBox`] | a box is built with `lower i >= upper i` for some axis |
//! | [`BoxError::InvariantViolation`] | a precondition-carrying constructor receives arguments that break containment, disjointness or covering |
//!
//! The remaining variants report shape errors (mismatched lengths,
//! dimensions, axes or scopes) at API boundaries. Degenerate geometry
//! (`split_at` past a boundary, empty intersections) is never an error: it
//! is reported through `Option`.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, BoxError>;

/// Errors produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoxError {
    /// A box was constructed with a non-increasing coordinate pair.
    #[error("invalid box: axis {axis} has lower {lower} >= upper {upper}")]
    InvalidBox {
        /// Offending axis.
        axis: usize,
        /// Debug rendering of the lower bound.
        lower: String,
        /// Debug rendering of the upper bound.
        upper: String,
    },

    /// Lower and upper corners have different lengths.
    #[error("corner length mismatch: lower has {lower} coordinates, upper has {upper}")]
    LengthMismatch {
        /// Length of the lower corner.
        lower: usize,
        /// Length of the upper corner.
        upper: usize,
    },

    /// Two boxes (or a box and a point) live in different dimensions.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Dimension of the reference object.
        expected: usize,
        /// Dimension that was supplied.
        found: usize,
    },

    /// An axis index is not below the dimension.
    #[error("axis {axis} out of range for dimension {dim}")]
    AxisOutOfRange {
        /// Requested axis.
        axis: usize,
        /// Dimension of the box.
        dim: usize,
    },

    /// Two box-additive maps were combined over different domains.
    #[error("box-additive maps have different scopes")]
    ScopeMismatch,

    /// A precondition of a proof-carrying constructor does not hold.
    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] Violation),
}

/// The precondition that was found broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A box is not a sub-box of the root.
    #[error("box {index} is not contained in the root box")]
    NotContained {
        /// Position of the box in the supplied collection.
        index: usize,
    },

    /// Two boxes share interior points.
    #[error("boxes {first} and {second} overlap")]
    Overlapping {
        /// Position of the first box.
        first: usize,
        /// Position of the second box.
        second: usize,
    },

    /// Two prepartitions that must share a root do not.
    #[error("prepartition roots differ")]
    RootMismatch,

    /// A prepartition does not cover its root.
    #[error("prepartition does not cover its root box")]
    NotAPartition,

    /// A box lies outside the domain of a box-additive map.
    #[error("box lies outside the domain of the map")]
    OutOfScope,

    /// Two prepartitions expected to cover the same region do not.
    #[error("prepartitions cover different regions")]
    UnionMismatch,

    /// `f(lower) + f(upper) != f(J)` for a two-piece split.
    #[error("split law fails on axis {axis}")]
    SplitLaw {
        /// Axis of the failing split.
        axis: usize,
    },
}
