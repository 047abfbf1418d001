//! Box primitives.
//!
//! - [`BoxN`]: an axis-aligned box with strictly increasing corners
//! - [`Scope`]: "all boxes" or "sub-boxes of a fixed box"
//!
//! Possibly-empty boxes are `Option<BoxN<T>>`: `None` is the bottom of the
//! meet-semilattice formed by [`BoxN::intersect`].

mod boxn;
mod scope;

pub use boxn::BoxN;
pub use scope::Scope;
