//! Proptest generators for boxes and prepartitions.
//!
//! Coordinates are integers in `0..=SIDE`, so every box is a union of unit
//! cells `(k-1, k]` and each unit cell is identified by its integer upper
//! corner. That makes point-set questions decidable by enumeration, which
//! the property tests use as an oracle.

#![allow(dead_code)]

use boxpart::{BoxN, Prepartition};
use num_rational::Rational64;
use proptest::collection::vec;
use proptest::prelude::*;

/// Side of the root cube.
pub const SIDE: i64 = 8;

// ============================================================================
// Boxes
// ============================================================================

/// Dimensions small enough to enumerate every unit cell.
pub fn arb_dim() -> impl Strategy<Value = usize> {
    1usize..=3
}

/// The root cube `(0, SIDE]^dim`.
pub fn root(dim: usize) -> BoxN<i64> {
    BoxN::new(vec![0; dim], vec![SIDE; dim]).unwrap()
}

/// A non-empty interval `(a, b]` inside `(0, SIDE]`.
pub fn arb_interval() -> impl Strategy<Value = (i64, i64)> {
    (0..SIDE).prop_flat_map(|a| (Just(a), a + 1..=SIDE))
}

/// A box inside the root cube.
pub fn arb_box(dim: usize) -> impl Strategy<Value = BoxN<i64>> {
    vec(arb_interval(), dim).prop_map(|iv| BoxN::from_intervals(iv).unwrap())
}

/// A box with rational corners (same shapes as [`arb_box`]).
pub fn arb_rational_box(dim: usize) -> impl Strategy<Value = BoxN<Rational64>> {
    arb_box(dim).prop_map(|b| to_rational(&b))
}

/// Exact rational copy of an integer box.
pub fn to_rational(b: &BoxN<i64>) -> BoxN<Rational64> {
    BoxN::from_intervals(
        b.lower()
            .iter()
            .zip(b.upper())
            .map(|(l, u)| (Rational64::from_integer(*l), Rational64::from_integer(*u))),
    )
    .unwrap()
}

// ============================================================================
// Prepartitions
// ============================================================================

/// One carving step: `(box selector, axis, coordinate)`.
pub type Cut = (usize, usize, i64);

/// Up to `max` carving steps in dimension `dim`.
pub fn arb_cuts(dim: usize, max: usize) -> impl Strategy<Value = Vec<Cut>> {
    vec((any::<usize>(), 0..dim, 1..SIDE), 0..=max)
}

/// Apply `cuts` to `top(root)`: each step splits one selected box in two.
///
/// Produces non-guillotine partitions, since each cut stays inside the
/// selected box.
pub fn carve(root: &BoxN<i64>, cuts: &[Cut]) -> Prepartition<i64> {
    cuts.iter()
        .fold(Prepartition::top(root), |p, &(pick, axis, x)| {
            let chosen = p.boxes()[pick % p.len()].clone();
            p.bi_union(|j| {
                if *j == chosen {
                    Prepartition::split(j, axis, &x).unwrap()
                } else {
                    Prepartition::top(j)
                }
            })
            .unwrap()
        })
}

/// A partition of the root cube.
pub fn arb_partition(dim: usize) -> impl Strategy<Value = Prepartition<i64>> {
    arb_cuts(dim, 8).prop_map(move |cuts| carve(&root(dim), &cuts))
}

/// A prepartition of the root cube: a partition with some boxes dropped.
pub fn arb_prepartition(dim: usize) -> impl Strategy<Value = Prepartition<i64>> {
    (arb_partition(dim), vec(any::<bool>(), 1..16)).prop_map(|(p, mask)| drop_by_mask(&p, &mask))
}

/// Keep box `k` iff `mask[k % mask.len()]`.
pub fn drop_by_mask(p: &Prepartition<i64>, mask: &[bool]) -> Prepartition<i64> {
    let mut k = 0;
    p.filter(|_| {
        let keep = mask[k % mask.len()];
        k += 1;
        keep
    })
}

/// Two partitions of the same root.
pub fn arb_partition_pair() -> impl Strategy<Value = (Prepartition<i64>, Prepartition<i64>)> {
    arb_dim().prop_flat_map(|d| (arb_partition(d), arb_partition(d)))
}

/// Two prepartitions of the same root.
pub fn arb_prepartition_pair() -> impl Strategy<Value = (Prepartition<i64>, Prepartition<i64>)> {
    arb_dim().prop_flat_map(|d| (arb_prepartition(d), arb_prepartition(d)))
}

/// Three prepartitions of the same root.
pub fn arb_prepartition_triple(
) -> impl Strategy<Value = (Prepartition<i64>, Prepartition<i64>, Prepartition<i64>)> {
    arb_dim().prop_flat_map(|d| (arb_prepartition(d), arb_prepartition(d), arb_prepartition(d)))
}

// ============================================================================
// Oracles
// ============================================================================

/// Upper corners of every unit cell of the root cube.
pub fn unit_cells(dim: usize) -> Vec<Vec<i64>> {
    (0..dim).fold(vec![Vec::new()], |acc, _| {
        acc.into_iter()
            .flat_map(|prefix| {
                (1..=SIDE).map(move |k| {
                    let mut p = prefix.clone();
                    p.push(k);
                    p
                })
            })
            .collect()
    })
}

/// Unit cells covered by `p`, by brute force.
pub fn covered(p: &Prepartition<i64>) -> Vec<Vec<i64>> {
    unit_cells(p.root().dim())
        .into_iter()
        .filter(|x| p.union().contains(x))
        .collect()
}
