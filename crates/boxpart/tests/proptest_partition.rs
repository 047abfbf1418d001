//! Property tests for the partition predicate, union comparisons and
//! splitting.
//!
//! Grid-based answers are checked against brute-force enumeration of unit
//! cells.

mod generators;

use boxpart::Prepartition;
use generators::*;
use proptest::prelude::*;

// =============================================================================
// Exactness against the unit-cell oracle
// =============================================================================

proptest! {
    /// is_partition agrees with covering every unit cell.
    #[test]
    fn prop_is_partition_matches_oracle(p in arb_dim().prop_flat_map(arb_prepartition)) {
        let all = unit_cells(p.root().dim()).len();
        prop_assert_eq!(p.is_partition(), covered(&p).len() == all);
    }

    /// union_subset, union_eq and union_disjoint agree with the oracle.
    #[test]
    fn prop_union_comparisons_match_oracle((a, b) in arb_prepartition_pair()) {
        let (ca, cb) = (covered(&a), covered(&b));
        let subset = ca.iter().all(|x| cb.contains(x));
        let disjoint = ca.iter().all(|x| !cb.contains(x));
        prop_assert_eq!(a.union_subset(&b), subset);
        prop_assert_eq!(a.union_eq(&b), subset && cb.iter().all(|x| ca.contains(x)));
        prop_assert_eq!(a.union_disjoint(&b), disjoint);
    }

    /// compl covers exactly the cells the prepartition misses.
    #[test]
    fn prop_compl_is_set_difference(p in arb_dim().prop_flat_map(arb_prepartition)) {
        let c = p.compl();
        prop_assert!(p.union_disjoint(&c));
        let whole = p.disj_union(&c).unwrap();
        prop_assert!(whole.is_partition());
        for x in unit_cells(p.root().dim()) {
            prop_assert_eq!(c.union().contains(&x), !p.union().contains(&x));
        }
    }
}

// =============================================================================
// Closure properties
// =============================================================================

proptest! {
    /// Carved families are partitions, and refining each box by a partition
    /// keeps the union.
    #[test]
    fn prop_bi_union_of_partitions(
        (p, cuts) in arb_dim().prop_flat_map(|d| (arb_partition(d), arb_cuts(d, 4)))
    ) {
        prop_assert!(p.is_partition());
        let refined = p.bi_union(|j| carve(j, &cuts)).unwrap();
        prop_assert!(refined.is_partition());
        prop_assert!(refined <= p);
        prop_assert!(refined.union_eq(&p));
    }

    /// bi_union never changes the union when children are partitions, even
    /// over a prepartition.
    #[test]
    fn prop_bi_union_keeps_union(
        (p, cuts) in arb_dim().prop_flat_map(|d| (arb_prepartition(d), arb_cuts(d, 4)))
    ) {
        let refined = p.bi_union(|j| carve(j, &cuts)).unwrap();
        prop_assert!(refined.union_eq(&p));
    }

    /// Restricting a partition to a sub-box gives a partition of that box.
    #[test]
    fn prop_restrict_of_partition(
        (p, window) in arb_dim().prop_flat_map(|d| (arb_partition(d), arb_box(d)))
    ) {
        let r = p.restrict(&window);
        prop_assert!(r.is_partition());
        prop_assert_eq!(r.root(), &window);
    }

    /// The meet of two partitions is a partition.
    #[test]
    fn prop_inf_of_partitions((a, b) in arb_partition_pair()) {
        prop_assert!(a.inf(&b).is_partition());
    }

    /// A partition has no proper sub-family that is a partition.
    #[test]
    fn prop_partition_sub_family_is_itself(
        (p, mask) in arb_dim().prop_flat_map(|d| (
            arb_partition(d),
            proptest::collection::vec(any::<bool>(), 1..8),
        ))
    ) {
        let sub = drop_by_mask(&p, &mask);
        prop_assert!(sub <= p);
        prop_assert_eq!(sub.is_partition(), sub == p);
    }
}

// =============================================================================
// Splitting
// =============================================================================

proptest! {
    /// split_many keeps partitions, refines, and ignores plane order.
    #[test]
    fn prop_split_many_refines(
        (p, planes) in arb_dim().prop_flat_map(|d| (
            arb_partition(d),
            proptest::collection::vec((0..d, 1..SIDE), 0..6),
        ))
    ) {
        let s = p.split_many(&planes).unwrap();
        prop_assert!(s.is_partition());
        prop_assert!(s <= p);
        let mut reversed = planes.clone();
        reversed.reverse();
        prop_assert_eq!(p.split_many(&reversed).unwrap(), s);
    }

    /// Splitting the root by the planes of a partition refines it.
    #[test]
    fn prop_split_planes_refine_partition(p in arb_dim().prop_flat_map(arb_partition)) {
        let grid = Prepartition::top(p.root()).split_many(&p.split_planes()).unwrap();
        prop_assert!(grid <= p);
        prop_assert!(grid.is_partition());
    }

    /// Two partitions meet on the grid of their joint planes.
    #[test]
    fn prop_partitions_have_common_split_refinement((a, b) in arb_partition_pair()) {
        let mut planes = a.split_planes();
        planes.extend(b.split_planes());
        let s1 = a.split_many(&planes).unwrap();
        let s2 = b.split_many(&planes).unwrap();
        prop_assert_eq!(&s1, &s2);
        prop_assert!(s1 <= a.inf(&b));
    }
}
