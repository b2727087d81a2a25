//! Integration coverage for normalization, hashing, and equality.

mod common;

use common::*;
use num_bigint::BigInt;
use relsets::relation::Relation;

#[test]
fn basic_normalize_drops_redundant_inequality_and_sets_flag() {
    let b = box_set(&[(0, 5)]);
    let b = {
        // duplicate the upper bound with a looser constant; normalize
        // should discard it as redundant.
        let mut b2 = b.clone();
        let w = 1 + b2.space().total();
        let mut extra = vec![BigInt::from(0); w];
        extra[0] = BigInt::from(10);
        extra[w - 1] = BigInt::from(-1);
        b2.add_ineq(extra).unwrap();
        b2
    };
    let n = b.normalize();
    assert_eq!(n.n_ineq(), 2);
    assert!(n.is_normalized());
}

#[test]
fn relation_normalize_dedupes_identical_parts_and_sorts() {
    let a = box_set(&[(0, 5)]);
    let b = box_set(&[(0, 5)]);
    let c = box_set(&[(10, 15)]);
    let r = Relation::from_basic(a)
        .union_disjoint(&Relation::from_basic(b))
        .unwrap()
        .union_disjoint(&Relation::from_basic(c))
        .unwrap();
    assert_eq!(r.n(), 3);
    let normalized = r.normalize();
    assert_eq!(normalized.n(), 2);
    assert!(normalized.is_normalized());
}

#[test]
fn fast_is_equal_ignores_part_order() {
    let a = box_set(&[(0, 5)]);
    let b = box_set(&[(10, 15)]);
    let r1 = Relation::from_basic(a.clone()).union_disjoint(&Relation::from_basic(b.clone())).unwrap();
    let r2 = Relation::from_basic(b).union_disjoint(&Relation::from_basic(a)).unwrap();
    assert!(r1.fast_is_equal(&r2));
}

#[test]
fn hash_value_is_stable_under_redundant_inequalities() {
    let plain = box_set(&[(0, 5)]);
    let mut padded = plain.clone();
    {
        let w = 1 + padded.space().total();
        let mut extra = vec![BigInt::from(0); w];
        extra[0] = BigInt::from(10);
        extra[w - 1] = BigInt::from(-1);
        padded.add_ineq(extra).unwrap();
    }
    assert_eq!(plain.normalize().hash_value(), padded.normalize().hash_value());
}
