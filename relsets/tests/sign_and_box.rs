//! Integration coverage for sign analysis, boundedness, and `is_box`.

mod common;

use common::*;
use num_bigint::BigInt;
use relsets::basic_relation::BasicRelation;
use relsets::space::{Component, Space};

#[test]
fn dim_is_bounded_true_for_boxed_coordinate() {
    let b = box_set(&[(0, 5)]);
    let off = b.space().offset(Component::Out);
    assert!(b.dim_is_bounded(off));
}

#[test]
fn dim_is_bounded_false_for_one_sided_coordinate() {
    let space = set_space(1);
    let b = BasicRelation::positive_orthant(space.clone()).unwrap();
    let off = b.space().offset(Component::Out);
    assert!(!b.dim_is_bounded(off));
}

#[test]
fn vars_get_sign_reports_positive_negative_and_unknown() {
    let space = set_space(1);
    let pos = BasicRelation::interval(space.clone(), BigInt::from(1), BigInt::from(5)).unwrap();
    let neg = BasicRelation::interval(space.clone(), BigInt::from(-5), BigInt::from(-1)).unwrap();
    let either = BasicRelation::interval(space.clone(), BigInt::from(-5), BigInt::from(5)).unwrap();
    let off = space.offset(Component::Out);

    assert_eq!(pos.vars_get_sign(&[off]), vec![1]);
    assert_eq!(neg.vars_get_sign(&[off]), vec![-1]);
    assert_eq!(either.vars_get_sign(&[off]), vec![0]);
}

#[test]
fn is_box_true_for_plain_interval_false_after_floor_div() {
    let b = box_set(&[(0, 5)]);
    assert!(b.is_box());
    let f = b.floor_div(BigInt::from(2)).unwrap();
    // floor_div introduces a div; is_box requires a div-free relation.
    assert!(!f.is_box());
}

#[test]
fn is_box_true_for_bound_expressed_in_terms_of_a_parameter() {
    // { [N] -> [x] | 0 <= x <= N }: a parametric box. The upper bound row
    // carries a nonzero coefficient on the parameter column, which must
    // not disqualify it from being a box.
    let space = Space::alloc(1, 0, 1);
    let mut b = BasicRelation::alloc(space.clone(), 0, 0, 2);
    let w = 1 + space.total();
    let param_off = space.offset(Component::Param);
    let out_off = space.offset(Component::Out);
    let mut lower = vec![BigInt::from(0); w];
    lower[out_off] = BigInt::from(1);
    b.add_ineq(lower).unwrap();
    let mut upper = vec![BigInt::from(0); w];
    upper[param_off] = BigInt::from(1);
    upper[out_off] = BigInt::from(-1);
    b.add_ineq(upper).unwrap();
    assert!(b.is_box());
}

#[test]
fn is_box_false_for_diagonal_constraint() {
    // { (x, y) | x + y <= 5, x >= 0, y >= 0 } is not axis-aligned.
    let space = Space::alloc_set(0, 2);
    let mut b = BasicRelation::alloc(space.clone(), 0, 0, 3);
    let off = space.offset(Component::Out);
    let w = 1 + space.total();
    let mut c1 = vec![BigInt::from(0); w];
    c1[off] = BigInt::from(1);
    b.add_ineq(c1).unwrap();
    let mut c2 = vec![BigInt::from(0); w];
    c2[off + 1] = BigInt::from(1);
    b.add_ineq(c2).unwrap();
    let mut c3 = vec![BigInt::from(0); w];
    c3[0] = BigInt::from(5);
    c3[off] = BigInt::from(-1);
    c3[off + 1] = BigInt::from(-1);
    b.add_ineq(c3).unwrap();
    assert!(!b.is_box());
}
