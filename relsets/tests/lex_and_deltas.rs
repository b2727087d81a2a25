//! Integration coverage for lexicographic optimization and `deltas`.

mod common;

use common::*;
use num_bigint::BigInt;
use relsets::basic_relation::BasicRelation;
use relsets::ctx::Ctx;
use relsets::relation::Relation;
use relsets::space::Space;

#[test]
fn lexmin_picks_the_smallest_point_of_a_box() {
    let b = box_set(&[(3, 7), (0, 9)]);
    let r = Relation::from_basic(b);
    let ctx = Ctx::new();
    let min = r.lexmin(&ctx);
    assert_eq!(min.n(), 1);
    assert!(min.parts()[0].contains(&ints(&[1, 3, 0])));
}

#[test]
fn lexmax_picks_the_largest_point_of_a_box() {
    let b = box_set(&[(3, 7), (0, 9)]);
    let r = Relation::from_basic(b);
    let ctx = Ctx::new();
    let max = r.lexmax(&ctx);
    assert_eq!(max.n(), 1);
    assert!(max.parts()[0].contains(&ints(&[1, 7, 9])));
}

#[test]
fn deltas_of_identity_is_the_origin() {
    let space = map_space(2, 2);
    let id = BasicRelation::identity(space).unwrap();
    let r = Relation::from_basic(id);
    let d = r.deltas().unwrap();
    assert_eq!(d.space().n_out(), 2);
    let ctx = Ctx::new();
    assert!(!d.is_empty(&ctx));
    let part = &d.parts()[0];
    let w = 1 + part.space().total() + part.n_div();
    let mut origin = vec![BigInt::from(1), BigInt::from(0), BigInt::from(0)];
    origin.resize(w, BigInt::from(0));
    assert!(part.contains(&origin));
    let mut off_origin = vec![BigInt::from(1), BigInt::from(1), BigInt::from(0)];
    off_origin.resize(w, BigInt::from(0));
    assert!(!part.contains(&off_origin));
}

#[test]
fn deltas_requires_equal_input_output_arity() {
    let space = map_space(2, 3);
    let u = BasicRelation::universe(space);
    let r = Relation::from_basic(u);
    assert!(r.deltas().is_none());
}

#[test]
fn partial_lex_opt_restricted_to_a_domain() {
    let space = map_space(1, 1);
    let mut f = BasicRelation::universe(space.clone());
    {
        use relsets::space::Component;
        let off_in = space.offset(Component::In);
        let off_out = space.offset(Component::Out);
        let w = 1 + space.total();
        let mut lo = vec![BigInt::from(0); w];
        lo[off_out] = BigInt::from(1);
        f.add_ineq(lo).unwrap();
        let mut link = vec![BigInt::from(0); w];
        link[off_out] = BigInt::from(-1);
        link[off_in] = BigInt::from(1);
        link[0] = BigInt::from(100);
        f.add_ineq(link).unwrap(); // out <= in + 100
    }
    let domain_space = Space::alloc_set(0, 1);
    let d = BasicRelation::interval(domain_space, BigInt::from(0), BigInt::from(5)).unwrap();
    let r = Relation::from_basic(f);
    let dom = Relation::from_basic(d);
    let ctx = Ctx::new();
    let (lex, _empty) = r.partial_lex_opt(Some(&dom), &ctx, false);
    assert!(!lex.fast_is_empty());
}
