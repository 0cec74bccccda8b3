use hyterm::prelude::*;

fn l(s: &'static str) -> Term<&'static str> {
    Term::leaf(s)
}

fn eq(a: &&str, b: &&str) -> bool {
    a == b
}

#[test]
fn leaves_compare_with_the_given_predicate() {
    assert!(l("x").equals(&l("x"), eq));
    assert!(!l("x").equals(&l("y"), eq));
    assert!(l("X").equals(&l("x"), |a, b| a.eq_ignore_ascii_case(b)));
}

#[test]
fn indexed_and_fixed_never_match() {
    let indexed = Term::indexed([l("x"), l("y")]);
    let fixed = Term::fixed([l("x"), l("y")]);
    assert_eq!(indexed.size(), fixed.size());
    assert!(!indexed.equals(&fixed, eq));
    assert!(!fixed.equals(&indexed, eq));
    assert_ne!(indexed, fixed);
}

#[test]
fn leaf_never_matches_branch() {
    let leaf = l("x");
    let branch = Term::indexed([l("x")]);
    assert!(!leaf.equals(&branch, eq));
    assert!(!branch.equals(&leaf, eq));
}

#[test]
fn keyed_ignores_insertion_order() {
    let a = Term::keyed([("a", l("x")), ("b", l("y"))]);
    let b = Term::keyed([("b", l("y")), ("a", l("x"))]);
    assert!(a.equals(&b, eq));
    assert_eq!(a, b);
}

#[test]
fn keyed_requires_same_names() {
    let a = Term::keyed([("a", l("x")), ("b", l("y"))]);
    let fewer = Term::keyed([("a", l("x"))]);
    let renamed = Term::keyed([("a", l("x")), ("c", l("y"))]);
    assert!(!a.equals(&fewer, eq));
    assert!(!fewer.equals(&a, eq));
    assert!(!a.equals(&renamed, eq));
}

#[test]
fn sequences_compare_in_order() {
    let ab = Term::indexed([l("a"), l("b")]);
    let ba = Term::indexed([l("b"), l("a")]);
    let abc = Term::indexed([l("a"), l("b"), l("c")]);
    assert!(!ab.equals(&ba, eq));
    assert!(!ab.equals(&abc, eq));
    assert!(ab.equals(&ab.clone(), eq));
}

#[test]
fn deep_difference_is_found() {
    let build = |leaf| {
        Term::fixed([
            Term::keyed([("k", Term::indexed([l("a"), Term::fixed([l("b"), l(leaf)])]))]),
            l("d"),
        ])
    };
    assert!(build("c").equals(&build("c"), eq));
    assert!(!build("c").equals(&build("e"), eq));
}

#[test]
fn curried_predicate_is_reusable() {
    let same = hyterm::term::equals::<Term<&str>, _>(eq);
    let t = Term::indexed([l("a"), Term::keyed([("b", l("c"))])]);
    assert!(same(&t, &t.clone()));
    assert!(!same(&t, &l("a")));
}

#[test]
fn recursive_and_iterative_equality_agree() {
    let terms = [
        l("a"),
        Term::indexed([l("a"), l("b")]),
        Term::fixed([l("a"), l("b")]),
        Term::keyed([("a", l("a")), ("b", l("b"))]),
        Term::keyed([("a", l("a")), ("b", l("c"))]),
        Term::indexed([]),
    ];
    for a in &terms {
        for b in &terms {
            assert_eq!(a.equals(b, eq), hyterm::walker::equals(a, b, eq));
        }
    }
}
