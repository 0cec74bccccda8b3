use std::collections::BTreeMap;

use hyterm::syntax::{Key, Syntax, SyntaxKind};

fn keyed<C>(entries: impl IntoIterator<Item = (&'static str, C)>) -> Syntax<C, &'static str> {
    Syntax::Keyed(entries.into_iter().map(|(k, c)| (Key::from(k), c)).collect())
}

#[test]
fn map_preserves_order_of_sequences() {
    let indexed: Syntax<u32, ()> = Syntax::Indexed(vec![3, 1, 2]);
    assert_eq!(indexed.map(|c| c * 10), Syntax::Indexed(vec![30, 10, 20]));

    let fixed: Syntax<u32, ()> = Syntax::Fixed(vec![1, 2]);
    assert_eq!(
        fixed.map(|c| c.to_string()),
        Syntax::Fixed(vec!["1".to_owned(), "2".to_owned()])
    );
}

#[test]
fn map_preserves_keys() {
    let shape = keyed([("b", 2), ("a", 1)]);
    let mapped = shape.map(|c| c + 100);
    assert_eq!(mapped, keyed([("a", 101), ("b", 102)]));
}

#[test]
fn map_leaves_leaf_untouched() {
    let leaf: Syntax<u32, &str> = Syntax::Leaf("payload");
    let mut calls = 0;
    let mapped = leaf.map(|c| {
        calls += 1;
        c + 1
    });
    assert_eq!(mapped, Syntax::Leaf("payload"));
    assert_eq!(calls, 0);
}

#[test]
fn map_never_changes_variant() {
    let shapes: Vec<Syntax<u8, char>> = vec![
        Syntax::Leaf('x'),
        Syntax::Indexed(vec![]),
        Syntax::Fixed(vec![1]),
        Syntax::Keyed(BTreeMap::new()),
    ];
    for shape in shapes {
        let kind = shape.kind();
        assert_eq!(shape.map(u32::from).kind(), kind);
    }
}

#[test]
fn try_map_stops_at_first_error() {
    let shape: Syntax<i32, ()> = Syntax::Indexed(vec![1, -2, 3, -4]);
    let mut seen = Vec::new();
    let result = shape.try_map(|c| {
        seen.push(c);
        if c < 0 { Err(c) } else { Ok(c) }
    });
    assert_eq!(result, Err(-2));
    assert_eq!(seen, vec![1, -2]);
}

#[test]
fn try_map_visits_keyed_in_key_order() {
    let shape = keyed([("z", 26), ("a", 1), ("m", 13)]);
    let mut seen = Vec::new();
    let result: Result<_, ()> = shape.try_map(|c| {
        seen.push(c);
        Ok(c)
    });
    assert!(result.is_ok());
    assert_eq!(seen, vec![1, 13, 26]);
}

#[test]
fn children_follow_canonical_order() {
    let shape = keyed([("b", 'B'), ("a", 'A')]);
    assert_eq!(shape.children().copied().collect::<String>(), "AB");
    assert_eq!(shape.children().rev().copied().collect::<String>(), "BA");
    assert_eq!(shape.child_count(), 2);

    let leaf: Syntax<char, u8> = Syntax::Leaf(0);
    assert_eq!(leaf.children().count(), 0);
    assert_eq!(leaf.child_count(), 0);
    assert_eq!(leaf.leaf(), Some(&0));
}

#[test]
fn as_ref_and_map_leaf() {
    let shape: Syntax<String, u32> = Syntax::Fixed(vec!["a".into(), "b".into()]);
    let lengths = shape.as_ref().map(|s| s.len());
    assert_eq!(lengths, Syntax::Fixed(vec![1, 1]));

    let leaf: Syntax<String, u32> = Syntax::Leaf(7);
    assert_eq!(leaf.map_leaf(|n| n * 2), Syntax::Leaf(14));
}

#[test]
fn one_level_equality_rules() {
    let eq = |a: &u8, b: &u8| a == b;

    let indexed: Syntax<u8, u8> = Syntax::Indexed(vec![1, 2]);
    let fixed: Syntax<u8, u8> = Syntax::Fixed(vec![1, 2]);
    assert!(indexed.equals(&indexed.clone(), eq, eq));
    assert!(!indexed.equals(&fixed, eq, eq));
    assert!(!indexed.equals(&Syntax::Indexed(vec![1]), eq, eq));
    assert!(!indexed.equals(&Syntax::Indexed(vec![2, 1]), eq, eq));

    let a = keyed([("x", 1u8), ("y", 2)]).map_leaf(|_| 0u8);
    let b = keyed([("y", 2u8), ("x", 1)]).map_leaf(|_| 0u8);
    let c = keyed([("x", 1u8), ("z", 2)]).map_leaf(|_| 0u8);
    assert!(a.equals(&b, eq, eq));
    assert!(!a.equals(&c, eq, eq));

    let leaf: Syntax<u8, u8> = Syntax::Leaf(1);
    assert!(leaf.equals(&Syntax::Leaf(1), eq, eq));
    assert!(!leaf.equals(&Syntax::Leaf(2), eq, eq));
    assert!(!leaf.equals(&Syntax::Indexed(vec![]), eq, eq));
}

#[test]
fn kind_discriminants() {
    let shape: Syntax<(), ()> = Syntax::Keyed(BTreeMap::new());
    assert_eq!(shape.kind(), SyntaxKind::Keyed);
    assert!(shape.is_keyed());
    assert!(!shape.is_indexed());
    assert!(SyntaxKind::Leaf < SyntaxKind::Keyed);
}
