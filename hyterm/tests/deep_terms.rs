use hyterm::prelude::*;

/// A right-leaning chain `depth` levels deep, cycling through the three branch shapes.
fn deep_chain(depth: u32) -> Term<u32> {
    let mut t = Term::leaf(0);
    for i in 1..depth {
        t = match i % 3 {
            0 => Term::fixed([Term::leaf(i), t]),
            1 => Term::indexed([t, Term::leaf(i)]),
            _ => Term::keyed([("next", t), ("value", Term::leaf(i))]),
        };
    }
    t
}

#[test]
fn dropping_a_very_deep_term() {
    let t = deep_chain(1_000_000);
    assert_eq!(t.size(), 1_000_000);
    drop(t);
}

#[test]
fn cloning_a_deep_term() {
    let t = deep_chain(300_000);
    let copy = t.clone();
    assert_eq!(copy, t);
    assert_eq!(copy.size(), 300_000);

    let inner = copy.into_syntax();
    assert!(inner.is_keyed() || inner.is_indexed() || inner.is_fixed());
    assert_eq!(inner.child_count(), 2);
}

#[test]
fn debug_format() {
    let t = Term::indexed([
        Term::leaf(1),
        Term::keyed([("k", Term::fixed([])), ("a", Term::leaf(2))]),
    ]);
    assert_eq!(
        format!("{t:?}"),
        r#"Indexed[Leaf(1), Keyed{"a": Leaf(2), "k": Fixed()}]"#
    );

    let annotated = Annotated::annotate(&Term::fixed([Term::leaf('a')]), |s| s.child_count());
    assert_eq!(format!("{annotated:?}"), "1 @ Fixed(0 @ Leaf('a'))");
}

#[test]
fn debug_format_of_a_deep_term() {
    let mut t = Term::leaf(0u32);
    for i in 1..200_000u32 {
        t = Term::fixed([Term::leaf(i), t]);
    }
    let text = format!("{t:?}");
    assert!(text.starts_with("Fixed(Leaf(199999), Fixed(Leaf(199998), "));
    assert!(text.ends_with(&format!("Leaf(0){}", ")".repeat(199_999))));
}

#[test]
fn deep_annotated_terms() {
    let t = deep_chain(200_000);
    let depths = Annotated::annotate(&t, |shape| match shape {
        Syntax::Leaf(_) => 0u32,
        other => 1 + other.children().map(|d| **d).max().unwrap_or(0),
    });
    assert_eq!(*depths.annotation(), 199_999);
    assert_eq!(depths.size(), 200_000);

    let copy = depths.clone();
    assert_eq!(*copy.annotation(), 199_999);
    assert_eq!(copy.strip(), t);
    drop(depths);

    let (depth, top) = copy.into_parts();
    assert_eq!(depth, 199_999);
    assert_eq!(top.child_count(), 2);
}
