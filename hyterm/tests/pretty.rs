use hyterm::prelude::*;
use termcolor::Buffer;

fn l(s: &'static str) -> Term<&'static str> {
    Term::leaf(s)
}

#[test]
fn flat_layouts() {
    assert_eq!(l("x").pretty_string(80), "x");
    assert_eq!(Term::indexed([l("a"), l("b")]).pretty_string(80), "[a, b]");
    assert_eq!(Term::fixed([l("a"), l("b")]).pretty_string(80), "(a, b)");
    assert_eq!(
        Term::keyed([("b", l("y")), ("a", l("x"))]).pretty_string(80),
        "{a: x, b: y}"
    );
    assert_eq!(Term::<&str>::indexed([]).pretty_string(80), "[]");
    assert_eq!(Term::<&str>::keyed::<&str>([]).pretty_string(80), "{}");
}

#[test]
fn nested_layout() {
    let t = Term::indexed([
        Term::keyed([("k", Term::fixed([l("1"), l("2")]))]),
        l("z"),
    ]);
    assert_eq!(t.pretty_string(80), "[{k: (1, 2)}, z]");
    assert_eq!(t.to_string(), "[{k: (1, 2)}, z]");
}

#[test]
fn breaks_when_too_wide() {
    let t = Term::indexed([l("alpha"), l("beta"), l("gamma")]);
    assert_eq!(t.pretty_string(10), "[\n  alpha,\n  beta,\n  gamma\n]");
}

#[test]
fn inner_groups_stay_flat_when_they_fit() {
    let t = Term::fixed([Term::indexed([l("a"), l("b")]), l("long-leaf-payload")]);
    assert_eq!(t.pretty_string(20), "(\n  [a, b],\n  long-leaf-payload\n)");
}

#[test]
fn colored_rendering_contains_text() {
    let t = Term::keyed([("key", l("value"))]);

    let mut plain = Buffer::no_color();
    t.pretty_render_to(80, &mut plain).unwrap();
    assert_eq!(String::from_utf8(plain.into_inner()).unwrap(), "{key: value}");

    let mut colored = Buffer::ansi();
    t.pretty_render_to(80, &mut colored).unwrap();
    let colored = String::from_utf8(colored.into_inner()).unwrap();
    assert!(colored.contains("key"));
    assert!(colored.contains("value"));
    assert!(colored.contains('\u{1b}'));
}

#[test]
#[should_panic(expected = "Display implementation returned an error")]
fn failing_leaf_display_is_not_truncated() {
    struct Broken;

    impl std::fmt::Display for Broken {
        fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }

    let t = Term::indexed([Term::leaf(Broken)]);
    t.pretty_string(80);
}
