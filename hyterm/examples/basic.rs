use hyterm::prelude::*;
use hyterm::value::{HostValue, Value};

fn main() {
    let before = Term::keyed([
        ("name", Term::leaf("doubt")),
        (
            "args",
            Term::indexed([Term::leaf("a"), Term::leaf("b"), Term::leaf("c")]),
        ),
        ("pair", Term::fixed([Term::leaf("x"), Term::leaf("y")])),
    ]);
    let after = Term::keyed([
        ("name", Term::leaf("doubt")),
        ("args", Term::indexed([Term::leaf("a"), Term::leaf("c")])),
        ("pair", Term::fixed([Term::leaf("x"), Term::leaf("y")])),
    ]);

    before.pretty_print().unwrap();
    after.pretty_print().unwrap();
    println!("sizes: {} -> {}", before.size(), after.size());
    println!("equal: {}", before.equals(&after, |a, b| a == b));

    // Heights of every node, cached as annotations.
    let heights = Annotated::annotate(&before, |shape| match shape {
        Syntax::Leaf(_) => 0,
        other => 1 + other.children().map(|h| **h).max().unwrap_or(0),
    });
    println!("height: {}", heights.annotation());

    let host: HostValue = Box::new(vec![
        Box::new(1u32) as HostValue,
        Box::new(String::from("two")) as HostValue,
        Box::new(()) as HostValue,
    ]);
    match Value::try_from_host(host.as_ref()) {
        Ok(value) => println!("value: {value} (size {})", value.size()),
        Err(err) => eprintln!("{err}"),
    }
}
