//! Concrete term encodings.
//!
//! - [`Term`]: a plain owned tree.
//! - [`Annotated`]: a tree whose every node also carries an annotation (source range, cached
//!   size, diff cost, ...).
//!
//! Both are immutable once built, and both are `Send + Sync` whenever their payloads are.
//! Dropping, cloning and debug-formatting walk the tree with explicit worklists, so trees of
//! any depth can be freed and copied.
use std::collections::BTreeMap;
use std::fmt::{self, Debug};

use crate::syntax::{Key, Syntax};
use crate::term::TermType;
use crate::walker;

/// A plain tree: one [`Syntax`] level whose children are again terms.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Term<L> {
    out: Syntax<Term<L>, L>,
}

impl<L> Term<L> {
    #[inline]
    pub fn leaf(leaf: L) -> Self {
        Self {
            out: Syntax::Leaf(leaf),
        }
    }

    #[inline]
    pub fn indexed(children: impl IntoIterator<Item = Term<L>>) -> Self {
        Self {
            out: Syntax::Indexed(children.into_iter().collect()),
        }
    }

    #[inline]
    pub fn fixed(children: impl IntoIterator<Item = Term<L>>) -> Self {
        Self {
            out: Syntax::Fixed(children.into_iter().collect()),
        }
    }

    /// Build a keyed node. A name given twice keeps its last child.
    pub fn keyed<K: Into<Key>>(children: impl IntoIterator<Item = (K, Term<L>)>) -> Self {
        Self {
            out: Syntax::Keyed(
                children
                    .into_iter()
                    .map(|(k, c)| (k.into(), c))
                    .collect::<BTreeMap<_, _>>(),
            ),
        }
    }

    /// The top level of this term.
    #[inline]
    pub fn syntax(&self) -> &Syntax<Term<L>, L> {
        &self.out
    }

    #[inline]
    pub fn into_syntax(mut self) -> Syntax<Term<L>, L> {
        std::mem::replace(&mut self.out, Syntax::Indexed(Vec::new()))
    }

    /// Copy any term into a plain [`Term`], dropping whatever else the source carries.
    pub fn rebuild<T>(term: &T) -> Self
    where
        T: TermType<Leaf = L>,
        L: Clone,
    {
        walker::fold(term, |shape| Term::from(shape.map_leaf(L::clone)))
    }
}

impl<L> From<Syntax<Term<L>, L>> for Term<L> {
    #[inline]
    fn from(out: Syntax<Term<L>, L>) -> Self {
        Self { out }
    }
}

impl<L> TermType for Term<L> {
    type Leaf = L;

    #[inline]
    fn unwrap(&self) -> Syntax<&Self, &L> {
        self.out.as_ref()
    }
}

impl<L> Drop for Term<L> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach(&mut self.out, &mut pending);
        while let Some(mut term) = pending.pop() {
            detach(&mut term.out, &mut pending);
        }
    }
}

impl<L: Clone> Clone for Term<L> {
    #[inline]
    fn clone(&self) -> Self {
        Term::rebuild(self)
    }
}

impl<L: Debug> Debug for Term<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_debug(self, f, |_, _| Ok(()))
    }
}

impl<L: PartialEq> PartialEq for Term<L> {
    fn eq(&self, other: &Self) -> bool {
        walker::equals(self, other, |a, b| a == b)
    }
}

impl<L: Eq> Eq for Term<L> {}

/// A tree whose nodes each carry an annotation of type `A`.
///
/// Annotations are invisible to the algebra: [`size`](TermType::size),
/// [`equals`](TermType::equals) and the folds only see the [`Syntax`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotated<A, L> {
    annotation: A,
    out: Body<A, L>,
}

/// Children of an [`Annotated`] node. Owns the iterative drop so that the annotation can still
/// be moved out of its node.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
struct Body<A, L>(Syntax<Annotated<A, L>, L>);

impl<A, L> Drop for Body<A, L> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach(&mut self.0, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach(&mut node.out.0, &mut pending);
        }
    }
}

impl<A, L> Annotated<A, L> {
    #[inline]
    pub fn new(annotation: A, out: Syntax<Annotated<A, L>, L>) -> Self {
        Self {
            annotation,
            out: Body(out),
        }
    }

    #[inline]
    pub fn annotation(&self) -> &A {
        &self.annotation
    }

    #[inline]
    pub fn syntax(&self) -> &Syntax<Annotated<A, L>, L> {
        &self.out.0
    }

    /// Split into annotation and top level.
    #[inline]
    pub fn into_parts(self) -> (A, Syntax<Annotated<A, L>, L>) {
        let Annotated {
            annotation,
            mut out,
        } = self;
        (
            annotation,
            std::mem::replace(&mut out.0, Syntax::Indexed(Vec::new())),
        )
    }

    /// Annotate every node of `term` bottom-up.
    ///
    /// `annotate` sees each node with the annotations already computed for its children.
    ///
    /// ```
    /// use hyterm::prelude::*;
    ///
    /// let t = Term::fixed([Term::leaf('a'), Term::indexed([Term::leaf('b'), Term::leaf('c')])]);
    /// let heights = Annotated::annotate(&t, |shape| match shape {
    ///     Syntax::Leaf(_) => 0,
    ///     other => 1 + other.children().map(|h| **h).max().unwrap_or(0),
    /// });
    /// assert_eq!(*heights.annotation(), 2);
    /// ```
    pub fn annotate<T, F>(term: &T, mut annotate: F) -> Self
    where
        T: TermType<Leaf = L>,
        L: Clone,
        F: FnMut(Syntax<&A, &L>) -> A,
    {
        walker::fold(term, |shape: Syntax<Annotated<A, L>, &L>| {
            let annotation = annotate(shape.as_ref().map(|c| &c.annotation).map_leaf(|l| *l));
            Annotated::new(annotation, shape.map_leaf(L::clone))
        })
    }

    /// Drop every annotation.
    pub fn strip(&self) -> Term<L>
    where
        L: Clone,
    {
        Term::rebuild(self)
    }
}

impl<A, L> TermType for Annotated<A, L> {
    type Leaf = L;

    #[inline]
    fn unwrap(&self) -> Syntax<&Self, &L> {
        self.out.0.as_ref()
    }
}

impl<A: Clone, L: Clone> Clone for Annotated<A, L> {
    fn clone(&self) -> Self {
        // Each node's copy is assembled by its parent, which can see the original annotation.
        let out = walker::para(self, |shape| {
            shape
                .map(|(original, out)| Annotated::new(original.annotation.clone(), out))
                .map_leaf(L::clone)
        });
        Annotated::new(self.annotation.clone(), out)
    }
}

impl<A: Debug, L: Debug> Debug for Annotated<A, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_debug(self, f, |node, f| write!(f, "{:?} @ ", node.annotation))
    }
}

/// Move the children of `out` onto `pending`, leaving `out` childless.
fn detach<C, L>(out: &mut Syntax<C, L>, pending: &mut Vec<C>) {
    match out {
        Syntax::Leaf(_) => {}
        Syntax::Indexed(children) | Syntax::Fixed(children) => pending.append(children),
        Syntax::Keyed(children) => pending.extend(std::mem::take(children).into_values()),
    }
}

enum Token<'t, T> {
    Node(&'t T),
    Key(Key),
    Text(&'static str),
}

/// Debug rendering without native recursion: `Leaf(x)`, `Indexed[..]`, `Fixed(..)` and
/// `Keyed{"k": ..}`, each node prefixed by whatever `head` writes for it.
fn fmt_debug<T>(
    root: &T,
    f: &mut fmt::Formatter<'_>,
    mut head: impl FnMut(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result
where
    T: TermType,
    T::Leaf: Debug,
{
    let mut pending = vec![Token::Node(root)];

    while let Some(token) = pending.pop() {
        let node = match token {
            Token::Node(node) => node,
            Token::Key(key) => {
                write!(f, "{key:?}: ")?;
                continue;
            }
            Token::Text(text) => {
                f.write_str(text)?;
                continue;
            }
        };

        head(node, f)?;
        let open = match node.unwrap() {
            Syntax::Leaf(leaf) => {
                write!(f, "Leaf({leaf:?})")?;
                continue;
            }
            Syntax::Indexed(children) => {
                push_sequence(&mut pending, children, "]");
                "Indexed["
            }
            Syntax::Fixed(children) => {
                push_sequence(&mut pending, children, ")");
                "Fixed("
            }
            Syntax::Keyed(children) => {
                pending.push(Token::Text("}"));
                for (i, (key, child)) in children.into_iter().enumerate().rev() {
                    pending.push(Token::Node(child));
                    pending.push(Token::Key(key));
                    if i > 0 {
                        pending.push(Token::Text(", "));
                    }
                }
                "Keyed{"
            }
        };
        f.write_str(open)?;
    }
    Ok(())
}

/// Queue `close`, then the children separated by commas, so they pop in order.
fn push_sequence<'t, T>(
    pending: &mut Vec<Token<'t, T>>,
    children: Vec<&'t T>,
    close: &'static str,
) {
    pending.push(Token::Text(close));
    for (i, child) in children.into_iter().enumerate().rev() {
        pending.push(Token::Node(child));
        if i > 0 {
            pending.push(Token::Text(", "));
        }
    }
}
