//! The term capability and the recursion schemes it provides.
//!
//! A type becomes a *term* by implementing [`TermType::unwrap`], which exposes one level of
//! itself as a [`Syntax`] whose children borrow full subterms. Everything else (catamorphism,
//! paramorphism, size and structural equality) is provided on top of that single method and
//! never looks at the concrete representation.
//!
//! Precondition: `unwrap` must describe a finite, acyclic tree. A type whose unwrapping never
//! bottoms out makes every scheme here diverge.
//!
//! Example: fold a tree into its depth
//! ```
//! use hyterm::prelude::*;
//!
//! let t: Term<&str> = Term::indexed([Term::leaf("a"), Term::fixed([Term::leaf("b")])]);
//! let depth = t.cata(|shape| match shape {
//!     Syntax::Leaf(_) => 1,
//!     other => 1 + other.children().copied().max().unwrap_or(0),
//! });
//! assert_eq!(depth, 3);
//! assert_eq!(t.size(), 2);
//! ```
pub mod defs;

use std::convert::Infallible;

use crate::syntax::Syntax;
use crate::walker;

/// A recursive type that can expose one level of itself.
pub trait TermType: Sized {
    /// Payload carried by leaves.
    type Leaf;

    /// One level of this term: its shape, with children borrowed from `self`.
    fn unwrap(&self) -> Syntax<&Self, &Self::Leaf>;

    /// Catamorphism: fold the tree bottom-up.
    ///
    /// `transform` receives each node with its children already folded, children before parents.
    #[inline]
    fn cata<R, F>(&self, mut transform: F) -> R
    where
        F: FnMut(Syntax<R, &Self::Leaf>) -> R,
    {
        match self.try_cata(|shape| Ok::<_, Infallible>(transform(shape))) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// Fallible [`cata`](Self::cata). The first error returned by `transform` is handed back
    /// unchanged and no further nodes are visited.
    #[inline]
    fn try_cata<R, E, F>(&self, mut transform: F) -> Result<R, E>
    where
        F: FnMut(Syntax<R, &Self::Leaf>) -> Result<R, E>,
    {
        cata_with(self, &mut transform)
    }

    /// Paramorphism: like [`cata`](Self::cata), but each child is paired with the original
    /// subterm it was folded from.
    #[inline]
    fn para<R, F>(&self, mut transform: F) -> R
    where
        F: FnMut(Syntax<(&Self, R), &Self::Leaf>) -> R,
    {
        match self.try_para(|shape| Ok::<_, Infallible>(transform(shape))) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// Fallible [`para`](Self::para).
    #[inline]
    fn try_para<R, E, F>(&self, mut transform: F) -> Result<R, E>
    where
        F: FnMut(Syntax<(&Self, R), &Self::Leaf>) -> Result<R, E>,
    {
        para_with(self, &mut transform)
    }

    /// Cost of this term: leaves count one, branches count the sum of their children (keys are
    /// free). A branch without children counts one rather than zero. Used to weigh insertions
    /// and deletions so that one large patch costs about as much as many small ones covering the
    /// same subtrees.
    ///
    /// Computed with an explicit stack, see [`walker::size`].
    #[inline]
    fn size(&self) -> usize {
        walker::size(self)
    }

    /// Structural equality, with leaves compared by `leaf`.
    ///
    /// This is the fixed point of [`Syntax::equals`]: the same predicate is used for every level
    /// of both trees. Use [`walker::equals`] for very deep trees.
    fn equals<F>(&self, other: &Self, leaf: F) -> bool
    where
        F: Fn(&Self::Leaf, &Self::Leaf) -> bool,
    {
        equals_with(self, other, &leaf)
    }
}

/// Curried structural equality: build the predicate once and reuse it.
///
/// ```
/// use hyterm::prelude::*;
///
/// let same = hyterm::term::equals::<Term<&str>, _>(|a, b| a.eq_ignore_ascii_case(b));
/// assert!(same(&Term::leaf("X"), &Term::leaf("x")));
/// ```
pub fn equals<T, F>(leaf: F) -> impl Fn(&T, &T) -> bool
where
    T: TermType,
    F: Fn(&T::Leaf, &T::Leaf) -> bool,
{
    move |a, b| equals_with(a, b, &leaf)
}

fn cata_with<T, R, E, F>(term: &T, transform: &mut F) -> Result<R, E>
where
    T: TermType,
    F: FnMut(Syntax<R, &T::Leaf>) -> Result<R, E>,
{
    let shape = term
        .unwrap()
        .try_map(|child| cata_with(child, &mut *transform))?;
    transform(shape)
}

fn para_with<T, R, E, F>(term: &T, transform: &mut F) -> Result<R, E>
where
    T: TermType,
    F: FnMut(Syntax<(&T, R), &T::Leaf>) -> Result<R, E>,
{
    let shape = term
        .unwrap()
        .try_map(|child| para_with(child, &mut *transform).map(|result| (child, result)))?;
    transform(shape)
}

fn equals_with<T, F>(a: &T, b: &T, leaf: &F) -> bool
where
    T: TermType,
    F: Fn(&T::Leaf, &T::Leaf) -> bool,
{
    a.unwrap()
        .equals(&b.unwrap(), |x, y| leaf(*x, *y), |x, y| equals_with(*x, *y, leaf))
}
