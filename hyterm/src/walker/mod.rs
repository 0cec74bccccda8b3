//! Iterative, stack-safe versions of the recursion schemes.
//!
//! The provided methods of [`TermType`] recurse natively, one call frame per tree level, which
//! is the clearest formulation but can overflow the call stack on degenerate inputs (long
//! right-leaning lists, machine-generated syntax). The functions here compute exactly the same
//! results with explicit worklists:
//! - [`fold`] / [`try_fold`]: catamorphism.
//! - [`para`] / [`try_para`]: paramorphism.
//! - [`size`]: the additive cost metric.
//! - [`equals`]: structural equality.
//!
//! Children are processed in canonical order (sequence order, or ascending key order for keyed
//! nodes), so closures with side effects observe the same sequence of calls as with the
//! recursive versions.
//!
//! Example: a very deep tree
//! ```
//! use hyterm::prelude::*;
//! use hyterm::walker;
//!
//! let mut t = Term::leaf(0u32);
//! for i in 1..100_000u32 {
//!     t = Term::fixed([t, Term::leaf(i)]);
//! }
//! assert_eq!(walker::size(&t), 100_000);
//! let total = walker::fold(&t, |shape| match shape {
//!     Syntax::Leaf(v) => u64::from(*v),
//!     other => other.children().sum(),
//! });
//! assert_eq!(total, (0..100_000u64).sum::<u64>());
//! ```
mod internal;

use std::convert::Infallible;

use smallvec::SmallVec;

use crate::syntax::Syntax;
use crate::term::TermType;
use internal::{drive, fill};

/// Iterative [`TermType::cata`].
#[inline]
pub fn fold<T, R, F>(term: &T, mut transform: F) -> R
where
    T: TermType,
    F: FnMut(Syntax<R, &T::Leaf>) -> R,
{
    match try_fold(term, |shape| Ok::<_, Infallible>(transform(shape))) {
        Ok(result) => result,
        Err(never) => match never {},
    }
}

/// Iterative [`TermType::try_cata`].
pub fn try_fold<T, R, E, F>(term: &T, mut transform: F) -> Result<R, E>
where
    T: TermType,
    F: FnMut(Syntax<R, &T::Leaf>) -> Result<R, E>,
{
    drive(term, |shape, results| {
        transform(fill(shape, results).map(|(_, result)| result))
    })
}

/// Iterative [`TermType::para`].
#[inline]
pub fn para<T, R, F>(term: &T, mut transform: F) -> R
where
    T: TermType,
    F: FnMut(Syntax<(&T, R), &T::Leaf>) -> R,
{
    match try_para(term, |shape| Ok::<_, Infallible>(transform(shape))) {
        Ok(result) => result,
        Err(never) => match never {},
    }
}

/// Iterative [`TermType::try_para`].
pub fn try_para<T, R, E, F>(term: &T, mut transform: F) -> Result<R, E>
where
    T: TermType,
    F: FnMut(Syntax<(&T, R), &T::Leaf>) -> Result<R, E>,
{
    drive(term, |shape, results| transform(fill(shape, results)))
}

/// Additive cost of `term`.
///
/// - leaf: 1
/// - indexed / fixed: sum over the children
/// - keyed: sum over the values, names are free
///
/// A branch without children counts as 1 where a plain sum over its children would give 0, so
/// every term has a size of at least one. Additivity over children therefore holds only for
/// branches that have children.
pub fn size<T: TermType>(term: &T) -> usize {
    fold(term, |shape| {
        let total: usize = match shape {
            Syntax::Leaf(_) => 1,
            Syntax::Indexed(children) | Syntax::Fixed(children) => children.into_iter().sum(),
            Syntax::Keyed(children) => children.into_values().sum(),
        };
        total.max(1)
    })
}

/// Iterative structural equality, leaves compared with `leaf`.
///
/// Pairs of subterms are checked one level at a time and the search stops at the first
/// mismatch, so unequal trees are usually rejected without visiting them entirely.
pub fn equals<T, F>(a: &T, b: &T, mut leaf: F) -> bool
where
    T: TermType,
    F: FnMut(&T::Leaf, &T::Leaf) -> bool,
{
    let mut pending: SmallVec<(&T, &T), 32> = SmallVec::new();
    pending.push((a, b));

    while let Some((x, y)) = pending.pop() {
        let (x, y) = (x.unwrap(), y.unwrap());
        let matches = x.equals(
            &y,
            |p, q| leaf(*p, *q),
            |p, q| {
                pending.push((*p, *q));
                true
            },
        );
        if !matches {
            return false;
        }
    }
    true
}
