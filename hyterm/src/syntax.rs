//! One level of a tree.
//!
//! [`Syntax`] describes the shape of a single node: either a leaf payload or one of three ways
//! of holding children. It is generic over the child type `C` so that the same shape can carry
//! unexpanded subterms (`Syntax<&T, &L>`), already-folded results (`Syntax<R, &L>`) or pairs of
//! both (`Syntax<(&T, R), &L>`). Every recursion scheme in this crate is built on [`Syntax::map`].
//!
//! Example
//! ```
//! use hyterm::syntax::{Syntax, SyntaxKind};
//!
//! let shape: Syntax<u32, &str> = Syntax::Fixed(vec![1, 2]);
//! let doubled = shape.map(|c| c * 2);
//! assert_eq!(doubled, Syntax::Fixed(vec![2, 4]));
//! assert_eq!(doubled.kind(), SyntaxKind::Fixed);
//! ```
use std::collections::BTreeMap;
use std::sync::Arc;

use either::Either;
use strum::{EnumDiscriminants, EnumIs};

/// Name of a child in a [`Syntax::Keyed`] node.
///
/// Keys are shared so that borrowed views of a node can be produced without copying strings.
pub type Key = Arc<str>;

/// The shape of one node, with children of type `C` and a leaf payload of type `L`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, EnumDiscriminants)]
#[strum_discriminants(derive(PartialOrd, Ord, Hash))]
#[strum_discriminants(name(SyntaxKind))]
#[strum_discriminants(vis(pub))]
#[cfg_attr(
    feature = "serde",
    strum_discriminants(derive(serde::Serialize, serde::Deserialize))
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Syntax<C, L> {
    /// Terminal payload, no children.
    Leaf(L),
    /// Ordered children of arbitrary length.
    Indexed(Vec<C>),
    /// Ordered children whose arity is fixed by the kind of node.
    Fixed(Vec<C>),
    /// Named children. Names are unique and their order carries no meaning.
    Keyed(BTreeMap<Key, C>),
}

impl<C, L> Syntax<C, L> {
    /// Variant tag of this shape.
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        SyntaxKind::from(self)
    }

    /// Transform every child with `f`, keeping the variant, the order, the keys and the leaf.
    pub fn map<D>(self, mut f: impl FnMut(C) -> D) -> Syntax<D, L> {
        match self {
            Syntax::Leaf(leaf) => Syntax::Leaf(leaf),
            Syntax::Indexed(children) => Syntax::Indexed(children.into_iter().map(f).collect()),
            Syntax::Fixed(children) => Syntax::Fixed(children.into_iter().map(f).collect()),
            Syntax::Keyed(children) => {
                Syntax::Keyed(children.into_iter().map(|(k, c)| (k, f(c))).collect())
            }
        }
    }

    /// Fallible [`map`](Self::map). Children are visited in canonical order and the first error
    /// is returned as-is; `f` is not called again after it fails.
    pub fn try_map<D, E>(self, mut f: impl FnMut(C) -> Result<D, E>) -> Result<Syntax<D, L>, E> {
        Ok(match self {
            Syntax::Leaf(leaf) => Syntax::Leaf(leaf),
            Syntax::Indexed(children) => {
                Syntax::Indexed(children.into_iter().map(f).collect::<Result<_, E>>()?)
            }
            Syntax::Fixed(children) => {
                Syntax::Fixed(children.into_iter().map(f).collect::<Result<_, E>>()?)
            }
            Syntax::Keyed(children) => Syntax::Keyed(
                children
                    .into_iter()
                    .map(|(k, c)| f(c).map(|d| (k, d)))
                    .collect::<Result<_, E>>()?,
            ),
        })
    }

    /// Transform the leaf payload, if any. Children are moved unchanged.
    pub fn map_leaf<M>(self, f: impl FnOnce(L) -> M) -> Syntax<C, M> {
        match self {
            Syntax::Leaf(leaf) => Syntax::Leaf(f(leaf)),
            Syntax::Indexed(children) => Syntax::Indexed(children),
            Syntax::Fixed(children) => Syntax::Fixed(children),
            Syntax::Keyed(children) => Syntax::Keyed(children),
        }
    }

    /// Borrow this shape. Keys are shared, not copied.
    pub fn as_ref(&self) -> Syntax<&C, &L> {
        match self {
            Syntax::Leaf(leaf) => Syntax::Leaf(leaf),
            Syntax::Indexed(children) => Syntax::Indexed(children.iter().collect()),
            Syntax::Fixed(children) => Syntax::Fixed(children.iter().collect()),
            Syntax::Keyed(children) => {
                Syntax::Keyed(children.iter().map(|(k, c)| (k.clone(), c)).collect())
            }
        }
    }

    /// The leaf payload, if this is a leaf.
    #[inline]
    pub fn leaf(&self) -> Option<&L> {
        match self {
            Syntax::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Children in canonical order: sequence order for `Indexed`/`Fixed`, ascending key order
    /// for `Keyed`. This is the order in which [`map`](Self::map) calls its closure.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &C> + ExactSizeIterator {
        match self {
            Syntax::Leaf(_) => Either::Left(Either::Left(std::iter::empty())),
            Syntax::Indexed(children) | Syntax::Fixed(children) => {
                Either::Left(Either::Right(children.iter()))
            }
            Syntax::Keyed(children) => Either::Right(children.values()),
        }
    }

    /// Number of children (zero for a leaf).
    #[inline]
    pub fn child_count(&self) -> usize {
        match self {
            Syntax::Leaf(_) => 0,
            Syntax::Indexed(children) | Syntax::Fixed(children) => children.len(),
            Syntax::Keyed(children) => children.len(),
        }
    }

    /// One-level structural equality.
    ///
    /// Leaves are compared with `leaf`, children with `recur`. Two shapes can only be equal if
    /// they are the same variant: an `Indexed` node never equals a `Fixed` node, even with the
    /// same children. Sequences must have the same length and match pairwise in order; keyed
    /// nodes must have the same set of names and match name by name.
    pub fn equals(
        &self,
        other: &Self,
        mut leaf: impl FnMut(&L, &L) -> bool,
        mut recur: impl FnMut(&C, &C) -> bool,
    ) -> bool {
        match (self, other) {
            (Syntax::Leaf(a), Syntax::Leaf(b)) => leaf(a, b),
            (Syntax::Indexed(a), Syntax::Indexed(b)) | (Syntax::Fixed(a), Syntax::Fixed(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| recur(x, y))
            }
            (Syntax::Keyed(a), Syntax::Keyed(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(k, x)| b.get(k).is_some_and(|y| recur(x, y)))
            }
            _ => false,
        }
    }
}
