//! Hyterm: a representation-agnostic tree algebra for structural diffing.
//!
//! The crate separates *how* a tree is traversed from *what* the tree is. Any recursive type
//! that can show one level of itself as a [`Syntax`](syntax::Syntax) implements
//! [`TermType`](term::TermType), and in exchange gets:
//! - bottom-up folds: catamorphism ([`cata`](term::TermType::cata)) and paramorphism
//!   ([`para`](term::TermType::para)), with fallible variants that fail fast;
//! - the additive cost metric ([`size`](term::TermType::size)) used to weigh patches;
//! - structural equality parameterized by a leaf comparison
//!   ([`equals`](term::TermType::equals)).
//!
//! Shapes
//!  - `Leaf`: a payload, no children.
//!  - `Indexed` / `Fixed`: ordered children; the two are distinct shapes and never compare equal.
//!  - `Keyed`: uniquely named children, compared irrespective of order.
//!
//! Stack depth
//!  - The trait methods recurse natively. [`walker`] provides the same schemes on explicit
//!    worklists; `size`, `PartialEq` and rendering use those.
//!
//! Example
//! ```
//! use hyterm::prelude::*;
//!
//! let keyed = Term::keyed([("a", Term::leaf("x")), ("b", Term::leaf("y"))]);
//! let t = Term::indexed([keyed, Term::leaf("z")]);
//! assert_eq!(t.size(), 3);
//!
//! let fixed = Term::fixed([Term::leaf("x"), Term::leaf("y")]);
//! let indexed = Term::indexed([Term::leaf("x"), Term::leaf("y")]);
//! assert_eq!(fixed.size(), indexed.size());
//! assert!(!fixed.equals(&indexed, |a, b| a == b));
//! ```

/// One level of a tree: the four node shapes and their map.
pub mod syntax;
/// The term capability, recursion schemes and concrete term types.
pub mod term;
/// Explicit-stack traversals for deep trees.
pub mod walker;
/// Width-aware, colored rendering of terms.
pub mod pretty;
/// Interchange values and prisms across the host boundary.
pub mod value;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - `Syntax` and `SyntaxKind`
    //! - `TermType` with its provided schemes
    //! - Concrete terms `Term` and `Annotated`
    //! - Pretty-printing via `PrettyTerm`
    pub use crate::pretty::PrettyTerm;
    pub use crate::syntax::{Key, Syntax, SyntaxKind};
    pub use crate::term::TermType;
    pub use crate::term::defs::{Annotated, Term};
}
