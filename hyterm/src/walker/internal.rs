//! Worklist engine shared by the public folds.
//!
//! The engine performs a post-order traversal with two explicit stacks instead of native
//! recursion: a frame stack of nodes still to expand or to rebuild, and a value stack holding
//! the results of finished subtrees. Memory is O(width * depth) frames in the worst case and
//! the native call stack stays flat whatever the depth of the input.
use smallvec::SmallVec;

use crate::syntax::Syntax;
use crate::term::TermType;

/// Frame stack entry.
///
/// - `Expand`: the node has not been unwrapped yet.
/// - `Rebuild`: the node's children are all pending or done; once they are done their results
///   sit on top of the value stack, in canonical child order.
pub(super) enum Frame<'t, T: TermType> {
    Expand(&'t T),
    Rebuild(Syntax<&'t T, &'t T::Leaf>),
}

/// Inline capacity of the frame stack before it spills to the heap.
const INLINE_FRAMES: usize = 32;

/// Drive a post-order traversal of `root`.
///
/// `rebuild` is called once per node, children before parents, with the node's shape and an
/// iterator over the results of its children in canonical order. The first error stops the
/// traversal and is returned unchanged.
pub(super) fn drive<'t, T, R, E, F>(root: &'t T, mut rebuild: F) -> Result<R, E>
where
    T: TermType,
    F: FnMut(Syntax<&'t T, &'t T::Leaf>, &mut dyn Iterator<Item = R>) -> Result<R, E>,
{
    let mut frames: SmallVec<Frame<'t, T>, INLINE_FRAMES> = SmallVec::new();
    let mut values: Vec<R> = Vec::new();
    let mut visited = 0usize;
    let mut peak = 0usize;

    frames.push(Frame::Expand(root));

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Expand(node) => {
                let shape = node.unwrap();
                // Children go on top of their parent, last child first, so the first child is
                // finished first and results land on the value stack in canonical order.
                let children: SmallVec<&'t T, 8> = shape.children().rev().copied().collect();
                frames.push(Frame::Rebuild(shape));
                frames.extend(children.into_iter().map(Frame::Expand));
                peak = peak.max(frames.len());
            }
            Frame::Rebuild(shape) => {
                let arity = shape.child_count();
                let split = values.len() - arity;
                let result = {
                    let mut results = values.drain(split..);
                    rebuild(shape, &mut results)?
                };
                values.push(result);
                visited += 1;
            }
        }
    }

    log::trace!("worklist fold visited {visited} nodes (peak frame stack {peak})");

    Ok(values
        .pop()
        .expect("worklist fold finished without a root value"))
}

/// Substitute the next `results` for the children of `shape`.
///
/// `results` must yield exactly one item per child, which [`drive`] guarantees.
pub(super) fn fill<C, L, R>(
    shape: Syntax<C, L>,
    results: &mut dyn Iterator<Item = R>,
) -> Syntax<(C, R), L> {
    shape.map(|child| {
        let result = results
            .next()
            .expect("worklist value stack out of sync with node arity");
        (child, result)
    })
}
