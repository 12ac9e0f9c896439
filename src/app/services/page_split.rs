//! Splitting a document tree into pages at explicit page-break markers.
//!
//! Break positions are computed from the tree on every call. A marker may
//! sit at any depth: when it is nested, the container around it is split,
//! and each side gets a shallow copy of the partially covered ancestors.
//! Markers themselves never appear in a segment, and the source tree is
//! only read.

use crate::app::domain::page::PageSegment;

/// A serializable document tree supporting ordered traversal and range cloning.
pub trait DocumentTree {
    type Node: Clone;

    fn root(&self) -> Self::Node;

    /// Children of `node` in document order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn is_page_break(&self, node: &Self::Node) -> bool;

    /// Copy of `node` without its children.
    fn shallow_clone(&self, node: &Self::Node) -> Self::Node;

    /// Copy of `node` and its whole subtree, detached from the source tree.
    fn deep_clone(&self, node: &Self::Node) -> Self::Node;

    fn append_child(&self, parent: &Self::Node, child: Self::Node);

    /// Serialize a sequence of sibling nodes without detaching them.
    fn serialize(&self, nodes: &[Self::Node]) -> String;
}

/// Child-index path from the root to a marker.
type NodePath = Vec<usize>;

/// Split `tree` into page segments.
///
/// Zero markers yield one segment holding the whole document; `N` markers
/// yield `N + 1` segments. An empty document yields a single empty segment.
pub fn split<T: DocumentTree>(tree: &T) -> Vec<PageSegment> {
    let root = tree.root();
    let breaks = find_page_breaks(tree, &root);

    if breaks.is_empty() {
        let markup = tree.serialize(&tree.children(&root));
        return vec![PageSegment { index: 0, markup }];
    }

    let mut segments = Vec::with_capacity(breaks.len() + 1);
    let mut start: Option<NodePath> = None;

    for brk in &breaks {
        // End before the marker: its own path is the boundary offset.
        let nodes = clone_range(tree, &root, start.as_deref(), Some(brk));
        segments.push(PageSegment {
            index: segments.len(),
            markup: tree.serialize(&nodes),
        });
        start = Some(position_after(brk));
    }

    let nodes = clone_range(tree, &root, start.as_deref(), None);
    segments.push(PageSegment {
        index: segments.len(),
        markup: tree.serialize(&nodes),
    });

    tracing::debug!(markers = breaks.len(), pages = segments.len(), "split document");
    segments
}

/// Paths of every marker in document order. Markers are not descended into.
pub fn find_page_breaks<T: DocumentTree>(tree: &T, root: &T::Node) -> Vec<NodePath> {
    let mut out = Vec::new();
    collect_breaks(tree, root, &mut Vec::new(), &mut out);
    out
}

fn collect_breaks<T: DocumentTree>(
    tree: &T,
    node: &T::Node,
    prefix: &mut NodePath,
    out: &mut Vec<NodePath>,
) {
    for (i, child) in tree.children(node).iter().enumerate() {
        prefix.push(i);
        if tree.is_page_break(child) {
            out.push(prefix.clone());
        } else {
            collect_breaks(tree, child, prefix, out);
        }
        prefix.pop();
    }
}

fn position_after(path: &[usize]) -> NodePath {
    let mut after = path.to_vec();
    if let Some(last) = after.last_mut() {
        *last += 1;
    }
    after
}

/// Clone the content of `node` between two boundary positions.
///
/// A position is a path whose last element is a child offset inside the
/// node addressed by the preceding elements. `None` means the start (or
/// end) of `node`.
fn clone_range<T: DocumentTree>(
    tree: &T,
    node: &T::Node,
    start: Option<&[usize]>,
    end: Option<&[usize]>,
) -> Vec<T::Node> {
    let children = tree.children(node);

    let (first_full, start_partial) = match start {
        None | Some([]) => (0, None),
        Some([offset]) => (*offset, None),
        Some([index, inner @ ..]) => (index + 1, Some((*index, inner))),
    };
    let (end_full, end_partial) = match end {
        None | Some([]) => (children.len(), None),
        Some([offset]) => (*offset, None),
        Some([index, inner @ ..]) => (*index, Some((*index, inner))),
    };

    let mut out = Vec::new();

    // Both boundaries inside the same child: only that child contributes.
    if let (Some((si, s_inner)), Some((ei, e_inner))) = (start_partial, end_partial) {
        if si == ei {
            if let Some(child) = children.get(si) {
                out.push(clone_partial(tree, child, Some(s_inner), Some(e_inner)));
            }
            return out;
        }
    }

    if let Some((si, inner)) = start_partial {
        if let Some(child) = children.get(si) {
            out.push(clone_partial(tree, child, Some(inner), None));
        }
    }
    for child in children.iter().take(end_full).skip(first_full) {
        out.push(tree.deep_clone(child));
    }
    if let Some((ei, inner)) = end_partial {
        if let Some(child) = children.get(ei) {
            out.push(clone_partial(tree, child, None, Some(inner)));
        }
    }
    out
}

fn clone_partial<T: DocumentTree>(
    tree: &T,
    node: &T::Node,
    start: Option<&[usize]>,
    end: Option<&[usize]>,
) -> T::Node {
    let shell = tree.shallow_clone(node);
    for child in clone_range(tree, node, start, end) {
        tree.append_child(&shell, child);
    }
    shell
}
