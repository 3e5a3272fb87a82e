//! The depth-first ECLAT search.
//!
//! Each root prefix is extended with the siblings strictly to its right:
//! intersecting the prefix bitmap with a candidate bitmap gives the support
//! of the extended itemset, and anything below the threshold is pruned
//! before it ever becomes a node. Candidates are taken left to right in
//! ascending item order and a new node recurses on `candidate.right`, so
//! every frequent itemset is generated exactly once, in canonical ascending
//! order.

use tracing::debug;

use crate::bitmap::TidBitmap;
use crate::bitset::Bitset;
use crate::itemtree::{ItemTree, NodeId};
use crate::types::Support;

/// Grows the tree in place until it holds every frequent itemset for
/// `min_support`. Only `down`/`right` links and new nodes are written;
/// existing bitsets are never touched.
pub fn mine<B: TidBitmap>(tree: &mut ItemTree<B>, min_support: Support) {
    let mut root = tree.first_root();
    while let Some(id) = root {
        let candidates = tree.node(id).right();
        extend(tree, id, candidates, min_support);
        root = tree.node(id).right();
    }
    debug!(
        itemsets = tree.count(),
        maximal = tree.count_maximal(),
        "mining finished"
    );
}

/// Tries every candidate as a one-item extension of `prefix`, attaching the
/// ones that stay frequent and recursing on them depth-first. An infrequent
/// candidate is skipped at this level only; its intersection is dropped on
/// the spot.
fn extend<B: TidBitmap>(
    tree: &mut ItemTree<B>,
    prefix: NodeId,
    mut candidates: Option<NodeId>,
    min_support: Support,
) {
    while let Some(candidate) = candidates {
        let inter = tree
            .node(prefix)
            .bitset()
            .bitmap()
            .and(tree.node(candidate).bitset().bitmap());
        let freq = inter.cardinality();

        if freq >= min_support {
            let item = tree.node(candidate).item();
            let node = tree.add_child(prefix, item, Bitset::new(inter, freq));
            // everything right of the candidate can still combine with the
            // longer prefix
            extend(tree, node, tree.node(candidate).right(), min_support);
        }

        candidates = tree.node(candidate).right();
    }
}
