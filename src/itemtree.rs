//! The itemset prefix tree.
//!
//! Every node stands for one frequent itemset: the items on the path from
//! its root ancestor down to itself, ascending by item id. `right` links
//! siblings (alternative extensions of the same parent prefix), `down`
//! points at the first extension of this prefix, `up` is a non-owning
//! back-reference. Nodes live in an arena and are addressed by index, so
//! teardown is a single `Vec` drop and no bitmap is ever freed twice.

use std::io::{self, Write};

use crate::bitmap::TidBitmap;
use crate::bitset::{Bitset, BitsetBag};
use crate::types::{ItemId, Itemset, Support};

pub type NodeId = usize;

#[derive(Debug)]
pub struct ItemNode<B> {
    item: ItemId,
    bitset: Bitset<B>,
    right: Option<NodeId>,
    down: Option<NodeId>,
    up: Option<NodeId>,
}

impl<B: TidBitmap> ItemNode<B> {
    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn bitset(&self) -> &Bitset<B> {
        &self.bitset
    }

    pub fn support(&self) -> Support {
        self.bitset.card()
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn down(&self) -> Option<NodeId> {
        self.down
    }

    pub fn up(&self) -> Option<NodeId> {
        self.up
    }

    /// A node with no frequent extension is a maximal frequent itemset.
    pub fn is_maximal(&self) -> bool {
        self.down.is_none()
    }
}

#[derive(Debug)]
pub struct ItemTree<B> {
    nodes: Vec<ItemNode<B>>,
    first_root: Option<NodeId>,
}

impl<B: TidBitmap> ItemTree<B> {
    /// Builds the root level from the bitset bag: every item whose support
    /// meets `min_support` becomes a root node owning its bitset, in
    /// ascending item order. Bitsets that fail the threshold are dropped
    /// here and never looked at again.
    pub fn build_roots(mut bag: BitsetBag<B>, min_support: Support) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            first_root: None,
        };
        let mut tail: Option<NodeId> = None;

        for item in 0..bag.len() as ItemId {
            if let Some(bitset) = bag.take(item) {
                if bitset.card() < min_support {
                    continue;
                }
                let id = tree.nodes.len();
                tree.nodes.push(ItemNode {
                    item,
                    bitset,
                    right: None,
                    down: None,
                    up: None,
                });
                match tail {
                    Some(prev) => tree.nodes[prev].right = Some(id),
                    None => tree.first_root = Some(id),
                }
                tail = Some(id);
            }
        }

        tree
    }

    pub fn first_root(&self) -> Option<NodeId> {
        self.first_root
    }

    pub fn node(&self, id: NodeId) -> &ItemNode<B> {
        &self.nodes[id]
    }

    /// Creates a child of `parent` and splices it into the child list at
    /// its ascending-item position. The search always appends in ascending
    /// order, so in practice the new node lands at the tail.
    pub(crate) fn add_child(&mut self, parent: NodeId, item: ItemId, bitset: Bitset<B>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(ItemNode {
            item,
            bitset,
            right: None,
            down: None,
            up: Some(parent),
        });

        match self.nodes[parent].down {
            None => self.nodes[parent].down = Some(id),
            Some(first) if item < self.nodes[first].item => {
                self.nodes[id].right = Some(first);
                self.nodes[parent].down = Some(id);
            }
            Some(first) => {
                let mut left = first;
                while let Some(next) = self.nodes[left].right {
                    if self.nodes[next].item >= item {
                        break;
                    }
                    left = next;
                }
                self.nodes[id].right = self.nodes[left].right;
                self.nodes[left].right = Some(id);
            }
        }

        id
    }

    /// Number of frequent itemsets in the tree.
    pub fn count(&self) -> usize {
        self.count_from(self.first_root)
    }

    fn count_from(&self, mut node: Option<NodeId>) -> usize {
        let mut n = 0;
        while let Some(id) = node {
            n += 1 + self.count_from(self.nodes[id].down);
            node = self.nodes[id].right;
        }
        n
    }

    /// Number of maximal frequent itemsets (nodes with no children).
    pub fn count_maximal(&self) -> usize {
        self.count_maximal_from(self.first_root)
    }

    fn count_maximal_from(&self, mut node: Option<NodeId>) -> usize {
        let mut n = 0;
        while let Some(id) = node {
            n += match self.nodes[id].down {
                Some(down) => self.count_maximal_from(Some(down)),
                None => 1,
            };
            node = self.nodes[id].right;
        }
        n
    }

    /// Sum of itemset lengths over all nodes; 0 for an empty tree.
    pub fn len_sum(&self) -> u64 {
        self.len_sum_from(self.first_root, 1)
    }

    fn len_sum_from(&self, mut node: Option<NodeId>, level: u64) -> u64 {
        let mut n = 0;
        while let Some(id) = node {
            n += self.len_sum_from(self.nodes[id].down, level + 1) + level;
            node = self.nodes[id].right;
        }
        n
    }

    /// Sum of itemset lengths over maximal nodes only, each counted at its
    /// own depth; 0 for an empty tree.
    pub fn maximal_len_sum(&self) -> u64 {
        self.maximal_len_sum_from(self.first_root, 1)
    }

    fn maximal_len_sum_from(&self, mut node: Option<NodeId>, level: u64) -> u64 {
        let mut n = 0;
        while let Some(id) = node {
            n += match self.nodes[id].down {
                Some(down) => self.maximal_len_sum_from(Some(down), level + 1),
                None => level,
            };
            node = self.nodes[id].right;
        }
        n
    }

    /// Prints the tree one node per line, indented by depth, as
    /// `item (support)`.
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_from(out, self.first_root, 0)
    }

    fn print_from<W: Write>(
        &self,
        out: &mut W,
        mut node: Option<NodeId>,
        level: usize,
    ) -> io::Result<()> {
        while let Some(id) = node {
            let n = &self.nodes[id];
            writeln!(out, "{:indent$}{} ({})", "", n.item, n.bitset.card(), indent = level)?;
            self.print_from(out, n.down, level + 1)?;
            node = n.right;
        }
        Ok(())
    }

    /// Materializes every frequent itemset with its support, in depth-first
    /// ascending order.
    pub fn itemsets(&self) -> Vec<(Itemset, Support)> {
        let mut out = Vec::new();
        let mut prefix = Itemset::new();
        self.collect_from(self.first_root, &mut prefix, &mut out);
        out
    }

    fn collect_from(
        &self,
        mut node: Option<NodeId>,
        prefix: &mut Itemset,
        out: &mut Vec<(Itemset, Support)>,
    ) {
        while let Some(id) = node {
            let n = &self.nodes[id];
            prefix.push(n.item);
            out.push((prefix.clone(), n.bitset.card()));
            self.collect_from(n.down, prefix, out);
            prefix.pop();
            node = n.right;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionBag;
    use roaring::RoaringBitmap;

    fn roots_for(transactions: Vec<Vec<ItemId>>, min_support: Support) -> ItemTree<RoaringBitmap> {
        let bag = TransactionBag::new(transactions);
        let bitsets = BitsetBag::build(&bag);
        ItemTree::build_roots(bitsets, min_support)
    }

    fn root_items(tree: &ItemTree<RoaringBitmap>) -> Vec<ItemId> {
        let mut items = Vec::new();
        let mut node = tree.first_root();
        while let Some(id) = node {
            items.push(tree.node(id).item());
            node = tree.node(id).right();
        }
        items
    }

    #[test]
    fn roots_are_frequent_items_ascending() {
        let tree = roots_for(
            vec![vec![1, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3], vec![4]],
            2,
        );

        assert_eq!(root_items(&tree), vec![1, 2, 3]);
        let mut node = tree.first_root();
        while let Some(id) = node {
            assert_eq!(tree.node(id).support(), 3);
            assert!(tree.node(id).up().is_none());
            assert!(tree.node(id).is_maximal());
            node = tree.node(id).right();
        }
    }

    #[test]
    fn threshold_above_transaction_count_gives_empty_tree() {
        let tree = roots_for(vec![vec![1, 2], vec![2, 3]], 5);

        assert!(tree.first_root().is_none());
        assert_eq!(tree.count(), 0);
        assert_eq!(tree.count_maximal(), 0);
        assert_eq!(tree.len_sum(), 0);
        assert_eq!(tree.maximal_len_sum(), 0);
    }

    #[test]
    fn zero_min_support_admits_zero_support_items() {
        let tree = roots_for(vec![vec![2]], 0);

        // items 0 and 1 have empty bitmaps but still qualify at threshold 0
        assert_eq!(root_items(&tree), vec![0, 1, 2]);
    }

    #[test]
    fn single_item_transaction() {
        let tree = roots_for(vec![vec![5]], 1);

        assert_eq!(root_items(&tree), vec![5]);
        assert_eq!(tree.count(), 1);
        assert_eq!(tree.count_maximal(), 1);
        assert_eq!(tree.len_sum(), 1);
        assert_eq!(tree.maximal_len_sum(), 1);
    }

    #[test]
    fn add_child_keeps_ascending_order() {
        let mut tree = roots_for(vec![vec![0, 1, 2, 3], vec![0, 1, 2, 3]], 2);
        let root = tree.first_root().unwrap();

        let mk = |card| Bitset::new(RoaringBitmap::new(), card);
        tree.add_child(root, 3, mk(2));
        tree.add_child(root, 1, mk(2));
        tree.add_child(root, 2, mk(2));

        let mut items = Vec::new();
        let mut node = tree.node(root).down();
        while let Some(id) = node {
            assert_eq!(tree.node(id).up(), Some(root));
            items.push(tree.node(id).item());
            node = tree.node(id).right();
        }
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn print_indents_by_depth() {
        let mut tree = roots_for(vec![vec![1, 2], vec![1, 2]], 2);
        let root = tree.first_root().unwrap();
        tree.add_child(root, 2, Bitset::new(RoaringBitmap::new(), 2));

        let mut out = Vec::new();
        tree.print(&mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert_eq!(printed, "1 (2)\n 2 (2)\n2 (2)\n");
    }
}
