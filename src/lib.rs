//! Frequent itemset mining with the ECLAT algorithm.
//!
//! The dataset is turned into a vertical representation (one transaction-id
//! bitmap per item), frequent single items become the roots of an itemset
//! prefix tree, and the depth-first search grows the tree by intersecting
//! bitmaps and pruning on cardinality. The bitmap encoding is pluggable
//! through [`bitmap::TidBitmap`]; `roaring` and a plain `bitvec` bit-array
//! backend are provided.
//!
//! ```
//! use eclat::bitset::BitsetBag;
//! use eclat::eclat::mine;
//! use eclat::itemtree::ItemTree;
//! use eclat::types::TransactionBag;
//! use roaring::RoaringBitmap;
//!
//! let bag = TransactionBag::new(vec![vec![1, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3]]);
//! let bitsets = BitsetBag::<RoaringBitmap>::build(&bag);
//! let mut tree = ItemTree::build_roots(bitsets, 2);
//! mine(&mut tree, 2);
//! assert_eq!(tree.count(), 6);
//! ```

pub mod bitmap;
pub mod bitset;
pub mod eclat;
pub mod error;
pub mod itemtree;
pub mod loader;
pub mod stats;
pub mod types;

pub use bitmap::TidBitmap;
pub use error::{EclatError, Result};
pub use itemtree::ItemTree;
pub use types::{ItemId, Support, TransactionBag, TransactionId};
