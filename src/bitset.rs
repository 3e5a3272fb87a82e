//! Vertical representation of the dataset: one bitmap per item id, holding
//! the indices of the transactions that contain the item.

use crate::bitmap::TidBitmap;
use crate::types::{ItemId, Support, TransactionBag, TransactionId};

/// A bitmap paired with its cached cardinality, so support counts are never
/// recomputed. `card` is fixed at construction; a new `Bitset` is built
/// rather than ever re-pointing an old one.
#[derive(Debug)]
pub struct Bitset<B> {
    bitmap: B,
    card: Support,
}

impl<B: TidBitmap> Bitset<B> {
    pub fn new(bitmap: B, card: Support) -> Self {
        Self { bitmap, card }
    }

    pub fn bitmap(&self) -> &B {
        &self.bitmap
    }

    pub fn card(&self) -> Support {
        self.card
    }

    fn push(&mut self, tid: TransactionId) {
        self.bitmap.add(tid);
        self.card += 1;
    }
}

/// One `Bitset` per item id in `[0, item_max]`. Entries are handed over to
/// the item tree one by one; a taken or discarded slot stays `None`.
#[derive(Debug)]
pub struct BitsetBag<B> {
    bitsets: Vec<Option<Bitset<B>>>,
}

impl<B: TidBitmap> BitsetBag<B> {
    /// Builds the vertical representation: for every transaction index `t`
    /// and item `x` in that transaction, inserts `t` into the bitmap of `x`.
    /// Transactions are already deduplicated sets, so the cached counts come
    /// out equal to the true cardinalities.
    pub fn build(bag: &TransactionBag) -> Self {
        let mut bitsets: Vec<Bitset<B>> = (0..=bag.item_max())
            .map(|_| Bitset::new(B::create(), 0))
            .collect();

        for (tid, transaction) in bag.transactions().iter().enumerate() {
            for &item in transaction {
                bitsets[item as usize].push(tid as TransactionId);
            }
        }

        Self {
            bitsets: bitsets.into_iter().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bitsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bitsets.is_empty()
    }

    pub fn card(&self, item: ItemId) -> Option<Support> {
        self.bitsets[item as usize].as_ref().map(Bitset::card)
    }

    /// Moves the bitset for `item` out of the bag. The slot stays empty;
    /// dropping the returned bitset releases its bitmap.
    pub fn take(&mut self, item: ItemId) -> Option<Bitset<B>> {
        self.bitsets[item as usize].take()
    }
}
