//! Shared aliases for the mining pipeline.

pub type ItemId = u32;
pub type TransactionId = u32;
pub type Support = u64;

/// One transaction: a sorted, deduplicated set of item identifiers.
pub type Transaction = Vec<ItemId>;

/// A materialized itemset, ascending by item id.
pub type Itemset = Vec<ItemId>;

/// The loaded dataset: transactions plus the largest item id seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBag {
    transactions: Vec<Transaction>,
    item_max: ItemId,
}

impl TransactionBag {
    /// Builds a bag from raw transactions, normalizing each to a sorted set
    /// and computing `item_max`.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let mut item_max = 0;
        let transactions = transactions
            .into_iter()
            .map(|mut transaction| {
                transaction.sort_unstable();
                transaction.dedup();
                if let Some(&last) = transaction.last() {
                    item_max = item_max.max(last);
                }
                transaction
            })
            .collect();
        Self {
            transactions,
            item_max,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn item_max(&self) -> ItemId {
        self.item_max
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
