//! The bitmap capability the mining core is written against.
//!
//! A bitmap is a mutable set of transaction ids supporting insertion,
//! intersection into a fresh bitmap, and a cardinality query. The encoding
//! is the backend's business; release happens through `Drop`.

use bitvec::vec::BitVec;
use roaring::RoaringBitmap;

use crate::types::{Support, TransactionId};

pub trait TidBitmap: Sized {
    fn create() -> Self;

    /// Inserts a transaction id. Re-adding an id is harmless.
    fn add(&mut self, tid: TransactionId);

    /// Returns a new bitmap holding the ids present in both operands.
    /// Neither operand is mutated.
    fn and(&self, other: &Self) -> Self;

    fn cardinality(&self) -> Support;
}

impl TidBitmap for RoaringBitmap {
    fn create() -> Self {
        RoaringBitmap::new()
    }

    fn add(&mut self, tid: TransactionId) {
        self.insert(tid);
    }

    fn and(&self, other: &Self) -> Self {
        self & other
    }

    fn cardinality(&self) -> Support {
        self.len()
    }
}

impl TidBitmap for BitVec {
    fn create() -> Self {
        BitVec::new()
    }

    fn add(&mut self, tid: TransactionId) {
        let tid = tid as usize;
        if tid >= self.len() {
            self.resize(tid + 1, false);
        }
        self.set(tid, true);
    }

    fn and(&self, other: &Self) -> Self {
        let len = self.len().min(other.len());
        let mut out = BitVec::repeat(false, len);
        for tid in self.iter_ones() {
            if tid < len && other[tid] {
                out.set(tid, true);
            }
        }
        out
    }

    fn cardinality(&self) -> Support {
        self.count_ones() as Support
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_and_count<B: TidBitmap>() {
        let mut bitmap = B::create();
        assert_eq!(bitmap.cardinality(), 0);

        bitmap.add(0);
        bitmap.add(17);
        bitmap.add(17);
        bitmap.add(4000);

        assert_eq!(bitmap.cardinality(), 3);
    }

    fn intersect_leaves_operands_alone<B: TidBitmap>() {
        let mut a = B::create();
        let mut b = B::create();
        for tid in [1, 2, 5, 9] {
            a.add(tid);
        }
        for tid in [2, 5, 100] {
            b.add(tid);
        }

        let inter = a.and(&b);

        assert_eq!(inter.cardinality(), 2);
        assert_eq!(a.cardinality(), 4);
        assert_eq!(b.cardinality(), 3);
    }

    fn intersect_disjoint_is_empty<B: TidBitmap>() {
        let mut a = B::create();
        let mut b = B::create();
        a.add(3);
        b.add(4);

        assert_eq!(a.and(&b).cardinality(), 0);
        assert_eq!(a.and(&B::create()).cardinality(), 0);
    }

    #[test]
    fn roaring_backend() {
        add_and_count::<RoaringBitmap>();
        intersect_leaves_operands_alone::<RoaringBitmap>();
        intersect_disjoint_is_empty::<RoaringBitmap>();
    }

    #[test]
    fn bitvec_backend() {
        add_and_count::<BitVec>();
        intersect_leaves_operands_alone::<BitVec>();
        intersect_disjoint_is_empty::<BitVec>();
    }

    #[test]
    fn backends_agree_on_intersection() {
        let tids_a = [0u32, 7, 31, 32, 33, 64, 1000];
        let tids_b = [7u32, 33, 64, 65, 999];

        let mut ra = RoaringBitmap::create();
        let mut rb = RoaringBitmap::create();
        let mut va = <BitVec as TidBitmap>::create();
        let mut vb = <BitVec as TidBitmap>::create();
        for &tid in &tids_a {
            ra.add(tid);
            va.add(tid);
        }
        for &tid in &tids_b {
            rb.add(tid);
            vb.add(tid);
        }

        assert_eq!(
            TidBitmap::and(&ra, &rb).cardinality(),
            TidBitmap::and(&va, &vb).cardinality()
        );
    }
}
