//! Run telemetry: scoped wall-clock timing, a process memory snapshot, and
//! summary statistics over the finished tree. All state lives in an
//! explicit recorder passed around by the caller.

use std::time::{Duration, Instant};

use crate::bitmap::TidBitmap;
use crate::itemtree::ItemTree;

pub const CSV_HEADER: &str = "time_s,memory_bytes,count,count_maximal,avg_len,avg_maximal_len";

/// Measures one build+mine run: `start` before the work, `stop` after.
#[derive(Debug, Default)]
pub struct StatRecorder {
    started: Option<Instant>,
    elapsed: Duration,
    memory_bytes: Option<u64>,
}

impl StatRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Freezes the elapsed time and takes a memory snapshot.
    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed += started.elapsed();
        }
        self.memory_bytes = process_vsize();
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn memory_bytes(&self) -> Option<u64> {
        self.memory_bytes
    }
}

/// Tree-shape statistics for reporting: itemset counts and average lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeSummary {
    pub count: usize,
    pub count_maximal: usize,
    pub avg_len: f64,
    pub avg_maximal_len: f64,
}

impl TreeSummary {
    pub fn of<B: TidBitmap>(tree: &ItemTree<B>) -> Self {
        let count = tree.count();
        let count_maximal = tree.count_maximal();
        let avg = |sum: u64, n: usize| if n == 0 { 0.0 } else { sum as f64 / n as f64 };
        Self {
            count,
            count_maximal,
            avg_len: avg(tree.len_sum(), count),
            avg_maximal_len: avg(tree.maximal_len_sum(), count_maximal),
        }
    }
}

/// One CSV row matching [`CSV_HEADER`].
pub fn csv_row(recorder: &StatRecorder, summary: &TreeSummary) -> String {
    format!(
        "{:.6},{},{},{},{:.6},{:.6}",
        recorder.elapsed_secs(),
        recorder.memory_bytes().unwrap_or(0),
        summary.count,
        summary.count_maximal,
        summary.avg_len,
        summary.avg_maximal_len,
    )
}

/// Virtual memory size of this process from `/proc/self/statm`, assuming
/// 4 KiB pages. `None` where procfs is unavailable.
#[cfg(target_os = "linux")]
fn process_vsize() -> Option<u64> {
    let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
    let pages: u64 = statm.split_whitespace().next()?.parse().ok()?;
    Some(pages * 4096)
}

#[cfg(not(target_os = "linux"))]
fn process_vsize() -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitset::BitsetBag;
    use crate::eclat::mine;
    use crate::types::TransactionBag;
    use roaring::RoaringBitmap;

    fn mined_tree() -> ItemTree<RoaringBitmap> {
        let bag = TransactionBag::new(vec![vec![1, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3]]);
        let mut tree = ItemTree::build_roots(BitsetBag::build(&bag), 2);
        mine(&mut tree, 2);
        tree
    }

    #[test]
    fn summary_of_worked_example() {
        let summary = TreeSummary::of(&mined_tree());

        assert_eq!(summary.count, 6);
        assert_eq!(summary.count_maximal, 4);
        assert!((summary.avg_len - 1.5).abs() < 1e-9);
        assert!((summary.avg_maximal_len - 1.75).abs() < 1e-9);
    }

    #[test]
    fn summary_of_empty_tree() {
        let bag = TransactionBag::new(vec![]);
        let tree = ItemTree::<RoaringBitmap>::build_roots(BitsetBag::build(&bag), 1);
        let summary = TreeSummary::of(&tree);

        assert_eq!(summary.count, 0);
        assert_eq!(summary.avg_len, 0.0);
        assert_eq!(summary.avg_maximal_len, 0.0);
    }

    #[test]
    fn recorder_accumulates_time() {
        let mut recorder = StatRecorder::new();
        recorder.start();
        recorder.stop();

        assert!(recorder.elapsed_secs() >= 0.0);
        // stop without start leaves elapsed alone
        let before = recorder.elapsed_secs();
        recorder.stop();
        assert_eq!(recorder.elapsed_secs(), before);
    }

    #[test]
    fn csv_row_has_header_arity() {
        let recorder = StatRecorder::new();
        let summary = TreeSummary::of(&mined_tree());
        let row = csv_row(&recorder, &summary);

        assert_eq!(row.split(',').count(), CSV_HEADER.split(',').count());
    }
}
