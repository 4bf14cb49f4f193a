//! Fixed-capacity, insertion-ordered result log

use core::fmt::Write;

use heapless::{String, Vec};

use super::result::MeasurementResult;

/// Default number of results kept
pub const HISTORY_CAPACITY: usize = 100;

/// One formatted history line, `II|SSS,mmm uuu|LABEL`
pub type HistoryRow = String<32>;

/// Bounded history of measurement results
///
/// Index 0 is the oldest entry. `0 <= len() <= N` always holds.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog<const N: usize = HISTORY_CAPACITY> {
    entries: Vec<MeasurementResult, N>,
}

impl<const N: usize> HistoryLog<N> {
    /// Create an empty log
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append a result, evicting the oldest entry when full
    pub fn append(&mut self, result: MeasurementResult) {
        if N == 0 {
            return;
        }
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        // Room was made above
        let _ = self.entries.push(result);
    }

    /// Remove the entry at `index`, shifting later entries down
    ///
    /// Returns `None` (and changes nothing) when the log is empty or the
    /// index is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<MeasurementResult> {
        if index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index))
    }

    /// Entry at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`, like slice indexing.
    pub fn get(&self, index: usize) -> &MeasurementResult {
        &self.entries[index]
    }

    /// Entry at `index`, or `None` if out of range
    pub fn try_get(&self, index: usize) -> Option<&MeasurementResult> {
        self.entries.get(index)
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&MeasurementResult> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &MeasurementResult> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// History line for the entry at `index`, numbered by its index
    pub fn row(&self, index: usize) -> Option<HistoryRow> {
        let result = self.entries.get(index)?;
        let mut row = HistoryRow::new();
        // Widest case is 2 + 1 + 15 + 1 + 8 bytes
        let _ = write!(row, "{:02}|{}|{}", index, result.elapsed(), result.label());
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::ResultLabel;
    use proptest::prelude::*;

    fn result(elapsed_us: u64) -> MeasurementResult {
        let mut label = ResultLabel::new();
        label.push_str("Solid").unwrap();
        MeasurementResult::new(label, elapsed_us)
    }

    fn elapsed(log: &HistoryLog<4>) -> std::vec::Vec<u64> {
        log.iter().map(|r| r.elapsed_us()).collect()
    }

    #[test]
    fn test_append_until_full() {
        let mut log: HistoryLog<4> = HistoryLog::new();
        assert!(log.is_empty());

        for i in 0..4 {
            log.append(result(i));
        }
        assert!(log.is_full());
        assert_eq!(elapsed(&log), [0, 1, 2, 3]);
    }

    #[test]
    fn test_append_evicts_oldest() {
        let mut log: HistoryLog<4> = HistoryLog::new();
        for i in 0..6 {
            log.append(result(i));
        }
        assert_eq!(log.len(), 4);
        assert_eq!(elapsed(&log), [2, 3, 4, 5]);
    }

    #[test]
    fn test_default_capacity_eviction() {
        let mut log: HistoryLog = HistoryLog::new();
        assert_eq!(log.capacity(), HISTORY_CAPACITY);

        for i in 0..100 {
            log.append(result(i));
        }
        log.append(result(100));

        assert_eq!(log.len(), 100);
        assert_eq!(log.get(0).elapsed_us(), 1);
        assert_eq!(log.get(98).elapsed_us(), 99);
        assert_eq!(log.get(99).elapsed_us(), 100);
    }

    #[test]
    fn test_remove_at_shifts() {
        let mut log: HistoryLog<4> = HistoryLog::new();
        for i in 0..4 {
            log.append(result(i));
        }

        let removed = log.remove_at(1).unwrap();
        assert_eq!(removed.elapsed_us(), 1);
        assert_eq!(elapsed(&log), [0, 2, 3]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut log: HistoryLog<4> = HistoryLog::new();
        assert!(log.remove_at(0).is_none());

        log.append(result(7));
        assert!(log.remove_at(1).is_none());
        assert_eq!(log.len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range_panics() {
        let log: HistoryLog<4> = HistoryLog::new();
        let _ = log.get(0);
    }

    #[test]
    fn test_row_format() {
        let mut log: HistoryLog<4> = HistoryLog::new();
        log.append(result(2_500_000));

        assert_eq!(log.row(0).unwrap().as_str(), "00|002,500 000|Solid");
        assert!(log.row(1).is_none());
    }

    #[test]
    fn test_row_numbers_full_log() {
        let mut log: HistoryLog = HistoryLog::new();
        for i in 0..HISTORY_CAPACITY as u64 {
            log.append(result(i));
        }

        assert_eq!(log.row(0).unwrap().as_str(), "00|000,000 000|Solid");
        assert_eq!(log.row(98).unwrap().as_str(), "98|000,000 098|Solid");
        assert_eq!(log.row(99).unwrap().as_str(), "99|000,000 099|Solid");
    }

    #[test]
    fn test_clear() {
        let mut log: HistoryLog<4> = HistoryLog::new();
        log.append(result(1));
        log.clear();
        assert!(log.is_empty());
        assert!(log.latest().is_none());
    }

    proptest! {
        #[test]
        fn append_keeps_most_recent(extra in 0usize..20) {
            let mut log: HistoryLog<8> = HistoryLog::new();
            let total = 8 + extra;
            for i in 0..total {
                log.append(result(i as u64));
            }

            prop_assert_eq!(log.len(), 8);
            let expected: std::vec::Vec<u64> = ((total - 8)..total).map(|i| i as u64).collect();
            let actual: std::vec::Vec<u64> = log.iter().map(|r| r.elapsed_us()).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn remove_twice_removes_distinct(size in 2usize..=8, seed in any::<u64>()) {
            let mut log: HistoryLog<8> = HistoryLog::new();
            for i in 0..size {
                log.append(result(i as u64));
            }

            let first = (seed as usize) % size;
            let a = log.remove_at(first).unwrap();
            let second = (seed as usize / 7) % (size - 1);
            let b = log.remove_at(second).unwrap();

            prop_assert_ne!(a.elapsed_us(), b.elapsed_us());
            prop_assert_eq!(log.len(), size - 2);

            let rest: std::vec::Vec<u64> = log.iter().map(|r| r.elapsed_us()).collect();
            let mut sorted = rest.clone();
            sorted.sort_unstable();
            prop_assert_eq!(rest, sorted);
        }
    }
}
