//! Progress tracking for table generation

use indicatif::{MultiProgress, ProgressBar, ProgressFinish, ProgressStyle};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Type of progress increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementType {
    /// Increment the number of parts/files completed
    Part,
    /// Increment the number of chunks/buffers written
    Buffer,
}

/// Tracks progress for all tables being generated
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    inner: Arc<ProgressTrackerInner>,
}

#[derive(Debug)]
struct ProgressTrackerInner {
    tables: Mutex<HashMap<&'static str, TableProgress>>,
    // MultiProgress must be kept alive to manage the registered progress bars
    _multi_progress: MultiProgress,
}

#[derive(Debug)]
struct TableProgress {
    parts_completed: AtomicUsize,
    buffers_written: AtomicUsize,
    progress_bar: ProgressBar,
}

impl ProgressTracker {
    /// Create a new progress tracker for the given tables and part counts
    pub fn new(tables: Vec<(&'static str, usize)>) -> Self {
        let multi_progress = MultiProgress::new();
        let mut table_map = HashMap::new();

        for (table, total_parts) in tables {
            let mut pb = multi_progress.add(ProgressBar::new(total_parts as u64));
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg:22} [{bar:28}] Parts:{pos:>4}/{len:<4} Buffers:{prefix:>6} {percent:>3}%")
                    .unwrap()
                    .progress_chars("█▓░")
            );
            pb.set_message(table);
            pb.set_prefix("0");
            pb = pb.with_finish(ProgressFinish::AndLeave);

            table_map.insert(
                table,
                TableProgress {
                    parts_completed: AtomicUsize::new(0),
                    buffers_written: AtomicUsize::new(0),
                    progress_bar: pb,
                },
            );
        }

        Self {
            inner: Arc::new(ProgressTrackerInner {
                tables: Mutex::new(table_map),
                _multi_progress: multi_progress,
            }),
        }
    }

    pub fn increment(&self, table: &str, increment_type: IncrementType) {
        let tables = self.inner.tables.lock().unwrap();
        if let Some(progress) = tables.get(table) {
            match increment_type {
                IncrementType::Part => {
                    let new_val = progress.parts_completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress.progress_bar.set_position(new_val as u64);
                }
                IncrementType::Buffer => {
                    let new_val = progress.buffers_written.fetch_add(1, Ordering::SeqCst) + 1;
                    progress.progress_bar.set_prefix(format!("{}", new_val));
                }
            }
        }
    }

    pub fn finish(&self, table: &str) {
        let tables = self.inner.tables.lock().unwrap();
        if let Some(progress) = tables.get(table) {
            progress.progress_bar.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_tracker_creation() {
        let tracker = ProgressTracker::new(vec![("lineitem", 10), ("orders", 5)]);

        tracker.increment("lineitem", IncrementType::Part);
        tracker.increment("orders", IncrementType::Buffer);
    }

    #[test]
    fn test_progress_tracker_increment() {
        let tracker = ProgressTracker::new(vec![("customer", 4)]);

        for _ in 0..3 {
            tracker.increment("customer", IncrementType::Part);
        }
        for _ in 0..10 {
            tracker.increment("customer", IncrementType::Buffer);
        }

        let tables = tracker.inner.tables.lock().unwrap();
        let progress = tables.get("customer").unwrap();
        assert_eq!(progress.parts_completed.load(Ordering::SeqCst), 3);
        assert_eq!(progress.buffers_written.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn unknown_tables_are_ignored() {
        let tracker = ProgressTracker::new(vec![("nation", 1)]);
        tracker.increment("region", IncrementType::Part);
        tracker.finish("region");
    }
}
