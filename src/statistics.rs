//! Write statistics for generated files

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Counts chunks and bytes written, logging a summary when dropped.
#[derive(Debug)]
pub struct WriteStatistics {
    what: &'static str,
    chunks: AtomicU64,
    bytes: AtomicU64,
    start: Instant,
}

impl WriteStatistics {
    pub fn new(what: &'static str) -> Self {
        Self {
            what,
            chunks: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
            start: Instant::now(),
        }
    }

    pub fn increment_chunks(&self, n: u64) {
        self.chunks.fetch_add(n, Ordering::Relaxed);
    }

    pub fn increment_bytes(&self, n: usize) {
        self.bytes.fetch_add(n as u64, Ordering::Relaxed);
    }

    pub fn chunks(&self) -> u64 {
        self.chunks.load(Ordering::Relaxed)
    }

    pub fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
}

impl Drop for WriteStatistics {
    fn drop(&mut self) {
        debug!(
            "wrote {} {} ({} bytes) in {:?}",
            self.chunks(),
            self.what,
            self.bytes(),
            self.start.elapsed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let statistics = WriteStatistics::new("row groups");
        statistics.increment_chunks(1);
        statistics.increment_chunks(2);
        statistics.increment_bytes(1024);
        assert_eq!(statistics.chunks(), 3);
        assert_eq!(statistics.bytes(), 1024);
    }
}
