//! Monitor latency accounting.
//! Classification time is bucketed by the risk tier it resolved to, so a
//! snapshot shows per-tier counts and latency side by side. Snapshots can be
//! taken while the loop runs; the final one lands in `MonitorSummary`.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

use crate::risk::RiskLevel;

/// Count and latency percentiles (microseconds) over the retained window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LatencyStats {
    pub count: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub max_us: u64,
}

/// Point-in-time view of the monitor's timings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LatencySnapshot {
    /// `classify` time keyed by the resolved risk tier.
    pub classify: BTreeMap<RiskLevel, LatencyStats>,
    /// Whole per-segment handling, sink delivery included.
    pub segment: LatencyStats,
}

/// Most recent samples plus a lifetime count.
struct Window {
    samples: VecDeque<u64>,
    total: u64,
}

impl Window {
    fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            total: 0,
        }
    }

    fn push(&mut self, value_us: u64, capacity: usize) {
        if self.samples.len() == capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value_us);
        self.total += 1;
    }

    fn stats(&self) -> LatencyStats {
        let mut sorted: Vec<u64> = self.samples.iter().copied().collect();
        sorted.sort_unstable();
        let pick = |p: f64| -> u64 {
            if sorted.is_empty() {
                return 0;
            }
            let idx = (p * (sorted.len() - 1) as f64).round() as usize;
            sorted[idx.min(sorted.len() - 1)]
        };
        LatencyStats {
            count: self.total,
            p50_us: pick(0.50),
            p95_us: pick(0.95),
            max_us: sorted.last().copied().unwrap_or(0),
        }
    }
}

struct Windows {
    classify: HashMap<RiskLevel, Window>,
    segment: Window,
}

/// Shared between the monitor loop (writer) and any status poller.
pub struct MonitorMetrics {
    windows: Mutex<Windows>,
    capacity: usize,
}

impl MonitorMetrics {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Keep at most `capacity` samples per window for percentiles.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            windows: Mutex::new(Windows {
                classify: HashMap::new(),
                segment: Window::new(capacity),
            }),
            capacity,
        }
    }

    pub fn record_classify(&self, risk: RiskLevel, elapsed: Duration) {
        let us = elapsed.as_micros() as u64;
        let mut w = self.windows.lock();
        w.classify
            .entry(risk)
            .or_insert_with(|| Window::new(self.capacity))
            .push(us, self.capacity);
        tracing::trace!(risk = %risk, elapsed_us = us, "classify timed");
    }

    pub fn record_segment(&self, elapsed: Duration) {
        let us = elapsed.as_micros() as u64;
        self.windows.lock().segment.push(us, self.capacity);
    }

    pub fn snapshot(&self) -> LatencySnapshot {
        let w = self.windows.lock();
        LatencySnapshot {
            classify: w.classify.iter().map(|(&risk, win)| (risk, win.stats())).collect(),
            segment: w.segment.stats(),
        }
    }
}

impl Default for MonitorMetrics {
    fn default() -> Self {
        Self::new()
    }
}
