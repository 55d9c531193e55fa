//! Shared percentile bookkeeping for the tinylibc benchmarks.
//!
//! Criterion reports its own statistics; these summaries add a single
//! greppable `TINYLIBC_BENCH` line per benchmark for CI logs.

use std::time::Duration;

/// Per-sample nanoseconds-per-operation collected from `iter_custom`.
#[derive(Debug, Default)]
pub struct BenchStats {
    samples_ns_per_op: Vec<f64>,
    total_iters: u64,
    total_ns: u128,
}

impl BenchStats {
    pub fn record(&mut self, iters: u64, dur: Duration) {
        let ns = dur.as_nanos();
        self.total_iters = self.total_iters.saturating_add(iters);
        self.total_ns = self.total_ns.saturating_add(ns);
        if iters > 0 {
            self.samples_ns_per_op.push(ns as f64 / iters as f64);
        }
    }

    /// `None` until at least one sample has been recorded.
    #[must_use]
    pub fn summary(&self) -> Option<BenchSummary> {
        if self.samples_ns_per_op.is_empty() {
            return None;
        }
        let mut samples = self.samples_ns_per_op.clone();
        samples.sort_by(f64::total_cmp);
        let throughput_ops_s = if self.total_ns == 0 {
            0.0
        } else {
            self.total_iters as f64 / (self.total_ns as f64 / 1e9)
        };
        Some(BenchSummary {
            samples: samples.len(),
            p50_ns_op: percentile_sorted(&samples, 0.50),
            p95_ns_op: percentile_sorted(&samples, 0.95),
            p99_ns_op: percentile_sorted(&samples, 0.99),
            mean_ns_op: samples.iter().sum::<f64>() / samples.len() as f64,
            throughput_ops_s,
        })
    }

    pub fn report(&self, bench_label: &str) {
        if let Some(s) = self.summary() {
            println!(
                "TINYLIBC_BENCH bench={bench_label} samples={} p50_ns_op={:.3} p95_ns_op={:.3} p99_ns_op={:.3} mean_ns_op={:.3} throughput_ops_s={:.3}",
                s.samples, s.p50_ns_op, s.p95_ns_op, s.p99_ns_op, s.mean_ns_op, s.throughput_ops_s
            );
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchSummary {
    pub samples: usize,
    pub p50_ns_op: f64,
    pub p95_ns_op: f64,
    pub p99_ns_op: f64,
    pub mean_ns_op: f64,
    pub throughput_ops_s: f64,
}

/// Nearest-rank percentile of an ascending slice.
#[must_use]
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&p));
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() - 1) as f64 * p).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Deterministic xorshift fill used by every benchmark input.
#[must_use]
pub fn pseudorandom_i32(len: usize, seed: u32) -> Vec<i32> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as i32
        })
        .collect()
}
