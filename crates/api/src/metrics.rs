use analysis::AnalysisStats;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

pub struct Metrics {
    // Counters
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    failed_requests: AtomicUsize,
    rejected_requests: AtomicUsize,

    // Timing (in microseconds)
    total_summarize_time_us: AtomicU64,
    total_verify_time_us: AtomicU64,
    total_graph_time_us: AtomicU64,

    // Counts
    total_sentences_verified: AtomicUsize,
    total_sentences_degraded: AtomicUsize,
    total_nodes: AtomicUsize,
    total_edges: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            successful_requests: AtomicUsize::new(0),
            failed_requests: AtomicUsize::new(0),
            rejected_requests: AtomicUsize::new(0),
            total_summarize_time_us: AtomicU64::new(0),
            total_verify_time_us: AtomicU64::new(0),
            total_graph_time_us: AtomicU64::new(0),
            total_sentences_verified: AtomicUsize::new(0),
            total_sentences_degraded: AtomicUsize::new(0),
            total_nodes: AtomicUsize::new(0),
            total_edges: AtomicUsize::new(0),
        })
    }

    pub fn record_success(&self, stats: &AnalysisStats) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.successful_requests.fetch_add(1, Ordering::Relaxed);

        self.total_summarize_time_us
            .fetch_add(stats.summarize_time.as_micros() as u64, Ordering::Relaxed);
        self.total_verify_time_us
            .fetch_add(stats.verify_time.as_micros() as u64, Ordering::Relaxed);
        self.total_graph_time_us
            .fetch_add(stats.graph_time.as_micros() as u64, Ordering::Relaxed);

        self.total_sentences_verified.fetch_add(stats.sentences, Ordering::Relaxed);
        self.total_sentences_degraded
            .fetch_add(stats.degraded_sentences, Ordering::Relaxed);
        self.total_nodes.fetch_add(stats.nodes, Ordering::Relaxed);
        self.total_edges.fetch_add(stats.edges, Ordering::Relaxed);
    }

    pub fn record_failure(&self, client_error: bool) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if client_error {
            self.rejected_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let successes = self.successful_requests.load(Ordering::Relaxed);

        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            successful_requests: successes,
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            rejected_requests: self.rejected_requests.load(Ordering::Relaxed),
            avg_summarize_time_ms: avg_time_ms(&self.total_summarize_time_us, successes),
            avg_verify_time_ms: avg_time_ms(&self.total_verify_time_us, successes),
            avg_graph_time_ms: avg_time_ms(&self.total_graph_time_us, successes),
            total_sentences_verified: self.total_sentences_verified.load(Ordering::Relaxed),
            total_sentences_degraded: self.total_sentences_degraded.load(Ordering::Relaxed),
            total_nodes: self.total_nodes.load(Ordering::Relaxed),
            total_edges: self.total_edges.load(Ordering::Relaxed),
        }
    }
}

fn avg_time_ms(total_us: &AtomicU64, count: usize) -> f64 {
    let total = total_us.load(Ordering::Relaxed) as f64;
    if count > 0 {
        total / count as f64 / 1000.0 // Convert to ms
    } else {
        0.0
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub rejected_requests: usize,
    pub avg_summarize_time_ms: f64,
    pub avg_verify_time_ms: f64,
    pub avg_graph_time_ms: f64,
    pub total_sentences_verified: usize,
    pub total_sentences_degraded: usize,
    pub total_nodes: usize,
    pub total_edges: usize,
}
