//! Latency summaries for the torture harnesses

/// Percentile over a sorted slice.
pub fn percentile(sorted: &[u64], p: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = (p * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Aggregate navigation latencies for one run.
#[derive(Debug, Clone)]
pub struct LatencySummary {
    pub count: usize,
    pub mean_ms: f64,
    pub p50_ms: u64,
    pub p95_ms: u64,
    pub max_ms: u64,
}

pub fn summarize(latencies_ms: &[u64]) -> LatencySummary {
    let mut sorted = latencies_ms.to_vec();
    sorted.sort_unstable();
    let mean = if sorted.is_empty() {
        0.0
    } else {
        sorted.iter().sum::<u64>() as f64 / sorted.len() as f64
    };
    LatencySummary {
        count: sorted.len(),
        mean_ms: mean,
        p50_ms: percentile(&sorted, 0.5),
        p95_ms: percentile(&sorted, 0.95),
        max_ms: sorted.last().copied().unwrap_or(0),
    }
}

impl std::fmt::Display for LatencySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n={} mean={:.0}ms p50={}ms p95={}ms max={}ms",
            self.count, self.mean_ms, self.p50_ms, self.p95_ms, self.max_ms
        )
    }
}
