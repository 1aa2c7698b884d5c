//! Metrics registry for the gateway.
//!
//! Counter/gauge/histogram types with dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering. Histograms store microseconds internally and render seconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// `name{labels}` or bare `name` when there are no labels.
fn series(name: &str, labels: &str) -> String {
    if labels.is_empty() {
        name.to_string()
    } else {
        format!("{name}{{{labels}}}")
    }
}

fn micros_as_secs(micros: u64) -> f64 {
    micros as f64 / 1_000_000.0
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series (0 when never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{} {}", series(name, &label_str(r.key())), val);
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }
    pub fn dec(&self, labels: &[(&str, &str)]) {
        self.add(labels, -1);
    }

    /// Add an arbitrary signed delta.
    pub fn add(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(v, Ordering::Relaxed);
    }

    pub fn set(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.store(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} gauge", name);
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let _ = writeln!(out, "{} {}", series(name, &label_str(r.key())), val);
        }
    }
}

struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum: AtomicU64::new(0),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

/// Histogram with a fixed, per-family bucket layout.
pub struct HistogramVec {
    /// Upper bounds in microseconds, ascending.
    bounds: Vec<u64>,
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    pub fn new(bounds: &[Duration]) -> Self {
        let mut bounds: Vec<u64> = bounds.iter().map(|d| d.as_micros() as u64).collect();
        bounds.sort_unstable();
        bounds.dedup();
        Self {
            bounds,
            map: DashMap::new(),
        }
    }

    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let n = self.bounds.len();
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicHistogram::new(n));
        let micros = duration.as_micros() as u64;

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);

        // Cumulative: every bucket whose bound covers the value.
        for (i, &b) in self.bounds.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of observations for one series.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, help);
        let _ = writeln!(out, "# TYPE {} histogram", name);
        for r in self.map.iter() {
            let hist = r.value();
            let labels = label_str(r.key());
            let prefix = if labels.is_empty() {
                String::new()
            } else {
                format!("{labels},")
            };

            for (i, &le) in self.bounds.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(
                    out,
                    "{}_bucket{{{}le=\"{}\"}} {}",
                    name,
                    prefix,
                    micros_as_secs(le),
                    count
                );
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = micros_as_secs(hist.sum.load(Ordering::Relaxed));
            let _ = writeln!(out, "{} {}", series(&format!("{name}_sum"), &labels), sum);
            let _ = writeln!(out, "{} {}", series(&format!("{name}_count"), &labels), count);
        }
    }
}

const HTTP_BUCKETS: [Duration; 8] = [
    Duration::from_millis(5),
    Duration::from_millis(10),
    Duration::from_millis(50),
    Duration::from_millis(100),
    Duration::from_millis(250),
    Duration::from_millis(500),
    Duration::from_secs(1),
    Duration::from_secs(5),
];

// Provider calls are slow; the last bucket matches the request timeout.
const AI_BUCKETS: [Duration; 8] = [
    Duration::from_millis(250),
    Duration::from_millis(500),
    Duration::from_secs(1),
    Duration::from_secs(2),
    Duration::from_secs(5),
    Duration::from_secs(10),
    Duration::from_secs(20),
    Duration::from_secs(30),
];

/// Pre-classified labels for one HTTP exchange.
#[derive(Debug, Clone, Copy)]
pub struct HttpLabels<'a> {
    pub method: &'a str,
    /// Route template (e.g. `/api/chat`), never the raw path.
    pub route: &'a str,
    pub status: u16,
}

/// How a provider call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiOutcome {
    Success,
    ConfigError,
    UpstreamError,
    Timeout,
}

impl AiOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            AiOutcome::Success => "success",
            AiOutcome::ConfigError => "config_error",
            AiOutcome::UpstreamError => "upstream_error",
            AiOutcome::Timeout => "timeout",
        }
    }
}

pub struct ServiceMetrics {
    pub http_requests: CounterVec,
    pub http_duration: HistogramVec,
    pub ai_requests: CounterVec,
    pub ai_response_time: HistogramVec,
    pub ai_token_usage: CounterVec,
    pub ai_queue_size: GaugeVec,
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMetrics {
    pub fn new() -> Self {
        let m = Self {
            http_requests: CounterVec::default(),
            http_duration: HistogramVec::new(&HTTP_BUCKETS),
            ai_requests: CounterVec::default(),
            ai_response_time: HistogramVec::new(&AI_BUCKETS),
            ai_token_usage: CounterVec::default(),
            ai_queue_size: GaugeVec::default(),
        };
        // Unlabelled gauge: expose 0 before the first call.
        m.ai_queue_size.set(&[], 0);
        m
    }

    pub fn record_http(&self, l: HttpLabels<'_>, elapsed: Duration) {
        let status = l.status.to_string();
        let labels = [
            ("method", l.method),
            ("route", l.route),
            ("status", status.as_str()),
        ];
        self.http_requests.inc(&labels);
        self.http_duration.observe(&labels, elapsed);
    }

    pub fn record_ai(&self, outcome: AiOutcome, elapsed: Duration) {
        let labels = [("outcome", outcome.as_str())];
        self.ai_requests.inc(&labels);
        self.ai_response_time.observe(&labels, elapsed);
    }

    pub fn record_tokens(&self, model: &str, tokens: u64) {
        self.ai_token_usage.add(&[("model", model)], tokens);
    }

    /// Count a provider call as in flight until the guard drops.
    pub fn in_flight(&self) -> InFlight<'_> {
        self.ai_queue_size.inc(&[]);
        InFlight { metrics: self }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.http_requests.render(
            "brainbytes_http_requests_total",
            "HTTP requests by method, route and status.",
            &mut out,
        );
        self.http_duration.render(
            "brainbytes_http_request_duration_seconds",
            "HTTP request latency.",
            &mut out,
        );
        self.ai_requests.render(
            "brainbytes_ai_requests_total",
            "Completion provider calls by outcome.",
            &mut out,
        );
        self.ai_response_time.render(
            "brainbytes_ai_response_time_seconds",
            "Completion provider latency.",
            &mut out,
        );
        self.ai_token_usage.render(
            "brainbytes_ai_token_usage_total",
            "Tokens reported by the completion provider.",
            &mut out,
        );
        self.ai_queue_size.render(
            "brainbytes_ai_queue_size",
            "Completion provider calls currently in flight.",
            &mut out,
        );
        out
    }
}

/// RAII guard returned by [`ServiceMetrics::in_flight`].
pub struct InFlight<'a> {
    metrics: &'a ServiceMetrics,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.metrics.ai_queue_size.dec(&[]);
    }
}
