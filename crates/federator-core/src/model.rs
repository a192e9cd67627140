//! Metric identity and sample model.
//!
//! A `Metric` is an unordered label set. It is stored sorted by label name so
//! that equal sets always produce the same canonical string, which is the key
//! the store uses.

use std::collections::BTreeMap;
use std::fmt::{self, Write};

/// Escape a label value for the canonical form.
pub fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Prometheus label name rule: `[a-zA-Z_][a-zA-Z0-9_]*`.
///
/// Canonical keys rely on this: names never contain `=`, `"`, `,` or `\`.
pub fn is_valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Unordered set of (label-name, label-value) pairs naming one series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Metric {
    labels: BTreeMap<String, String>,
}

impl Metric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label. A repeated name keeps the last value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.labels.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Canonical, order-independent rendering: `a="1",b="2"`.
    ///
    /// The empty label set renders as `{}` so snapshot lines stay
    /// three-columned.
    pub fn canonical(&self) -> String {
        if self.labels.is_empty() {
            return "{}".to_string();
        }
        let mut out = String::new();
        for (i, (k, v)) in self.labels.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}=\"{}\"", k, escape_label(v));
        }
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Metric
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Metric::new();
        for (k, v) in iter {
            m.insert(k, v);
        }
        m
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// One observation: identity, value, and timestamp in epoch milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    metric: Metric,
    value: f64,
    timestamp_ms: i64,
}

impl Sample {
    pub fn new(metric: Metric, value: f64, timestamp_ms: i64) -> Self {
        Self {
            metric,
            value,
            timestamp_ms,
        }
    }

    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    /// Snapshot line: `<canonical> <value> <timestamp>` (no trailing newline).
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {}",
            self.metric.canonical(),
            format_value(self.value),
            self.timestamp_ms
        )
    }
}

/// Prometheus spelling for sample values.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}
