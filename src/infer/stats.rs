//! Column statistics for kind inference

use super::config::InferenceConfig;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::collections::BTreeSet;

/// Recognized boolean vocabularies as `(false, true)` pairs, compared lowercase
pub const BOOLEAN_VOCABULARY: [(&str, &str); 6] = [
    ("0", "1"),
    ("false", "true"),
    ("no", "yes"),
    ("n", "y"),
    ("f", "t"),
    ("off", "on"),
];

/// Date statistics for a column whose samples all parse under one format
#[derive(Debug, Clone, PartialEq)]
pub struct DateStats {
    /// Format every sample parsed under
    pub format: String,
    /// Earliest sample, as written
    pub min: String,
    /// Latest sample, as written
    pub max: String,
}

/// Statistics about a column used for kind inference
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnStats {
    /// Column name
    pub name: String,
    /// Number of non-null samples
    pub count: usize,
    /// Number of null samples (dropped before analysis)
    pub null_count: usize,
    /// Distinct sample values; numeric samples use their parsed form
    pub distinct: BTreeSet<String>,
    /// Whether all samples are numbers or numeric strings
    pub all_numeric: bool,
    /// Whether all samples are integral numbers
    pub all_integers: bool,
    /// Whether all samples are strings that do not parse as numbers
    pub all_text: bool,
    /// Whether all samples are JSON booleans
    pub all_native_bool: bool,
    /// `[false, true]` labels when the samples cover both polarities of one vocabulary pair
    pub boolean_labels: Option<[String; 2]>,
    /// Smallest numeric sample
    pub min: Option<f64>,
    /// Largest numeric sample
    pub max: Option<f64>,
    /// Longest sample in characters
    pub max_str_len: Option<usize>,
    /// Set when every sample parses under one configured date format
    pub date: Option<DateStats>,
}

impl ColumnStats {
    /// Create stats for a column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Number of distinct non-null values
    pub fn unique_count(&self) -> usize {
        self.distinct.len()
    }
}

/// Parse a sample as a finite number
pub(crate) fn numeric_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|x| x.is_finite())
}

/// Map a sample onto a boolean vocabulary pair: `(pair index, polarity)`
fn boolean_token(value: &Value) -> Option<(usize, bool)> {
    match value {
        Value::Bool(b) => Some((1, *b)),
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 0.0 => Some((0, false)),
            Some(x) if x == 1.0 => Some((0, true)),
            _ => None,
        },
        Value::String(s) => {
            let token = s.trim().to_lowercase();
            BOOLEAN_VOCABULARY
                .iter()
                .enumerate()
                .find_map(|(i, (f, t))| {
                    if token == *f {
                        Some((i, false))
                    } else if token == *t {
                        Some((i, true))
                    } else {
                        None
                    }
                })
        }
        _ => None,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_datetime(s: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, format).ok().or_else(|| {
        NaiveDate::parse_from_str(s, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

/// First configured format under which every sample parses
fn detect_dates(samples: &[&str], config: &InferenceConfig) -> Option<DateStats> {
    config.date_formats.iter().find_map(|format| {
        let mut earliest: Option<(NaiveDateTime, &str)> = None;
        let mut latest: Option<(NaiveDateTime, &str)> = None;

        for &s in samples {
            let parsed = parse_datetime(s.trim(), format)?;
            if earliest.map_or(true, |(d, _)| parsed < d) {
                earliest = Some((parsed, s));
            }
            if latest.map_or(true, |(d, _)| parsed > d) {
                latest = Some((parsed, s));
            }
        }

        match (earliest, latest) {
            (Some((_, min)), Some((_, max))) => Some(DateStats {
                format: format.clone(),
                min: min.to_string(),
                max: max.to_string(),
            }),
            _ => None,
        }
    })
}

/// Collect statistics from the sample values of one column.
///
/// Nulls are counted and dropped; every other statistic covers the non-null
/// samples only.
pub fn collect_stats_from_samples(
    name: &str,
    values: &[Value],
    config: &InferenceConfig,
) -> ColumnStats {
    let mut stats = ColumnStats::new(name);

    let samples: Vec<&Value> = values.iter().filter(|v| !v.is_null()).collect();
    stats.null_count = values.len() - samples.len();
    stats.count = samples.len();
    if samples.is_empty() {
        return stats;
    }

    let mut all_numeric = true;
    let mut all_integers = true;
    let mut all_text = true;
    let mut all_native_bool = true;
    let mut strings: Vec<&str> = Vec::with_capacity(samples.len());
    let mut pair: Option<usize> = None;
    let mut same_pair = true;
    let mut labels: [Option<String>; 2] = [None, None];
    let mut max_len = 0usize;

    for value in &samples {
        let number = numeric_value(value);
        match number {
            Some(x) => {
                if x.fract() != 0.0 {
                    all_integers = false;
                }
                stats.min = Some(stats.min.map_or(x, |m| m.min(x)));
                stats.max = Some(stats.max.map_or(x, |m| m.max(x)));
                stats.distinct.insert(x.to_string());
            }
            None => {
                all_numeric = false;
                all_integers = false;
                stats.distinct.insert(display_value(value));
            }
        }

        match value {
            Value::String(s) => {
                strings.push(s.as_str());
                if number.is_some() {
                    all_text = false;
                }
            }
            _ => all_text = false,
        }

        if !value.is_boolean() {
            all_native_bool = false;
        }

        match boolean_token(value) {
            Some((index, polarity)) if pair.map_or(true, |p| p == index) => {
                pair = Some(index);
                let slot = &mut labels[usize::from(polarity)];
                if slot.is_none() {
                    *slot = Some(display_value(value));
                }
            }
            _ => same_pair = false,
        }

        max_len = max_len.max(display_value(value).chars().count());
    }

    stats.all_numeric = all_numeric;
    stats.all_integers = all_numeric && all_integers;
    stats.all_text = all_text;
    stats.all_native_bool = all_native_bool;
    stats.max_str_len = Some(max_len);

    if !all_numeric {
        stats.min = None;
        stats.max = None;
    }

    // Spellings differing only in case share a polarity slot
    if let (true, [Some(f), Some(t)]) = (same_pair, labels) {
        stats.boolean_labels = Some([f, t]);
    } else if all_native_bool {
        stats.boolean_labels = Some(["false".to_string(), "true".to_string()]);
    }

    if strings.len() == samples.len() {
        stats.date = detect_dates(&strings, config);
    }

    stats
}
