//! Kind inference logic

use super::config::InferenceConfig;
use super::stats::{collect_stats_from_samples, ColumnStats};
use super::types::{Kind, KindInfo};
use serde_json::Value;

/// Infer the kind of a column from its statistics
pub fn infer_kind(stats: &ColumnStats, config: &InferenceConfig) -> Kind {
    if stats.count == 0 {
        return Kind::Text;
    }

    if stats.boolean_labels.is_some() {
        return Kind::Boolean;
    }

    if stats.date.is_some() {
        return Kind::Date;
    }

    let unique = stats.unique_count();
    if stats.all_text && unique <= config.category_threshold {
        return Kind::Category;
    }
    if stats.all_numeric
        && config
            .numeric_category_threshold
            .is_some_and(|threshold| unique <= threshold)
    {
        return Kind::Category;
    }

    if stats.all_numeric {
        return Kind::Number;
    }

    Kind::Text
}

/// Build the metadata for `kind` from the statistics it was inferred from.
///
/// Falls back to bare text when the statistics cannot support `kind`.
pub fn describe(stats: &ColumnStats, kind: Kind) -> KindInfo {
    match kind {
        Kind::Boolean => match &stats.boolean_labels {
            Some(labels) => KindInfo::Boolean {
                labels: labels.to_vec(),
            },
            None => KindInfo::empty_text(),
        },
        Kind::Date => match &stats.date {
            Some(date) => KindInfo::Date {
                format: date.format.clone(),
                min: date.min.clone(),
                max: date.max.clone(),
            },
            None => KindInfo::empty_text(),
        },
        Kind::Category => {
            let mut options: Vec<String> = stats.distinct.iter().cloned().collect();
            if stats.all_numeric {
                options.sort_by(|a, b| {
                    let a = a.parse::<f64>().unwrap_or(f64::NAN);
                    let b = b.parse::<f64>().unwrap_or(f64::NAN);
                    a.total_cmp(&b)
                });
            }
            KindInfo::Category { options }
        }
        Kind::Number => match (stats.min, stats.max) {
            (Some(min), Some(max)) => KindInfo::Number {
                min,
                max,
                integer: stats.all_integers,
            },
            _ => KindInfo::empty_text(),
        },
        Kind::Text => KindInfo::Text {
            max_length: stats.max_str_len,
        },
    }
}

/// Classify one column of sample values
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tabserve::infer::{classify_column, InferenceConfig, Kind};
///
/// let values = [json!(0), json!(1), json!(0)];
/// let info = classify_column("smoker", &values, &InferenceConfig::default());
/// assert_eq!(info.kind(), Kind::Boolean);
/// ```
pub fn classify_column(name: &str, values: &[Value], config: &InferenceConfig) -> KindInfo {
    let stats = collect_stats_from_samples(name, values, config);
    let kind = infer_kind(&stats, config);
    tracing::trace!(column = name, %kind, samples = stats.count, "classified column");
    describe(&stats, kind)
}
