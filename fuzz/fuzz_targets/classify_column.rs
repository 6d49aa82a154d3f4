#![no_main]

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use serde_json::Value;
use tabserve::infer::{classify_column, InferenceConfig, KindInfo};

/// Fuzz target for column classification
///
/// Classification never fails; numeric metadata stays ordered.

#[derive(Arbitrary, Debug)]
enum Sample {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<Sample> for Value {
    fn from(sample: Sample) -> Self {
        match sample {
            Sample::Null => Value::Null,
            Sample::Bool(b) => Value::Bool(b),
            Sample::Int(i) => Value::from(i),
            Sample::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
            Sample::Text(s) => Value::String(s),
        }
    }
}

fuzz_target!(|samples: Vec<Sample>| {
    let values: Vec<Value> = samples.into_iter().map(Value::from).collect();
    let info = classify_column("fuzz", &values, &InferenceConfig::default());

    match info {
        KindInfo::Number { min, max, .. } => assert!(min <= max),
        KindInfo::Category { options } => assert!(!options.is_empty()),
        KindInfo::Boolean { labels } => assert_eq!(labels.len(), 2),
        _ => {}
    }
});
