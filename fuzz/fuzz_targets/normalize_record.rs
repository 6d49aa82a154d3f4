#![no_main]

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use tabserve::predict::{normalize, parse_record, PredictionError};

/// Fuzz target for record parsing and normalization
///
/// Arbitrary record text and feature orders must never panic, and a
/// successful row always follows the requested order.

#[derive(Arbitrary, Debug)]
struct RecordInput {
    data: String,
    order: Option<Vec<String>>,
}

fuzz_target!(|input: RecordInput| {
    let Ok(record) = parse_record(&input.data) else {
        return;
    };

    match normalize(&record, input.order.as_deref()) {
        Ok(row) => {
            assert_eq!(row.columns.len(), row.values.len());
            if let Some(order) = &input.order {
                assert_eq!(&row.columns, order);
            }
        }
        Err(PredictionError::EmptyRecord) => assert!(record.is_empty()),
        Err(PredictionError::MissingField { field, .. }) => {
            assert!(!record.contains_key(&field));
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
});
