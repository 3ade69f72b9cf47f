use chart_annotator_wasm::domain::annotation::{Annotation, AnnotationId, Signal};
use chart_annotator_wasm::presentation::table::sort_by_timestamp;

fn row(id: i64, timestamp: &str) -> Annotation {
    Annotation {
        id: Some(AnnotationId::Int(id)),
        stock: "AAPL".to_string(),
        timestamp: timestamp.to_string(),
        price: Some(100.0),
        signal: Signal::LongEntry,
        reason: None,
        formatted_timestamp: None,
    }
}

fn ids(rows: &[Annotation]) -> Vec<i64> {
    rows.iter()
        .map(|a| match a.id {
            Some(AnnotationId::Int(n)) => n,
            _ => panic!("test rows carry integer ids"),
        })
        .collect()
}

#[test]
fn sorts_ascending_by_parsed_timestamp() {
    let rows = vec![
        row(3, "2024-01-02T12:00:00Z"),
        row(1, "2024-01-02T09:00:00Z"),
        row(2, "2024-01-02T10:30:00Z"),
    ];
    assert_eq!(ids(&sort_by_timestamp(&rows)), vec![1, 2, 3]);
}

#[test]
fn equal_timestamps_keep_input_order() {
    let rows = vec![
        row(10, "2024-01-02T10:00:00Z"),
        row(11, "2024-01-02T10:00:00Z"),
        row(12, "2024-01-02T10:00:00Z"),
    ];
    assert_eq!(ids(&sort_by_timestamp(&rows)), vec![10, 11, 12]);
}

#[test]
fn unparseable_timestamps_sort_last() {
    let rows = vec![
        row(1, "not-a-date"),
        row(2, "2024-01-02T10:00:00Z"),
        row(3, ""),
        row(4, "2024-01-01T10:00:00Z"),
    ];
    assert_eq!(ids(&sort_by_timestamp(&rows)), vec![4, 2, 1, 3]);
}

#[test]
fn mixed_timestamp_formats_order_consistently() {
    let rows = vec![
        row(2, "2024-01-02 10:00:01"),
        row(1, "2024-01-02T10:00:00Z"),
        row(3, "2024-01-02T10:00:02"),
    ];
    assert_eq!(ids(&sort_by_timestamp(&rows)), vec![1, 2, 3]);
}
