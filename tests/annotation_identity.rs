use chart_annotator_wasm::domain::annotation::{Annotation, AnnotationId, AnnotationStore, Signal};

fn with_id(id: AnnotationId) -> Annotation {
    Annotation {
        id: Some(id),
        stock: "AAPL".to_string(),
        timestamp: "2024-01-02T10:00:00Z".to_string(),
        price: Some(150.0),
        signal: Signal::LongEntry,
        reason: None,
        formatted_timestamp: None,
    }
}

#[test]
fn integer_id_matches_its_numeric_key() {
    let id = AnnotationId::Int(5);
    assert!(id.matches("5"));
    assert!(!id.matches("6"));
    assert!(!id.matches("five"));
}

#[test]
fn string_and_integer_forms_of_the_same_id_compare_equal() {
    assert!(AnnotationId::Text("5".to_string()).matches("5"));
    assert!(AnnotationId::Int(5).matches("5"));
    assert_eq!(AnnotationId::Text("5".to_string()).as_key(), AnnotationId::Int(5).as_key());
}

#[test]
fn non_numeric_string_ids_compare_by_equality() {
    let id = AnnotationId::Text("abc-123".to_string());
    assert!(id.matches("abc-123"));
    assert!(!id.matches("abc-124"));
}

#[test]
fn find_by_id_accepts_either_wire_form() {
    let mut store = AnnotationStore::new();
    store.replace_all(vec![
        with_id(AnnotationId::Int(5)),
        with_id(AnnotationId::Text("7".to_string())),
    ]);

    assert!(store.find_by_id("5").is_some());
    assert!(store.find_by_id("7").is_some());
    assert!(store.find_by_id("8").is_none());
}

#[test]
fn remove_by_id_drops_every_matching_row() {
    let mut store = AnnotationStore::new();
    store.replace_all(vec![
        with_id(AnnotationId::Int(5)),
        with_id(AnnotationId::Text("5".to_string())),
        with_id(AnnotationId::Int(6)),
    ]);

    assert_eq!(store.remove_by_id("5"), 2);
    assert_eq!(store.len(), 1);
    assert!(store.find_by_id("6").is_some());
}

#[test]
fn unpersisted_annotations_never_match() {
    let mut annotation = with_id(AnnotationId::Int(1));
    annotation.id = None;
    assert!(!annotation.id_matches("1"));
    assert!(!annotation.id_matches(""));
}
