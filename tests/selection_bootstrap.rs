use chart_annotator_wasm::application::coordinator::AnnotationCoordinator;
use chart_annotator_wasm::domain::annotation::{
    Annotation, AnnotationId, AnnotationStore, SelectionFilter, Signal,
};
use chart_annotator_wasm::infrastructure::charts::ChartBackend;
use chart_annotator_wasm::infrastructure::websocket::AnnotationSyncClient;

fn aapl_row() -> Annotation {
    Annotation {
        id: Some(AnnotationId::Int(1)),
        stock: "AAPL".to_string(),
        timestamp: "2024-01-02T10:00:00Z".to_string(),
        price: Some(150.5),
        signal: Signal::LongEntry,
        reason: None,
        formatted_timestamp: None,
    }
}

#[test]
fn coordinator_adopts_a_selection_recorded_before_it_existed() {
    let client = AnnotationSyncClient::new("ws://localhost/ws/annotations");
    let recorded =
        SelectionFilter::new(Some("AAPL".to_string()), Some("2024-01-02".to_string()));

    let coordinator =
        AnnotationCoordinator::new(ChartBackend::Declarative, client.handle(), recorded);

    let filter = coordinator.store().filter();
    assert!(filter.is_complete());
    assert_eq!(filter.stock.as_deref(), Some("AAPL"));
    assert_eq!(filter.date.as_deref(), Some("2024-01-02"));
}

#[test]
fn coordinator_without_a_prior_selection_starts_unfiltered() {
    let client = AnnotationSyncClient::new("ws://localhost/ws/annotations");
    let coordinator = AnnotationCoordinator::new(
        ChartBackend::Declarative,
        client.handle(),
        SelectionFilter::default(),
    );
    assert!(!coordinator.store().filter().is_complete());
}

#[test]
fn early_selection_filters_the_first_snapshot() {
    // Selection arrives first, the snapshot second; the seeded filter must
    // already apply to that first snapshot.
    let recorded =
        SelectionFilter::new(Some("AAPL".to_string()), Some("2024-01-02".to_string()));

    let mut store = AnnotationStore::new();
    store.set_filter(recorded.stock.clone(), recorded.date.clone());
    store.replace_all(vec![aapl_row()]);

    let filtered = store.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].stock, "AAPL");
}
