use std::cell::RefCell;
use std::rc::Rc;

use chart_annotator_wasm::domain::annotation::{Annotation, AnnotationId, Signal};
use chart_annotator_wasm::domain::errors::AppError;
use chart_annotator_wasm::infrastructure::charts::declarative::{
    AnnotationLayer, DeclarativeChartAdapter, RelayoutSurface, LABEL_ARROW_OFFSET_Y,
    POINT_RADIUS_PRICE,
};

fn annotation(id: i64, timestamp: &str, price: Option<f64>, signal: Signal) -> Annotation {
    Annotation {
        id: Some(AnnotationId::Int(id)),
        stock: "AAPL".to_string(),
        timestamp: timestamp.to_string(),
        price,
        signal,
        reason: None,
        formatted_timestamp: None,
    }
}

/// Records relayout payloads instead of touching a real chart.
#[derive(Clone, Default)]
struct RecordingSurface {
    mounted: bool,
    failing: bool,
    calls: Rc<RefCell<Vec<AnnotationLayer>>>,
}

impl RelayoutSurface for RecordingSurface {
    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn relayout(&self, layer: &AnnotationLayer) -> Result<(), AppError> {
        if self.failing {
            return Err(AppError::Chart("surface rejected payload".to_string()));
        }
        self.calls.borrow_mut().push(layer.clone());
        Ok(())
    }
}

#[test]
fn layer_carries_one_shape_and_label_per_annotation() {
    let layer = DeclarativeChartAdapter::<RecordingSurface>::build_layer(&[
        annotation(1, "2024-01-02T10:00:00Z", Some(150.0), Signal::LongEntry),
        annotation(2, "2024-01-02T11:00:00Z", Some(151.0), Signal::ShortExit),
    ]);

    assert_eq!(layer.shapes.len(), 2);
    assert_eq!(layer.labels.len(), 2);
    assert_eq!(layer.shapes[0].y0, 150.0 - POINT_RADIUS_PRICE);
    assert_eq!(layer.shapes[0].y1, 150.0 + POINT_RADIUS_PRICE);
    assert_eq!(layer.labels[0].text, "L-ENTRY");
    assert_eq!(layer.labels[0].arrow_offset_y, LABEL_ARROW_OFFSET_Y);
    assert_eq!(layer.labels[1].text, "S-EXIT");
}

#[test]
fn malformed_points_are_skipped_without_poisoning_the_layer() {
    let layer = DeclarativeChartAdapter::<RecordingSurface>::build_layer(&[
        annotation(1, "garbage", Some(150.0), Signal::LongEntry),
        annotation(2, "2024-01-02T10:00:00Z", None, Signal::LongExit),
        annotation(3, "2024-01-02T10:00:00Z", Some(f64::NAN), Signal::ShortEntry),
        annotation(4, "2024-01-02T11:00:00Z", Some(151.0), Signal::ShortExit),
    ]);

    assert_eq!(layer.shapes.len(), 1);
    assert_eq!(layer.labels[0].text, "S-EXIT");
}

#[test]
fn apply_is_a_noop_when_the_surface_is_unmounted() {
    let surface = RecordingSurface { mounted: false, ..Default::default() };
    let calls = surface.calls.clone();
    let adapter = DeclarativeChartAdapter::new(surface);

    let applied =
        adapter.apply(&[annotation(1, "2024-01-02T10:00:00Z", Some(150.0), Signal::LongEntry)]);

    assert_eq!(applied, 0);
    assert!(calls.borrow().is_empty());
}

#[test]
fn each_apply_fully_supersedes_the_previous_overlay_set() {
    let surface = RecordingSurface { mounted: true, ..Default::default() };
    let calls = surface.calls.clone();
    let adapter = DeclarativeChartAdapter::new(surface);

    adapter.apply(&[
        annotation(1, "2024-01-02T10:00:00Z", Some(150.0), Signal::LongEntry),
        annotation(2, "2024-01-02T11:00:00Z", Some(151.0), Signal::LongExit),
    ]);
    let applied = adapter.apply(&[annotation(3, "2024-01-03T10:00:00Z", Some(152.0), Signal::ShortEntry)]);

    assert_eq!(applied, 1);
    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    // The second payload is complete in itself, not a delta.
    assert_eq!(calls[1].shapes.len(), 1);
    assert_eq!(calls[1].labels[0].text, "S-ENTRY");
}

#[test]
fn empty_selection_clears_the_overlay_layer() {
    let surface = RecordingSurface { mounted: true, ..Default::default() };
    let calls = surface.calls.clone();
    let adapter = DeclarativeChartAdapter::new(surface);

    adapter.apply(&[annotation(1, "2024-01-02T10:00:00Z", Some(150.0), Signal::LongEntry)]);
    adapter.apply(&[]);

    let calls = calls.borrow();
    assert!(calls[1].shapes.is_empty());
    assert!(calls[1].labels.is_empty());
}

#[test]
fn surface_failure_reports_zero_applied() {
    let surface = RecordingSurface { mounted: true, failing: true, ..Default::default() };
    let adapter = DeclarativeChartAdapter::new(surface);

    let applied =
        adapter.apply(&[annotation(1, "2024-01-02T10:00:00Z", Some(150.0), Signal::LongEntry)]);
    assert_eq!(applied, 0);
}
