use std::cell::RefCell;
use std::rc::Rc;

use chart_annotator_wasm::domain::annotation::{Annotation, AnnotationId, Signal, SignalStyle};
use chart_annotator_wasm::infrastructure::charts::overlay::{
    ChartCoordinates, MarkerElement, MarkerFactory, OverlayMarkerRegistry,
};

fn annotation(id: i64, timestamp: &str, price: Option<f64>) -> Annotation {
    Annotation {
        id: Some(AnnotationId::Int(id)),
        stock: "AAPL".to_string(),
        timestamp: timestamp.to_string(),
        price,
        signal: Signal::LongEntry,
        reason: None,
        formatted_timestamp: None,
    }
}

#[derive(Debug, Default)]
struct ElementState {
    position: Option<(f64, f64)>,
    hidden: bool,
    removed: bool,
}

#[derive(Clone)]
struct FakeElement(Rc<RefCell<ElementState>>);

impl MarkerElement for FakeElement {
    fn set_position(&self, x: f64, y: f64) {
        self.0.borrow_mut().position = Some((x, y));
    }

    fn set_hidden(&self, hidden: bool) {
        self.0.borrow_mut().hidden = hidden;
    }

    fn remove(&self) {
        self.0.borrow_mut().removed = true;
    }
}

/// Factory that keeps handles to every element it ever produced, so tests can
/// observe elements after the registry drops them.
#[derive(Default)]
struct FakeFactory {
    created: Rc<RefCell<Vec<Rc<RefCell<ElementState>>>>>,
}

impl MarkerFactory for FakeFactory {
    type Element = FakeElement;

    fn create(&self, _annotation: &Annotation, _style: &SignalStyle) -> Option<FakeElement> {
        let state = Rc::new(RefCell::new(ElementState::default()));
        self.created.borrow_mut().push(state.clone());
        Some(FakeElement(state))
    }
}

/// Linear projection that only maps times inside a visible window.
struct WindowedCoords {
    visible_from: f64,
    visible_to: f64,
}

impl ChartCoordinates for WindowedCoords {
    fn time_to_x(&self, epoch_seconds: f64) -> Option<f64> {
        (self.visible_from..=self.visible_to)
            .contains(&epoch_seconds)
            .then(|| epoch_seconds - self.visible_from)
    }

    fn price_to_y(&self, price: f64) -> Option<f64> {
        Some(500.0 - price)
    }
}

// 2024-01-02T10:00:00Z and one hour later.
const T0: f64 = 1704189600.0;
const T1: f64 = T0 + 3600.0;

#[test]
fn rebuild_creates_one_marker_per_plottable_annotation() {
    let factory = FakeFactory::default();
    let created = factory.created.clone();
    let mut registry = OverlayMarkerRegistry::new(factory);
    let coords = WindowedCoords { visible_from: T0, visible_to: T1 };

    registry.rebuild(
        &[
            annotation(1, "2024-01-02T10:00:00Z", Some(150.0)),
            annotation(2, "not-a-date", Some(150.0)),
            annotation(3, "2024-01-02T10:30:00Z", None),
            annotation(4, "2024-01-02T11:00:00Z", Some(151.0)),
        ],
        &coords,
    );

    assert_eq!(registry.len(), 2);
    assert_eq!(created.borrow().len(), 2);
    assert_eq!(created.borrow()[0].borrow().position, Some((0.0, 350.0)));

    // Each marker keeps a back-reference to the annotation it tracks.
    assert_eq!(registry.markers()[0].annotation.id, Some(AnnotationId::Int(1)));
    assert_eq!(registry.markers()[1].time, T1);
    assert!(!registry.markers()[1].is_hidden());
}

#[test]
fn out_of_range_markers_are_hidden_not_destroyed() {
    let factory = FakeFactory::default();
    let created = factory.created.clone();
    let mut registry = OverlayMarkerRegistry::new(factory);

    let narrow = WindowedCoords { visible_from: T0, visible_to: T0 + 60.0 };
    registry.rebuild(
        &[
            annotation(1, "2024-01-02T10:00:00Z", Some(150.0)),
            annotation(2, "2024-01-02T11:00:00Z", Some(151.0)),
        ],
        &narrow,
    );

    {
        let created = created.borrow();
        assert!(!created[0].borrow().hidden);
        assert!(created[1].borrow().hidden);
        assert!(!created[1].borrow().removed);
    }

    // Panning the window back over the point reveals it again.
    let wide = WindowedCoords { visible_from: T0, visible_to: T1 };
    registry.reposition(&wide);
    let created = created.borrow();
    assert!(!created[1].borrow().hidden);
    assert_eq!(created[1].borrow().position, Some((3600.0, 349.0)));
}

#[test]
fn rebuild_with_empty_set_removes_all_elements() {
    let factory = FakeFactory::default();
    let created = factory.created.clone();
    let mut registry = OverlayMarkerRegistry::new(factory);
    let coords = WindowedCoords { visible_from: T0, visible_to: T1 };

    registry.rebuild(&[annotation(1, "2024-01-02T10:00:00Z", Some(150.0))], &coords);
    registry.rebuild(&[], &coords);

    assert!(registry.is_empty());
    assert!(created.borrow()[0].borrow().removed);
}

#[test]
fn clear_tears_down_every_marker() {
    let factory = FakeFactory::default();
    let created = factory.created.clone();
    let mut registry = OverlayMarkerRegistry::new(factory);
    let coords = WindowedCoords { visible_from: T0, visible_to: T1 };

    registry.rebuild(
        &[
            annotation(1, "2024-01-02T10:00:00Z", Some(150.0)),
            annotation(2, "2024-01-02T11:00:00Z", Some(151.0)),
        ],
        &coords,
    );
    registry.clear();

    assert!(registry.is_empty());
    assert!(created.borrow().iter().all(|e| e.borrow().removed));
}
