use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::bindings::{self, BridgeCoordinates};
use super::dom_marker::DomMarkerFactory;
use super::overlay::{ChartCoordinates, MarkerFactory, OverlayMarkerRegistry};
use crate::domain::annotation::Annotation;
use crate::domain::logging::{get_logger, LogComponent};
use crate::event_utils::{on_window_resize, Debouncer};

/// Debounce window after a visible-range change before repositioning.
pub const RANGE_DEBOUNCE_MS: u32 = 50;
/// Debounce window after a window resize before repositioning.
pub const RESIZE_DEBOUNCE_MS: u32 = 100;

/// Places filtered annotations on the retained chart widget as overlay
/// markers. Apply rebuilds markers wholesale; view-range changes only
/// reposition them.
pub struct RetainedChartAdapter<F: MarkerFactory> {
    registry: OverlayMarkerRegistry<F>,
}

impl<F: MarkerFactory> RetainedChartAdapter<F> {
    pub fn new(factory: F) -> Self {
        Self { registry: OverlayMarkerRegistry::new(factory) }
    }

    /// Rebuild one marker per plottable annotation, projected through the
    /// widget's coordinate callbacks.
    pub fn apply(&mut self, annotations: &[Annotation], coords: &dyn ChartCoordinates) {
        self.registry.rebuild(annotations, coords);
    }

    /// Re-project live markers after a pan/zoom/resize.
    pub fn reposition(&mut self, coords: &dyn ChartCoordinates) {
        self.registry.reposition(coords);
    }

    pub fn marker_count(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &OverlayMarkerRegistry<F> {
        &self.registry
    }
}

/// Owns the one-time subscriptions that keep markers positioned: the widget's
/// visible-range-changed event and window resize, each debounced into a
/// reposition (never a rebuild).
pub struct RepositionSubscriptions {
    _resize: Option<EventListener>,
    _range_callback: Closure<dyn FnMut()>,
}

pub fn wire_reposition_events(
    adapter: Rc<RefCell<RetainedChartAdapter<DomMarkerFactory>>>,
) -> RepositionSubscriptions {
    let range_debouncer = Debouncer::new(RANGE_DEBOUNCE_MS);
    let resize_debouncer = Debouncer::new(RESIZE_DEBOUNCE_MS);

    let range_callback = {
        let adapter = adapter.clone();
        let debouncer = range_debouncer;
        Closure::wrap(Box::new(move || {
            let adapter = adapter.clone();
            debouncer.schedule(move || {
                adapter.borrow_mut().reposition(&BridgeCoordinates);
            });
        }) as Box<dyn FnMut()>)
    };
    bindings::subscribe_visible_range_change(range_callback.as_ref().unchecked_ref());

    let resize = on_window_resize({
        let adapter = adapter.clone();
        move || {
            let adapter = adapter.clone();
            resize_debouncer.schedule(move || {
                adapter.borrow_mut().reposition(&BridgeCoordinates);
            });
        }
    });

    get_logger().info(
        LogComponent::Infrastructure("RetainedChart"),
        "Subscribed to range-change and resize events",
    );
    RepositionSubscriptions { _resize: resize, _range_callback: range_callback }
}
