use crate::domain::annotation::{style_for, Annotation, SignalStyle};
use crate::domain::logging::{get_logger, LogComponent};
use crate::log_debug;

/// Coordinate conversion callbacks exposed by the retained chart widget.
///
/// `None` means the point projects outside the visible range.
pub trait ChartCoordinates {
    fn time_to_x(&self, epoch_seconds: f64) -> Option<f64>;
    fn price_to_y(&self, price: f64) -> Option<f64>;
}

/// A positioned overlay element. The DOM implementation owns a real node;
/// tests substitute a recording fake.
pub trait MarkerElement {
    fn set_position(&self, x: f64, y: f64);
    fn set_hidden(&self, hidden: bool);
    fn remove(&self);
}

/// Creates overlay elements for annotations.
pub trait MarkerFactory {
    type Element: MarkerElement;

    fn create(&self, annotation: &Annotation, style: &SignalStyle) -> Option<Self::Element>;
}

/// One live marker: element plus the chart-space point it tracks.
pub struct OverlayMarker<E> {
    pub element: E,
    pub time: f64,
    pub price: f64,
    pub annotation: Annotation,
    hidden: bool,
}

impl<E> OverlayMarker<E> {
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Tracks DOM-backed markers over a chart surface.
///
/// Markers are destroyed and recreated wholesale on every rebuild; there is
/// no incremental diffing. Repositioning only toggles visibility and screen
/// position, so it is safe to call on every pan/zoom/resize tick.
pub struct OverlayMarkerRegistry<F: MarkerFactory> {
    factory: F,
    markers: Vec<OverlayMarker<F::Element>>,
}

impl<F: MarkerFactory> OverlayMarkerRegistry<F> {
    pub fn new(factory: F) -> Self {
        Self { factory, markers: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn markers(&self) -> &[OverlayMarker<F::Element>] {
        &self.markers
    }

    /// Remove every live marker element.
    pub fn clear(&mut self) {
        for marker in self.markers.drain(..) {
            marker.element.remove();
        }
    }

    /// Destroy all markers and recreate one per plottable annotation, then
    /// project them through the coordinate callbacks.
    pub fn rebuild(&mut self, annotations: &[Annotation], coords: &dyn ChartCoordinates) {
        self.clear();
        for annotation in annotations {
            let (time, price) = match (annotation.epoch_seconds(), annotation.finite_price()) {
                (Some(time), Some(price)) => (time, price),
                _ => {
                    get_logger().warn(
                        LogComponent::Infrastructure("OverlayMarkers"),
                        &format!(
                            "Skipping unplottable annotation: {} @ {}",
                            annotation.signal, annotation.timestamp
                        ),
                    );
                    continue;
                }
            };
            let style = style_for(&annotation.signal);
            match self.factory.create(annotation, &style) {
                Some(element) => self.markers.push(OverlayMarker {
                    element,
                    time,
                    price,
                    annotation: annotation.clone(),
                    hidden: false,
                }),
                None => get_logger().error(
                    LogComponent::Infrastructure("OverlayMarkers"),
                    &format!("Failed to create marker for {}", annotation.signal),
                ),
            }
        }
        log_debug!(
            LogComponent::Infrastructure("OverlayMarkers"),
            "Rebuilt {} overlay markers",
            self.markers.len()
        );
        self.reposition(coords);
    }

    /// Re-project every marker. Out-of-range markers are hidden, not removed,
    /// and reappear once the view range brings them back.
    pub fn reposition(&mut self, coords: &dyn ChartCoordinates) {
        for marker in &mut self.markers {
            match (coords.time_to_x(marker.time), coords.price_to_y(marker.price)) {
                (Some(x), Some(y)) => {
                    marker.element.set_position(x, y);
                    marker.element.set_hidden(false);
                    marker.hidden = false;
                }
                _ => {
                    marker.element.set_hidden(true);
                    marker.hidden = true;
                }
            }
        }
    }
}
