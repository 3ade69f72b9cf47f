use serde::Serialize;

use super::bindings;
use crate::domain::annotation::{style_for, Annotation};
use crate::domain::errors::AppError;
use crate::domain::logging::{get_logger, LogComponent};
use crate::log_debug;

/// Radius of the point circle, in price units.
pub const POINT_RADIUS_PRICE: f64 = 3.0;
/// Vertical arrow offset of the label anchor, in pixels.
pub const LABEL_ARROW_OFFSET_Y: f64 = -40.0;

/// Circle shape centered on an annotated point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointShape {
    pub x: String,
    pub y0: f64,
    pub y1: f64,
    pub color: String,
}

/// Arrow-annotation label anchored above an annotated point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalLabel {
    pub x: String,
    pub y: f64,
    pub text: String,
    pub color: String,
    pub arrow_offset_y: f64,
}

/// Full replacement payload for the declarative surface's overlay layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationLayer {
    pub shapes: Vec<PointShape>,
    pub labels: Vec<SignalLabel>,
}

/// Declarative plotting surface seam. The production implementation forwards
/// to the JS chart bridge; tests record payloads instead.
pub trait RelayoutSurface {
    fn is_mounted(&self) -> bool;
    fn relayout(&self, layer: &AnnotationLayer) -> Result<(), AppError>;
}

/// Surface backed by `window.chartBridge.relayoutAnnotations`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsRelayoutSurface;

impl RelayoutSurface for JsRelayoutSurface {
    fn is_mounted(&self) -> bool {
        bindings::is_declarative_mounted()
    }

    fn relayout(&self, layer: &AnnotationLayer) -> Result<(), AppError> {
        let payload = serde_json::to_string(layer)
            .map_err(|e| AppError::Chart(format!("Failed to encode annotation layer: {e}")))?;
        bindings::relayout_annotations(&payload)
            .map_err(|e| AppError::Chart(format!("Relayout failed: {e:?}")))
    }
}

/// Converts filtered annotations into declarative shape/label primitives and
/// applies them as one atomic relayout. Each call fully supersedes the
/// previous overlay set.
pub struct DeclarativeChartAdapter<S: RelayoutSurface> {
    surface: S,
}

impl<S: RelayoutSurface> DeclarativeChartAdapter<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Build the overlay layer, skipping malformed points.
    pub fn build_layer(annotations: &[Annotation]) -> AnnotationLayer {
        let mut shapes = Vec::new();
        let mut labels = Vec::new();
        for annotation in annotations {
            let price = match annotation.finite_price() {
                Some(p) if annotation.epoch_seconds().is_some() => p,
                _ => {
                    get_logger().warn(
                        LogComponent::Infrastructure("DeclarativeChart"),
                        &format!(
                            "Skipping malformed annotation: {} @ {}",
                            annotation.signal, annotation.timestamp
                        ),
                    );
                    continue;
                }
            };
            let style = style_for(&annotation.signal);
            shapes.push(PointShape {
                x: annotation.timestamp.clone(),
                y0: price - POINT_RADIUS_PRICE,
                y1: price + POINT_RADIUS_PRICE,
                color: style.color.to_string(),
            });
            labels.push(SignalLabel {
                x: annotation.timestamp.clone(),
                y: price,
                text: style.label,
                color: style.color.to_string(),
                arrow_offset_y: LABEL_ARROW_OFFSET_Y,
            });
        }
        AnnotationLayer { shapes, labels }
    }

    /// Apply `annotations` to the surface; a no-op when it is not mounted.
    /// Returns the number of points applied.
    pub fn apply(&self, annotations: &[Annotation]) -> usize {
        if !self.surface.is_mounted() {
            get_logger().warn(
                LogComponent::Infrastructure("DeclarativeChart"),
                "Declarative surface not mounted, skipping relayout",
            );
            return 0;
        }
        let layer = Self::build_layer(annotations);
        let applied = layer.shapes.len();
        if let Err(e) = self.surface.relayout(&layer) {
            get_logger().error(
                LogComponent::Infrastructure("DeclarativeChart"),
                &format!("Failed to apply annotation layer: {e}"),
            );
            return 0;
        }
        log_debug!(
            LogComponent::Infrastructure("DeclarativeChart"),
            "Applied {applied} annotation shapes"
        );
        applied
    }
}
