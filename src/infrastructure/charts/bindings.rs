use js_sys::Function;
use wasm_bindgen::prelude::*;

use super::overlay::ChartCoordinates;

// Bridge installed by the chart bootstrap script as `window.chartBridge`.
//
// Coordinate conversions return NaN when the point projects outside the
// visible range (the widget itself reports null; the bridge normalizes).
#[wasm_bindgen]
unsafe extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "chartBridge"], js_name = isDeclarativeMounted)]
    pub fn is_declarative_mounted() -> bool;

    #[wasm_bindgen(js_namespace = ["window", "chartBridge"], js_name = isRetainedMounted)]
    pub fn is_retained_mounted() -> bool;

    /// Atomically replace the declarative surface's shape/annotation layer.
    #[wasm_bindgen(js_namespace = ["window", "chartBridge"], js_name = relayoutAnnotations, catch)]
    pub fn relayout_annotations(payload_json: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "chartBridge"], js_name = timeToCoordinate)]
    pub fn time_to_coordinate(epoch_seconds: f64) -> f64;

    #[wasm_bindgen(js_namespace = ["window", "chartBridge"], js_name = priceToCoordinate)]
    pub fn price_to_coordinate(price: f64) -> f64;

    /// Subscribe to the retained widget's visible-time-range-changed event.
    #[wasm_bindgen(js_namespace = ["window", "chartBridge"], js_name = subscribeVisibleRangeChange)]
    pub fn subscribe_visible_range_change(callback: &Function);
}

/// [`ChartCoordinates`] backed by the retained widget's conversion APIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BridgeCoordinates;

impl ChartCoordinates for BridgeCoordinates {
    fn time_to_x(&self, epoch_seconds: f64) -> Option<f64> {
        let x = time_to_coordinate(epoch_seconds);
        x.is_finite().then_some(x)
    }

    fn price_to_y(&self, price: f64) -> Option<f64> {
        let y = price_to_coordinate(price);
        y.is_finite().then_some(y)
    }
}
