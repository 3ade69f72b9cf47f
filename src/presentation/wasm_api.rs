use std::str::FromStr;

use js_sys::Promise;
use leptos::{SignalSet, SignalUpdate};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::application::coordinator::with_global_coordinator_mut;
use crate::application::use_cases::{spawn_create_annotation, spawn_delete_last};
use crate::domain::annotation::{SelectedPoint, Signal};
use crate::domain::errors::AppError;
use crate::domain::logging::{get_logger, LogComponent};
use crate::global_state;
use crate::infrastructure::charts::{notify_chart_ready, ChartBackend};
use crate::infrastructure::http::{summary_to_json, DownloadRequest, StockDataApi};

/// Bridge for the page bootstrap script. Signals that the chart surface is
/// mounted and which library owns it ("declarative" or "retained").
#[wasm_bindgen(js_name = chartReady)]
pub fn chart_ready(kind: &str) -> Result<(), JsValue> {
    let backend = ChartBackend::from_str(kind)
        .map_err(|_| JsValue::from_str(&format!("Unknown chart backend: {kind}")))?;
    notify_chart_ready(backend);
    Ok(())
}

/// Update the active (stock, date) selection. Both must be set before any
/// annotations are shown.
#[wasm_bindgen(js_name = setChartSelection)]
pub fn set_chart_selection(stock: Option<String>, date: Option<String>) {
    let stock = stock.filter(|s| !s.is_empty());
    let date = date.filter(|d| !d.is_empty());
    if with_global_coordinator_mut(|c| c.set_selection(stock.clone(), date.clone())).is_none() {
        // Coordinator not bootstrapped yet; record the selection in the
        // signal, which bootstrap adopts when it builds the store.
        global_state::selection().update(|filter| {
            filter.stock = stock;
            filter.date = date;
        });
        get_logger().warn(
            LogComponent::Presentation("WasmApi"),
            "Selection changed before coordinator bootstrap",
        );
    }
}

/// Record the chart point the user clicked; annotation buttons act on it.
#[wasm_bindgen(js_name = setSelectedPoint)]
pub fn set_selected_point(timestamp: String, price: f64) {
    get_logger().debug(
        LogComponent::Presentation("WasmApi"),
        &format!("Point selected: {timestamp} @ {price}"),
    );
    global_state::selected_point().set(Some(SelectedPoint { timestamp, price }));
}

#[wasm_bindgen(js_name = clearSelectedPoint)]
pub fn clear_selected_point() {
    global_state::selected_point().set(None);
}

/// Create an annotation at the selected point from page-level UI.
#[wasm_bindgen(js_name = addAnnotation)]
pub fn add_annotation(signal: &str, reason: Option<String>) {
    spawn_create_annotation(Signal::from(signal.to_string()), reason.unwrap_or_default());
}

/// Delete the most recently placed annotation.
#[wasm_bindgen(js_name = deleteLastAnnotation)]
pub fn delete_last_annotation() {
    spawn_delete_last();
}

fn to_js_error(error: AppError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Data-management bridge: resolves to the downloaded-data summary rows as a
/// JSON array string.
#[wasm_bindgen(js_name = fetchStockSummary)]
pub fn fetch_stock_summary() -> Promise {
    future_to_promise(async move {
        let rows = StockDataApi::new().summary().await.map_err(to_js_error)?;
        let json = summary_to_json(&rows).map_err(to_js_error)?;
        Ok(JsValue::from_str(&json))
    })
}

/// Request a server-side download of historical data for `symbols`.
#[wasm_bindgen(js_name = downloadStockData)]
pub fn download_stock_data(
    symbols: Vec<String>,
    start_date: String,
    end_date: String,
    resolution: String,
) -> Promise {
    future_to_promise(async move {
        let request = DownloadRequest { symbols, start_date, end_date, resolution };
        StockDataApi::new().download(&request).await.map_err(to_js_error)?;
        Ok(JsValue::from_str("download_started"))
    })
}

/// Delete all downloaded data for one symbol.
#[wasm_bindgen(js_name = deleteStockData)]
pub fn delete_stock_data(symbol: String) -> Promise {
    future_to_promise(async move {
        StockDataApi::new().delete_symbol(&symbol).await.map_err(to_js_error)?;
        Ok(JsValue::from_str("deleted"))
    })
}
