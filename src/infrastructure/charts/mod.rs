pub mod bindings;
pub mod capability;
pub mod declarative;
pub mod dom_marker;
pub mod overlay;
pub mod retained;

pub use bindings::BridgeCoordinates;
pub use capability::{detect_backend, notify_chart_ready, take_chart_ready, ChartBackend};
pub use declarative::{DeclarativeChartAdapter, JsRelayoutSurface, RelayoutSurface};
pub use dom_marker::{DomMarker, DomMarkerFactory};
pub use overlay::{ChartCoordinates, MarkerElement, MarkerFactory, OverlayMarkerRegistry};
pub use retained::{wire_reposition_events, RepositionSubscriptions, RetainedChartAdapter};
