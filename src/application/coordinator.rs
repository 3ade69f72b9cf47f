use std::cell::RefCell;
use std::rc::Rc;

use leptos::{SignalGetUntracked, SignalSet};
use wasm_bindgen_futures::spawn_local;

use crate::domain::annotation::{Annotation, AnnotationStore, SelectionFilter};
use crate::domain::logging::{get_logger, LogComponent};
use crate::global_state;
use crate::infrastructure::charts::{
    detect_backend, take_chart_ready, wire_reposition_events, BridgeCoordinates, ChartBackend,
    DeclarativeChartAdapter, DomMarkerFactory, JsRelayoutSurface, RepositionSubscriptions,
    RetainedChartAdapter,
};
use crate::infrastructure::websocket::{AnnotationSyncClient, SyncEvent, SyncHandle};
use crate::presentation::notifications::{show_notification, NotificationLevel};

/// Container element id used by the retained chart widget.
pub const RETAINED_CONTAINER_ID: &str = "stock-chart";

/// Wires the store, the resolved chart adapter, the table and the realtime
/// channel together. The chart container is exclusively owned by whichever
/// adapter the capability check resolved; the other stays unbuilt.
pub struct AnnotationCoordinator {
    store: AnnotationStore,
    backend: ChartBackend,
    declarative: Option<DeclarativeChartAdapter<JsRelayoutSurface>>,
    retained: Option<Rc<RefCell<RetainedChartAdapter<DomMarkerFactory>>>>,
    sync_handle: SyncHandle,
    _subscriptions: Option<RepositionSubscriptions>,
}

impl AnnotationCoordinator {
    pub fn new(backend: ChartBackend, sync_handle: SyncHandle, selection: SelectionFilter) -> Self {
        get_logger().info(
            LogComponent::Application("Coordinator"),
            &format!("Creating annotation coordinator with {backend} backend"),
        );
        let mut coordinator = Self {
            store: AnnotationStore::new(),
            backend,
            declarative: None,
            retained: None,
            sync_handle,
            _subscriptions: None,
        };
        // Selections can arrive through the wasm API before the coordinator
        // exists; adopt the recorded one so the first snapshot already
        // renders filtered.
        coordinator.store.set_filter(selection.stock, selection.date);
        match backend {
            ChartBackend::Declarative => {
                coordinator.declarative = Some(DeclarativeChartAdapter::new(JsRelayoutSurface));
            }
            ChartBackend::Retained => {
                let on_select: Rc<dyn Fn(Annotation)> =
                    Rc::new(|annotation| global_state::detail().set(Some(annotation)));
                match DomMarkerFactory::for_container_id(RETAINED_CONTAINER_ID, on_select) {
                    Some(factory) => {
                        let adapter = Rc::new(RefCell::new(RetainedChartAdapter::new(factory)));
                        coordinator._subscriptions = Some(wire_reposition_events(adapter.clone()));
                        coordinator.retained = Some(adapter);
                    }
                    None => get_logger().error(
                        LogComponent::Application("Coordinator"),
                        &format!("Chart container #{RETAINED_CONTAINER_ID} not found"),
                    ),
                }
            }
        }
        coordinator
    }

    pub fn backend(&self) -> ChartBackend {
        self.backend
    }

    pub fn sync_handle(&self) -> SyncHandle {
        self.sync_handle.clone()
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Full snapshot replacement from the realtime channel.
    pub fn replace_annotations(&mut self, annotations: Vec<Annotation>) {
        self.store.replace_all(annotations);
        self.render_all();
    }

    /// Update the (stock, date) selection and re-render everything.
    pub fn set_selection(&mut self, stock: Option<String>, date: Option<String>) {
        self.store.set_filter(stock, date);
        global_state::selection().set(self.store.filter().clone());
        self.render_all();
    }

    /// Push the filtered view into the table and the active chart adapter.
    /// A chart adapter failure never prevents the table from rendering.
    pub fn render_all(&mut self) {
        let filtered = self.store.filtered();
        global_state::annotation_count().set(self.store.len());
        global_state::filtered_annotations().set(filtered.clone());

        match self.backend {
            ChartBackend::Declarative => {
                if let Some(adapter) = &self.declarative {
                    adapter.apply(&filtered);
                }
            }
            ChartBackend::Retained => {
                if let Some(adapter) = &self.retained {
                    adapter.borrow_mut().apply(&filtered, &BridgeCoordinates);
                }
            }
        }
    }
}

// Global coordinator instance (thread-local for WASM)
thread_local! {
    static GLOBAL_COORDINATOR: RefCell<Option<AnnotationCoordinator>> = const { RefCell::new(None) };
}

pub fn with_global_coordinator<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&AnnotationCoordinator) -> R,
{
    GLOBAL_COORDINATOR.with(|global| global.borrow().as_ref().map(f))
}

pub fn with_global_coordinator_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut AnnotationCoordinator) -> R,
{
    GLOBAL_COORDINATOR.with(|global| global.borrow_mut().as_mut().map(f))
}

/// Await chart readiness, resolve the backend once, then start the realtime
/// channel. Called once from the app mount.
pub async fn bootstrap() {
    let Some(ready) = take_chart_ready() else {
        get_logger().warn(
            LogComponent::Application("Coordinator"),
            "Bootstrap already consumed chart readiness",
        );
        return;
    };
    let notified = match ready.await {
        Ok(backend) => backend,
        Err(_) => {
            get_logger().error(
                LogComponent::Application("Coordinator"),
                "Chart readiness channel dropped before resolution",
            );
            return;
        }
    };
    // The bootstrap script names a backend; trust the capability probe when
    // the two disagree.
    let backend = detect_backend().unwrap_or(notified);

    let client = AnnotationSyncClient::from_window_location();
    let handle = client.handle();
    let selection = global_state::selection().get_untracked();
    GLOBAL_COORDINATOR.with(|global| {
        *global.borrow_mut() = Some(AnnotationCoordinator::new(backend, handle, selection));
    });

    spawn_local(client.run(handle_sync_event));
    get_logger().info(
        LogComponent::Application("Coordinator"),
        "Annotation coordinator bootstrapped",
    );
}

fn handle_sync_event(event: SyncEvent) {
    match event {
        SyncEvent::Snapshot(annotations) | SyncEvent::Updated(annotations) => {
            get_logger().debug(
                LogComponent::Application("Coordinator"),
                &format!("Received {} annotations", annotations.len()),
            );
            with_global_coordinator_mut(|c| c.replace_annotations(annotations));
        }
        SyncEvent::ServerError(message) => {
            show_notification(message, NotificationLevel::Error);
        }
        SyncEvent::Connected => global_state::is_connected().set(true),
        SyncEvent::Disconnected { reason } => {
            get_logger().warn(
                LogComponent::Application("Coordinator"),
                &format!("Annotation channel lost: {reason}"),
            );
            global_state::is_connected().set(false);
        }
    }
}
