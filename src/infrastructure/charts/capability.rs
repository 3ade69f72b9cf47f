use futures::channel::oneshot;
use std::cell::RefCell;
use strum::{Display as StrumDisplay, EnumString};

use super::bindings;
use crate::domain::logging::{get_logger, LogComponent};

/// Which chart library owns the container. Resolved once per page; the two
/// adapters never run concurrently against the same container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
pub enum ChartBackend {
    #[strum(serialize = "declarative")]
    Declarative,
    #[strum(serialize = "retained")]
    Retained,
}

/// Capability check against the chart bridge. The retained widget wins when
/// both handles are present, matching the original precedence.
pub fn detect_backend() -> Option<ChartBackend> {
    if bindings::is_retained_mounted() {
        Some(ChartBackend::Retained)
    } else if bindings::is_declarative_mounted() {
        Some(ChartBackend::Declarative)
    } else {
        None
    }
}

thread_local! {
    static CHART_READY: RefCell<(
        Option<oneshot::Sender<ChartBackend>>,
        Option<oneshot::Receiver<ChartBackend>>,
    )> = {
        let (tx, rx) = oneshot::channel();
        RefCell::new((Some(tx), Some(rx)))
    };
}

/// Called once by the chart bootstrap when the surface is usable. Replaces
/// the old poll-until-present initialization.
pub fn notify_chart_ready(backend: ChartBackend) {
    CHART_READY.with(|slot| match slot.borrow_mut().0.take() {
        Some(tx) => {
            get_logger().info(
                LogComponent::Infrastructure("ChartCapability"),
                &format!("Chart ready: {backend} backend"),
            );
            let _ = tx.send(backend);
        }
        None => get_logger().warn(
            LogComponent::Infrastructure("ChartCapability"),
            "Duplicate chart-ready notification ignored",
        ),
    });
}

/// One-shot readiness future, consumed by the coordinator at bootstrap.
pub fn take_chart_ready() -> Option<oneshot::Receiver<ChartBackend>> {
    CHART_READY.with(|slot| slot.borrow_mut().1.take())
}
