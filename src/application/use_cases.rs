use leptos::SignalGetUntracked;
use wasm_bindgen_futures::spawn_local;

use crate::application::coordinator::with_global_coordinator;
use crate::domain::annotation::{SelectedPoint, Signal};
use crate::domain::errors::{ApiResult, AppError};
use crate::domain::logging::{get_logger, LogComponent};
use crate::global_state;
use crate::infrastructure::http::{AnnotationApi, NewAnnotation};
use crate::infrastructure::websocket::SyncHandle;
use crate::presentation::notifications::{show_notification, NotificationLevel};
use crate::time_utils;

/// Delay before the refetch that follows a local mutation, giving
/// server-side persistence time to settle.
pub const MUTATION_REFETCH_DELAY_MS: u64 = 500;

/// Validate a create request before any network call.
pub fn build_annotation_request(
    point: Option<&SelectedPoint>,
    stock: Option<&str>,
    signal: Signal,
    reason: &str,
) -> Result<NewAnnotation, AppError> {
    let point = point
        .ok_or_else(|| AppError::Validation("Please select a point on the chart first".into()))?;
    let stock = stock
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("No stock selected".into()))?;
    if time_utils::parse_timestamp(&point.timestamp).is_none() {
        return Err(AppError::Validation(format!("Invalid timestamp: {}", point.timestamp)));
    }
    if !point.price.is_finite() {
        return Err(AppError::Validation("Invalid price for annotation".into()));
    }
    Ok(NewAnnotation {
        stock: stock.to_string(),
        timestamp: point.timestamp.clone(),
        signal,
        price: point.price,
        reason: reason.to_string(),
    })
}

/// Create an annotation, then schedule a snapshot refetch. The pushed
/// snapshot, not the HTTP response, is what updates the store.
pub async fn create_annotation(
    api: &AnnotationApi,
    sync: &SyncHandle,
    request: NewAnnotation,
) -> ApiResult<()> {
    api.create(&request).await?;
    sync.request_annotations_after(MUTATION_REFETCH_DELAY_MS);
    Ok(())
}

/// Delete by id and wait for the server push; no optimistic local removal.
pub async fn delete_annotation(api: &AnnotationApi, sync: &SyncHandle, id: &str) -> ApiResult<()> {
    api.delete(id).await?;
    sync.request_annotations_after(MUTATION_REFETCH_DELAY_MS);
    Ok(())
}

/// Delete the most recent annotation.
pub async fn delete_last_annotation(api: &AnnotationApi, sync: &SyncHandle) -> ApiResult<()> {
    api.delete_last().await?;
    sync.request_annotations_after(MUTATION_REFETCH_DELAY_MS);
    Ok(())
}

fn sync_handle() -> Option<SyncHandle> {
    with_global_coordinator(|c| c.sync_handle())
}

/// Button entry point: create an annotation for the selected chart point.
pub fn spawn_create_annotation(signal: Signal, reason: String) {
    let point = global_state::selected_point().get_untracked();
    let stock = global_state::selection().get_untracked().stock;
    let request = match build_annotation_request(point.as_ref(), stock.as_deref(), signal, &reason)
    {
        Ok(request) => request,
        Err(e) => {
            show_notification(e.to_string(), NotificationLevel::Warning);
            return;
        }
    };
    let Some(sync) = sync_handle() else {
        show_notification("Annotation sync not ready yet", NotificationLevel::Warning);
        return;
    };
    spawn_local(async move {
        let api = AnnotationApi::new();
        match create_annotation(&api, &sync, request).await {
            Ok(()) => show_notification("Annotation added successfully", NotificationLevel::Success),
            Err(e) => {
                get_logger().error(
                    LogComponent::Application("UseCases"),
                    &format!("Create failed: {e}"),
                );
                show_notification(format!("Error adding annotation: {e}"), NotificationLevel::Error);
            }
        }
    });
}

/// Table entry point: delete one annotation by id key.
pub fn spawn_delete_annotation(id: String) {
    let Some(sync) = sync_handle() else {
        show_notification("Annotation sync not ready yet", NotificationLevel::Warning);
        return;
    };
    spawn_local(async move {
        let api = AnnotationApi::new();
        match delete_annotation(&api, &sync, &id).await {
            Ok(()) => {
                show_notification("Annotation deleted successfully", NotificationLevel::Success)
            }
            Err(e) => {
                get_logger().error(
                    LogComponent::Application("UseCases"),
                    &format!("Delete failed: {e}"),
                );
                show_notification(
                    format!("Error deleting annotation: {e}"),
                    NotificationLevel::Error,
                );
            }
        }
    });
}

/// Button entry point: delete the most recent annotation.
pub fn spawn_delete_last() {
    let Some(sync) = sync_handle() else {
        show_notification("Annotation sync not ready yet", NotificationLevel::Warning);
        return;
    };
    spawn_local(async move {
        let api = AnnotationApi::new();
        match delete_last_annotation(&api, &sync).await {
            Ok(()) => {
                show_notification("Last annotation deleted successfully", NotificationLevel::Success)
            }
            Err(e) => show_notification(
                format!("Error deleting annotation: {e}"),
                NotificationLevel::Error,
            ),
        }
    });
}
