use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};

use crate::domain::annotation::Signal;
use crate::domain::errors::{ApiResult, AppError};
use crate::domain::logging::{get_logger, LogComponent};

/// Payload for `POST /api/annotations`; identity is assigned server-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAnnotation {
    pub stock: String,
    pub timestamp: String,
    pub signal: Signal,
    pub price: f64,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// REST client for the annotation endpoints.
#[derive(Debug, Clone, Default)]
pub struct AnnotationApi {
    base: String,
}

impl AnnotationApi {
    /// Same-origin client, the normal deployment.
    pub fn new() -> Self {
        Self { base: String::new() }
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Create an annotation. The server responds with a confirmation message
    /// and pushes the refreshed snapshot over the realtime channel.
    pub async fn create(&self, annotation: &NewAnnotation) -> ApiResult<()> {
        get_logger().info(
            LogComponent::Infrastructure("AnnotationApi"),
            &format!("Creating {} annotation for {}", annotation.signal, annotation.stock),
        );
        let response = Request::post(&self.url("/api/annotations"))
            .json(annotation)
            .map_err(|e| AppError::Network(format!("Failed to encode annotation: {e}")))?
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to create annotation: {e}")))?;
        Self::expect_ok(response).await
    }

    /// Delete an annotation by id key (numeric or string form).
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        get_logger().info(
            LogComponent::Infrastructure("AnnotationApi"),
            &format!("Deleting annotation {id}"),
        );
        let response = Request::delete(&self.url(&format!("/api/annotations/{id}")))
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to delete annotation: {e}")))?;
        Self::expect_ok(response).await
    }

    /// Delete the most recently created annotation.
    pub async fn delete_last(&self) -> ApiResult<()> {
        let response = Request::delete(&self.url("/api/annotations/last"))
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to delete last annotation: {e}")))?;
        Self::expect_ok(response).await
    }

    async fn expect_ok(response: Response) -> ApiResult<()> {
        let status = response.status();
        let body: Option<ApiMessage> = response.json().await.ok();
        if let Some(error) = body.as_ref().and_then(|b| b.error.clone()) {
            return Err(AppError::Network(error));
        }
        if !(200..300).contains(&status) {
            return Err(AppError::Network(format!("HTTP error: {status}")));
        }
        if let Some(message) = body.and_then(|b| b.message) {
            get_logger().debug(LogComponent::Infrastructure("AnnotationApi"), &message);
        }
        Ok(())
    }
}
