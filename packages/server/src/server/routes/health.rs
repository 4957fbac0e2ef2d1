use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::kernel::StoreResult;
use crate::server::app::AxumAppState;

const STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    installers: StoreHealth,
    customers: StoreHealth,
}

#[derive(Serialize)]
pub struct StoreHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn check(ping: impl std::future::Future<Output = StoreResult<()>>) -> StoreHealth {
    match tokio::time::timeout(STORE_TIMEOUT, ping).await {
        Ok(Ok(())) => StoreHealth {
            status: "ok".to_string(),
            error: None,
        },
        Ok(Err(e)) => StoreHealth {
            status: "error".to_string(),
            error: Some(format!("Query failed: {}", e)),
        },
        Err(_) => StoreHealth {
            status: "error".to_string(),
            error: Some("Query timeout (>5s)".to_string()),
        },
    }
}

/// Health check endpoint
///
/// Returns 200 OK if both stores answer, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let installers = check(state.deps.installers.ping()).await;
    let customers = check(state.deps.customers.ping()).await;

    let is_healthy = installers.status == "ok" && customers.status == "ok";
    let (status_code, status) = if is_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            installers,
            customers,
        }),
    )
}
