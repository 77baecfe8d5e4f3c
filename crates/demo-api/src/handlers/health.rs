use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Liveness and readiness probe. Succeeds whenever the process is serving.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "healthy" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_healthy() {
        let Json(body) = health().await;
        assert_eq!(body.status, "healthy");
    }

    #[test]
    fn serializes_compact() {
        let body = serde_json::to_string(&HealthStatus { status: "healthy" }).unwrap();
        assert_eq!(body, r#"{"status":"healthy"}"#);
    }
}
