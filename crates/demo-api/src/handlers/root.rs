use axum::Json;
use serde::Serialize;

pub const GREETING: &str = "Hello from demo API!";

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}

pub async fn root() -> Json<Greeting> {
    Json(Greeting { message: GREETING })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_greeting() {
        let Json(body) = root().await;
        assert_eq!(body.message, "Hello from demo API!");
    }

    #[test]
    fn serializes_compact() {
        let body = serde_json::to_string(&Greeting { message: GREETING }).unwrap();
        assert_eq!(body, r#"{"message":"Hello from demo API!"}"#);
    }
}
