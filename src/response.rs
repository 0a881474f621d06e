use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// `{ success, data, message }` wrapper used by every successful response.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    pub message: &'static str,
}

pub fn ok<T: Serialize>(data: T, message: &'static str) -> (StatusCode, Json<Envelope<T>>) {
    with_status(StatusCode::OK, data, message)
}

pub fn created<T: Serialize>(data: T, message: &'static str) -> (StatusCode, Json<Envelope<T>>) {
    with_status(StatusCode::CREATED, data, message)
}

fn with_status<T: Serialize>(
    status: StatusCode,
    data: T,
    message: &'static str,
) -> (StatusCode, Json<Envelope<T>>) {
    (
        status,
        Json(Envelope {
            success: true,
            data,
            message,
        }),
    )
}

pub async fn welcome() -> impl IntoResponse {
    Json(serde_json::json!({ "success": true, "message": "Welcome to userdesk" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shape() {
        let (status, Json(body)) = created(42, "done");
        assert_eq!(status, StatusCode::CREATED);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": 42, "message": "done"}));
    }
}
