use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use crate::models::ReceiptId;

/// Response from GET receipt points endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: i64,
}

/// Response from POST process receipt endpoint
///
/// Both fields are optional on the wire; a response without an id is rejected by the
/// submission handler rather than here. Points the client cannot read as a whole number
/// are dropped instead of failing the response, since the receipt is already stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessResponse {
    #[serde(default)]
    pub id: Option<ReceiptId>,
    #[serde(default, deserialize_with = "lenient_points")]
    pub points: Option<i64>,
}

fn lenient_points<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let points = value.as_ref().and_then(points_from_value);
    if points.is_none() {
        if let Some(other) = value.filter(|v| !v.is_null()) {
            tracing::warn!("Ignoring unreadable points value {}", other);
        }
    }
    Ok(points)
}

fn points_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Error response from the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Error type for receipt service operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 409 Conflict (receipt already processed)
    #[error("Conflict: {0}")]
    Conflict(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// The detail shown to the user: the server's own words when it sent any,
    /// otherwise the status class or the transport failure message.
    pub fn detail(&self) -> String {
        match self {
            ApiError::BadRequest(body)
            | ApiError::NotFound(body)
            | ApiError::Conflict(body)
            | ApiError::ServerError(_, body)
            | ApiError::HttpError(_, body)
                if !body.is_empty() =>
            {
                body.clone()
            }
            ApiError::BadRequest(_) => "Bad Request".to_string(),
            ApiError::NotFound(_) => "Not Found".to_string(),
            ApiError::Conflict(_) => "Conflict".to_string(),
            ApiError::ServerError(status, _) => format!("Server Error ({})", status),
            ApiError::HttpError(status, _) => format!("HTTP Error ({})", status),
            ApiError::RequestError(msg) | ApiError::DeserializationError(msg) => msg.clone(),
        }
    }
}
