use serde_json::{Map, Value};
use crate::api::receipt_processor::{ApiError, ReceiptTransport};
use crate::models::Receipt;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitError {
    #[error("Invalid JSON format")]
    InvalidFormat,
    #[error("Failed to process receipt: {}", .0.detail())]
    Transport(ApiError),
    #[error("Invalid response from server")]
    InvalidResponse,
}

/// Parse user text as a receipt payload.
///
/// Any JSON object is accepted as-is; the service decides what a valid receipt is.
pub fn parse_payload(raw_text: &str) -> Result<Map<String, Value>, SubmitError> {
    match serde_json::from_str::<Value>(raw_text) {
        Ok(Value::Object(payload)) => Ok(payload),
        Ok(other) => {
            tracing::debug!("Rejected payload that is not a JSON object: {}", other);
            Err(SubmitError::InvalidFormat)
        }
        Err(e) => {
            tracing::debug!("Rejected payload with invalid JSON: {}", e);
            Err(SubmitError::InvalidFormat)
        }
    }
}

/// Parse and send a receipt, returning the receipt to append on success.
///
/// Nothing reaches the network unless the text parses.
pub async fn submit_receipt<T>(transport: &T, raw_text: &str) -> Result<Receipt, SubmitError>
where
    T: ReceiptTransport + ?Sized,
{
    let payload = parse_payload(raw_text)?;

    let response = match transport.process_receipt(&payload).await {
        Ok(response) => response,
        Err(ApiError::DeserializationError(e)) => {
            tracing::error!("Error processing receipt: unreadable response: {}", e);
            return Err(SubmitError::InvalidResponse);
        }
        Err(e) => {
            tracing::error!("Error processing receipt: {}", e);
            return Err(SubmitError::Transport(e));
        }
    };

    let id = match response.id {
        Some(id) if !id.is_blank() => id,
        _ => {
            tracing::error!("Process response carried no receipt id");
            return Err(SubmitError::InvalidResponse);
        }
    };

    tracing::info!("Receipt processed (id: {}, points: {:?})", id, response.points);

    Ok(Receipt::new(id, payload, response.points))
}
