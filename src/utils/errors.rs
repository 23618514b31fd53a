use crate::api::receipt_processor::models::ErrorResponse;

/// Extract clean error message from a service error body
///
/// The service answers failures with `{"error": "Receipt not found"}` (or a
/// `message` field), while plain handlers reply with text and a trailing newline.
///
/// Returns only the meaningful error message:
/// "Receipt not found"
pub fn extract_error_detail(body: &str) -> String {
    let trimmed = body.trim();

    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(trimmed) {
        if let Some(message) = parsed.error.or(parsed.message) {
            return message.trim().to_string();
        }
    }

    trimmed.to_string()
}
