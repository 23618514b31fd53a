use crate::api::receipt_processor::{ApiError, ReceiptTransport};
use crate::models::Receipt;
use crate::services::enrichment_service;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RefreshError {
    #[error("Failed to fetch receipts: {}", .0.detail())]
    Fetch(#[from] ApiError),
}

/// Load the whole collection and enrich it with points.
///
/// Only the list call can fail; points lookups degrade per receipt.
pub async fn fetch_receipts<T>(transport: &T, max_in_flight: usize) -> Result<Vec<Receipt>, RefreshError>
where
    T: ReceiptTransport + ?Sized,
{
    let summaries = transport.list_receipts().await.map_err(|e| {
        tracing::error!("Error fetching receipts: {}", e);
        RefreshError::from(e)
    })?;

    tracing::debug!("Fetched {} receipts", summaries.len());

    Ok(enrichment_service::enrich_receipts(transport, summaries, max_in_flight).await)
}
