use async_trait::async_trait;
use serde_json::{Map, Value};
use super::models::{ApiError, PointsResponse, ProcessResponse};
use crate::models::{ReceiptId, ReceiptSummary};

/// The three calls the client makes against the receipt processing service.
///
/// `ReceiptProcessorClient` talks HTTP; tests swap in an in-memory implementation.
#[async_trait]
pub trait ReceiptTransport: Send + Sync {
    /// GET /receipts
    async fn list_receipts(&self) -> Result<Vec<ReceiptSummary>, ApiError>;

    /// GET /receipts/{id}/points
    async fn get_points(&self, id: &ReceiptId) -> Result<PointsResponse, ApiError>;

    /// POST /receipts/process
    async fn process_receipt(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<ProcessResponse, ApiError>;
}
