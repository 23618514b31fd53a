use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use super::models::{ApiError, PointsResponse, ProcessResponse};
use super::transport::ReceiptTransport;
use crate::models::{ReceiptId, ReceiptSummary};

/// `MockTransport` is an in-memory `ReceiptTransport` with scripted answers.
///
/// Every call is counted, points lookups may be delayed per receipt to force
/// out-of-order completion, and the highest number of simultaneous lookups is
/// recorded so fan-out limits can be asserted.
pub struct MockTransport {
    receipts: RwLock<Result<Vec<ReceiptSummary>, ApiError>>,
    list_delay: Duration,
    points: HashMap<String, Result<i64, ApiError>>,
    points_delays: HashMap<String, Duration>,
    process: Result<ProcessResponse, ApiError>,
    last_payload: RwLock<Option<Map<String, Value>>>,
    pub list_calls: AtomicUsize,
    pub points_calls: AtomicUsize,
    pub process_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            receipts: RwLock::new(Ok(Vec::new())),
            list_delay: Duration::ZERO,
            points: HashMap::new(),
            points_delays: HashMap::new(),
            process: Err(ApiError::ServerError(500, "no process response scripted".to_string())),
            last_payload: RwLock::new(None),
            list_calls: AtomicUsize::new(0),
            points_calls: AtomicUsize::new(0),
            process_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Script the list from a JSON array
    pub fn with_receipts(self, receipts: Value) -> Self {
        let parsed = serde_json::from_value(receipts).expect("mock receipts must be summaries");
        Self { receipts: RwLock::new(Ok(parsed)), ..self }
    }

    pub fn with_list_error(self, err: ApiError) -> Self {
        Self { receipts: RwLock::new(Err(err)), ..self }
    }

    pub fn with_list_delay(self, delay: Duration) -> Self {
        Self { list_delay: delay, ..self }
    }

    pub fn with_points(mut self, id: &str, points: i64) -> Self {
        self.points.insert(id.to_string(), Ok(points));
        self
    }

    pub fn with_points_error(mut self, id: &str, err: ApiError) -> Self {
        self.points.insert(id.to_string(), Err(err));
        self
    }

    pub fn with_points_delay(mut self, id: &str, delay: Duration) -> Self {
        self.points_delays.insert(id.to_string(), delay);
        self
    }

    pub fn with_process_response(self, response: Value) -> Self {
        let parsed = serde_json::from_value(response).expect("mock process response");
        Self { process: Ok(parsed), ..self }
    }

    pub fn with_process_error(self, err: ApiError) -> Self {
        Self { process: Err(err), ..self }
    }

    /// Replace the scripted list after construction, e.g. between two refreshes
    pub async fn set_receipts(&self, receipts: Value) {
        let parsed = serde_json::from_value(receipts).expect("mock receipts must be summaries");
        *self.receipts.write().await = Ok(parsed);
    }

    pub async fn last_payload(&self) -> Option<Map<String, Value>> {
        self.last_payload.read().await.clone()
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReceiptTransport for MockTransport {
    async fn list_receipts(&self) -> Result<Vec<ReceiptSummary>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if !self.list_delay.is_zero() {
            tokio::time::sleep(self.list_delay).await;
        }
        self.receipts.read().await.clone()
    }

    async fn get_points(&self, id: &ReceiptId) -> Result<PointsResponse, ApiError> {
        self.points_calls.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        let key = id.to_string();
        let delay = self.points_delays.get(&key).copied().unwrap_or(Duration::from_millis(1));
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.points.get(&key) {
            Some(Ok(points)) => Ok(PointsResponse { points: *points }),
            Some(Err(err)) => Err(err.clone()),
            None => Err(ApiError::NotFound("Receipt not found".to_string())),
        }
    }

    async fn process_receipt(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<ProcessResponse, ApiError> {
        self.process_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.write().await = Some(payload.clone());
        self.process.clone()
    }
}
