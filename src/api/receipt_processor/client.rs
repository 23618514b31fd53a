use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use super::models::{ApiError, PointsResponse, ProcessResponse};
use super::transport::ReceiptTransport;
use crate::models::{ReceiptId, ReceiptSummary};
use crate::utils::extract_error_detail;
use tracing::{debug, warn};

/// Receipt processing service client
pub struct ReceiptProcessorClient {
    http_client: HttpClient,
    base_url: String,
}

impl ReceiptProcessorClient {
    /// Create a client rooted at `base_url`.
    ///
    /// An empty base means "same origin": paths are used without a prefix.
    pub fn new(base_url: &str) -> Self {
        Self::with_http_client(HttpClient::new(), base_url)
    }

    /// Create a client around an existing reqwest client
    pub fn with_http_client(http_client: HttpClient, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn receipts_url(&self) -> String {
        format!("{}/receipts", self.base_url)
    }

    fn points_url(&self, id: &ReceiptId) -> String {
        format!("{}/receipts/{}/points", self.base_url, id)
    }

    fn process_url(&self) -> String {
        format!("{}/receipts/process", self.base_url)
    }

    /// Create default headers for JSON exchange
    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();
        let detail = extract_error_detail(&body_text);

        match status_code {
            400 => ApiError::BadRequest(detail),
            404 => ApiError::NotFound(detail),
            409 => ApiError::Conflict(detail),
            500..=599 => {
                warn!("Server error {}: {}", status_code, detail);
                ApiError::ServerError(status_code, detail)
            }
            _ => ApiError::HttpError(status_code, detail),
        }
    }

    /// Turn a response into `T`, or the matching `ApiError` for non-2xx statuses
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ReceiptTransport for ReceiptProcessorClient {
    /// GET /receipts
    ///
    /// Retrieves every receipt the service has stored, without points.
    /// An empty store may come back as `null` rather than `[]`.
    async fn list_receipts(&self) -> Result<Vec<ReceiptSummary>, ApiError> {
        let url = self.receipts_url();
        debug!("GET {}", url);

        let response = self.http_client
            .get(&url)
            .headers(Self::create_headers())
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        let receipts: Option<Vec<ReceiptSummary>> = Self::read_json(response).await?;
        Ok(receipts.unwrap_or_default())
    }

    /// GET /receipts/{id}/points
    async fn get_points(&self, id: &ReceiptId) -> Result<PointsResponse, ApiError> {
        let url = self.points_url(id);
        debug!("GET {}", url);

        let response = self.http_client
            .get(&url)
            .headers(Self::create_headers())
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        Self::read_json(response).await
    }

    /// POST /receipts/process
    ///
    /// Sends the user's payload verbatim. The service assigns an id and scores it.
    ///
    /// # Returns
    /// * `Ok(ProcessResponse)` - Assigned id and points, either possibly missing
    /// * `Err(ApiError)` - Transport failure or non-2xx status
    async fn process_receipt(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<ProcessResponse, ApiError> {
        let url = self.process_url();
        debug!("POST {}", url);

        let response = self.http_client
            .post(&url)
            .headers(Self::create_headers())
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        Self::read_json(response).await
    }
}
