//! Enrichment Service - attaches points to fetched receipt summaries
//!
//! Each summary gets its own points lookup. Lookups run concurrently, up to
//! `max_in_flight` at a time, and the results come back in input order no matter
//! which lookup finishes first. A failed lookup only costs that one receipt its
//! points; it is logged and never reported to the caller.

use futures::stream::{self, StreamExt};
use crate::api::receipt_processor::ReceiptTransport;
use crate::models::{Receipt, ReceiptSummary};

pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Fetch points for every summary and merge them in
pub async fn enrich_receipts<T>(
    transport: &T,
    summaries: Vec<ReceiptSummary>,
    max_in_flight: usize,
) -> Vec<Receipt>
where
    T: ReceiptTransport + ?Sized,
{
    let max_in_flight = max_in_flight.max(1);
    tracing::debug!("Enriching {} receipts ({} lookups at a time)", summaries.len(), max_in_flight);

    stream::iter(summaries)
        .map(|summary| enrich_one(transport, summary))
        .buffered(max_in_flight)
        .collect()
        .await
}

async fn enrich_one<T>(transport: &T, summary: ReceiptSummary) -> Receipt
where
    T: ReceiptTransport + ?Sized,
{
    match transport.get_points(&summary.id).await {
        Ok(response) => Receipt::from_summary(summary, Some(response.points)),
        Err(e) => {
            tracing::warn!("Error fetching points for receipt {}: {}", summary.id, e);
            Receipt::from_summary(summary, None)
        }
    }
}
