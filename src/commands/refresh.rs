use crate::api::receipt_processor::ReceiptTransport;
use crate::session::{ActionOutcome, ReceiptSession};
use super::list;

pub async fn execute<T>(session: &ReceiptSession<T>) -> Result<(), String>
where
    T: ReceiptTransport + ?Sized,
{
    match session.refresh().await {
        ActionOutcome::Dropped => Ok(()),
        // Both outcomes are visible in the view itself
        ActionOutcome::Succeeded | ActionOutcome::Failed(_) => list::execute(session).await,
    }
}
