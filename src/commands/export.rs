use crate::api::receipt_processor::ReceiptTransport;
use crate::session::ReceiptSession;

/// Print the collection as JSON, opaque fields included
pub async fn execute<T>(session: &ReceiptSession<T>) -> Result<(), String>
where
    T: ReceiptTransport + ?Sized,
{
    let view = session.snapshot().await;
    let json = serde_json::to_string_pretty(view.receipts())
        .map_err(|e| format!("Failed to encode receipts: {}", e))?;
    println!("{}", json);
    Ok(())
}
