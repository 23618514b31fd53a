use crate::api::receipt_processor::ReceiptTransport;
use crate::session::{ActionOutcome, ReceiptSession};
use super::list;

pub async fn execute<T>(session: &ReceiptSession<T>, raw_text: &str) -> Result<(), String>
where
    T: ReceiptTransport + ?Sized,
{
    report(session, session.submit(raw_text).await).await
}

/// `$retry`: send the input kept from the last failed submission
pub async fn retry<T>(session: &ReceiptSession<T>) -> Result<(), String>
where
    T: ReceiptTransport + ?Sized,
{
    if session.snapshot().await.input().trim().is_empty() {
        return Err("Nothing to retry, the last submission went through".to_string());
    }
    report(session, session.resubmit().await).await
}

async fn report<T>(session: &ReceiptSession<T>, outcome: ActionOutcome) -> Result<(), String>
where
    T: ReceiptTransport + ?Sized,
{
    match outcome {
        ActionOutcome::Succeeded => {
            println!("✅ Receipt processed");
            list::execute(session).await
        }
        ActionOutcome::Failed(message) => {
            println!("❌ {}", message);
            println!("Your input was kept. Fix it and `$submit` again, or `$retry`.");
            Ok(())
        }
        ActionOutcome::Dropped => Ok(()),
    }
}
