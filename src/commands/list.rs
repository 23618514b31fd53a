use crate::api::receipt_processor::ReceiptTransport;
use crate::session::ReceiptSession;
use crate::state::ViewState;
use crate::utils::Table;

pub async fn execute<T>(session: &ReceiptSession<T>) -> Result<(), String>
where
    T: ReceiptTransport + ?Sized,
{
    let view = session.snapshot().await;
    println!("{}", render_view(&view, session.is_busy()));
    Ok(())
}

/// The whole screen: outcome of the last action, then the receipts
pub fn render_view(view: &ViewState, busy: bool) -> String {
    let mut out = Vec::new();

    if let Some(error) = view.error() {
        out.push(format!("❌ {}", error));
    }
    if busy {
        out.push("⏳ An action is still running...".to_string());
    }

    out.push("Processed Receipts".to_string());
    out.push(render_receipts(view));

    if let Some(at) = view.last_refreshed() {
        out.push(format!("Last refreshed: {}", at.format("%Y-%m-%d %H:%M:%S UTC")));
    }

    out.join("\n")
}

fn render_receipts(view: &ViewState) -> String {
    if view.receipts().is_empty() {
        return "No receipts processed yet.".to_string();
    }

    let mut table = Table::new(&["ID", "Retailer", "Date", "Time", "Total", "Points"]);
    for receipt in view.receipts() {
        let total = receipt.field_display("total");
        table.add_row(vec![
            receipt.id.to_string(),
            receipt.retailer(),
            receipt.field_display("purchaseDate"),
            receipt.field_display("purchaseTime"),
            if total.is_empty() { total } else { format!("${}", total) },
            receipt.points.map(|p| p.to_string()).unwrap_or_default(),
        ]);
    }
    table.render()
}
