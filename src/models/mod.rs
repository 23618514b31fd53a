//! Data models shared by the client, services and view state

pub mod receipt;

pub use receipt::{Receipt, ReceiptId, ReceiptSummary};
