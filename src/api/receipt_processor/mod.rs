pub mod client;
pub mod models;
pub mod transport;
#[cfg(test)]
pub mod mock;

pub use client::ReceiptProcessorClient;
pub use models::ApiError;
pub use transport::ReceiptTransport;
