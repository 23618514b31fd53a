pub mod receipt_processor;
