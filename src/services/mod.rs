pub mod enrichment_service;
pub mod list_service;
pub mod submission_service;
