pub mod table;
pub mod errors;

pub use table::Table;
pub use errors::extract_error_detail;
