pub mod view_state;
pub mod liveness;

pub use view_state::ViewState;
pub use liveness::Liveness;
