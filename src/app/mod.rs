pub mod context;
pub mod controller;
pub mod event;
pub mod mode;
pub mod state;

pub use context::AppContext;
pub use controller::Controller;
pub use mode::Mode;
pub use state::AppState;
