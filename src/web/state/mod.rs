mod app;

pub use app::AppState;

use std::sync::Arc;

pub type SharedState = Arc<AppState>;
