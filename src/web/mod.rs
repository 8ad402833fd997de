mod error;
mod extractor;
pub mod route;
mod state;

pub use state::{AppState, SharedState};
