mod students;
mod tables;

use super::error::HttpError;
use super::extractor::{FromValidated, Json};
use super::SharedState;

use axum::Router;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .merge(students::router(state.clone()))
        .merge(tables::router(state))
}
