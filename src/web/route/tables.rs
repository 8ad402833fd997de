use super::{HttpError, SharedState};
use crate::types::TableInfo;

use axum::{
    extract::State,
    response::{self, IntoResponse},
    routing::get,
    Router,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Diagnostics {
    table_names: Vec<String>,
    table: Option<TableInfo>,
}

async fn index(State(state): State<SharedState>) -> Result<impl IntoResponse, HttpError> {
    let lifecycle = state.lifecycle();
    let table_names = lifecycle.list_all().await?;
    let table = lifecycle.describe().await?;

    Ok(response::Json(Diagnostics { table_names, table }))
}

pub fn router(state: SharedState) -> Router {
    Router::new().route("/tables", get(index)).with_state(state)
}
