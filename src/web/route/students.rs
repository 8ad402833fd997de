use super::{FromValidated, HttpError, Json, SharedState};
use crate::types::{NewStudent, StudentPatch};

use axum::{
    extract::{Path, Query, State},
    response::{self, IntoResponse},
    routing::get,
    Router,
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawCreateBody {
    #[validate(required, length(min = 1, max = 255))]
    full_name: Option<String>,
    #[validate(required, length(min = 1, max = 255))]
    address: Option<String>,
    #[validate(required, length(min = 1, max = 255))]
    email: Option<String>,
    #[validate(required, length(min = 1, max = 32))]
    phone_number: Option<String>,
}

impl FromValidated for NewStudent {
    type Payload = RawCreateBody;

    fn from(body: RawCreateBody) -> NewStudent {
        NewStudent {
            full_name: body.full_name.expect("`fullName` should be Some"),
            address: body.address.expect("`address` should be Some"),
            email: body.email.expect("`email` should be Some"),
            phone_number: body.phone_number.expect("`phoneNumber` should be Some"),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RawUpdateBody {
    #[validate(length(min = 1, max = 255))]
    full_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    address: Option<String>,
    #[validate(length(min = 1, max = 255))]
    email: Option<String>,
    #[validate(length(min = 1, max = 32))]
    phone_number: Option<String>,
}

impl FromValidated for StudentPatch {
    type Payload = RawUpdateBody;

    fn from(body: RawUpdateBody) -> StudentPatch {
        StudentPatch {
            full_name: body.full_name,
            address: body.address,
            email: body.email,
            phone_number: body.phone_number,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchParams {
    q: Option<String>,
    address: Option<String>,
    email_domain: Option<String>,
}

async fn index(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, HttpError> {
    let registry = state.registry();

    let students = if let Some(query) = params.q.as_deref() {
        registry.search(query).await?
    } else if let Some(address) = params.address.as_deref() {
        registry.search_by_address(address).await?
    } else if let Some(domain) = params.email_domain.as_deref() {
        registry.search_by_email_domain(domain).await?
    } else {
        registry.get_all().await?
    };

    Ok(response::Json(students))
}

async fn create(
    State(state): State<SharedState>,
    Json(new_student): Json<NewStudent>,
) -> Result<impl IntoResponse, HttpError> {
    let student = state.registry().create(new_student).await?;
    Ok(response::Json(student))
}

async fn show(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    state
        .registry()
        .get_by_id(&id)
        .await?
        .map(response::Json)
        .ok_or(HttpError::NotFound(format!("Student id: {id}")))
}

async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(patch): Json<StudentPatch>,
) -> Result<impl IntoResponse, HttpError> {
    state
        .registry()
        .update(&id, patch)
        .await?
        .map(response::Json)
        .ok_or(HttpError::NotFound(format!("Student id: {id}")))
}

async fn remove(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = state.registry().delete(&id).await?;
    Ok(id)
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/students", get(index).post(create))
        .route("/students/:id", get(show).put(update).delete(remove))
        .with_state(state)
}
