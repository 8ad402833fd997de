use crate::web::error::HttpError;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest},
    http::Request,
};
use serde::Deserialize;
use validator::Validate;

/// JSON extractor that deserializes a raw payload, validates it and converts
/// it into the domain type.
pub struct Json<J>(pub J);

#[async_trait]
impl<S, B, J> FromRequest<S, B> for Json<J>
where
    B: Send + 'static,
    S: Send + Sync,
    J: FromValidated + 'static,
    axum::Json<<J as FromValidated>::Payload>: FromRequest<S, B, Rejection = JsonRejection>,
{
    type Rejection = HttpError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(payload) =
            axum::Json::<<J as FromValidated>::Payload>::from_request(req, state)
                .await
                .map_err(|err| HttpError::Unprocessable(format!("{err}")))?;
        payload.validate().map_err(HttpError::Validation)?;
        Ok(Self(FromValidated::from(payload)))
    }
}

pub trait FromValidated {
    type Payload: Validate + for<'de> Deserialize<'de>;

    fn from(payload: Self::Payload) -> Self;
}
