//! Request extractors that reject with Problem Details

use crate::problem::Problem;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

/// JSON body whose rejections render as 400 Problem Details
///
/// Plain `axum::Json` answers type mismatches with 422 and a text body; the
/// storefront clients expect every malformed payload to be a 400 problem.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(malformed(rejection)),
        }
    }
}

fn malformed(rejection: JsonRejection) -> Problem {
    Problem::new(StatusCode::BAD_REQUEST, "Malformed Request").with_detail(rejection.body_text())
}
