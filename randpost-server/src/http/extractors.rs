//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};

use super::error::ApiError;
use crate::models::{BodyError, NewPost};

/// Extract and validate a new post from the request body.
///
/// Unlike `Json<T>`, the Content-Type header is not required and every
/// decode failure is a 400.
pub struct ValidNewPost(pub NewPost);

impl<S> FromRequest<S> for ValidNewPost
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::Body(BodyError::MalformedRequestBody {
                reason: e.body_text(),
            })
        })?;

        Ok(Self(NewPost::from_json(&body)?))
    }
}
