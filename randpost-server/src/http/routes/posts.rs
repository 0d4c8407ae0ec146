//! Post endpoints
//!
//! - `GET /posts`: one random post as `{"content": ...}`
//! - `POST /posts`: create a post from `{"content": ...}`, 201 with no body

use std::future::Future;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::db::StoreError;
use crate::http::error::ApiError;
use crate::http::extractors::ValidNewPost;
use crate::models::RandomPost;
use crate::state::AppState;

/// Run a store call under the request deadline.
///
/// On expiry the call's future is dropped, which releases any connection it held.
async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| StoreError::Timeout(deadline))?
}

/// GET /posts - fetch one random post
async fn random_post(State(state): State<AppState>) -> Result<Json<RandomPost>, ApiError> {
    let content = with_deadline(state.request_timeout(), state.store().random_content()).await?;
    tracing::debug!(len = content.len(), "fetched random post");

    Ok(Json(RandomPost { content }))
}

/// POST /posts - create a post
async fn create_post(
    State(state): State<AppState>,
    ValidNewPost(post): ValidNewPost,
) -> Result<StatusCode, ApiError> {
    with_deadline(state.request_timeout(), state.store().insert_post(post.content())).await?;
    tracing::debug!(len = post.content().len(), "created post");

    Ok(StatusCode::CREATED)
}

/// Post routes
pub fn router() -> Router<AppState> {
    Router::new().route("/posts", get(random_post).post(create_post))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn deadline_turns_slow_call_into_timeout() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, StoreError>(())
        };
        let err = with_deadline(Duration::from_secs(1), slow).await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(d) if d == Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn deadline_passes_through_result() {
        let ok = with_deadline(Duration::from_secs(1), async { Ok::<_, StoreError>(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err = with_deadline(Duration::from_secs(1), async {
            Err::<(), _>(StoreError::NoRowsFound)
        })
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::NoRowsFound));
    }
}
