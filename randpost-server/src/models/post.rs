//! Post request and response bodies

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::BodyError;

/// Wire shape of a creation request; unknown fields are ignored.
#[derive(Deserialize)]
struct CreatePostRequest {
    content: String,
}

/// Validated input for a new post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    content: String,
}

impl NewPost {
    /// Decode a raw request body.
    ///
    /// # Rules
    /// - Body must parse as a JSON object, else `MalformedRequestBody`
    /// - `content` must be present and a JSON string, else `MissingOrInvalidField`
    /// - Length is not checked here; the column enforces it
    ///
    /// # Example
    /// ```
    /// use randpost_server::models::NewPost;
    ///
    /// assert!(NewPost::from_json(br#"{"content":"hi"}"#).is_ok());
    /// assert!(NewPost::from_json(b"{}").is_err());
    /// assert!(NewPost::from_json(b"not json").is_err());
    /// ```
    pub fn from_json(body: &[u8]) -> Result<Self, BodyError> {
        let object: Map<String, Value> =
            serde_json::from_slice(body).map_err(|e| BodyError::MalformedRequestBody {
                reason: e.to_string(),
            })?;

        let request: CreatePostRequest = serde_json::from_value(Value::Object(object))
            .map_err(|_| BodyError::MissingOrInvalidField { field: "content" })?;

        Ok(Self {
            content: request.content,
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Body of a successful `GET /posts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomPost {
    pub content: String,
}
