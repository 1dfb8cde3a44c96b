use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ApiError;

/// A JSON body extractor whose rejections use the API's error shape.
///
/// `axum::Json` rejects unparsable bodies with a plain-text 4xx. Request bodies here are
/// structs of `Option` fields, so presence is checked by the handlers. A body that is not a
/// JSON object, or that fails to deserialize at all, becomes an `ApiError::Validation`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::Validation("failed to read request body".to_string()))?;

        let value = serde_json::from_slice::<Value>(&bytes)
            .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))?;
        // Derived struct impls would otherwise accept a positional array.
        if !value.is_object() {
            return Err(ApiError::Validation(
                "Invalid request body: expected a JSON object".to_string(),
            ));
        }

        serde_json::from_value::<T>(value)
            .map(JsonBody)
            .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))
    }
}

/// Returns the value of a required request field or a missing-field error.
pub fn require<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::missing_field(field))
}
