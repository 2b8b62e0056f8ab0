//! Validating JSON extractor
//!
//! Every way a body can be wrong (bad JSON, wrong type, unknown enum label,
//! out-of-range value) becomes `AppError::ValidationError` before the handler
//! runs.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::AppError;

/// `Json<T>` that also runs `T::validate`
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::ValidationError(errors.to_string().trim().to_string()))?;

        Ok(Self(value))
    }
}
