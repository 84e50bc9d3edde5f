use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Role {
    Host,
    Guest,
}

/// Identity injected by the API gateway as a JSON `user` header. The gateway
/// has already authenticated the caller; this service only deserializes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoggedUser {
    pub username: String,
    pub role: Role,
}

impl<S> FromRequestParts<S> for LoggedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("user")
            .ok_or_else(|| ApiError::NotFound("User data not provided".to_string()))?;
        let raw = raw
            .to_str()
            .map_err(|_| ApiError::BadRequest("User data is not valid UTF-8".to_string()))?;
        let user: LoggedUser = serde_json::from_str(raw)
            .map_err(|_| ApiError::BadRequest("User data is not valid JSON".to_string()))?;
        if user.username.is_empty() {
            return Err(ApiError::BadRequest(
                "Missing logged user username parameter".to_string(),
            ));
        }
        Ok(user)
    }
}
