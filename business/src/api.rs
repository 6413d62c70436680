//! Platform directory API client.
//!
//! Network IO for the user directory lives here and is only ever driven by
//! commands; computes and UI code never call it directly. Responses are
//! parsed into typed models at this boundary, so a payload the models
//! reject never reaches rendering.

use thiserror::Error;

use crate::users::PlatformUser;

/// Failure modes of a directory call, in the order they can occur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("API returned status: {0}")]
    Status(u16),
    /// The body did not match the expected shape.
    #[error("Failed to parse user list: {0}")]
    Parse(String),
}

/// A typed API result.
pub type ApiResult<T> = Result<T, ApiError>;

/// GET `/utenti`
///
/// Returns the platform user directory as a bare JSON array.
pub async fn list_users(api_base_url: &str) -> ApiResult<Vec<PlatformUser>> {
    let url = format!("{api_base_url}/utenti");

    let response = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    if status != 200 {
        return Err(ApiError::Status(status));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    serde_json::from_slice(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_carries_the_code() {
        assert_eq!(
            ApiError::Status(500).to_string(),
            "API returned status: 500"
        );
    }

    #[test]
    fn test_parse_error_message_names_the_payload() {
        let err = ApiError::Parse("missing field `ruolo`".to_string());
        assert!(err.to_string().starts_with("Failed to parse user list"));
    }
}
