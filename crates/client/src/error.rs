//! Errors from the API client layer.

use serde_json::Value;

/// Body of a response, as far as it could be read.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Empty,
}

impl ResponseBody {
    /// The `detail` field of a JSON error body, if it is a string.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(value) => value.get("detail").and_then(Value::as_str),
            _ => None,
        }
    }

    /// The `code` field the server attaches to error bodies.
    pub fn code(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(value) => value.get("code").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// The server answered with a non-2xx status.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Full request URL.
    pub url: String,
    /// `detail` from the body, or a generic message naming the status.
    pub message: String,
    pub body: ResponseBody,
}

impl ApiError {
    pub fn new(status: u16, url: impl Into<String>, body: ResponseBody) -> Self {
        let message = match body.detail() {
            Some(detail) => detail.to_string(),
            None => format!("Request failed with status {status}"),
        };
        Self {
            status,
            url: url.into(),
            message,
            body,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connect, DNS, TLS, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 2xx body did not match the expected shape.
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The request could not be built, so nothing was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// Short message suitable for an inline failure notice.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) => "Could not reach the server".to_string(),
            ClientError::Api(err) => err.message.clone(),
            ClientError::Decode { .. } => "The server sent an unexpected response".to_string(),
            ClientError::InvalidRequest(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_taken_from_detail() {
        let err = ApiError::new(
            404,
            "http://x/api/v1/users/9",
            ResponseBody::Json(json!({"detail": "User with id 9 not found", "code": "NOT_FOUND"})),
        );
        assert_eq!(err.message, "User with id 9 not found");
        assert_eq!(err.body.code(), Some("NOT_FOUND"));
        assert!(err.is_not_found());
    }

    #[test]
    fn generic_message_without_detail() {
        let err = ApiError::new(500, "http://x", ResponseBody::Text("boom".into()));
        assert_eq!(err.message, "Request failed with status 500");

        let err = ApiError::new(502, "http://x", ResponseBody::Json(json!({"error": "bad"})));
        assert_eq!(err.message, "Request failed with status 502");
    }

    #[test]
    fn non_string_detail_is_ignored() {
        let body = ResponseBody::Json(json!({"detail": [{"loc": ["body"]}]}));
        assert_eq!(body.detail(), None);
    }

    #[test]
    fn user_message_for_api_error() {
        let err = ClientError::from(ApiError::new(409, "u", ResponseBody::Empty));
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.user_message(), "Request failed with status 409");
    }

    #[test]
    fn invalid_request_has_no_status() {
        let err = ClientError::InvalidRequest("invalid MIME type 'png'".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "invalid MIME type 'png'");
    }
}
