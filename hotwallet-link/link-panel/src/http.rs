use async_trait::async_trait;
use reqwest::Response;

use crate::client::api::ErrorResponse;

/// A response the operator backend did not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub status_code: u16,
    pub body: String,
    /// `error` field of a JSON error body.
    pub backend_error: Option<String>,
}

impl Rejection {
    pub fn new(status_code: u16, body: String) -> Self {
        let backend_error = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|res| res.error);
        Self {
            status_code,
            body,
            backend_error,
        }
    }

    /// Message reported for a rejected command.
    pub fn reason(&self) -> String {
        self.backend_error
            .clone()
            .unwrap_or_else(|| format!("HTTP error {}", self.status_code))
    }
}

#[async_trait]
pub trait ResponseExt: Sized {
    /// Pass 2xx responses through, anything else becomes a [`Rejection`].
    async fn accepted(self) -> Result<Self, Rejection>;
}

#[async_trait]
impl ResponseExt for Response {
    async fn accepted(self) -> Result<Self, Rejection> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }
        let body = match self.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read body of rejected response: {}", e);
                String::new()
            }
        };
        Err(Rejection::new(status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_reads_backend_error() {
        let rejection = Rejection::new(400, r#"{"error":"Invalid private key"}"#.to_string());
        assert_eq!(
            rejection.backend_error.as_deref(),
            Some("Invalid private key")
        );
        assert_eq!(rejection.reason(), "Invalid private key");
    }

    #[test]
    fn rejection_without_error_field_reports_status() {
        for body in ["boom", "{}", r#"{"error":null}"#, ""] {
            let rejection = Rejection::new(502, body.to_string());
            assert_eq!(rejection.backend_error, None);
            assert_eq!(rejection.reason(), "HTTP error 502");
            assert_eq!(rejection.body, body);
        }
    }
}
