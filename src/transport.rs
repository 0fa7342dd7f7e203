//! Quick-add network exchange.
//!
//! The form is POSTed URL-encoded to its resolved action with the
//! `X-Requested-With: XMLHttpRequest` header, and the server answers
//! `{"success": bool, "message"?: string}`. A missing or falsy `success`
//! counts as a rejection, so the server's `message` still reaches the user.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::config::QuickAddConfig;
use crate::error::{Result, TransportError};
use crate::types::FormSubmission;

/// Server verdict on a quick-add submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuickAddResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl QuickAddResponse {
    pub fn accepted() -> Self {
        Self { success: true, message: None }
    }

    pub fn rejected(message: Option<&str>) -> Self {
        Self {
            success: false,
            message: message.map(str::to_string),
        }
    }
}

/// Only `true`, non-zero numbers and non-empty strings, arrays or objects pass.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Performs the asynchronous form POST.
#[async_trait(?Send)]
pub trait FormTransport {
    async fn post_form(&self, submission: &FormSubmission) -> Result<QuickAddResponse>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &QuickAddConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| TransportError::InvalidUrl {
            action: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    /// Resolve a form action against the page URL. An empty action posts
    /// back to the page itself.
    pub fn resolve(&self, action: &str) -> Result<Url> {
        self.base_url
            .join(action)
            .map_err(|e| TransportError::InvalidUrl {
                action: action.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait(?Send)]
impl FormTransport for HttpTransport {
    async fn post_form(&self, submission: &FormSubmission) -> Result<QuickAddResponse> {
        let url = self.resolve(&submission.action)?;
        debug!(url = %url, fields = submission.fields.len(), "posting quick-add form");

        let response = self
            .client
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .form(&submission.fields)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        let config = QuickAddConfig {
            base_url: base.to_string(),
            ..QuickAddConfig::default()
        };
        HttpTransport::new(&config).unwrap()
    }

    #[test]
    fn test_resolve_relative_action() {
        let t = transport("https://shop.example.com/inventory/products/");
        assert_eq!(
            t.resolve("/inventory/quick-add/").unwrap().as_str(),
            "https://shop.example.com/inventory/quick-add/"
        );
        assert_eq!(
            t.resolve("add/").unwrap().as_str(),
            "https://shop.example.com/inventory/products/add/"
        );
    }

    #[test]
    fn test_empty_action_posts_to_page() {
        let t = transport("https://shop.example.com/orders/12/");
        assert_eq!(t.resolve("").unwrap().as_str(), "https://shop.example.com/orders/12/");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = QuickAddConfig {
            base_url: "not a url".to_string(),
            ..QuickAddConfig::default()
        };
        assert!(matches!(
            HttpTransport::new(&config),
            Err(TransportError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_response_message_is_optional() {
        let ok: QuickAddResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(ok, QuickAddResponse::accepted());

        let rejected: QuickAddResponse =
            serde_json::from_str(r#"{"success": false, "message": "Out of stock"}"#).unwrap();
        assert_eq!(rejected, QuickAddResponse::rejected(Some("Out of stock")));
    }

    #[test]
    fn test_missing_success_is_a_rejection() {
        let reply: QuickAddResponse =
            serde_json::from_str(r#"{"message": "Duplicate SKU"}"#).unwrap();
        assert_eq!(reply, QuickAddResponse::rejected(Some("Duplicate SKU")));

        for body in [r#"{"success": null}"#, r#"{"success": 0}"#, r#"{"success": ""}"#] {
            let reply: QuickAddResponse = serde_json::from_str(body).unwrap();
            assert!(!reply.success, "{body}");
        }
        let reply: QuickAddResponse = serde_json::from_str(r#"{"success": 1}"#).unwrap();
        assert!(reply.success);
    }
}
