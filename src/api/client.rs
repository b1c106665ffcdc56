// src/api/client.rs

//! REST client for the grading platform.
//!
//! All payload-shape tolerance lives here: list endpoints are decoded
//! through [`ListPayload`], which accepts either an `{items, totalCount}`
//! envelope or a flat array and normalizes both to [`Page`]. Anything that
//! fails to decode surfaces as an error for the caller's fallback to absorb.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::Page;
use crate::error::{AppError, Result};
use crate::models::ApiConfig;

/// Wire shape of a list endpoint response.
///
/// The platform's endpoints are split between page envelopes (with either
/// `totalCount` or `total`, and `users` instead of `items` on the accounts
/// endpoint) and bare arrays. An empty or field-less object decodes to the
/// empty envelope rather than failing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
enum ListPayload<T> {
    Envelope {
        #[serde(default, alias = "users", alias = "data")]
        items: Vec<T>,
        #[serde(default, alias = "totalCount")]
        total: u64,
    },
    Flat(Vec<T>),
}

impl<T> From<ListPayload<T>> for Page<T> {
    fn from(payload: ListPayload<T>) -> Self {
        match payload {
            ListPayload::Envelope { items, total } => {
                let total = total.max(items.len() as u64);
                Page { items, total }
            }
            ListPayload::Flat(items) => Page::from(items),
        }
    }
}

/// HTTP client for the grading platform API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    page_size: u32,
}

impl ApiClient {
    /// Create a client from API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = Url::parse(&config.base_url)?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
            page_size: config.page_size,
        })
    }

    /// Page size used when an endpoint is fetched without explicit paging.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Fetch a list endpoint and normalize its payload to a page.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Page<T>> {
        let url = self.endpoint(path)?;
        let mut request = self.client.get(url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::api(path, status.as_u16()));
        }

        log::debug!("GET {} -> {}", path, status);
        let payload: ListPayload<T> = response.json().await?;
        Ok(payload.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Student;

    fn decode(json: &str) -> Page<Student> {
        serde_json::from_str::<ListPayload<Student>>(json)
            .unwrap()
            .into()
    }

    #[test]
    fn test_envelope_payload() {
        let page = decode(r#"{"items": [{"id": 1, "code": "SE1", "name": "An"}], "totalCount": 40}"#);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 40);
    }

    #[test]
    fn test_flat_payload() {
        let page = decode(r#"[{"id": 1}, {"id": 2}]"#);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_users_alias() {
        let page = decode(r#"{"users": [{"id": 9}]}"#);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_empty_object_normalizes_to_empty_page() {
        let page = decode(r#"{}"#);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_scalar_payload_is_an_error() {
        assert!(serde_json::from_str::<ListPayload<Student>>(r#""oops""#).is_err());
    }
}
