//! REST store client using reqwest

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shelf_domain::{Book, BookDraft, BookId};
use std::time::Duration;

use super::{BookStore, StoreError};
use crate::config::ApiConfig;

/// Client for the `/books` endpoints of the remote store
pub struct HttpBookStore {
    client: Client,
    base_url: String,
}

impl HttpBookStore {
    /// Build a client for `base_url` with a fixed per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let parsed = url::Url::parse(base_url).map_err(|_| StoreError::InvalidUrl {
            url: base_url.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StoreError::InvalidUrl {
                url: base_url.to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::RequestFailed {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, StoreError> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/books", self.base_url)
    }

    fn item_url(&self, id: BookId) -> String {
        format!("{}/books/{}", self.base_url, id)
    }

    /// Turn non-success statuses into errors, keeping the body for diagnostics.
    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let response = Self::check(response).await?;
        response.json().await.map_err(|e| StoreError::ParseError {
            message: e.to_string(),
        })
    }
}

fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout
    } else {
        StoreError::RequestFailed {
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl BookStore for HttpBookStore {
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let url = self.collection_url();
        tracing::debug!(%url, "GET books");
        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        Self::parse(response).await
    }

    async fn create(&self, draft: BookDraft) -> Result<Book, StoreError> {
        let url = self.collection_url();
        tracing::debug!(%url, title = %draft.title, "POST book");
        let response = self
            .client
            .post(&url)
            .json(&draft)
            .send()
            .await
            .map_err(transport_error)?;
        Self::parse(response).await
    }

    async fn update(&self, book: Book) -> Result<Book, StoreError> {
        let url = self.item_url(book.id);
        tracing::debug!(%url, "PUT book");
        let response = self
            .client
            .put(&url)
            .json(&book)
            .send()
            .await
            .map_err(transport_error)?;
        Self::parse(response).await
    }

    async fn delete(&self, id: BookId) -> Result<(), StoreError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "DELETE book");
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(transport_error)?;
        Self::check(response).await?;
        Ok(())
    }
}
