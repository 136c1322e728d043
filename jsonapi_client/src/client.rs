//! HTTP client for JSON:API servers.

use std::time::Duration;

use reqwest::{header, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    query::Query,
    types::{Document, ResourceObject},
    ApiError, Error, Response,
};

/// Request timeout for API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Media type for JSON:API request and response bodies.
const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

const USER_AGENT: &str = concat!("jsonapi_client/", env!("CARGO_PKG_VERSION"));

/// HTTP client for a JSON:API server.
///
/// Every non-success response is turned into an [`ApiError`] and returned as
/// [`Error::Api`]; transport and decoding failures are logged and returned as
/// [`Error::RequestFailed`].
pub struct Client {
    client: reqwest::Client,
    /// Base URL that request paths are appended to.
    base_api_url: String,
}

impl Client {
    /// Creates a new client for the API rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            client,
            base_api_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(header::ACCEPT, JSON_API_MEDIA_TYPE)
    }

    /// Sends the request and returns the body text of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<String, Error> {
        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            return Err(api_error(status, &body).into());
        }

        Ok(body)
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        let body = self.send(self.request(Method::GET, url)).await?;
        parse(&body)
    }

    async fn send_document<D, T>(
        &self,
        method: Method,
        path: &str,
        document: &D,
    ) -> Result<Option<T>, Error>
    where
        D: Serialize,
        T: DeserializeOwned,
    {
        let url = self.get_url(path, None::<&crate::ResourceQuery>)?;
        let payload = serde_json::to_vec(document).map_err(|e| {
            tracing::error!("Failed to serialize request document: {}", e);
            Error::RequestFailed
        })?;
        let request = self
            .request(method, url)
            .header(header::CONTENT_TYPE, JSON_API_MEDIA_TYPE)
            .body(payload);
        let body = self.send(request).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        parse(&body).map(Some)
    }

    /// Fetches a single resource, e.g. `/articles/1`.
    pub async fn fetch_resource<Q: Query>(
        &self,
        path: &str,
        query: Option<&Q>,
    ) -> Result<Document<ResourceObject>, Error> {
        self.get::<Document<ResourceObject>, Q>(path, query).await
    }

    /// Fetches a collection of resources, e.g. `/articles`.
    pub async fn fetch_collection<Q: Query>(
        &self,
        path: &str,
        query: Option<&Q>,
    ) -> Result<Document<Vec<ResourceObject>>, Error> {
        self.get::<Document<Vec<ResourceObject>>, Q>(path, query)
            .await
    }

    /// Creates a resource with a POST to the collection at `path`.
    ///
    /// Returns `None` when the server accepts the request without a body.
    pub async fn create_resource(
        &self,
        path: &str,
        document: &Document<ResourceObject>,
    ) -> Result<Option<Document<ResourceObject>>, Error> {
        self.send_document(Method::POST, path, document).await
    }

    /// Updates the resource at `path` with a PATCH.
    ///
    /// Returns `None` when the server accepts the request without a body.
    pub async fn update_resource(
        &self,
        path: &str,
        document: &Document<ResourceObject>,
    ) -> Result<Option<Document<ResourceObject>>, Error> {
        self.send_document(Method::PATCH, path, document).await
    }

    /// Deletes the resource at `path`.
    pub async fn delete_resource(&self, path: &str) -> Result<(), Error> {
        let url = self.get_url(path, None::<&crate::ResourceQuery>)?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

fn api_error(status: StatusCode, body: &str) -> ApiError {
    let error = ApiError::new(&Response::from_text(status.as_u16(), body));
    tracing::warn!(
        status = error.status(),
        kind = %error.kind(),
        "{}",
        error.summary()
    );
    error
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str::<T>(body).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::RequestFailed
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
