//! Remote blog service transport.
//!
//! [`BlogApi`] is the seam the controllers talk to; [`HttpBlogApi`] is the
//! reqwest implementation used in production.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Blog, BlogDraft, BlogId, User},
    error::ApiError,
    protocol::{Credentials, LoginResponse, UpdateBlogRequest, BLOGS_PATH, LOGIN_PATH},
};
use tracing::debug;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3003/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Blog>, ClientError>;
    async fn create(&self, token: Option<&str>, draft: &BlogDraft) -> Result<Blog, ClientError>;
    async fn update(
        &self,
        token: Option<&str>,
        id: &BlogId,
        blog: &Blog,
    ) -> Result<Blog, ClientError>;
    async fn remove(&self, token: Option<&str>, id: &BlogId) -> Result<(), ClientError>;
    async fn login(&self, credentials: &Credentials) -> Result<User, ClientError>;
}

#[derive(Debug)]
pub struct HttpBlogApiBuilder {
    base_url: String,
    timeout: Duration,
    client: Option<Client>,
}

impl HttpBlogApiBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a preconfigured reqwest client; the builder's timeout is then ignored.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<HttpBlogApi, ClientError> {
        let base_url = parse_base_url(&self.base_url)?;
        let http = match self.client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| ClientError::Configuration(e.to_string()))?,
        };
        Ok(HttpBlogApi { http, base_url })
    }
}

/// Normalizes the base so relative joins keep its path: `http://h/api` becomes
/// `http://h/api/`.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| ClientError::Configuration(format!("invalid server url '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::Configuration(format!(
            "server url '{raw}' cannot be used as a base"
        )));
    }
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct HttpBlogApi {
    http: Client,
    base_url: Url,
}

impl HttpBlogApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        HttpBlogApiBuilder::new(base_url).build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Configuration(format!("invalid endpoint '{path}': {e}")))
    }

    fn blog_endpoint(&self, id: &BlogId) -> Result<Url, ClientError> {
        self.endpoint(&format!("{BLOGS_PATH}/{id}"))
    }

    fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.header(AUTHORIZATION, format!("bearer {token}")),
            None => request,
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn rejection(response: Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let fallback = status.canonical_reason().unwrap_or("request failed");
        debug!(status = status.as_u16(), "api: request rejected");
        ClientError::api(
            status.as_u16(),
            ApiError::from_response(status.as_u16(), &body, fallback),
        )
    }
}

#[async_trait]
impl BlogApi for HttpBlogApi {
    async fn get_all(&self) -> Result<Vec<Blog>, ClientError> {
        let response = self.http.get(self.endpoint(BLOGS_PATH)?).send().await?;
        Self::decode(response).await
    }

    async fn create(&self, token: Option<&str>, draft: &BlogDraft) -> Result<Blog, ClientError> {
        let request = self.http.post(self.endpoint(BLOGS_PATH)?).json(draft);
        let response = Self::authorize(request, token).send().await?;
        Self::decode(response).await
    }

    async fn update(
        &self,
        token: Option<&str>,
        id: &BlogId,
        blog: &Blog,
    ) -> Result<Blog, ClientError> {
        let request = self
            .http
            .put(self.blog_endpoint(id)?)
            .json(&UpdateBlogRequest::from(blog));
        let response = Self::authorize(request, token).send().await?;
        Self::decode(response).await
    }

    async fn remove(&self, token: Option<&str>, id: &BlogId) -> Result<(), ClientError> {
        let request = self.http.delete(self.blog_endpoint(id)?);
        let response = Self::authorize(request, token).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejection(response).await)
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.endpoint(LOGIN_PATH)?)
            .json(credentials)
            .send()
            .await?;
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST
        ) {
            return Err(ClientError::WrongCredentials);
        }
        Self::decode::<LoginResponse>(response).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
