//! HTTP implementation of [`PostsApi`] against the Ghost Admin API.

use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::PostsApi;
use crate::config::ClientConfig;
use crate::types::{BrowseParams, DeleteParams, NewPost, PostOptions, PostUpdate, ReadParams};
use crate::{Error, Result};

/// Ghost's error envelope: `{"errors": [{"message": ..., "context": ...}]}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(default)]
    context: Option<String>,
}

/// Client for the posts endpoints of the Ghost Admin API.
///
/// A fresh token is minted for every request, so a single client can be
/// shared for the lifetime of the process.
pub struct AdminClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl AdminClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("ghost-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build `{api_base}/{segments...}/`. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl {
                url: self.config.api_base.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: Vec<(&'static str, String)>,
        body: Option<Value>,
    ) -> Result<reqwest::Response> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%method, %url, "Sending Admin API request");

        let mut request = self
            .http
            .request(method, url)
            .header("Authorization", format!("Ghost {}", self.config.key.token()?))
            .header("Accept-Version", &self.config.version);
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "Admin API request failed");
            return Err(api_error(status, &body));
        }

        Ok(response)
    }

    async fn send_json(
        &self,
        method: Method,
        segments: &[&str],
        query: Vec<(&'static str, String)>,
        body: Option<Value>,
    ) -> Result<Value> {
        let response = self.send(method, segments, query, body).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl PostsApi for AdminClient {
    async fn browse(&self, params: BrowseParams) -> Result<Value> {
        self.send_json(Method::GET, &["posts"], params.query_pairs(), None)
            .await
    }

    async fn read(&self, params: ReadParams) -> Result<Value> {
        let body = match (&params.id, &params.slug) {
            (Some(id), _) => {
                self.send_json(Method::GET, &["posts", id.as_str()], Vec::new(), None)
                    .await?
            }
            (None, Some(slug)) => {
                self.send_json(Method::GET, &["posts", "slug", slug.as_str()], Vec::new(), None)
                    .await?
            }
            (None, None) => return Err(Error::MissingIdentifier),
        };
        first_post(body)
    }

    async fn add(&self, post: NewPost, options: Option<PostOptions>) -> Result<Value> {
        let query = options.map(|o| o.query_pairs()).unwrap_or_default();
        let body = json!({ "posts": [serde_json::to_value(&post)?] });
        first_post(
            self.send_json(Method::POST, &["posts"], query, Some(body))
                .await?,
        )
    }

    async fn edit(&self, update: PostUpdate, options: Option<PostOptions>) -> Result<Value> {
        let query = options.map(|o| o.query_pairs()).unwrap_or_default();
        let id = update.id.clone();
        let body = json!({ "posts": [serde_json::to_value(&update)?] });
        first_post(
            self.send_json(Method::PUT, &["posts", id.as_str()], query, Some(body))
                .await?,
        )
    }

    async fn delete(&self, params: DeleteParams) -> Result<()> {
        self.send(Method::DELETE, &["posts", params.id.as_str()], Vec::new(), None)
            .await?;
        Ok(())
    }
}

/// Unwrap `{"posts": [post]}` to `post`.
fn first_post(mut body: Value) -> Result<Value> {
    body.get_mut("posts")
        .and_then(Value::as_array_mut)
        .filter(|posts| !posts.is_empty())
        .map(|posts| posts.swap_remove(0))
        .ok_or_else(|| Error::UnexpectedResponse {
            message: "response has no `posts` entry".to_string(),
        })
}

/// Map a failed response to [`Error::Api`], keeping Ghost's own message.
fn api_error(status: StatusCode, body: &str) -> Error {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.errors.into_iter().next());

    let (message, context) = match detail {
        Some(detail) => (detail.message, detail.context.filter(|c| !c.is_empty())),
        None if body.is_empty() => (
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            None,
        ),
        None => (body.to_string(), None),
    };

    Error::Api {
        status: status.as_u16(),
        message,
        context,
    }
}
