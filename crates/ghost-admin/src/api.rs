//! The posts API contract.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::types::{BrowseParams, DeleteParams, NewPost, PostOptions, PostUpdate, ReadParams};

/// Operations on the posts resource of a Ghost site.
///
/// [`crate::AdminClient`] implements this over HTTP. Tool layers depend on
/// the trait so tests can substitute a fake.
///
/// Results are returned as raw JSON so callers see exactly what Ghost sent.
/// Errors are never retried or translated by implementations.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// List posts. The result keeps Ghost's envelope (`posts` plus
    /// `meta.pagination`).
    async fn browse(&self, params: BrowseParams) -> Result<Value>;

    /// Fetch a single post by id or slug.
    async fn read(&self, params: ReadParams) -> Result<Value>;

    /// Create a post and return it with server-assigned fields.
    async fn add(&self, post: NewPost, options: Option<PostOptions>) -> Result<Value>;

    /// Update a post. Fails with a 409 [`crate::Error::Api`] when
    /// `updated_at` is stale.
    async fn edit(&self, update: PostUpdate, options: Option<PostOptions>) -> Result<Value>;

    async fn delete(&self, params: DeleteParams) -> Result<()>;
}
