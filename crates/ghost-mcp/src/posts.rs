//! Posts tool handlers
//!
//! Binds the five posts tools to a [`GhostMcpServer`]. Each handler checks
//! the argument shape, makes exactly one call on the [`PostsApi`] it was
//! given, and wraps the result as a single text item. Upstream errors are
//! returned untouched; nothing is retried.

use std::sync::Arc;

use ghost_admin::{
    BrowseParams, DeleteParams, NewPost, PostOptions, PostUpdate, PostsApi, ReadParams,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::server::GhostMcpServer;
use crate::tools::{self, ToolResult};
use crate::{Error, Result};

/// Register `posts_browse`, `posts_read`, `posts_add`, `posts_edit` and
/// `posts_delete` on `server`, all backed by `client`.
pub fn register_post_tools(server: &mut GhostMcpServer, client: Arc<dyn PostsApi>) {
    for definition in tools::post_tool_definitions() {
        let api = Arc::clone(&client);
        let name = definition.name.clone();
        match name.as_str() {
            tools::POSTS_BROWSE => server.register_tool(definition, move |args| {
                handle_browse(Arc::clone(&api), args)
            }),
            tools::POSTS_READ => server.register_tool(definition, move |args| {
                handle_read(Arc::clone(&api), args)
            }),
            tools::POSTS_ADD => server.register_tool(definition, move |args| {
                handle_add(Arc::clone(&api), args)
            }),
            tools::POSTS_EDIT => server.register_tool(definition, move |args| {
                handle_edit(Arc::clone(&api), args)
            }),
            tools::POSTS_DELETE => server.register_tool(definition, move |args| {
                handle_delete(Arc::clone(&api), args)
            }),
            other => tracing::warn!(tool = %other, "No handler for tool; skipping"),
        }
    }

    tracing::info!(tools = server.tools().len(), "Registered posts tools");
}

/// Handle posts_browse - forward the query verbatim
async fn handle_browse(client: Arc<dyn PostsApi>, arguments: Value) -> Result<ToolResult> {
    let params: BrowseParams = parse_arguments(arguments)?;
    let posts = client.browse(params).await?;
    serialize_response(&posts)
}

/// Handle posts_read - an empty query is forwarded as-is
async fn handle_read(client: Arc<dyn PostsApi>, arguments: Value) -> Result<ToolResult> {
    let params: ReadParams = parse_arguments(arguments)?;
    let post = client.read(params).await?;
    serialize_response(&post)
}

/// Handle posts_add
async fn handle_add(client: Arc<dyn PostsApi>, arguments: Value) -> Result<ToolResult> {
    let post: NewPost = parse_arguments(arguments)?;
    let options = PostOptions::for_html(post.fields.html.as_deref());
    let created = client.add(post, options).await?;
    serialize_response(&created)
}

/// Handle posts_edit - a stale `updated_at` fails upstream with a conflict
async fn handle_edit(client: Arc<dyn PostsApi>, arguments: Value) -> Result<ToolResult> {
    let update: PostUpdate = parse_arguments(arguments)?;
    let options = PostOptions::for_html(update.fields.html.as_deref());
    let updated = client.edit(update, options).await?;
    serialize_response(&updated)
}

/// Handle posts_delete
async fn handle_delete(client: Arc<dyn PostsApi>, arguments: Value) -> Result<ToolResult> {
    let params: DeleteParams = parse_arguments(arguments)?;
    let id = params.id.clone();
    client.delete(params).await?;
    Ok(ToolResult::text(format!("Post with id {} deleted.", id)))
}

fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments).map_err(|e| Error::InvalidArguments {
        message: e.to_string(),
    })
}

fn serialize_response<T: Serialize>(value: &T) -> Result<ToolResult> {
    Ok(ToolResult::text(serde_json::to_string_pretty(value)?))
}
