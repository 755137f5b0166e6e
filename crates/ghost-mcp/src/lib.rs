//! MCP Server for Ghost posts
//!
//! This crate exposes CRUD operations on a Ghost site's posts via the Model
//! Context Protocol (MCP), so that agents can browse, read, create, update
//! and delete posts.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client (agent/IDE) ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ ghost-mcp (GhostMcpServer + posts tools) ]
//!        | (PostsApi trait)
//!        v
//! [ ghost-admin (AdminClient) ]
//!        | (HTTPS, Admin API token)
//!        v
//! [ Ghost Admin API ]
//! ```
//!
//! # Tools
//!
//! - `posts_browse`, `posts_read`, `posts_add`, `posts_edit`, `posts_delete`
//!
//! The tool layer holds no state. The client is handed to
//! [`register_post_tools`] explicitly, so tests can pass a fake.

pub mod error;
pub mod posts;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use posts::register_post_tools;
pub use server::GhostMcpServer;
pub use tools::{ToolContent, ToolDefinition, ToolResult, post_tool_definitions};
