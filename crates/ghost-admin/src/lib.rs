//! Ghost Admin API client for the posts resource
//!
//! This crate provides the [`PostsApi`] contract consumed by the MCP tool
//! layer, and [`AdminClient`], its HTTP implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use ghost_admin::{AdminClient, ClientConfig, PostsApi, ReadParams};
//!
//! let config = ClientConfig::new("https://blog.example.com", "id:secret")?;
//! let client = AdminClient::new(config)?;
//!
//! let post = client
//!     .read(ReadParams { slug: Some("welcome".into()), ..Default::default() })
//!     .await?;
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod key;
pub mod types;

pub use api::PostsApi;
pub use client::AdminClient;
pub use config::{ClientConfig, PartialConfig};
pub use error::{Error, Result};
pub use key::AdminApiKey;
pub use types::{
    AuthorRef, BrowseParams, DeleteParams, NewPost, PostFields, PostOptions, PostUpdate,
    ReadParams, TagRef, TierRef,
};
