//! Shared test utilities for the ghost-mcp workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`fake`]: [`FakePostsApi`], an in-memory [`ghost_admin::PostsApi`]
//!   that records calls and replays scripted results

pub mod fake;

pub use fake::{FakePostsApi, RecordedCall};
