//! MCP tool definitions
//!
//! Tool names, descriptions and input schemas, plus the result envelope
//! every tool returns.
//!
//! # Tools
//!
//! - `posts_browse` - List posts with optional filter, limit, page and order
//! - `posts_read` - Read a post by id or slug
//! - `posts_add` - Create a post (`title` required)
//! - `posts_edit` - Update a post (`id` and `updated_at` required)
//! - `posts_delete` - Delete a post by id

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

pub const POSTS_BROWSE: &str = "posts_browse";
pub const POSTS_READ: &str = "posts_read";
pub const POSTS_ADD: &str = "posts_add";
pub const POSTS_EDIT: &str = "posts_edit";
pub const POSTS_DELETE: &str = "posts_delete";

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Result from a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

/// Content types for tool results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
            is_error: None,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: Some(true),
        }
    }

    /// Text of the first content item
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}

/// Get all posts tool definitions
pub fn post_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        posts_browse(),
        posts_read(),
        posts_add(),
        posts_edit(),
        posts_delete(),
    ]
}

pub fn posts_browse() -> ToolDefinition {
    ToolDefinition::new(
        POSTS_BROWSE,
        "Browse posts with optional filtering, pagination and ordering",
        json!({
            "type": "object",
            "properties": {
                "filter": {
                    "type": "string",
                    "description": "NQL filter expression, e.g. status:published+tag:news"
                },
                "limit": {
                    "type": "integer",
                    "description": "Number of posts per page"
                },
                "page": {
                    "type": "integer",
                    "description": "Page number"
                },
                "order": {
                    "type": "string",
                    "description": "Sort order, e.g. published_at desc"
                }
            }
        }),
    )
}

pub fn posts_read() -> ToolDefinition {
    ToolDefinition::new(
        POSTS_READ,
        "Read a single post by id or slug",
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Post id"
                },
                "slug": {
                    "type": "string",
                    "description": "Post slug"
                }
            }
        }),
    )
}

pub fn posts_add() -> ToolDefinition {
    let mut properties = post_field_properties();
    properties.insert("title".to_string(), json!({"type": "string"}));

    ToolDefinition::new(
        POSTS_ADD,
        "Create a new post",
        json!({
            "type": "object",
            "properties": properties,
            "required": ["title"]
        }),
    )
}

pub fn posts_edit() -> ToolDefinition {
    let mut properties = post_field_properties();
    properties.insert(
        "id".to_string(),
        json!({"type": "string", "description": "Id of the post to update"}),
    );
    properties.insert(
        "updated_at".to_string(),
        json!({
            "type": "string",
            "description": "updated_at of the post as last read; the edit fails if the post changed since"
        }),
    );
    properties.insert("title".to_string(), json!({"type": "string"}));

    ToolDefinition::new(
        POSTS_EDIT,
        "Update an existing post",
        json!({
            "type": "object",
            "properties": properties,
            "required": ["id", "updated_at"]
        }),
    )
}

pub fn posts_delete() -> ToolDefinition {
    ToolDefinition::new(
        POSTS_DELETE,
        "Delete a post by id",
        json!({
            "type": "object",
            "properties": {
                "id": {
                    "type": "string",
                    "description": "Id of the post to delete"
                }
            },
            "required": ["id"]
        }),
    )
}

/// Schema properties shared by `posts_add` and `posts_edit`.
fn post_field_properties() -> Map<String, Value> {
    let string = |description: &str| json!({"type": "string", "description": description});
    let boolean = |description: &str| json!({"type": "boolean", "description": description});
    let refs = |description: &str, keys: &[&str]| {
        let item_properties: Map<String, Value> = keys
            .iter()
            .map(|k| (k.to_string(), json!({"type": "string"})))
            .collect();
        json!({
            "type": "array",
            "description": description,
            "items": {"type": "object", "properties": item_properties}
        })
    };

    let entries = [
        ("slug", json!({"type": "string"})),
        ("html", string("Post content as HTML; when set, Ghost converts it instead of using lexical")),
        ("lexical", string("Post content as a serialized Lexical document")),
        ("status", string("Post status, e.g. draft, published, scheduled")),
        ("visibility", string("Post visibility: public, members, paid, tiers")),
        ("tiers", refs("Array of tier objects for tier-based visibility", &["id", "slug"])),
        ("feature_image", string("URL for the featured/hero image")),
        ("feature_image_alt", string("Alt text for the featured image")),
        ("feature_image_caption", string("Caption for the featured image")),
        ("custom_excerpt", string("Custom excerpt for the post")),
        ("meta_title", string("Custom meta title for SEO")),
        ("meta_description", string("Custom meta description for SEO")),
        ("canonical_url", string("Canonical URL for SEO")),
        ("og_title", string("Open Graph title for social sharing")),
        ("og_description", string("Open Graph description for social sharing")),
        ("og_image", string("Open Graph image URL for social sharing")),
        ("twitter_title", string("Twitter card title")),
        ("twitter_description", string("Twitter card description")),
        ("twitter_image", string("Twitter card image URL")),
        ("codeinjection_head", string("Custom code injected into <head>")),
        ("codeinjection_foot", string("Custom code injected before </body>")),
        ("tags", refs("Array of tag objects (id, name, or slug)", &["id", "name", "slug"])),
        ("authors", refs("Array of author objects (id, slug, or email)", &["id", "slug", "email"])),
        ("published_at", string("Publication date in ISO 8601 format")),
        ("custom_template", string("Custom Handlebars template for this post")),
        ("email_only", boolean("If true, post is only sent via email")),
        ("featured", boolean("Whether the post is featured")),
    ];

    entries
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect()
}
