//! Request shapes for the posts resource.
//!
//! Every optional field is skipped when absent so Ghost applies its own
//! defaults. None of these types check semantic constraints (tier or tag
//! existence, id/slug exclusivity); the Admin API is the authority on those.

use serde::{Deserialize, Serialize};

/// Query for browsing posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseParams {
    /// NQL filter expression, e.g. `status:published+featured:true`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Order expression, e.g. `published_at desc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

impl BrowseParams {
    /// Query-string pairs for the supplied fields, in declaration order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(order) = &self.order {
            pairs.push(("order", order.clone()));
        }
        pairs
    }
}

/// Query for reading a single post by id or slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Request to delete a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteParams {
    pub id: String,
}

/// Reference to a tag, by any of its identifying fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Reference to a staff author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Reference to a membership tier, used with `visibility: "tiers"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Optional post attributes shared by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Serialized Lexical document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// One of `public`, `members`, `paid`, `tiers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<TierRef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_image_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_image_caption: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_excerpt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codeinjection_head: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codeinjection_foot: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<AuthorRef>>,

    /// ISO 8601 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// Payload for creating a post. `title` is the only required field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    #[serde(flatten)]
    pub fields: PostFields,
}

impl NewPost {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: PostFields::default(),
        }
    }
}

/// Payload for updating a post.
///
/// `updated_at` must equal the stored post's value; Ghost rejects the edit
/// with a 409 otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUpdate {
    pub id: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub fields: PostFields,
}

impl PostUpdate {
    pub fn new(id: impl Into<String>, updated_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            updated_at: updated_at.into(),
            title: None,
            fields: PostFields::default(),
        }
    }
}

/// Per-request options sent as query parameters on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl PostOptions {
    /// Options telling Ghost to treat `html` as the authoritative content.
    pub fn html_source() -> Self {
        Self {
            source: Some("html".to_string()),
        }
    }

    /// Derive options for a payload's `html` field.
    ///
    /// Non-empty html yields `source=html` so Ghost converts it instead of
    /// keeping a stale or missing Lexical document. Anything else yields no
    /// options.
    pub fn for_html(html: Option<&str>) -> Option<Self> {
        match html {
            Some(html) if !html.is_empty() => Some(Self::html_source()),
            _ => None,
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.source
            .iter()
            .map(|source| ("source", source.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn browse_params_skip_absent_fields() {
        let params = BrowseParams {
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"limit": 5}));
    }

    #[test]
    fn browse_query_pairs_keep_supplied_values() {
        let params = BrowseParams {
            filter: Some("tag:news".into()),
            limit: Some(15),
            page: Some(2),
            order: Some("published_at desc".into()),
        };
        assert_eq!(
            params.query_pairs(),
            vec![
                ("filter", "tag:news".to_string()),
                ("limit", "15".to_string()),
                ("page", "2".to_string()),
                ("order", "published_at desc".to_string()),
            ]
        );
        assert!(BrowseParams::default().query_pairs().is_empty());
    }

    #[test]
    fn new_post_flattens_fields() {
        let mut post = NewPost::new("Hello");
        post.fields.status = Some("draft".into());
        post.fields.tags = Some(vec![TagRef {
            name: Some("News".into()),
            ..Default::default()
        }]);

        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({
                "title": "Hello",
                "status": "draft",
                "tags": [{"name": "News"}]
            })
        );
    }

    #[test]
    fn new_post_requires_title() {
        let err = serde_json::from_value::<NewPost>(json!({"slug": "hello"})).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn post_update_requires_id_and_updated_at() {
        let err = serde_json::from_value::<PostUpdate>(json!({"id": "abc"})).unwrap_err();
        assert!(err.to_string().contains("updated_at"));

        let err = serde_json::from_value::<PostUpdate>(json!({"updated_at": "2024-01-01T00:00:00.000Z"}))
            .unwrap_err();
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn relationship_entries_accept_empty_objects() {
        let update: PostUpdate = serde_json::from_value(json!({
            "id": "abc",
            "updated_at": "2024-01-01T00:00:00.000Z",
            "tags": [{}],
            "authors": [{"email": "jo@example.com"}],
            "tiers": [{"slug": "gold"}]
        }))
        .unwrap();

        assert_eq!(update.fields.tags, Some(vec![TagRef::default()]));
        assert_eq!(
            update.fields.authors.unwrap()[0].email.as_deref(),
            Some("jo@example.com")
        );
        assert_eq!(update.fields.tiers.unwrap()[0].slug.as_deref(), Some("gold"));
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let err = serde_json::from_value::<NewPost>(json!({"title": "T", "featured": "yes"}))
            .unwrap_err();
        assert!(err.to_string().contains("expected a boolean"));
    }

    #[rstest]
    #[case(Some("<p>Hi</p>"), Some(PostOptions::html_source()))]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn options_follow_html(#[case] html: Option<&str>, #[case] expected: Option<PostOptions>) {
        assert_eq!(PostOptions::for_html(html), expected);
    }

    #[test]
    fn options_query_pairs() {
        assert_eq!(
            PostOptions::html_source().query_pairs(),
            vec![("source", "html".to_string())]
        );
        assert!(PostOptions::default().query_pairs().is_empty());
    }
}
