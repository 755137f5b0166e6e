//! [`FakePostsApi`] for exercising the tool layer without a Ghost site.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use ghost_admin::{
    BrowseParams, DeleteParams, Error, NewPost, PostOptions, PostUpdate, PostsApi, ReadParams,
    Result,
};
use serde_json::{Value, json};

/// One call received by the fake, with its arguments exactly as passed.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Browse(BrowseParams),
    Read(ReadParams),
    Add {
        post: NewPost,
        options: Option<PostOptions>,
    },
    Edit {
        update: PostUpdate,
        options: Option<PostOptions>,
    },
    Delete(DeleteParams),
}

/// An in-memory posts API.
///
/// Scripted outcomes queued with [`FakePostsApi::push_ok`] and
/// [`FakePostsApi::push_err`] are returned first, in order. Once the queue
/// is empty each method answers with a plausible Ghost-shaped value.
///
/// # Example
///
/// ```rust,ignore
/// let fake = Arc::new(FakePostsApi::new());
/// fake.push_err(Error::Api { status: 409, message: "conflict".into(), context: None });
///
/// let client: Arc<dyn PostsApi> = fake.clone();
/// // ... drive the tool layer ...
/// assert_eq!(fake.calls().len(), 1);
/// ```
#[derive(Default)]
pub struct FakePostsApi {
    calls: Mutex<Vec<RecordedCall>>,
    outcomes: Mutex<VecDeque<Result<Value>>>,
}

impl FakePostsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result for the next call.
    pub fn push_ok(&self, value: Value) {
        self.outcomes.lock().unwrap().push_back(Ok(value));
    }

    /// Queue a failure for the next call.
    pub fn push_err(&self, error: Error) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The most recent call, panicking if there was none.
    pub fn last_call(&self) -> RecordedCall {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("FakePostsApi: no calls recorded")
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_or(&self, default: impl FnOnce() -> Value) -> Result<Value> {
        match self.outcomes.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => Ok(default()),
        }
    }
}

#[async_trait]
impl PostsApi for FakePostsApi {
    async fn browse(&self, params: BrowseParams) -> Result<Value> {
        let limit = params.limit.unwrap_or(15);
        let page = params.page.unwrap_or(1);
        self.record(RecordedCall::Browse(params));
        self.next_or(|| {
            json!({
                "posts": [],
                "meta": {"pagination": {
                    "page": page, "limit": limit, "pages": 1,
                    "total": 0, "next": null, "prev": null
                }}
            })
        })
    }

    async fn read(&self, params: ReadParams) -> Result<Value> {
        let id = params.id.clone().unwrap_or_else(|| "fake-post".to_string());
        let slug = params.slug.clone().unwrap_or_else(|| "fake-post".to_string());
        self.record(RecordedCall::Read(params));
        self.next_or(|| json!({"id": id, "slug": slug, "title": "Fake post"}))
    }

    async fn add(&self, post: NewPost, options: Option<PostOptions>) -> Result<Value> {
        let mut created = serde_json::to_value(&post)?;
        self.record(RecordedCall::Add { post, options });
        self.next_or(|| {
            created["id"] = json!("fake-post");
            created["updated_at"] = json!("2024-01-01T00:00:00.000Z");
            created
        })
    }

    async fn edit(&self, update: PostUpdate, options: Option<PostOptions>) -> Result<Value> {
        let updated = serde_json::to_value(&update)?;
        self.record(RecordedCall::Edit { update, options });
        self.next_or(|| updated)
    }

    async fn delete(&self, params: DeleteParams) -> Result<()> {
        self.record(RecordedCall::Delete(params));
        self.next_or(|| Value::Null).map(|_| ())
    }
}
