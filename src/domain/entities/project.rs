use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

// ───── Stored Documents ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Post {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    #[validate(length(min = 1, message = "Post title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Post content is required"))]
    pub content: String,

    #[serde(rename = "img", alias = "image", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub project_name: String,
    pub posts: Vec<Post>,
    pub stack: Vec<String>,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Body accepted by both create and edit. Any `id` sent by the client is
/// dropped during decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NewProjectRequest {
    #[serde(rename = "projectName")]
    #[validate(length(min = 1, message = "Project name is required"))]
    pub project_name: String,

    #[serde(deserialize_with = "null_as_empty")]
    #[validate(nested)]
    pub posts: Vec<Post>,

    #[serde(deserialize_with = "null_as_empty")]
    pub stack: Vec<String>,
}

/// Treats an explicit `null` list the same as an absent one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wholesale replacement of the mutable fields of a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectUpdate {
    pub project_name: String,
    pub posts: Vec<Post>,
    pub stack: Vec<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}

// ───── Conversions ──────────────────────────────────────────────────

impl NewProjectRequest {
    pub fn into_project(self, id: Uuid) -> Project {
        Project {
            id,
            project_name: self.project_name,
            posts: self.posts,
            stack: self.stack,
        }
    }
}

impl From<NewProjectRequest> for ProjectUpdate {
    fn from(request: NewProjectRequest) -> Self {
        ProjectUpdate {
            project_name: request.project_name,
            posts: request.posts,
            stack: request.stack,
        }
    }
}

impl Project {
    pub fn apply(&mut self, update: &ProjectUpdate) {
        self.project_name = update.project_name.clone();
        self.posts = update.posts.clone();
        self.stack = update.stack.clone();
    }
}
