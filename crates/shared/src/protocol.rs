use serde::{Deserialize, Serialize};

use crate::domain::{Blog, User};

pub const BLOGS_PATH: &str = "blogs";
pub const LOGIN_PATH: &str = "login";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

pub type LoginResponse = User;

/// Body of `PUT /blogs/:id`. The owner goes back as a bare id, the way the
/// service stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl From<&Blog> for UpdateBlogRequest {
    fn from(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            author: blog.author.clone(),
            url: blog.url.clone(),
            likes: blog.likes,
            user: blog.owner.as_ref().map(|owner| owner.id().0.clone()),
        }
    }
}
