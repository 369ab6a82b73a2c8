//! In-memory blog list kept in step with the service.
//!
//! The list only ever holds what the service returned: a full fetch replaces
//! it, and each mutation is applied after the service has accepted it, using
//! the record the service sent back.

use std::{future::Future, str::FromStr, sync::Arc};

use shared::domain::{Blog, BlogDraft, BlogId, BlogOwner};
use tracing::{info, warn};

use crate::{api::BlogApi, error::ClientError, notification::Notifier};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Fewest likes first.
    #[default]
    Ascending,
    /// Most liked first.
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Blog),
    Declined,
}

pub fn delete_prompt(blog: &Blog) -> String {
    format!(
        "Are you sure you want to remove blog \"{}\" by {}?",
        blog.title, blog.author
    )
}

pub struct BlogCollection {
    api: Arc<dyn BlogApi>,
    notifier: Notifier,
    blogs: Vec<Blog>,
    sort_order: SortOrder,
}

impl BlogCollection {
    pub fn new(api: Arc<dyn BlogApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            blogs: Vec::new(),
            sort_order: SortOrder::default(),
        }
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Posts in the order the service returned them, plus appended creates.
    pub fn blogs(&self) -> &[Blog] {
        &self.blogs
    }

    pub fn get(&self, id: &BlogId) -> Option<&Blog> {
        self.blogs.iter().find(|blog| &blog.id == id)
    }

    /// Posts ordered by likes for display. Stable: ties keep list order.
    pub fn display(&self) -> Vec<&Blog> {
        let mut sorted: Vec<&Blog> = self.blogs.iter().collect();
        match self.sort_order {
            SortOrder::Ascending => sorted.sort_by_key(|blog| blog.likes),
            SortOrder::Descending => sorted.sort_by(|a, b| b.likes.cmp(&a.likes)),
        }
        sorted
    }

    pub async fn load_all(&mut self) -> Result<&[Blog], ClientError> {
        match self.api.get_all().await {
            Ok(blogs) => {
                info!(count = blogs.len(), "blogs: loaded");
                self.blogs = blogs;
                Ok(&self.blogs)
            }
            Err(err) => {
                warn!(error = %err, "blogs: failed to load");
                self.notifier.show(err.notification_text()).await;
                Err(err)
            }
        }
    }

    pub async fn create(
        &mut self,
        token: Option<&str>,
        draft: &BlogDraft,
    ) -> Result<Blog, ClientError> {
        let created = match self.api.create(token, draft).await {
            Ok(blog) => blog,
            Err(err) => return Err(self.fail("create", err).await),
        };

        info!(blog_id = %created.id, title = %created.title, "blogs: created");
        self.blogs.push(created.clone());
        self.notifier.show("Successfully added blog").await;
        Ok(created)
    }

    pub async fn like(&mut self, token: Option<&str>, id: &BlogId) -> Result<Blog, ClientError> {
        let Some(blog) = self.get(id).cloned() else {
            return Err(self.fail("like", ClientError::UnknownBlog(id.clone())).await);
        };

        let updated = match self.api.update(token, id, &blog.liked()).await {
            Ok(updated) => keep_owner_detail(updated, &blog),
            Err(err) => return Err(self.fail("like", err).await),
        };

        for entry in self.blogs.iter_mut().filter(|entry| &entry.id == id) {
            *entry = updated.clone();
        }
        info!(blog_id = %id, likes = updated.likes, "blogs: liked");
        self.notifier
            .show(format!(
                "Liked blog \"{}\". Current likes: {}",
                blog.title, updated.likes
            ))
            .await;
        Ok(updated)
    }

    /// Asks `confirm` with [`delete_prompt`] first; a declined prompt sends
    /// nothing and leaves the list untouched.
    pub async fn delete<F, Fut>(
        &mut self,
        token: Option<&str>,
        id: &BlogId,
        confirm: F,
    ) -> Result<DeleteOutcome, ClientError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = bool>,
    {
        let Some(blog) = self.get(id).cloned() else {
            return Err(self.fail("delete", ClientError::UnknownBlog(id.clone())).await);
        };

        if !confirm(delete_prompt(&blog)).await {
            return Ok(DeleteOutcome::Declined);
        }

        if let Err(err) = self.api.remove(token, id).await {
            return Err(self.fail("delete", err).await);
        }

        self.blogs.retain(|entry| &entry.id != id);
        info!(blog_id = %id, "blogs: deleted");
        self.notifier
            .show(format!("Successfully deleted blog \"{}\".", blog.title))
            .await;
        Ok(DeleteOutcome::Deleted(blog))
    }

    async fn fail(&self, operation: &'static str, err: ClientError) -> ClientError {
        warn!(operation, error = %err, "blogs: operation failed");
        self.notifier.show(err.notification_text()).await;
        err
    }
}

/// Update responses carry the owner as a bare id. When it is the same owner the
/// list already knew in full, keep the populated record so the entry can still
/// be matched against the session user by username.
fn keep_owner_detail(mut updated: Blog, previous: &Blog) -> Blog {
    if let (Some(BlogOwner::Id(id)), Some(known @ BlogOwner::Populated(_))) =
        (&updated.owner, &previous.owner)
    {
        if known.id() == id {
            updated.owner = Some(known.clone());
        }
    }
    updated
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
