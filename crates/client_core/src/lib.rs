use std::{future::Future, sync::Arc};

use shared::domain::{Blog, BlogDraft, BlogId, User};

pub mod api;
pub mod collection;
pub mod error;
pub mod notification;
pub mod session;

pub use api::{BlogApi, HttpBlogApi, HttpBlogApiBuilder, DEFAULT_SERVER_URL};
pub use collection::{BlogCollection, DeleteOutcome, SortOrder};
pub use error::ClientError;
pub use notification::{Notification, NotificationEvent, Notifier, NOTIFICATION_TTL};
pub use session::{FileSessionStore, MemorySessionStore, SessionController, SessionStore};

/// The three controllers wired together: the session supplies the token for
/// collection calls, and both report through the shared notifier.
pub struct BlogApp {
    pub session: SessionController,
    pub blogs: BlogCollection,
    pub notifier: Notifier,
}

impl BlogApp {
    pub fn new(api: Arc<dyn BlogApi>, store: Arc<dyn SessionStore>) -> Self {
        let notifier = Notifier::new();
        Self {
            session: SessionController::new(Arc::clone(&api), store, notifier.clone()),
            blogs: BlogCollection::new(api, notifier.clone()),
            notifier,
        }
    }

    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.blogs = self.blogs.with_sort_order(sort_order);
        self
    }

    /// Restores the persisted session, then fetches the list. A failed fetch is
    /// already on the banner, so startup itself never fails.
    pub async fn startup(&mut self) {
        self.session.restore_session().await;
        let _ = self.blogs.load_all().await;
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, ClientError> {
        self.session.login(username, password).await
    }

    pub async fn logout(&mut self) {
        self.session.logout().await;
    }

    pub async fn create(&mut self, draft: &BlogDraft) -> Result<Blog, ClientError> {
        self.blogs.create(self.session.token(), draft).await
    }

    pub async fn like(&mut self, id: &BlogId) -> Result<Blog, ClientError> {
        self.blogs.like(self.session.token(), id).await
    }

    pub async fn delete<F, Fut>(
        &mut self,
        id: &BlogId,
        confirm: F,
    ) -> Result<DeleteOutcome, ClientError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = bool>,
    {
        self.blogs.delete(self.session.token(), id, confirm).await
    }

    /// Whether the delete control is offered for `blog`.
    pub fn can_delete(&self, blog: &Blog) -> bool {
        self.session
            .current_user()
            .is_some_and(|user| blog.is_owned_by(user))
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
