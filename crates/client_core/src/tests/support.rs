//! In-process stand-in for the blog service, shared by the controller tests.

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use shared::{
    domain::{Blog, BlogDraft, BlogId, BlogOwner, OwnerSummary, User, UserId},
    protocol::Credentials,
};
use tokio::sync::Mutex;

use crate::{api::BlogApi, error::ClientError};

pub(crate) const ALICE_PASSWORD: &str = "sekret";

pub(crate) fn alice() -> User {
    User {
        username: "alice".to_string(),
        name: "Alice Liddell".to_string(),
        token: "alice-token".to_string(),
        id: Some(UserId::from("u1")),
    }
}

pub(crate) fn bob() -> User {
    User {
        username: "bob".to_string(),
        name: "Bob Builder".to_string(),
        token: "bob-token".to_string(),
        id: Some(UserId::from("u2")),
    }
}

pub(crate) fn owner_of(user: &User) -> BlogOwner {
    BlogOwner::Populated(OwnerSummary {
        id: user.id.clone().expect("fixture users carry ids"),
        username: user.username.clone(),
        name: user.name.clone(),
    })
}

pub(crate) fn blog(id: &str, title: &str, likes: u64, owner: &User) -> Blog {
    Blog {
        id: BlogId::from(id),
        title: title.to_string(),
        author: format!("{} author", title),
        url: format!("https://blogs.example/{id}"),
        likes,
        owner: Some(owner_of(owner)),
    }
}

fn unauthorized(message: &str) -> ClientError {
    ClientError::Api {
        status: 401,
        message: message.to_string(),
    }
}

/// Behaves like the real service: tokens identify users, only the creator may
/// delete, updates come back with a bare owner id.
pub(crate) struct FakeBlogApi {
    blogs: Mutex<Vec<Blog>>,
    next_id: AtomicU64,
    offline: AtomicBool,
    requests: Mutex<Vec<String>>,
}

impl FakeBlogApi {
    pub(crate) fn with_blogs(blogs: Vec<Blog>) -> Arc<Self> {
        Arc::new(Self {
            blogs: Mutex::new(blogs),
            next_id: AtomicU64::new(100),
            offline: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub(crate) async fn server_blogs(&self) -> Vec<Blog> {
        self.blogs.lock().await.clone()
    }

    pub(crate) async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }

    async fn record(&self, request: String) -> Result<(), ClientError> {
        self.requests.lock().await.push(request);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ClientError::Transport("connection refused".to_string()));
        }
        Ok(())
    }

    fn user_for(token: Option<&str>) -> Result<User, ClientError> {
        [alice(), bob()]
            .into_iter()
            .find(|user| Some(user.token.as_str()) == token)
            .ok_or_else(|| unauthorized("token missing or invalid"))
    }
}

#[async_trait]
impl BlogApi for FakeBlogApi {
    async fn get_all(&self) -> Result<Vec<Blog>, ClientError> {
        self.record("GET /blogs".to_string()).await?;
        Ok(self.server_blogs().await)
    }

    async fn create(&self, token: Option<&str>, draft: &BlogDraft) -> Result<Blog, ClientError> {
        self.record("POST /blogs".to_string()).await?;
        let user = Self::user_for(token)?;
        if draft.title.trim().is_empty() || draft.url.trim().is_empty() {
            return Err(ClientError::Api {
                status: 400,
                message: "title or url missing".to_string(),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Blog {
            id: BlogId(format!("b{id}")),
            title: draft.title.clone(),
            author: draft.author.clone(),
            url: draft.url.clone(),
            likes: 0,
            owner: Some(owner_of(&user)),
        };
        self.blogs.lock().await.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        token: Option<&str>,
        id: &BlogId,
        blog: &Blog,
    ) -> Result<Blog, ClientError> {
        self.record(format!("PUT /blogs/{id}")).await?;
        Self::user_for(token)?;
        let mut blogs = self.blogs.lock().await;
        let stored = blogs
            .iter_mut()
            .find(|stored| &stored.id == id)
            .ok_or_else(|| ClientError::Api {
                status: 404,
                message: "blog not found".to_string(),
            })?;
        stored.likes = blog.likes;
        let mut returned = stored.clone();
        returned.owner = stored
            .owner
            .as_ref()
            .map(|owner| BlogOwner::Id(owner.id().clone()));
        Ok(returned)
    }

    async fn remove(&self, token: Option<&str>, id: &BlogId) -> Result<(), ClientError> {
        self.record(format!("DELETE /blogs/{id}")).await?;
        let user = Self::user_for(token)?;
        let mut blogs = self.blogs.lock().await;
        let Some(position) = blogs.iter().position(|stored| &stored.id == id) else {
            return Ok(());
        };
        if !blogs[position].is_owned_by(&user) {
            return Err(unauthorized("only the creator can delete a blog"));
        }
        blogs.remove(position);
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, ClientError> {
        self.record("POST /login".to_string()).await?;
        if credentials.username == "alice" && credentials.password == ALICE_PASSWORD {
            let mut user = alice();
            user.id = None;
            return Ok(user);
        }
        Err(ClientError::WrongCredentials)
    }
}
