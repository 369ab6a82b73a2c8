use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(BlogId);

/// Logged-in user as returned by `POST /login` and kept in the persisted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub name: String,
}

/// The `user` field of a blog. List responses populate it; update responses
/// usually carry only the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlogOwner {
    Populated(OwnerSummary),
    Id(UserId),
}

impl BlogOwner {
    pub fn id(&self) -> &UserId {
        match self {
            BlogOwner::Populated(owner) => &owner.id,
            BlogOwner::Id(id) => id,
        }
    }

    pub fn is(&self, user: &User) -> bool {
        match self {
            BlogOwner::Populated(owner) => owner.username == user.username,
            BlogOwner::Id(id) => user.id.as_ref() == Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<BlogOwner>,
}

impl Blog {
    pub fn is_owned_by(&self, user: &User) -> bool {
        self.owner.as_ref().is_some_and(|owner| owner.is(user))
    }

    /// Copy of this blog with one more like, ready to be sent as an update.
    pub fn liked(&self) -> Blog {
        Blog {
            likes: self.likes.saturating_add(1),
            ..self.clone()
        }
    }
}

/// A post as submitted by the user, before the server assigns an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogDraft {
    pub title: String,
    pub author: String,
    pub url: String,
}
