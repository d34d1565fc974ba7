use serde::{Deserialize, Serialize};

pub type UserId = String;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            email: None,
            name: None,
        }
    }
}

/// Authenticated context handed to whatever needs the player's identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
}

impl Session {
    pub fn new(user: UserProfile) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }
}
