use tracing::{error, info};

use crate::api::{ApiClient, ApiError};
use crate::users::dto::{UserAccount, UserList};

/// Account administration: list and confirmed delete, nothing else. Each
/// delete is followed by a full list refetch.
#[derive(Debug, Default)]
pub struct UserAdmin {
    pub users: Vec<UserAccount>,
}

impl UserAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        match api.get::<UserList>("/users").await {
            Ok(list) => {
                self.users = list.users;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to fetch users");
                Err(err)
            }
        }
    }

    pub fn user(&self, id: i64) -> Option<&UserAccount> {
        self.users.iter().find(|u| u.id == id)
    }

    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<(), ApiError> {
        api.delete(&format!("/users/{id}")).await?;
        info!(user_id = id, "user deleted");
        self.load(api).await
    }
}
