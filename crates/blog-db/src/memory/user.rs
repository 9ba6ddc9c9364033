//! In-memory UserRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use blog_core::entities::User;
use blog_core::traits::{RepoResult, UserRepository};
use blog_core::value_objects::Snowflake;

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<Snowflake, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a user, leaving dangling references behind
    pub fn remove(&self, id: Snowflake) -> Option<User> {
        self.users.write().remove(&id)
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        let users = self.users.read();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.users.write().insert(user.id, user.clone());
        Ok(())
    }
}
