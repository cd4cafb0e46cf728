//! In-memory profile store for handler and flow tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::profile::models::{ProfileChanges, UserProfile};
use crate::profile::store::ProfileStore;
use crate::store::StoreError;

pub fn profile(external_id: &str, industry: Option<&str>) -> UserProfile {
    let now = Utc::now();
    UserProfile {
        id: Uuid::new_v4(),
        external_id: external_id.to_string(),
        email: format!("{external_id}@example.com"),
        industry: industry.map(String::from),
        experience: None,
        bio: None,
        skills: vec![],
        created_at: now,
        updated_at: now,
    }
}

#[derive(Default)]
pub struct MemoryProfileStore {
    users: Mutex<HashMap<String, UserProfile>>,
}

impl MemoryProfileStore {
    pub fn with_users(users: Vec<UserProfile>) -> Self {
        let store = Self::default();
        store
            .users
            .lock()
            .unwrap()
            .extend(users.into_iter().map(|u| (u.external_id.clone(), u)));
        store
    }

    pub fn get(&self, external_id: &str) -> Option<UserProfile> {
        self.users.lock().unwrap().get(external_id).cloned()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.get(external_id))
    }

    async fn update_profile(
        &self,
        external_id: &str,
        changes: &ProfileChanges,
    ) -> Result<UserProfile, StoreError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(external_id)
            .ok_or_else(|| StoreError::NotFound("User".to_string()))?;
        user.industry = Some(changes.industry.clone());
        user.experience = changes.experience;
        user.bio = changes.bio.clone();
        user.skills = changes.skills.clone();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}
