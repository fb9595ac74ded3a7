use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{UserId, UserRecord};
use crate::storage::{StoreError, UserStore};

/// Process-local store. Records live as long as the server does.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_user_data(&self, user: &UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.records.read().await.get(user).cloned())
    }

    async fn save_user_data(&self, user: &UserId, data: &UserRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(user.clone(), data.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResumeRecord;

    #[tokio::test]
    async fn test_save_overwrites_whole_record() {
        let store = InMemoryUserStore::new();
        let user = UserId::parse("ada").unwrap();
        assert!(store.get_user_data(&user).await.unwrap().is_none());

        let record = UserRecord {
            resume: Some(ResumeRecord {
                name: "Ada".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        store.save_user_data(&user, &record).await.unwrap();
        store
            .save_user_data(&user, &UserRecord::default())
            .await
            .unwrap();

        let stored = store.get_user_data(&user).await.unwrap().unwrap();
        assert!(stored.resume.is_none());
        assert_eq!(store.len().await, 1);
    }
}
