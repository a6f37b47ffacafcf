//! In-process `ResumeStore` used by the handler and router tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, Resume, ResumePatch};
use crate::resumes::store::ResumeStore;

#[derive(Default)]
pub struct MemoryResumeStore {
    // insertion order; newest last
    rows: RwLock<Vec<Resume>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Resume>, AppError> {
        let rows = self.rows.read().await;
        let mut owned: Vec<Resume> = rows
            .iter()
            .rev()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect();
        // stable: equal timestamps keep newest-inserted first
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resume>, AppError> {
        Ok(self.rows.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, new: NewResume) -> Result<Resume, AppError> {
        let now = Utc::now();
        let resume = Resume {
            id: Uuid::new_v4(),
            owner: new.owner,
            title: new.title,
            content: new.content,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(resume.clone());
        Ok(resume)
    }

    async fn update(&self, id: Uuid, patch: &ResumePatch) -> Result<Option<Resume>, AppError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        *row = row.apply(patch, Utc::now());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_resume(owner: &str, title: &str) -> NewResume {
        NewResume {
            owner: owner.to_string(),
            title: Some(title.to_string()),
            content: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_owner_filters_and_orders_newest_first() {
        let store = MemoryResumeStore::new();
        store.insert(new_resume("a", "first")).await.unwrap();
        store.insert(new_resume("b", "other")).await.unwrap();
        store.insert(new_resume("a", "second")).await.unwrap();

        let owned = store.find_by_owner("a").await.unwrap();
        let titles: Vec<_> = owned.iter().map(|r| r.title.as_deref().unwrap()).collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert!(store.find_by_owner("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryResumeStore::new();
        let patch = ResumePatch {
            title: Some("x".into()),
            content: None,
        };
        assert!(store.update(Uuid::new_v4(), &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let store = MemoryResumeStore::new();
        let created = store.insert(new_resume("a", "cv")).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert_eq!(store.len().await, 0);
    }
}
