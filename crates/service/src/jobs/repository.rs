use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use models::job_post::Model as JobPost;

/// Trait abstraction for job post storage.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// All posts, insertion order preserved.
    async fn list(&self) -> Result<Vec<JobPost>, ServiceError>;
    async fn get(&self, post_id: i32) -> Result<Option<JobPost>, ServiceError>;
    /// Rejects an already-taken id with `Conflict`.
    async fn create(&self, post: JobPost) -> Result<JobPost, ServiceError>;
    /// Replace the stored post with the same id, inserting when absent.
    async fn upsert(&self, post: JobPost) -> Result<JobPost, ServiceError>;
    /// Returns whether a post was removed; absent ids are a no-op.
    async fn delete(&self, post_id: i32) -> Result<bool, ServiceError>;
    /// Case-sensitive substring match on the profile field.
    async fn search(&self, keyword: &str) -> Result<Vec<JobPost>, ServiceError>;
    async fn with_min_experience(&self, years: i32) -> Result<Vec<JobPost>, ServiceError>;
}

/// List-backed store scanned linearly. The lock makes concurrent handler
/// access safe; updates replace the stored value wholesale so no caller ever
/// observes a half-written post.
pub struct InMemoryJobStore {
    inner: RwLock<Vec<JobPost>>,
}

impl InMemoryJobStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(Vec::new()) })
    }

    /// A store pre-populated with a few demo posts for standalone runs.
    pub fn with_sample_posts() -> Arc<Self> {
        let posts = vec![
            JobPost {
                post_id: 1,
                post_profile: "Backend Developer".into(),
                post_desc: "Own the order-processing services".into(),
                req_experience: 2,
                post_tech_stack: vec!["Rust".into(), "Postgres".into()],
            },
            JobPost {
                post_id: 2,
                post_profile: "Frontend Developer".into(),
                post_desc: "Build the storefront UI".into(),
                req_experience: 3,
                post_tech_stack: vec!["TypeScript".into(), "React".into()],
            },
            JobPost {
                post_id: 3,
                post_profile: "Data Engineer".into(),
                post_desc: "Maintain reporting pipelines".into(),
                req_experience: 4,
                post_tech_stack: vec!["Python".into(), "Spark".into()],
            },
        ];
        Arc::new(Self { inner: RwLock::new(posts) })
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn list(&self) -> Result<Vec<JobPost>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn get(&self, post_id: i32) -> Result<Option<JobPost>, ServiceError> {
        let posts = self.inner.read().await;
        Ok(posts.iter().find(|p| p.post_id == post_id).cloned())
    }

    async fn create(&self, post: JobPost) -> Result<JobPost, ServiceError> {
        let mut posts = self.inner.write().await;
        if posts.iter().any(|p| p.post_id == post.post_id) {
            return Err(ServiceError::conflict("job post", post.post_id));
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn upsert(&self, post: JobPost) -> Result<JobPost, ServiceError> {
        let mut posts = self.inner.write().await;
        match posts.iter_mut().find(|p| p.post_id == post.post_id) {
            Some(slot) => *slot = post.clone(),
            None => posts.push(post.clone()),
        }
        Ok(post)
    }

    async fn delete(&self, post_id: i32) -> Result<bool, ServiceError> {
        let mut posts = self.inner.write().await;
        let before = posts.len();
        posts.retain(|p| p.post_id != post_id);
        Ok(posts.len() < before)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<JobPost>, ServiceError> {
        let posts = self.inner.read().await;
        Ok(posts
            .iter()
            .filter(|p| p.post_profile.contains(keyword))
            .cloned()
            .collect())
    }

    async fn with_min_experience(&self, years: i32) -> Result<Vec<JobPost>, ServiceError> {
        let posts = self.inner.read().await;
        Ok(posts
            .iter()
            .filter(|p| p.req_experience >= years)
            .cloned()
            .collect())
    }
}

/// SeaORM-backed store delegating to the entity functions in `models`.
pub struct SeaOrmJobStore {
    pub db: DatabaseConnection,
}

#[async_trait]
impl JobStore for SeaOrmJobStore {
    async fn list(&self) -> Result<Vec<JobPost>, ServiceError> {
        Ok(models::job_post::list(&self.db).await?)
    }

    async fn get(&self, post_id: i32) -> Result<Option<JobPost>, ServiceError> {
        Ok(models::job_post::get(&self.db, post_id).await?)
    }

    async fn create(&self, post: JobPost) -> Result<JobPost, ServiceError> {
        if models::job_post::get(&self.db, post.post_id).await?.is_some() {
            return Err(ServiceError::conflict("job post", post.post_id));
        }
        Ok(models::job_post::insert(&self.db, &post).await?)
    }

    async fn upsert(&self, post: JobPost) -> Result<JobPost, ServiceError> {
        Ok(models::job_post::upsert(&self.db, &post).await?)
    }

    async fn delete(&self, post_id: i32) -> Result<bool, ServiceError> {
        Ok(models::job_post::delete(&self.db, post_id).await?)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<JobPost>, ServiceError> {
        Ok(models::job_post::search(&self.db, keyword).await?)
    }

    async fn with_min_experience(&self, years: i32) -> Result<Vec<JobPost>, ServiceError> {
        Ok(models::job_post::with_min_experience(&self.db, years).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i32, profile: &str, exp: i32) -> JobPost {
        JobPost {
            post_id: id,
            post_profile: profile.into(),
            post_desc: format!("{} role", profile),
            req_experience: exp,
            post_tech_stack: vec!["Rust".into()],
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_inserted_post() {
        let store = InMemoryJobStore::new();
        let p = post(10, "Systems Engineer", 5);
        store.create(p.clone()).await.expect("create");
        assert_eq!(store.get(10).await.expect("get"), Some(p));
        assert_eq!(store.get(11).await.expect("get"), None);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let store = InMemoryJobStore::new();
        store.create(post(1, "A", 1)).await.expect("first");
        let err = store.create(post(1, "B", 2)).await.expect_err("duplicate");
        assert!(matches!(err, ServiceError::Conflict(_)));
        // The first insert is untouched
        assert_eq!(store.get(1).await.unwrap().unwrap().post_profile, "A");
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = InMemoryJobStore::new();
        for id in [3, 1, 2] {
            store.create(post(id, "X", 0)).await.expect("create");
        }
        let ids: Vec<i32> = store.list().await.unwrap().iter().map(|p| p.post_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn upsert_replaces_existing_and_inserts_missing() {
        let store = InMemoryJobStore::new();
        store.create(post(7, "Old", 1)).await.expect("create");

        let replaced = store.upsert(post(7, "New", 2)).await.expect("upsert");
        assert_eq!(replaced.post_profile, "New");
        assert_eq!(store.get(7).await.unwrap().unwrap().req_experience, 2);
        assert_eq!(store.list().await.unwrap().len(), 1);

        // Missing id falls back to insert
        store.upsert(post(8, "Fresh", 0)).await.expect("upsert");
        assert!(store.get(8).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_is_idempotent_noop_for_absent_ids() {
        let store = InMemoryJobStore::new();
        store.create(post(5, "X", 0)).await.expect("create");
        assert!(store.delete(5).await.expect("delete"));
        assert_eq!(store.get(5).await.expect("get"), None);
        assert!(!store.delete(5).await.expect("redelete"));
        assert!(!store.delete(99).await.expect("never inserted"));
    }

    #[tokio::test]
    async fn search_is_case_sensitive_substring_on_profile() {
        let store = InMemoryJobStore::new();
        store.create(post(1, "Rust Developer", 1)).await.unwrap();
        store.create(post(2, "rust enthusiast", 1)).await.unwrap();
        store.create(post(3, "QA Analyst", 1)).await.unwrap();

        let hits = store.search("Rust").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].post_id, 1);

        assert!(store.search("Go").await.unwrap().is_empty());
        // Empty keyword matches everything
        assert_eq!(store.search("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn experience_threshold_filters_inclusively() {
        let store = InMemoryJobStore::new();
        store.create(post(1, "A", 1)).await.unwrap();
        store.create(post(2, "B", 3)).await.unwrap();
        store.create(post(3, "C", 5)).await.unwrap();

        let ids: Vec<i32> = store
            .with_min_experience(3)
            .await
            .unwrap()
            .iter()
            .map(|p| p.post_id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn sample_posts_are_seeded() {
        let store = InMemoryJobStore::with_sample_posts();
        assert_eq!(store.list().await.unwrap().len(), 3);
    }
}
