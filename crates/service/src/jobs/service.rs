use std::sync::Arc;

use crate::errors::ServiceError;
use crate::jobs::repository::JobStore;
use models::job_post::Model as JobPost;

/// Pass-through between transport and the job store. Carries no logic of its
/// own; the store decides upsert/conflict semantics.
#[derive(Clone)]
pub struct JobService {
    repo: Arc<dyn JobStore>,
}

impl JobService {
    pub fn new(repo: Arc<dyn JobStore>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<JobPost>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, post_id: i32) -> Result<Option<JobPost>, ServiceError> {
        self.repo.get(post_id).await
    }

    pub async fn create(&self, post: JobPost) -> Result<JobPost, ServiceError> {
        self.repo.create(post).await
    }

    pub async fn upsert(&self, post: JobPost) -> Result<JobPost, ServiceError> {
        self.repo.upsert(post).await
    }

    pub async fn delete(&self, post_id: i32) -> Result<bool, ServiceError> {
        self.repo.delete(post_id).await
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<JobPost>, ServiceError> {
        self.repo.search(keyword).await
    }

    pub async fn with_min_experience(&self, years: i32) -> Result<Vec<JobPost>, ServiceError> {
        self.repo.with_min_experience(years).await
    }
}
