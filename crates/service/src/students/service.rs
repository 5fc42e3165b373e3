use std::sync::Arc;

use crate::errors::ServiceError;
use crate::students::repository::StudentStore;
use models::student::Student;

/// Pass-through between transport and the student store.
#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentStore>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Student>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, roll_no: i32) -> Result<Option<Student>, ServiceError> {
        self.repo.get(roll_no).await
    }

    pub async fn create(&self, student: Student) -> Result<Student, ServiceError> {
        self.repo.create(student).await
    }

    pub async fn update(&self, student: Student) -> Result<Student, ServiceError> {
        self.repo.update(student).await
    }

    pub async fn delete(&self, roll_no: i32) -> Result<bool, ServiceError> {
        self.repo.delete(roll_no).await
    }
}
