use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use models::student::Student;

/// Trait abstraction for student record storage.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, ServiceError>;
    async fn get(&self, roll_no: i32) -> Result<Option<Student>, ServiceError>;
    /// Rejects an already-taken roll number with `Conflict`.
    async fn create(&self, student: Student) -> Result<Student, ServiceError>;
    /// Replaces the record with the same roll number; `NotFound` when absent.
    async fn update(&self, student: Student) -> Result<Student, ServiceError>;
    /// Returns whether a record was removed; absent roll numbers are a no-op.
    async fn delete(&self, roll_no: i32) -> Result<bool, ServiceError>;
}

/// List-backed store used when no database is configured.
pub struct InMemoryStudentStore {
    inner: RwLock<Vec<Student>>,
}

impl InMemoryStudentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(Vec::new()) })
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn list(&self) -> Result<Vec<Student>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn get(&self, roll_no: i32) -> Result<Option<Student>, ServiceError> {
        let students = self.inner.read().await;
        Ok(students.iter().find(|s| s.roll_no == roll_no).cloned())
    }

    async fn create(&self, student: Student) -> Result<Student, ServiceError> {
        let mut students = self.inner.write().await;
        if students.iter().any(|s| s.roll_no == student.roll_no) {
            return Err(ServiceError::conflict("student", student.roll_no));
        }
        students.push(student.clone());
        Ok(student)
    }

    async fn update(&self, student: Student) -> Result<Student, ServiceError> {
        let mut students = self.inner.write().await;
        match students.iter_mut().find(|s| s.roll_no == student.roll_no) {
            Some(slot) => {
                *slot = student.clone();
                Ok(student)
            }
            None => Err(ServiceError::not_found("student")),
        }
    }

    async fn delete(&self, roll_no: i32) -> Result<bool, ServiceError> {
        let mut students = self.inner.write().await;
        let before = students.len();
        students.retain(|s| s.roll_no != roll_no);
        Ok(students.len() < before)
    }
}

/// Store backed by hand-written SQL in `models::student`.
pub struct SqlStudentStore {
    pub db: DatabaseConnection,
}

#[async_trait]
impl StudentStore for SqlStudentStore {
    async fn list(&self) -> Result<Vec<Student>, ServiceError> {
        Ok(models::student::find_all(&self.db).await?)
    }

    async fn get(&self, roll_no: i32) -> Result<Option<Student>, ServiceError> {
        Ok(models::student::find(&self.db, roll_no).await?)
    }

    async fn create(&self, student: Student) -> Result<Student, ServiceError> {
        if models::student::find(&self.db, student.roll_no).await?.is_some() {
            return Err(ServiceError::conflict("student", student.roll_no));
        }
        models::student::save(&self.db, &student).await?;
        Ok(student)
    }

    async fn update(&self, student: Student) -> Result<Student, ServiceError> {
        let affected = models::student::update(&self.db, &student).await?;
        if affected == 0 {
            return Err(ServiceError::not_found("student"));
        }
        Ok(student)
    }

    async fn delete(&self, roll_no: i32) -> Result<bool, ServiceError> {
        Ok(models::student::delete(&self.db, roll_no).await? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(roll_no: i32, name: &str, marks: i32) -> Student {
        Student { roll_no, name: name.into(), marks }
    }

    #[tokio::test]
    async fn crud_roundtrip() {
        let store = InMemoryStudentStore::new();
        let s = student(104, "David", 100);
        store.create(s.clone()).await.expect("create");
        assert_eq!(store.get(104).await.unwrap(), Some(s));

        let updated = store.update(student(104, "David", 88)).await.expect("update");
        assert_eq!(updated.marks, 88);

        assert!(store.delete(104).await.unwrap());
        assert_eq!(store.get(104).await.unwrap(), None);
        assert!(!store.delete(104).await.unwrap());
    }

    #[tokio::test]
    async fn update_missing_roll_no_is_not_found() {
        let store = InMemoryStudentStore::new();
        let err = store.update(student(1, "Ghost", 0)).await.expect_err("absent");
        assert!(matches!(err, ServiceError::NotFound(_)));
        // NotFound is surfaced without inserting anything
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_roll_no_conflicts() {
        let store = InMemoryStudentStore::new();
        store.create(student(7, "A", 50)).await.expect("first");
        let err = store.create(student(7, "B", 60)).await.expect_err("dup");
        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}
