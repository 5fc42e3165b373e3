pub mod repository;
pub mod service;

pub use repository::{InMemoryStudentStore, SqlStudentStore, StudentStore};
pub use service::StudentService;
