use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A student record. Unlike the other entities this one is persisted through
/// hand-written SQL with positional parameters, mapping rows back with
/// [`FromQueryResult`].
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub roll_no: i32,
    pub name: String,
    pub marks: i32,
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Student>, ModelError> {
    let stmt = Statement::from_string(
        db.get_database_backend(),
        "SELECT roll_no, name, marks FROM student ORDER BY roll_no",
    );
    Ok(Student::find_by_statement(stmt).all(db).await?)
}

pub async fn find(db: &DatabaseConnection, roll_no: i32) -> Result<Option<Student>, ModelError> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        "SELECT roll_no, name, marks FROM student WHERE roll_no = $1",
        [roll_no.into()],
    );
    Ok(Student::find_by_statement(stmt).one(db).await?)
}

/// Insert; returns the number of affected rows.
pub async fn save(db: &DatabaseConnection, s: &Student) -> Result<u64, ModelError> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT INTO student (roll_no, name, marks) VALUES ($1, $2, $3)",
        [s.roll_no.into(), s.name.clone().into(), s.marks.into()],
    );
    let res = db.execute(stmt).await?;
    Ok(res.rows_affected())
}

/// Update by roll number; zero affected rows means the record was absent.
pub async fn update(db: &DatabaseConnection, s: &Student) -> Result<u64, ModelError> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        "UPDATE student SET name = $2, marks = $3 WHERE roll_no = $1",
        [s.roll_no.into(), s.name.clone().into(), s.marks.into()],
    );
    let res = db.execute(stmt).await?;
    Ok(res.rows_affected())
}

pub async fn delete(db: &DatabaseConnection, roll_no: i32) -> Result<u64, ModelError> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        "DELETE FROM student WHERE roll_no = $1",
        [roll_no.into()],
    );
    let res = db.execute(stmt).await?;
    Ok(res.rows_affected())
}
