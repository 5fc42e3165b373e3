use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info};

use models::student::Student;
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    get, path = "/students", tag = "students",
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Student>>, JsonApiError> {
    match state.students.list().await {
        Ok(students) => {
            info!(count = students.len(), "list students");
            Ok(Json(students))
        }
        Err(e) => {
            error!(err = %e, "list students failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", None))
        }
    }
}

#[utoipa::path(
    get, path = "/students/{roll_no}", tag = "students",
    params(("roll_no" = i32, Path, description = "Roll number")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(roll_no): Path<i32>,
) -> Result<Json<Student>, StatusCode> {
    match state.students.get(roll_no).await {
        Ok(Some(student)) => Ok(Json(student)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::StudentDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 409, description = "Conflict"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(student): Json<Student>,
) -> Result<Json<Student>, JsonApiError> {
    match state.students.create(student).await {
        Ok(s) => {
            info!(roll_no = s.roll_no, "created student");
            Ok(Json(s))
        }
        Err(ServiceError::Conflict(msg)) => {
            Err(JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(msg)))
        }
        Err(e) => {
            error!(err = %e, "create student failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", None))
        }
    }
}

#[utoipa::path(
    put, path = "/students/{roll_no}", tag = "students",
    params(("roll_no" = i32, Path, description = "Roll number")),
    request_body = crate::openapi::StudentDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(roll_no): Path<i32>,
    Json(mut student): Json<Student>,
) -> Result<Json<Student>, JsonApiError> {
    student.roll_no = roll_no;
    match state.students.update(student).await {
        Ok(s) => {
            info!(roll_no = s.roll_no, "updated student");
            Ok(Json(s))
        }
        Err(ServiceError::NotFound(msg)) => {
            Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)))
        }
        Err(e) => {
            error!(err = %e, "update student failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", None))
        }
    }
}

#[utoipa::path(
    delete, path = "/students/{roll_no}", tag = "students",
    params(("roll_no" = i32, Path, description = "Roll number")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(roll_no): Path<i32>) -> StatusCode {
    match state.students.delete(roll_no).await {
        Ok(true) => {
            info!(roll_no, "deleted student");
            StatusCode::NO_CONTENT
        }
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => {
            error!(err = %e, "delete student failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
