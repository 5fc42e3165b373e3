use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{error, info};

use models::job_post::Model as JobPost;
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// Case-sensitive substring matched against the profile field.
    pub keyword: Option<String>,
    /// Minimum years of required experience.
    pub experience: Option<i32>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DeleteQuery {
    pub id: i32,
}

#[utoipa::path(
    get, path = "/posts", tag = "jobs",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<JobPost>>, JsonApiError> {
    let result = if let Some(keyword) = q.keyword.as_deref() {
        state.jobs.search(keyword).await
    } else if let Some(years) = q.experience {
        state.jobs.with_min_experience(years).await
    } else {
        state.jobs.list().await
    };
    match result {
        Ok(posts) => {
            info!(count = posts.len(), "list job posts");
            Ok(Json(posts))
        }
        Err(e) => {
            error!(err = %e, "list job posts failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", None))
        }
    }
}

#[utoipa::path(
    get, path = "/posts/{post_id}", tag = "jobs",
    params(("post_id" = i32, Path, description = "Job post id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(post_id): Path<i32>,
) -> Result<Json<JobPost>, StatusCode> {
    match state.jobs.get(post_id).await {
        Ok(Some(post)) => Ok(Json(post)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    post, path = "/posts", tag = "jobs",
    request_body = crate::openapi::JobPostDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 409, description = "Conflict"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(post): Json<JobPost>,
) -> Result<Json<JobPost>, JsonApiError> {
    info!(post_id = post.post_id, profile = %post.post_profile, "job_post_create_request");
    match state.jobs.create(post).await {
        Ok(m) => {
            info!(post_id = m.post_id, "created job post");
            Ok(Json(m))
        }
        Err(ServiceError::Conflict(msg)) => {
            Err(JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(msg)))
        }
        Err(e) => {
            error!(err = %e, "create job post failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", None))
        }
    }
}

#[utoipa::path(
    put, path = "/posts/{post_id}", tag = "jobs",
    params(("post_id" = i32, Path, description = "Job post id")),
    request_body = crate::openapi::JobPostDoc,
    responses(
        (status = 200, description = "Stored"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(post_id): Path<i32>,
    Json(mut post): Json<JobPost>,
) -> Result<Json<JobPost>, JsonApiError> {
    // The path id is authoritative; a stale id in the body is overwritten.
    post.post_id = post_id;
    match state.jobs.upsert(post).await {
        Ok(m) => {
            info!(post_id = m.post_id, "stored job post");
            Ok(Json(m))
        }
        Err(e) => {
            error!(err = %e, "upsert job post failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", None))
        }
    }
}

#[utoipa::path(
    delete, path = "/posts", tag = "jobs",
    params(DeleteQuery),
    responses(
        (status = 204, description = "Deleted or already absent"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Query(q): Query<DeleteQuery>,
) -> StatusCode {
    // Deleting an absent id is a no-op, not an error.
    match state.jobs.delete(q.id).await {
        Ok(removed) => {
            info!(post_id = q.id, removed, "delete job post");
            StatusCode::NO_CONTENT
        }
        Err(e) => {
            error!(err = %e, "delete job post failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
