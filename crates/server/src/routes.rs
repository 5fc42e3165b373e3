use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::{jobs::JobService, products::ProductService, students::StudentService};

use crate::observe::MethodHooks;

pub mod home;
pub mod jobs;
pub mod products;
pub mod students;

/// Shared handler state: one service per entity plus the observer hooks the
/// product handlers wrap their calls with. Built once at startup, cloned per
/// request by axum.
#[derive(Clone)]
pub struct ServerState {
    pub jobs: JobService,
    pub students: StudentService,
    pub products: ProductService,
    pub hooks: Arc<dyn MethodHooks>,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: job board, student records, product
/// catalog and the HTML demo pages, with CORS and request tracing layered on
/// top.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let pages = Router::new()
        .route("/", get(home::index))
        .route("/add", get(home::add))
        .route("/hello", get(home::hello))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(crate::openapi::serve));

    let job_board = Router::new()
        .route("/posts", get(jobs::list).post(jobs::create).delete(jobs::delete))
        .route("/posts/:post_id", get(jobs::get).put(jobs::update));

    let students = Router::new()
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/:roll_no",
            get(students::get).put(students::update).delete(students::delete),
        );

    let catalog = Router::new()
        .route("/api/products", get(products::list))
        .route("/api/products/search", get(products::search))
        .route("/api/product", post(products::create))
        .route(
            "/api/product/:id",
            get(products::get).put(products::update).delete(products::delete),
        )
        .route("/api/product/:id/image", get(products::image));

    pages
        .merge(job_board)
        .merge(students)
        .merge(catalog)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
