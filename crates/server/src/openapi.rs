use axum::Json;
use utoipa::{OpenApi, ToSchema};

// Request-body mirrors kept separate from the entity types so the models
// crate stays free of utoipa derives.

#[derive(ToSchema)]
pub struct JobPostDoc {
    pub post_id: i32,
    pub post_profile: String,
    pub post_desc: String,
    pub req_experience: i32,
    pub post_tech_stack: Vec<String>,
}

#[derive(ToSchema)]
pub struct StudentDoc {
    pub roll_no: i32,
    pub name: String,
    pub marks: i32,
}

#[derive(ToSchema)]
pub struct ProductInputDoc {
    pub name: String,
    pub price: f64,
    pub category: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::jobs::list,
        crate::routes::jobs::get,
        crate::routes::jobs::create,
        crate::routes::jobs::update,
        crate::routes::jobs::delete,
        crate::routes::students::list,
        crate::routes::students::get,
        crate::routes::students::create,
        crate::routes::students::update,
        crate::routes::students::delete,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::image,
        crate::routes::products::search,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(schemas(JobPostDoc, StudentDoc, ProductInputDoc)),
    tags(
        (name = "health"),
        (name = "jobs"),
        (name = "students"),
        (name = "catalog"),
    )
)]
pub struct ApiDoc;

/// Serve the generated document; there is no bundled UI, any OpenAPI viewer
/// can be pointed at this endpoint.
pub async fn serve() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
