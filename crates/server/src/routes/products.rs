use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};

use models::product::Model as Product;
use service::errors::ServiceError;
use service::products::{ProductInput, UploadedImage};

use crate::errors::JsonApiError;
use crate::observe::around;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Case-sensitive substring matched against name or category.
    pub keyword: String,
}

#[derive(Debug, Error)]
enum UploadError {
    #[error("malformed multipart payload: {0}")]
    Malformed(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Pull the `product` JSON part and the `imageFile` part out of a multipart
/// submission. Field metadata is copied out before the body is consumed, since
/// reading the bytes takes the field by value.
async fn read_submission(multipart: &mut Multipart) -> Result<(ProductInput, UploadedImage), UploadError> {
    let mut input: Option<ProductInput> = None;
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Malformed(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "product" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| UploadError::Malformed(e.to_string()))?;
                let parsed = serde_json::from_slice(&bytes)
                    .map_err(|e| UploadError::Malformed(format!("product part: {}", e)))?;
                input = Some(parsed);
            }
            "imageFile" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| UploadError::Malformed(e.to_string()))?;
                image = Some(UploadedImage { name: file_name, content_type, bytes: bytes.to_vec() });
            }
            other => {
                warn!(field = other, "ignoring unexpected multipart field");
            }
        }
    }

    let input = input.ok_or_else(|| UploadError::Malformed("missing product part".into()))?;
    let image = image.ok_or_else(|| UploadError::Malformed("missing imageFile part".into()))?;
    Ok((input, image))
}

/// Causes stay in the server log; clients get a stable title per status.
fn map_upload_error(e: UploadError) -> JsonApiError {
    match e {
        UploadError::Malformed(msg) => {
            error!(err = %msg, "invalid product submission");
            JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Submission", None)
        }
        UploadError::Service(ServiceError::NotFound(msg)) => {
            JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg))
        }
        UploadError::Service(e) => {
            error!(err = %e, "product store failure");
            JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Store Failed", None)
        }
    }
}

#[utoipa::path(
    get, path = "/api/products", tag = "catalog",
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Product>>, StatusCode> {
    match around(state.hooks.as_ref(), "findAllProducts", state.products.list()).await {
        Ok(products) => {
            info!(count = products.len(), "list products");
            Ok(Json(products))
        }
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    get, path = "/api/product/{id}", tag = "catalog",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, StatusCode> {
    match around(state.hooks.as_ref(), "findProductById", state.products.get(id)).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    get, path = "/api/product/{id}/image", tag = "catalog",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Raw image bytes"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn image(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<([(header::HeaderName, String); 1], Vec<u8>), StatusCode> {
    match around(state.hooks.as_ref(), "findProductImageById", state.products.get(id)).await {
        Ok(Some(product)) => Ok(([(header::CONTENT_TYPE, product.image_type)], product.image_data)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    get, path = "/api/products/search", tag = "catalog",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products"),
        (status = 500, description = "Search Failed")
    )
)]
pub async fn search(
    State(state): State<ServerState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>, StatusCode> {
    match around(state.hooks.as_ref(), "searchProducts", state.products.search(&q.keyword)).await {
        Ok(products) => {
            info!(keyword = %q.keyword, count = products.len(), "search products");
            Ok(Json(products))
        }
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[utoipa::path(
    post, path = "/api/product", tag = "catalog",
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid Submission"),
        (status = 500, description = "Store Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    let created = around(state.hooks.as_ref(), "addProduct", async {
        let (input, image) = read_submission(&mut multipart).await?;
        let product = state.products.create(input, image).await?;
        Ok::<Product, UploadError>(product)
    })
    .await
    .map_err(map_upload_error)?;

    info!(id = created.id, name = %created.name, "created product");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/product/{id}", tag = "catalog",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid Submission"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Store Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<Product>, JsonApiError> {
    let updated = around(state.hooks.as_ref(), "updateProduct", async {
        let (input, image) = read_submission(&mut multipart).await?;
        let product = state.products.update(id, input, image).await?;
        Ok::<Product, UploadError>(product)
    })
    .await
    .map_err(map_upload_error)?;

    info!(id = updated.id, "updated product");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/product/{id}", tag = "catalog",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<&'static str, StatusCode> {
    match around(state.hooks.as_ref(), "deleteProduct", state.products.delete(id)).await {
        Ok(true) => {
            info!(id, "deleted product");
            Ok("Deleted")
        }
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(err = %e, "delete product failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
