//! `/products` routes: catalog search, lookup and admin maintenance.

use super::auth::AdminOnly;
use super::error::{ApiError, ApiJson, ApiPath};
use super::state::AppState;
use crate::clients::Page;
use crate::model::{Category, Product, ProductCreate, ProductId, ProductUpdate, SearchCriteria};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/search", post(search))
        .route("/products/recommendations/{id}", get(recommendations))
        .route("/products/{id}", get(get_product).put(update_product))
}

async fn search(
    State(state): State<AppState>,
    ApiJson(criteria): ApiJson<SearchCriteria>,
) -> Result<Json<Page<Product>>, ApiError> {
    Ok(Json(state.products.search(criteria).await?))
}

async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.products.find_by_id(id).await?))
}

/// Create body; the required fields are optional here so their absence
/// surfaces as one readable message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProductRequest {
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    category: Option<Category>,
    #[serde(default)]
    quantity: u32,
    image_url: Option<String>,
}

async fn create_product(
    State(state): State<AppState>,
    AdminOnly(admin): AdminOnly,
    ApiJson(body): ApiJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let (Some(name), Some(price), Some(category)) = (body.name, body.price, body.category) else {
        return Err(ApiError::InvalidInput(
            "Name, price, and category are required".into(),
        ));
    };
    let params = ProductCreate {
        name,
        description: body.description,
        price,
        category,
        quantity: body.quantity,
        image_url: body.image_url,
    };
    let product = state.products.create_product(params).await?;
    info!(id = %product.id, by = %admin.user_id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(state): State<AppState>,
    AdminOnly(admin): AdminOnly,
    ApiPath(id): ApiPath<ProductId>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.update_product(id, update).await?;
    info!(%id, by = %admin.user_id, "Product updated");
    Ok(Json(product))
}

#[derive(Debug, Serialize)]
struct Recommendations {
    /// Name of the product the recommendations are for.
    product: String,
    recommendations: Vec<Product>,
}

async fn recommendations(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<Recommendations>, ApiError> {
    let (product, recommendations) = state.products.recommendations(id).await?;
    Ok(Json(Recommendations {
        product: product.name,
        recommendations,
    }))
}
