//! Represents a product in the catalog.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! See [`impl ActorEntity for Product`](#impl-ActorEntity-for-Product) for details on:
//! - Creation parameters ([`ProductCreate`](crate::model::ProductCreate))
//! - Update parameters ([`ProductUpdate`](crate::model::ProductUpdate))
//! - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
    Sports,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: Category,
    pub quantity: u32,
    /// Always `quantity > 0`; recomputed on every write.
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTOs for Product creation and updates.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: Category,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
    pub quantity: Option<u32>,
    pub image_url: Option<String>,
}

/// Field a catalog search is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Price,
    Name,
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub in_stock: Option<bool>,
}

/// Catalog search request.
///
/// Every field is optional; see [`ProductClient::search`](crate::clients::ProductClient::search)
/// for defaults and clamping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub category: Option<Category>,
    pub filters: Option<SearchFilters>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
}
