//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes domain‑specific methods.

use crate::clients::actor_client::ActorClient;
use crate::clients::pagination::{Page, PageRequest};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate, SearchCriteria};
use crate::product_actor::search::{sort_products, CatalogFilter};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use tracing::{debug, instrument};

const MAX_RECOMMENDATIONS: usize = 5;

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => other
                .into_entity_error::<ProductError>()
                .unwrap_or_else(|e| ProductError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl ProductClient {
    /// Fetches a product, treating absence as an error.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Apply `delta` to the stock level in one actor message.
    ///
    /// Returns the product after the change, or `InsufficientStock` if the
    /// quantity would drop below zero.
    #[instrument(skip(self))]
    pub async fn adjust_quantity(&self, id: ProductId, delta: i64) -> Result<Product, ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::AdjustQuantity(delta))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::AdjustQuantity(product) => Ok(product),
        }
    }

    /// Take `quantity` units out of stock.
    pub async fn reserve(&self, id: ProductId, quantity: u32) -> Result<Product, ProductError> {
        debug!("Reserving {} units for product {}", quantity, id);
        self.adjust_quantity(id, -i64::from(quantity)).await
    }

    /// Put `quantity` units back into stock.
    pub async fn restock(&self, id: ProductId, quantity: u32) -> Result<Product, ProductError> {
        debug!("Restocking {} units for product {}", quantity, id);
        self.adjust_quantity(id, i64::from(quantity)).await
    }

    /// Filtered, sorted, paginated catalog listing.
    ///
    /// Defaults: page 1, limit 20 (clamped to 1..=100), newest first.
    #[instrument(skip(self))]
    pub async fn search(&self, criteria: SearchCriteria) -> Result<Page<Product>, ProductError> {
        let filter = CatalogFilter::new(&criteria);
        let mut matches = self
            .inner
            .find(move |product| filter.matches(product))
            .await
            .map_err(Self::map_error)?;
        sort_products(
            &mut matches,
            criteria.sort.unwrap_or_default(),
            criteria.order.unwrap_or_default(),
        );
        let request = PageRequest::new(criteria.page, criteria.limit);
        debug!(total = matches.len(), "Search matched");
        Ok(Page::from_sorted(matches, request))
    }

    /// Up to five in-stock products from the same category, newest first.
    #[instrument(skip(self))]
    pub async fn recommendations(
        &self,
        id: ProductId,
    ) -> Result<(Product, Vec<Product>), ProductError> {
        let product = self.find_by_id(id).await?;
        let category = product.category;
        let mut similar = self
            .inner
            .find(move |p| p.category == category && p.id != id && p.in_stock)
            .await
            .map_err(Self::map_error)?;
        similar.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        similar.truncate(MAX_RECOMMENDATIONS);
        Ok((product, similar))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};
    use crate::model::Category;
    use chrono::Utc;

    fn widget(quantity: u32) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId(1),
            name: "Widget".into(),
            description: None,
            price: 10.0,
            category: Category::Other,
            quantity,
            in_stock: quantity > 0,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_reserve_sends_negative_delta() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task = tokio::spawn(async move { product_client.reserve(ProductId(1), 5).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        assert_eq!(id, ProductId(1));
        match action {
            ProductAction::AdjustQuantity(delta) => assert_eq!(delta, -5),
            _ => panic!("Expected AdjustQuantity action"),
        }

        responder
            .send(Ok(ProductActionResult::AdjustQuantity(widget(95))))
            .unwrap();

        let result = reserve_task.await.unwrap();
        assert_eq!(result.unwrap().quantity, 95);
    }

    #[tokio::test]
    async fn test_reserve_insufficient_stock_keeps_its_type() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    product: "Widget".into(),
                    requested: 100,
                    available: 3,
                },
            )));
        let product_client = ProductClient::new(mock.client());

        let result = product_client.reserve(ProductId(1), 100).await;
        assert!(matches!(
            result,
            Err(ProductError::InsufficientStock { requested: 100, available: 3, .. })
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_product_maps_to_not_found() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductId(9))
            .return_err(FrameworkError::NotFound("product_9".into()));
        mock.expect_get(ProductId(9)).return_ok(None);
        let product_client = ProductClient::new(mock.client());

        let restock = product_client.restock(ProductId(9), 1).await;
        assert_eq!(restock, Err(ProductError::NotFound("product_9".into())));
        let found = product_client.find_by_id(ProductId(9)).await;
        assert_eq!(found, Err(ProductError::NotFound("product_9".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_closed_actor_is_a_communication_error() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductId(1))
            .return_err(FrameworkError::ActorClosed);
        let product_client = ProductClient::new(mock.client());

        let result = product_client.restock(ProductId(1), 1).await;
        assert!(matches!(result, Err(ProductError::ActorCommunicationError(_))));
        mock.verify();
    }
}
