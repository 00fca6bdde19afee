//! ActorEntity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Product`] to be managed by the generic [`crate::framework::ResourceActor`].
//!
//! Every write path ends in [`Product::touch`], which keeps `in_stock` equal to
//! `quantity > 0`.

use super::actions::{ProductAction, ProductActionResult};
use super::ProductError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use chrono::Utc;

const NAME_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 2000;

fn validate_name(raw: &str) -> Result<String, ProductError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ProductError::ValidationError("Name is required".into()));
    }
    if name.chars().count() > NAME_MAX {
        return Err(ProductError::ValidationError(format!(
            "Name exceeds {NAME_MAX} characters"
        )));
    }
    Ok(name.to_string())
}

fn validate_description(raw: Option<String>) -> Result<Option<String>, ProductError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let description = raw.trim().to_string();
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(ProductError::ValidationError(format!(
            "Description exceeds {DESCRIPTION_MAX} characters"
        )));
    }
    Ok(Some(description))
}

fn validate_price(price: f64) -> Result<f64, ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::ValidationError(
            "Price must be a non-negative number".into(),
        ));
    }
    Ok(price)
}

impl Product {
    /// Recomputes derived fields after a write.
    fn touch(&mut self) {
        self.in_stock = self.quantity > 0;
        self.updated_at = Utc::now();
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    /// Creates a new Product from creation parameters.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        let now = Utc::now();
        Ok(Self {
            id,
            name: validate_name(&params.name)?,
            description: validate_description(params.description)?,
            price: validate_price(params.price)?,
            category: params.category,
            quantity: params.quantity,
            in_stock: params.quantity > 0,
            image_url: params.image_url,
            created_at: now,
            updated_at: now,
        })
    }

    /// Handles updates to the Product entity.
    ///
    /// # Fields Updated
    /// - `name`, `description`, `category`, `image_url`: catalog data
    /// - `price`: Product price
    /// - `quantity`: Available stock quantity
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        if let Some(name) = update.name {
            self.name = validate_name(&name)?;
        }
        if update.description.is_some() {
            self.description = validate_description(update.description)?;
        }
        if let Some(price) = update.price {
            self.price = validate_price(price)?;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if update.image_url.is_some() {
            self.image_url = update.image_url;
        }
        self.touch();
        Ok(())
    }

    /// Handles custom actions for the Product entity.
    ///
    /// # Actions
    /// - `AdjustQuantity`: Applies the delta, refusing to go below zero
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::AdjustQuantity(delta) => {
                let adjusted = i64::from(self.quantity) + delta;
                if adjusted < 0 {
                    return Err(ProductError::InsufficientStock {
                        product: self.name.clone(),
                        requested: u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX),
                        available: self.quantity,
                    });
                }
                self.quantity = u32::try_from(adjusted).map_err(|_| {
                    ProductError::ValidationError(format!("Quantity {adjusted} is out of range"))
                })?;
                self.touch();
                Ok(ProductActionResult::AdjustQuantity(self.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn widget(quantity: u32) -> Product {
        Product::from_create_params(
            ProductId(1),
            ProductCreate {
                name: " Widget ".into(),
                description: None,
                price: 10.0,
                category: Category::Other,
                quantity,
                image_url: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn create_derives_in_stock() {
        assert!(widget(2).in_stock);
        assert!(!widget(0).in_stock);
        assert_eq!(widget(1).name, "Widget");
    }

    #[test]
    fn create_rejects_bad_price_and_name() {
        let mut params = ProductCreate {
            name: "   ".into(),
            description: None,
            price: 1.0,
            category: Category::Books,
            quantity: 0,
            image_url: None,
        };
        assert!(Product::from_create_params(ProductId(1), params.clone()).is_err());
        params.name = "Book".into();
        params.price = -1.0;
        assert!(Product::from_create_params(ProductId(1), params.clone()).is_err());
        params.price = f64::NAN;
        assert!(Product::from_create_params(ProductId(1), params).is_err());
    }

    #[tokio::test]
    async fn adjust_to_zero_clears_in_stock() {
        let mut product = widget(2);
        let result = product
            .handle_action(ProductAction::AdjustQuantity(-2), &())
            .await
            .unwrap();
        assert!(matches!(
            result,
            ProductActionResult::AdjustQuantity(ref p) if p.quantity == 0 && !p.in_stock
        ));

        product
            .handle_action(ProductAction::AdjustQuantity(3), &())
            .await
            .unwrap();
        assert_eq!(product.quantity, 3);
        assert!(product.in_stock);
    }

    #[tokio::test]
    async fn adjust_below_zero_is_rejected() {
        let mut product = widget(1);
        let err = product
            .handle_action(ProductAction::AdjustQuantity(-2), &())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock {
                product: "Widget".into(),
                requested: 2,
                available: 1
            }
        );
        assert_eq!(product.quantity, 1);
    }

    #[tokio::test]
    async fn update_quantity_recomputes_in_stock() {
        let mut product = widget(5);
        let update = ProductUpdate {
            quantity: Some(0),
            ..Default::default()
        };
        product.on_update(update, &()).await.unwrap();
        assert!(!product.in_stock);
    }
}
