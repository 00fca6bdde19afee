use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::credentials::TokenIssuer;
use crate::lifecycle::{ShopConfig, ShopSystem};
use secrecy::SecretString;
use std::sync::Arc;

/// Shared handler state. Every field is a cheap clone.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub tokens: Arc<TokenIssuer>,
    pub webhook_secret: Option<SecretString>,
}

impl AppState {
    pub fn new(system: &ShopSystem, config: &ShopConfig) -> Self {
        let tokens = TokenIssuer::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.jwt_issuer.clone(),
        );
        Self {
            users: system.user_client.clone(),
            products: system.product_client.clone(),
            orders: system.order_client.clone(),
            tokens: Arc::new(tokens),
            webhook_secret: config.webhook_secret.clone(),
        }
    }
}
