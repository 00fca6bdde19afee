//! Wiring for the three collection actors.

use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::credentials::PasswordHasherConfig;
use crate::lifecycle::AdminSeed;
use crate::model::Role;
use crate::user_actor::{Registration, UserError};
use crate::{order_actor, product_actor, user_actor};
use secrecy::ExposeSecret;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// The running document store: one actor per collection plus their clients.
///
/// Clients are cheap to clone; hand clones to the HTTP layer and keep this
/// value around to shut the actors down.
pub struct ShopSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

impl ShopSystem {
    /// Creates and starts every actor. Must be called inside a Tokio runtime.
    pub fn start(channel_capacity: usize, hasher: PasswordHasherConfig) -> Self {
        // 1. Create actors (no dependencies yet)
        let (user_actor, users) = user_actor::new(channel_capacity);
        let (product_actor, products) = product_actor::new(channel_capacity);
        let (order_actor, orders) = order_actor::new(channel_capacity);

        let user_client = UserClient::new(users, hasher);
        let product_client = ProductClient::new(products);
        let order_client = OrderClient::new(orders);

        // 2. Start actors with their dependencies injected
        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(order_actor.run(product_client.clone())),
        ];
        info!(channel_capacity, "Shop system started");

        Self {
            user_client,
            product_client,
            order_client,
            handles,
        }
    }

    /// Registers the configured admin account. An existing account with the
    /// same username or email is left untouched.
    pub async fn seed_admin(&self, seed: &AdminSeed) -> Result<(), UserError> {
        let registration = Registration {
            username: seed.username.clone(),
            password: seed.password.expose_secret().to_string(),
            email: seed.email.clone(),
            ..Default::default()
        };
        match self
            .user_client
            .register_with_role(registration, Role::Admin)
            .await
        {
            Ok(user) => {
                info!(id = %user.id, username = %user.username, "Admin account created");
                Ok(())
            }
            Err(UserError::AlreadyExists(_)) => {
                warn!(username = %seed.username, "Admin account already exists");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Drops this system's clients and waits for every actor to drain.
    ///
    /// Clones held elsewhere (router state, for instance) must be dropped first
    /// or the corresponding actors keep running. The order actor holds a
    /// product client, so it has to stop before the product actor can.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down shop system");
        let Self {
            user_client,
            product_client,
            order_client,
            handles,
        } = self;
        drop(order_client);
        drop(user_client);
        drop(product_client);

        for handle in handles {
            handle.await.map_err(|e| format!("Actor task failed: {e}"))?;
        }
        info!("Shop system stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn cheap() -> PasswordHasherConfig {
        PasswordHasherConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[tokio::test]
    async fn seeded_admin_can_log_in_and_reseeding_is_harmless() {
        let system = ShopSystem::start(8, cheap());
        let seed = AdminSeed {
            username: "root".into(),
            email: Some("root@shop.test".into()),
            password: SecretString::from("hunter22"),
        };
        system.seed_admin(&seed).await.unwrap();
        system.seed_admin(&seed).await.unwrap();

        let admin = system
            .user_client
            .login("root@shop.test", "hunter22")
            .await
            .unwrap();
        assert_eq!(admin.role, Role::Admin);

        system.shutdown().await.unwrap();
    }
}
