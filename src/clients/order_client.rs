use crate::clients::actor_client::ActorClient;
use crate::clients::pagination::{Page, PageRequest};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{
    CancelOutcome, Order, OrderCreate, OrderId, OrderStatus, OrderSummary, OrderUpdate, UserId,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Orchestration (stock reservation, restoration on cancel) happens inside the
/// Order actor's hooks; this client only shapes requests and results.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .into_entity_error::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl OrderClient {
    /// Places an order: validates it, reserves stock line by line and stores it
    /// as `pending`.
    #[instrument(skip(self, params), fields(user_id = %params.user_id, lines = params.lines.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "create_order called");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        let order = self.fetch(id).await?;
        info!(%id, total = order.total, "Order placed");
        Ok(order)
    }

    async fn fetch(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// The caller's orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        user_id: UserId,
        request: PageRequest,
    ) -> Result<Page<OrderSummary>, OrderError> {
        let mut orders = self
            .inner
            .find(move |order| order.user_id == user_id)
            .await
            .map_err(Self::map_error)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(Page::from_sorted(orders, request).map(|order| OrderSummary::from(&order)))
    }

    /// An order, visible only to its owner.
    #[instrument(skip(self))]
    pub async fn get_order(&self, user_id: UserId, id: OrderId) -> Result<Order, OrderError> {
        let order = self.fetch(id).await?;
        if order.user_id != user_id {
            return Err(OrderError::Forbidden("Cannot view other user's orders".into()));
        }
        Ok(order)
    }

    /// Owner-initiated cancellation; restores inventory for every line.
    #[instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        user_id: UserId,
        id: OrderId,
    ) -> Result<CancelOutcome, OrderError> {
        let action = OrderAction::Cancel {
            requested_by: user_id,
        };
        match self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::Cancel(outcome) => {
                info!(%id, "Order cancelled");
                Ok(outcome)
            }
        }
    }

    /// Overwrites the status without checking the transition.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> Result<Order, OrderError> {
        let update = OrderUpdate {
            status,
            tracking_number,
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}
