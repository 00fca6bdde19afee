//! Real order actor, mocked product collection.
//!
//! The order actor's `on_create` and `Cancel` hooks call the product client;
//! here every one of those calls is scripted with `MockClient<Product>`.

use actor_shop::clients::{OrderClient, PageRequest, ProductClient};
use actor_shop::framework::mock::MockClient;
use actor_shop::framework::FrameworkError;
use actor_shop::model::{
    Category, OrderCreate, OrderLineRequest, OrderStatus, Product, ProductId, ShippingAddress,
    UserId,
};
use actor_shop::order_actor::{self, OrderError};
use actor_shop::product_actor::{ProductActionResult, ProductError};
use chrono::Utc;

fn product(id: u32, name: &str, price: f64, quantity: u32) -> Product {
    let now = Utc::now();
    Product {
        id: ProductId(id),
        name: name.to_string(),
        description: None,
        price,
        category: Category::Electronics,
        quantity,
        in_stock: quantity > 0,
        image_url: None,
        created_at: now,
        updated_at: now,
    }
}

fn order_for(user: u32, lines: &[(u32, u32)]) -> OrderCreate {
    OrderCreate {
        user_id: UserId(user),
        lines: lines
            .iter()
            .map(|&(product_id, quantity)| OrderLineRequest {
                product_id: ProductId(product_id),
                quantity,
            })
            .collect(),
        shipping_address: ShippingAddress {
            street: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip_code: "62701".into(),
            country: "US".into(),
        },
        payment_method: None,
    }
}

fn start(mock: &MockClient<Product>) -> (OrderClient, tokio::task::JoinHandle<()>) {
    let (actor, client) = order_actor::new(8);
    let handle = tokio::spawn(actor.run(ProductClient::new(mock.client())));
    (OrderClient::new(client), handle)
}

#[tokio::test]
async fn create_snapshots_prices_and_cancel_restocks_every_line() {
    let mut products = MockClient::<Product>::new();
    // reserve
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::AdjustQuantity(product(1, "Widget", 10.0, 0)));
    products
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::AdjustQuantity(product(2, "Gadget", 2.5, 7)));
    // restock
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::AdjustQuantity(product(1, "Widget", 10.0, 2)));
    products
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::AdjustQuantity(product(2, "Gadget", 2.5, 10)));

    let (orders, _handle) = start(&products);

    let order = orders
        .create_order(order_for(1, &[(1, 2), (2, 3)]))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items[0].product_name, "Widget");
    assert_eq!(order.items[1].price, 2.5);
    assert_eq!(order.total, 27.5);

    let outcome = orders.cancel_order(UserId(1), order.id).await.unwrap();
    assert_eq!(outcome.status, OrderStatus::Cancelled);

    let stored = orders.get_order(UserId(1), order.id).await.unwrap();
    assert_eq!(stored.cancelled_at, Some(outcome.cancelled_at));

    products.verify();
}

#[tokio::test]
async fn missing_product_rejects_the_order() {
    let mut products = MockClient::<Product>::new();
    products
        .expect_action(ProductId(9))
        .return_err(FrameworkError::NotFound(ProductId(9).to_string()));

    let (orders, _handle) = start(&products);

    let err = orders
        .create_order(order_for(1, &[(9, 1)]))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::ProductNotFound("product_9".into()));

    let page = orders
        .list_orders(UserId(1), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 0);
    products.verify();
}

#[tokio::test]
async fn out_of_stock_line_stops_the_remaining_lines() {
    let mut products = MockClient::<Product>::new();
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::AdjustQuantity(product(1, "Widget", 10.0, 3)));
    products
        .expect_action(ProductId(2))
        .return_err(FrameworkError::EntityError(Box::new(
            ProductError::InsufficientStock {
                product: "Gadget".into(),
                requested: 5,
                available: 1,
            },
        )));
    // No expectation for product 3: it must never be asked.

    let (orders, _handle) = start(&products);

    let err = orders
        .create_order(order_for(1, &[(1, 1), (2, 5), (3, 1)]))
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::OutOfStock("Gadget".into()));
    products.verify();
}

#[tokio::test]
async fn cancel_skips_products_that_no_longer_exist() {
    let mut products = MockClient::<Product>::new();
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::AdjustQuantity(product(1, "Widget", 10.0, 4)));
    products
        .expect_action(ProductId(1))
        .return_err(FrameworkError::NotFound(ProductId(1).to_string()));

    let (orders, _handle) = start(&products);

    let order = orders.create_order(order_for(1, &[(1, 1)])).await.unwrap();
    let outcome = orders.cancel_order(UserId(1), order.id).await.unwrap();
    assert_eq!(outcome.status, OrderStatus::Cancelled);
    products.verify();
}

#[tokio::test]
async fn failed_restock_still_cancels_and_is_not_retried() {
    let mut products = MockClient::<Product>::new();
    // reserve
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::AdjustQuantity(product(1, "Widget", 10.0, 4)));
    products
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::AdjustQuantity(product(2, "Gadget", 2.5, 9)));
    // restock: the first line fails, the second still goes through
    products
        .expect_action(ProductId(1))
        .return_err(FrameworkError::ActorClosed);
    products
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::AdjustQuantity(product(2, "Gadget", 2.5, 10)));

    let (orders, _handle) = start(&products);

    let order = orders
        .create_order(order_for(1, &[(1, 1), (2, 1)]))
        .await
        .unwrap();
    let outcome = orders.cancel_order(UserId(1), order.id).await.unwrap();
    assert_eq!(outcome.status, OrderStatus::Cancelled);

    // A second cancel is refused before any product is touched again.
    let err = orders.cancel_order(UserId(1), order.id).await.unwrap_err();
    assert!(matches!(err, OrderError::CannotCancel(_)));

    products.verify();
}

#[tokio::test]
async fn cancel_is_refused_once_fulfilment_started() {
    let mut products = MockClient::<Product>::new();
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::AdjustQuantity(product(1, "Widget", 10.0, 4)));

    let (orders, _handle) = start(&products);

    let order = orders.create_order(order_for(1, &[(1, 1)])).await.unwrap();
    orders
        .update_status(order.id, OrderStatus::Shipped, Some("TRACK-1".into()))
        .await
        .unwrap();

    let err = orders.cancel_order(UserId(1), order.id).await.unwrap_err();
    assert!(matches!(err, OrderError::CannotCancel(_)));

    let stranger = orders.get_order(UserId(2), order.id).await.unwrap_err();
    assert!(matches!(stranger, OrderError::Forbidden(_)));

    // The refused cancel never reached the product mock.
    products.verify();
}
