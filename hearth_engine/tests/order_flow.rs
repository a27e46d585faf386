use hearth_common::Cents;
use hearth_engine::{
    db_types::*,
    order_objects::{CheckoutRequest, OrderQueryFilter},
    pricing::PricingPolicy,
    test_utils::prepare_env::prepare_test_env,
    OrderFlowApi,
    OrderFlowError,
    SqliteDatabase,
};
use log::*;
use tokio::runtime::Runtime;

fn checkout_request(items: Vec<NewOrderItem>, coupon: Option<Coupon>) -> CheckoutRequest {
    CheckoutRequest {
        customer_name: "Pat Vendor".to_string(),
        email: "pat@example.com".to_string(),
        shipping_address: "1 Main St, Springfield".to_string(),
        billing_address: None,
        items,
        coupon,
    }
}

#[test]
fn checkout_persists_a_priced_order() {
    let sys = Runtime::new().unwrap();
    sys.block_on(async move {
        let url = "sqlite://../data/test_checkout_persists.db";
        prepare_test_env(url).await;
        let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating database");
        let api = OrderFlowApi::with_policy(
            db,
            PricingPolicy { shipping_cost: Cents::from_dollars(10), tax: Cents::new(2_50) },
        );

        let items = vec![
            NewOrderItem::new("Cedar Barrel Sauna", "SAUNA-001", Cents::new(1_99), 2),
            NewOrderItem::new("Cold Plunge Tub", "PLUNGE-001", Cents::new(17_50), 1),
        ];
        let coupon = Coupon::new("fixed10", CouponDiscount::Fixed(Cents::new(10_00)));
        let order = api.checkout(checkout_request(items, Some(coupon))).await.expect("Checkout failed");

        // 2 x 1.99 + 17.50 = 21.48, minus the 10.00 coupon, plus 10.00 shipping and 2.50 tax
        assert_eq!(order.subtotal, Cents::new(21_48));
        assert_eq!(order.discount_amount, Cents::new(10_00));
        assert_eq!(order.total, Cents::new(23_98));
        assert_eq!(order.status, FulfillmentStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.coupon_code.as_deref(), Some("FIXED10"));

        let fetched = api.order_by_id(&order.order_id).await.unwrap().expect("Order not found after checkout");
        assert_eq!(fetched.total, order.total);
        let items = api.order_items(&order.order_id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items.iter().map(|i| i.line_total).sum::<Cents>(), order.subtotal);
        info!("🛒️ checkout_persists_a_priced_order complete");
    });
}

#[test]
fn coupon_codes_are_stored_in_canonical_form() {
    let sys = Runtime::new().unwrap();
    sys.block_on(async move {
        let url = "sqlite://../data/test_coupon_normalization.db";
        prepare_test_env(url).await;
        let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating database");
        let api = OrderFlowApi::new(db);

        // Built field-wise, the way a deserialized payload arrives, so the constructor never runs.
        let coupon = Coupon { code: "fixed10".to_string(), discount: CouponDiscount::Fixed(Cents::from_dollars(5)) };
        let items = vec![NewOrderItem::new("Sauna Ladle", "ACC-003", Cents::new(24_00), 1)];
        let order = api.checkout(checkout_request(items, Some(coupon))).await.expect("Checkout failed");
        assert_eq!(order.coupon_code.as_deref(), Some("FIXED10"));
        assert_eq!(order.discount_amount, Cents::from_dollars(5));

        let fetched = api.order_by_id(&order.order_id).await.unwrap().expect("Order not found after checkout");
        assert_eq!(fetched.coupon_code.as_deref(), Some("FIXED10"));
    });
}

#[test]
fn carts_pricing_above_the_ceiling_never_reach_the_database() {
    let sys = Runtime::new().unwrap();
    sys.block_on(async move {
        let url = "sqlite://../data/test_checkout_ceiling.db";
        prepare_test_env(url).await;
        let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating database");
        let api = OrderFlowApi::new(db);

        let items = vec![NewOrderItem::new("Gold Plated Sauna", "SAUNA-AU", Cents::from_dollars(500_000), 2)];
        let err = api.checkout(checkout_request(items, None)).await.unwrap_err();
        assert!(matches!(err, OrderFlowError::Pricing(_)), "Expected a pricing rejection, got {err}");

        let all = api.search_orders(OrderQueryFilter::default()).await.unwrap();
        assert!(all.is_empty(), "No order row should exist after a rejected checkout");
    });
}

#[test]
fn status_updates_follow_the_transition_tables() {
    let sys = Runtime::new().unwrap();
    sys.block_on(async move {
        let url = "sqlite://../data/test_status_updates.db";
        prepare_test_env(url).await;
        let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating database");
        let api = OrderFlowApi::new(db);

        let items = vec![NewOrderItem::new("Sauna Bucket", "ACC-007", Cents::new(4_99), 1)];
        let order = api.checkout(checkout_request(items, None)).await.expect("Checkout failed");
        let oid = order.order_id.clone();

        // Forward moves are fine, including skipping Processing entirely.
        let change =
            api.update_status(&oid, StatusUpdate::Fulfillment(FulfillmentStatus::Shipped)).await.unwrap();
        assert!(change.changed);
        assert_eq!(change.order.status, FulfillmentStatus::Shipped);

        // Re-asserting the current status is a no-op, not an error.
        let change =
            api.update_status(&oid, StatusUpdate::Fulfillment(FulfillmentStatus::Shipped)).await.unwrap();
        assert!(!change.changed);

        // Backwards is rejected.
        let err =
            api.update_status(&oid, StatusUpdate::Fulfillment(FulfillmentStatus::Processing)).await.unwrap_err();
        assert!(matches!(err, OrderFlowError::InvalidTransition { .. }));

        // The payment side has its own table.
        let change = api.update_status(&oid, StatusUpdate::Payment(PaymentStatus::Completed)).await.unwrap();
        assert!(change.changed);
        let err = api.update_status(&oid, StatusUpdate::Payment(PaymentStatus::Failed)).await.unwrap_err();
        assert!(matches!(err, OrderFlowError::InvalidTransition { .. }));
        let change = api.update_status(&oid, StatusUpdate::Payment(PaymentStatus::Refunded)).await.unwrap();
        assert_eq!(change.order.payment_status, PaymentStatus::Refunded);

        // The fulfillment change left payment untouched and vice versa.
        assert_eq!(change.order.status, FulfillmentStatus::Shipped);
    });
}

#[test]
fn mark_delivered_requires_a_completed_payment() {
    let sys = Runtime::new().unwrap();
    sys.block_on(async move {
        let url = "sqlite://../data/test_mark_delivered.db";
        prepare_test_env(url).await;
        let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating database");
        let api = OrderFlowApi::new(db);

        let items = vec![NewOrderItem::new("Plunge Thermometer", "ACC-042", Cents::new(12_00), 1)];
        let order = api.checkout(checkout_request(items, None)).await.expect("Checkout failed");
        let oid = order.order_id.clone();

        let err = api.mark_delivered(&oid).await.unwrap_err();
        assert!(matches!(err, OrderFlowError::PaymentIncomplete(_)));

        api.update_status(&oid, StatusUpdate::Payment(PaymentStatus::Completed)).await.unwrap();
        let change = api.mark_delivered(&oid).await.unwrap();
        assert!(change.changed);
        assert_eq!(change.order.status, FulfillmentStatus::Delivered);

        // Delivered is terminal for everything except cancellation bookkeeping.
        let err =
            api.update_status(&oid, StatusUpdate::Fulfillment(FulfillmentStatus::Shipped)).await.unwrap_err();
        assert!(matches!(err, OrderFlowError::InvalidTransition { .. }));
    });
}

#[test]
fn order_search_filters_compose() {
    let sys = Runtime::new().unwrap();
    sys.block_on(async move {
        let url = "sqlite://../data/test_order_search.db";
        prepare_test_env(url).await;
        let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating database");
        let api = OrderFlowApi::new(db);

        for i in 0..3 {
            let mut request = checkout_request(
                vec![NewOrderItem::new("Sauna Hat", "ACC-001", Cents::new(9_99), 1)],
                None,
            );
            request.email = format!("customer{i}@example.com");
            let order = api.checkout(request).await.expect("Checkout failed");
            if i == 0 {
                api.update_status(&order.order_id, StatusUpdate::Fulfillment(FulfillmentStatus::Shipped))
                    .await
                    .unwrap();
            }
        }

        let all = api.search_orders(OrderQueryFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let shipped =
            api.search_orders(OrderQueryFilter::default().with_status(FulfillmentStatus::Shipped)).await.unwrap();
        assert_eq!(shipped.len(), 1);

        let by_email = api.search_orders(OrderQueryFilter::default().with_email("customer1")).await.unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].email, "customer1@example.com");

        let none = api
            .search_orders(
                OrderQueryFilter::default().with_email("customer1").with_status(FulfillmentStatus::Shipped),
            )
            .await
            .unwrap();
        assert!(none.is_empty());
    });
}
