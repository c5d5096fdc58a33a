use chrono::{TimeZone, Utc};
use fog_common::Money;
use food_order_engine::{
    db_types::{NewOrder, NewPayment, Order, OrderItem, OrderStatus, Payment, PaymentMethod, PaymentStatus},
    traits::{OrderManagement, PaymentGatewayDatabase, PaymentProvider, ProviderError},
    OrderFlowError,
    PaymentFlowError,
};
use mockall::mock;

mock! {
    pub Backend {}
    impl OrderManagement for Backend {
        async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, OrderFlowError>;
        async fn fetch_orders(&self, offset: i64, limit: i64) -> Result<Vec<Order>, OrderFlowError>;
        async fn count_orders(&self) -> Result<i64, OrderFlowError>;
        async fn customer_exists(&self, customer_id: i64) -> Result<bool, OrderFlowError>;
        async fn product_exists(&self, product_id: i64) -> Result<bool, OrderFlowError>;
        async fn fetch_payment_method(&self, method_id: i64) -> Result<Option<PaymentMethod>, PaymentFlowError>;
    }
    impl PaymentGatewayDatabase for Backend {
        fn url(&self) -> &str;
        async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderFlowError>;
        async fn advance_order_status(&self, order_id: i64, from: OrderStatus, to: OrderStatus) -> Result<Option<Order>, OrderFlowError>;
        async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, PaymentFlowError>;
        async fn fetch_payment_by_provider_id(&self, provider_id: &str) -> Result<Option<Payment>, PaymentFlowError>;
        async fn fetch_pending_payment(&self, order_id: i64) -> Result<Option<Payment>, PaymentFlowError>;
        async fn confirm_payment(&self, payment_id: i64) -> Result<Payment, PaymentFlowError>;
        async fn fail_payment(&self, payment_id: i64) -> Result<Payment, PaymentFlowError>;
        async fn close(&mut self) -> Result<(), OrderFlowError>;
    }
}

mock! {
    pub Provider {}
    impl PaymentProvider for Provider {
        async fn request_payment(&self, order_id: i64, amount: Money) -> Result<String, ProviderError>;
    }
}

pub fn sample_order(id: i64, status: OrderStatus) -> Order {
    let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    Order {
        id,
        customer_id: 1,
        total: "25.50".parse().unwrap(),
        status,
        created_at: ts,
        updated_at: ts,
        items: vec![
            OrderItem { id: 1, order_id: id, product_id: 10, unit_price: "10.00".parse().unwrap(), quantity: 2 },
            OrderItem { id: 2, order_id: id, product_id: 11, unit_price: "5.50".parse().unwrap(), quantity: 1 },
        ],
    }
}

pub fn sample_payment(id: i64, order_id: i64, status: PaymentStatus) -> Payment {
    let ts = Utc.with_ymd_and_hms(2024, 6, 1, 12, 5, 0).unwrap();
    Payment {
        id,
        order_id,
        method_id: 1,
        amount: "25.50".parse().unwrap(),
        provider_id: "P-123".to_string(),
        status,
        created_at: ts,
        updated_at: ts,
    }
}
