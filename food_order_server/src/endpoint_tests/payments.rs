use actix_web::{http::StatusCode, web, web::ServiceConfig};
use food_order_engine::{
    db_types::{OrderStatus, PaymentMethod, PaymentStatus},
    PaymentFlowApi,
};
use serde_json::{json, Value};

use super::{
    helpers::post_request,
    mocks::{sample_order, sample_payment, MockBackend, MockProvider},
};
use crate::routes::{PaymentWebhookRoute, RequestPaymentRoute};

fn payment_routes(cfg: &mut ServiceConfig, mock: MockBackend, provider: MockProvider) {
    let api = PaymentFlowApi::new(mock, provider);
    cfg.app_data(web::Data::new(api))
        .service(RequestPaymentRoute::<MockBackend, MockProvider>::new())
        .service(PaymentWebhookRoute::<MockBackend, MockProvider>::new());
}

fn card_method() -> PaymentMethod {
    PaymentMethod { id: 1, name: "CARD".to_string(), enabled: true }
}

#[actix_web::test]
async fn request_payment_opens_a_pending_payment() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_fetch_order().returning(|id| Ok(Some(sample_order(id, OrderStatus::Received))));
        mock.expect_fetch_payment_method().returning(|_| Ok(Some(card_method())));
        mock.expect_fetch_pending_payment().returning(|_| Ok(None));
        mock.expect_insert_payment()
            .returning(|p| Ok(sample_payment(1, p.order_id, PaymentStatus::Pending)));
        let mut provider = MockProvider::new();
        provider.expect_request_payment().returning(|_, _| Ok("P-123".to_string()));
        payment_routes(cfg, mock, provider);
    }
    let (status, body) = post_request("/orders/1/payments", json!({ "method_id": 1 }), configure).await;
    assert_eq!(status, StatusCode::CREATED);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["provider_id"], "P-123");
    assert_eq!(v["status"], "PENDING");
    assert_eq!(v["amount"], "25.50");
}

#[actix_web::test]
async fn request_payment_without_method_is_400() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        payment_routes(cfg, MockBackend::new(), MockProvider::new());
    }
    let (status, body) = post_request("/orders/1/payments", json!({}), configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["fields"][0]["field"], "method_id");
}

#[actix_web::test]
async fn request_payment_with_disabled_method_is_422() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_fetch_order().returning(|id| Ok(Some(sample_order(id, OrderStatus::Received))));
        mock.expect_fetch_payment_method()
            .returning(|id| Ok(Some(PaymentMethod { id, name: "VOUCHER".to_string(), enabled: false })));
        payment_routes(cfg, mock, MockProvider::new());
    }
    let (status, body) = post_request("/orders/1/payments", json!({ "method_id": 2 }), configure).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["message"], "Payment method 'VOUCHER' is not available");
}

#[actix_web::test]
async fn second_payment_request_is_a_conflict() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_fetch_order().returning(|id| Ok(Some(sample_order(id, OrderStatus::Received))));
        mock.expect_fetch_payment_method().returning(|_| Ok(Some(card_method())));
        mock.expect_fetch_pending_payment()
            .returning(|order_id| Ok(Some(sample_payment(1, order_id, PaymentStatus::Pending))));
        payment_routes(cfg, mock, MockProvider::new());
    }
    let (status, body) = post_request("/orders/1/payments", json!({ "method_id": 1 }), configure).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["httpCode"], 409);
}

#[actix_web::test]
async fn confirmed_webhook_is_applied() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_fetch_payment_by_provider_id()
            .returning(|_| Ok(Some(sample_payment(1, 7, PaymentStatus::Pending))));
        mock.expect_confirm_payment().returning(|id| Ok(sample_payment(id, 7, PaymentStatus::Confirmed)));
        payment_routes(cfg, mock, MockProvider::new());
    }
    let (status, body) = post_request(
        "/webhook/payments",
        json!({ "id": "P-123", "status": "CONFIRMED", "reference": 7 }),
        configure,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["success"], true);
}

#[actix_web::test]
async fn duplicate_confirmed_webhook_is_a_silent_success() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        // Already settled, so no confirm call is expected.
        mock.expect_fetch_payment_by_provider_id()
            .returning(|_| Ok(Some(sample_payment(1, 7, PaymentStatus::Confirmed))));
        payment_routes(cfg, mock, MockProvider::new());
    }
    let (status, _) = post_request(
        "/webhook/payments",
        json!({ "id": "P-123", "status": "CONFIRMED", "reference": 7 }),
        configure,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn webhook_for_unknown_payment_is_404() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_fetch_payment_by_provider_id().returning(|_| Ok(None));
        payment_routes(cfg, mock, MockProvider::new());
    }
    let (status, body) = post_request(
        "/webhook/payments",
        json!({ "id": "P-999", "status": "CONFIRMED", "reference": 7 }),
        configure,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["path"], "/webhook/payments");
}

#[actix_web::test]
async fn conflicting_webhook_outcome_is_409() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_fetch_payment_by_provider_id()
            .returning(|_| Ok(Some(sample_payment(1, 7, PaymentStatus::Confirmed))));
        payment_routes(cfg, mock, MockProvider::new());
    }
    let (status, _) = post_request(
        "/webhook/payments",
        json!({ "id": "P-123", "status": "FAILED", "reference": 7 }),
        configure,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn webhook_with_unknown_status_is_400() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        payment_routes(cfg, MockBackend::new(), MockProvider::new());
    }
    let (status, body) = post_request(
        "/webhook/payments",
        json!({ "id": "P-123", "status": "MAYBE", "reference": 7 }),
        configure,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["fields"][0]["field"], "status");
}
