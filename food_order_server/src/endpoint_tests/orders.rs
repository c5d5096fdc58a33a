use actix_web::{http::StatusCode, web, web::ServiceConfig};
use food_order_engine::{db_types::OrderStatus, OrderFlowApi, OrderFlowError};
use serde_json::{json, Value};

use super::{
    helpers::{get_request, patch_request, post_raw_request, post_request},
    mocks::{sample_order, MockBackend},
};
use crate::routes::{health, CreateOrderRoute, ListOrdersRoute, OrderByIdRoute, UpdateOrderStatusRoute};

fn order_routes(cfg: &mut ServiceConfig, mock: MockBackend) {
    let api = OrderFlowApi::new(mock);
    cfg.app_data(web::Data::new(api))
        .service(CreateOrderRoute::<MockBackend>::new())
        .service(ListOrdersRoute::<MockBackend>::new())
        .service(OrderByIdRoute::<MockBackend>::new())
        .service(UpdateOrderStatusRoute::<MockBackend>::new());
}

fn valid_body() -> Value {
    json!({
        "customer_id": 1,
        "items": [
            { "product_id": 10, "unit_price": "10.00", "quantity": 2 },
            { "product_id": 11, "unit_price": "5.50", "quantity": 1 }
        ],
        "total": "25.50"
    })
}

#[actix_web::test]
async fn health_check() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        cfg.service(health);
    }
    let (status, body) = get_request("/health", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}

#[actix_web::test]
async fn create_order_returns_the_stored_order() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_customer_exists().returning(|_| Ok(true));
        mock.expect_product_exists().returning(|_| Ok(true));
        mock.expect_insert_order().returning(|_| Ok(sample_order(1, OrderStatus::Received)));
        order_routes(cfg, mock);
    }
    let (status, body) = post_request("/orders", valid_body(), configure).await;
    assert_eq!(status, StatusCode::CREATED);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["id"], 1);
    assert_eq!(v["status"], "R");
    assert_eq!(v["total"], "25.50");
    assert_eq!(v["items"].as_array().map(|a| a.len()), Some(2));
}

#[actix_web::test]
async fn create_order_with_missing_fields_lists_them() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        order_routes(cfg, MockBackend::new());
    }
    let (status, body) = post_request("/orders", json!({}), configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["path"], "/orders");
    assert_eq!(v["httpCode"], 400);
    let fields = v["fields"].as_array().expect("Expected a fields array");
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0]["field"], "customer_id");
}

#[actix_web::test]
async fn malformed_json_body_gets_the_uniform_error_shape() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        order_routes(cfg, MockBackend::new());
    }
    let (status, body) = post_raw_request("/orders", "{ not json", configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["path"], "/orders");
    assert_eq!(v["message"], "Payload deserialization error");
    assert_eq!(v["httpCode"], 400);
}

#[actix_web::test]
async fn create_order_for_unknown_customer_is_404() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_customer_exists().returning(|_| Ok(false));
        order_routes(cfg, mock);
    }
    let (status, body) = post_request("/orders", valid_body(), configure).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["message"], "Customer 1 not found");
}

#[actix_web::test]
async fn create_order_with_wrong_total_is_422() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        // Validation trips before any backend call, so no expectations are needed.
        order_routes(cfg, MockBackend::new());
    }
    let mut body = valid_body();
    body["total"] = json!("99.00");
    let (status, body) = post_request("/orders", body, configure).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["httpDescription"], "Unprocessable Entity");
}

#[actix_web::test]
async fn fetch_order_by_id() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_fetch_order().returning(|id| Ok(Some(sample_order(id, OrderStatus::Ready))));
        order_routes(cfg, mock);
    }
    let (status, body) = get_request("/orders/42", configure).await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["id"], 42);
    assert_eq!(v["status"], "P");
}

#[actix_web::test]
async fn fetch_missing_order_is_404() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_fetch_order().returning(|_| Ok(None));
        order_routes(cfg, mock);
    }
    let (status, body) = get_request("/orders/42", configure).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["path"], "/orders/42");
}

#[actix_web::test]
async fn advance_status_moves_one_step() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_fetch_order().returning(|id| Ok(Some(sample_order(id, OrderStatus::InPreparation))));
        mock.expect_advance_order_status()
            .withf(|_, from, to| *from == OrderStatus::InPreparation && *to == OrderStatus::Ready)
            .returning(|id, _, to| Ok(Some(sample_order(id, to))));
        order_routes(cfg, mock);
    }
    let (status, body) = patch_request("/orders/7/status", configure).await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["status"], "P");
}

#[actix_web::test]
async fn advance_status_of_received_order_is_422() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_fetch_order().returning(|id| Ok(Some(sample_order(id, OrderStatus::Received))));
        order_routes(cfg, mock);
    }
    let (status, body) = patch_request("/orders/7/status", configure).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["message"], OrderFlowError::InvalidStatusTransition(OrderStatus::Received).to_string());
}

#[actix_web::test]
async fn list_orders_wraps_the_page() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        let mut mock = MockBackend::new();
        mock.expect_count_orders().returning(|| Ok(3));
        mock.expect_fetch_orders()
            .withf(|offset, limit| *offset == 0 && *limit == 25)
            .returning(|_, _| {
                Ok(vec![sample_order(1, OrderStatus::Received), sample_order(2, OrderStatus::Ready)])
            });
        order_routes(cfg, mock);
    }
    let (status, body) = get_request("/orders", configure).await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["page"], 1);
    assert_eq!(v["limit"], 25);
    assert_eq!(v["total"], 3);
    assert_eq!(v["items"].as_array().map(|a| a.len()), Some(2));
}

#[actix_web::test]
async fn list_orders_rejects_page_zero() {
    let _ = env_logger::try_init().ok();
    fn configure(cfg: &mut ServiceConfig) {
        order_routes(cfg, MockBackend::new());
    }
    let (status, body) = get_request("/orders?page=0", configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let v: Value = serde_json::from_str(&body).expect("Body should be JSON");
    assert_eq!(v["message"], "The minimum page is 1");
}
