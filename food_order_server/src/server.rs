use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use food_order_engine::{OrderFlowApi, PaymentFlowApi, SqliteDatabase};
use gateway_tools::GatewayApi;
use log::debug;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::gateway::GatewayProvider,
    routes::{
        health,
        CreateOrderRoute,
        ListOrdersRoute,
        OrderByIdRoute,
        PaymentWebhookRoute,
        RequestPaymentRoute,
        UpdateOrderStatusRoute,
    },
};

/// JSON extractor configuration that renders deserialization failures in the uniform error body
/// instead of the framework default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        debug!("💻️ Could not deserialize payload. {err}");
        ServerError::CouldNotDeserializePayload.at(req).into()
    })
}

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let gateway = GatewayApi::new(config.gateway.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let provider = GatewayProvider::new(gateway);
    let srv = create_server_instance(config, db, provider)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    provider: GatewayProvider,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone());
        let payments_api = PaymentFlowApi::new(db.clone(), provider.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("fog::access_log"))
            .app_data(json_config())
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(payments_api))
            .service(health)
            .service(CreateOrderRoute::<SqliteDatabase>::new())
            .service(ListOrdersRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new())
            .service(UpdateOrderStatusRoute::<SqliteDatabase>::new())
            .service(RequestPaymentRoute::<SqliteDatabase, GatewayProvider>::new())
            .service(PaymentWebhookRoute::<SqliteDatabase, GatewayProvider>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
