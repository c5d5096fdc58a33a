//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are async and must never block the worker thread; every database and gateway call is
//! awaited.
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use log::*;
use food_order_engine::{
    traits::{PaymentGatewayDatabase, PaymentProvider},
    OrderFlowApi,
    PaymentFlowApi,
};

use crate::{
    data_objects::{
        CreateOrderRequest,
        JsonResponse,
        ListOrdersQuery,
        OrderResponse,
        PaymentRequestBody,
        PaymentResponse,
        WebhookRequestBody,
    },
    errors::{RequestError, ServerError},
    validation::{pagination, validate_create_order, validate_payment_request, validate_webhook},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/orders" impl PaymentGatewayDatabase);
/// Route handler for creating a new order.
///
/// The body must reference an existing customer and existing products, and the declared total
/// must equal the computed item sum. On success the order is stored with status `R` (received)
/// and returned with a `201 Created`.
pub async fn create_order<B: PaymentGatewayDatabase>(
    req: HttpRequest,
    body: web::Json<CreateOrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, RequestError> {
    trace!("💻️ Received create order request");
    let new_order = validate_create_order(body.into_inner()).map_err(|e| e.at(&req))?;
    let order = api.create_order(new_order).await.map_err(|e| ServerError::from(e).at(&req))?;
    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

route!(order_by_id => Get "/orders/{id}" impl PaymentGatewayDatabase);
pub async fn order_by_id<B: PaymentGatewayDatabase>(
    req: HttpRequest,
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, RequestError> {
    let order_id = path.into_inner();
    debug!("💻️ GET order {order_id}");
    let order = api.fetch_order(order_id).await.map_err(|e| ServerError::from(e).at(&req))?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

route!(list_orders => Get "/orders" impl PaymentGatewayDatabase);
pub async fn list_orders<B: PaymentGatewayDatabase>(
    req: HttpRequest,
    query: web::Query<ListOrdersQuery>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, RequestError> {
    let (page, limit) = pagination(query.into_inner());
    debug!("💻️ GET orders page {page} limit {limit}");
    let orders = api.list_orders(page, limit).await.map_err(|e| ServerError::from(e).at(&req))?;
    Ok(HttpResponse::Ok().json(orders.map(OrderResponse::from)))
}

route!(update_order_status => Patch "/orders/{id}/status" impl PaymentGatewayDatabase);
/// Route handler for advancing an order one lifecycle step.
///
/// The next status is derived from the current one; the body is empty. A received order cannot be
/// advanced here (payment confirmation does that), and a completed order never advances again.
pub async fn update_order_status<B: PaymentGatewayDatabase>(
    req: HttpRequest,
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, RequestError> {
    let order_id = path.into_inner();
    debug!("💻️ PATCH order {order_id} status");
    let order = api.advance_status(order_id).await.map_err(|e| ServerError::from(e).at(&req))?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

//----------------------------------------------   Payments  ----------------------------------------------------
route!(request_payment => Post "/orders/{id}/payments" impl PaymentGatewayDatabase, PaymentProvider);
/// Route handler for soliciting payment for an order.
///
/// Asks the external gateway for a payment channel and stores the resulting pending payment. At
/// most one pending payment may exist per order; a second solicitation gets a `409 Conflict`.
pub async fn request_payment<B, P>(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<PaymentRequestBody>,
    api: web::Data<PaymentFlowApi<B, P>>,
) -> Result<HttpResponse, RequestError>
where
    B: PaymentGatewayDatabase,
    P: PaymentProvider,
{
    let order_id = path.into_inner();
    trace!("💻️ Received payment request for order {order_id}");
    let method_id = validate_payment_request(body.into_inner()).map_err(|e| e.at(&req))?;
    let payment = api.request_payment(order_id, method_id).await.map_err(|e| ServerError::from(e).at(&req))?;
    Ok(HttpResponse::Created().json(PaymentResponse::from(payment)))
}

route!(payment_webhook => Post "/webhook/payments" impl PaymentGatewayDatabase, PaymentProvider);
/// Route handler for the payment gateway's webhook.
///
/// The gateway delivers at least once, so a repeat of an already-applied outcome returns `200`
/// without changing anything. A notification that contradicts a settled payment gets a
/// `409 Conflict`, which tells the gateway operator something is genuinely wrong.
pub async fn payment_webhook<B, P>(
    req: HttpRequest,
    body: web::Json<WebhookRequestBody>,
    api: web::Data<PaymentFlowApi<B, P>>,
) -> Result<HttpResponse, RequestError>
where
    B: PaymentGatewayDatabase,
    P: PaymentProvider,
{
    trace!("💻️ Received payment webhook");
    let notification = validate_webhook(body.into_inner()).map_err(|e| e.at(&req))?;
    api.handle_webhook(notification).await.map_err(|e| ServerError::from(e).at(&req))?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Notification applied")))
}
