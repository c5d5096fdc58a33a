use actix_web::{body, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use log::debug;
use serde_json::Value;

pub async fn get_request(path: &str, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    send(TestRequest::get().uri(path), configure).await
}

pub async fn post_request(path: &str, body: Value, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    send(TestRequest::post().uri(path).set_json(&body), configure).await
}

pub async fn post_raw_request(
    path: &str,
    body: &'static str,
    configure: fn(&mut ServiceConfig),
) -> (StatusCode, String) {
    let req = TestRequest::post()
        .uri(path)
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body);
    send(req, configure).await
}

pub async fn patch_request(path: &str, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    send(TestRequest::patch().uri(path), configure).await
}

async fn send(req: TestRequest, configure: fn(&mut ServiceConfig)) -> (StatusCode, String) {
    let app = App::new().app_data(crate::server::json_config()).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => res.into_parts().1,
        Err(e) => e.error_response(),
    };
    let status = res.status();
    let bytes = body::to_bytes(res.into_body()).await.expect("Could not read response body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
