use std::{sync::Arc, time::Duration};

use fog_common::Money;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::GatewayConfig,
    data_objects::{ChargeRequest, ChargeResponse},
    GatewayApiError,
};

#[derive(Clone)]
pub struct GatewayApi {
    config: GatewayConfig,
    client: Arc<Client>,
}

impl GatewayApi {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(&format!("Bearer {}", config.api_key.reveal()))
            .map_err(|e| GatewayApiError::Initialization(e.to_string()))?;
        headers.insert("Authorization", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GatewayApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, GatewayApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayApiError::Timeout(e.to_string())
            } else {
                GatewayApiError::Transport(e.to_string())
            }
        })?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| GatewayApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| GatewayApiError::Transport(e.to_string()))?;
            Err(GatewayApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Opens a charge with the gateway and returns the provider-issued payment identifier.
    pub async fn create_charge(&self, order_id: i64, amount: Money) -> Result<ChargeResponse, GatewayApiError> {
        let body = ChargeRequest { reference: order_id, amount };
        debug!("Requesting charge of {amount} for order #{order_id}");
        let result = self.rest_query::<ChargeResponse, _>(Method::POST, "/charges", Some(body)).await?;
        info!("Charge {} opened for order #{order_id}", result.id);
        Ok(result)
    }
}
