use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("The gateway did not respond within the deadline: {0}")]
    Timeout(String),
    #[error("Could not reach the gateway: {0}")]
    Transport(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Charge request failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}
