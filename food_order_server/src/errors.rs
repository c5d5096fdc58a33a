use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpRequest,
    HttpResponse,
};
use chrono::Utc;
use food_order_engine::{ErrorKind, OrderFlowError, PaymentFlowError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("{0}")]
    OrderFlow(#[from] OrderFlowError),
    #[error("{0}")]
    PaymentFlow(#[from] PaymentFlowError),
    #[error("The request body failed validation")]
    FieldValidation(Vec<FieldError>),
    #[error("Payload deserialization error")]
    CouldNotDeserializePayload,
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ServerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OrderFlow(e) => e.kind(),
            Self::PaymentFlow(e) => e.kind(),
            Self::FieldValidation(_) | Self::CouldNotDeserializePayload => ErrorKind::Validation,
            Self::InitializeError(_) | Self::IOError(_) | Self::Unspecified(_) => ErrorKind::Internal,
        }
    }

    /// Attaches the request path, producing the error form that renders the full response body.
    pub fn at(self, req: &HttpRequest) -> RequestError {
        RequestError { source: self, path: req.path().to_string() }
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Business => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn render(error: &ServerError, path: &str) -> HttpResponse {
    let status = status_for(error.kind());
    if status.is_server_error() {
        log::error!("💻️ Internal error serving {path}: {error}");
    }
    let fields = match error {
        ServerError::FieldValidation(fields) => Some(fields.clone()),
        _ => None,
    };
    let body = ErrorResponse {
        path: path.to_string(),
        message: error.to_string(),
        timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        http_code: status.as_u16(),
        http_description: status.canonical_reason().unwrap_or("Unknown").to_string(),
        fields,
    };
    HttpResponse::build(status).insert_header(ContentType::json()).json(body)
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        status_for(self.kind())
    }

    fn error_response(&self) -> HttpResponse {
        render(self, "")
    }
}

/// A [`ServerError`] bound to the path it happened on. Handlers return this so that the error
/// body can echo the request path back to the caller.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct RequestError {
    pub source: ServerError,
    pub path: String,
}

impl ResponseError for RequestError {
    fn status_code(&self) -> StatusCode {
        status_for(self.source.kind())
    }

    fn error_response(&self) -> HttpResponse {
        render(&self.source, &self.path)
    }
}

/// The uniform error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub path: String,
    pub message: String,
    pub timestamp: String,
    pub http_code: u16,
    pub http_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

/// One offending field in a request body that failed validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new<S: Into<String>, M: Into<String>>(field: S, message: M) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}
