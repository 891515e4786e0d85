use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use neonbite_engine::{
    traits::{CartApiError, CatalogApiError, OrderApiError, ReviewApiError, UserApiError},
    OrderFlowError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    AuthFailed(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

// Every client-caused failure is a 400 with a JSON error body. The frontend displays the message in a banner and
// does not branch on the status code, so conflicts and bad credentials are not given their own codes.
impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::AuthFailed(_) => StatusCode::BAD_REQUEST,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<CatalogApiError> for ServerError {
    fn from(e: CatalogApiError) -> Self {
        match e {
            CatalogApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<CartApiError> for ServerError {
    fn from(e: CartApiError) -> Self {
        match e {
            CartApiError::EmptyCart => Self::ValidationError(e.to_string()),
            CartApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            CartApiError::MalformedItems(e) => Self::BackendError(format!("Stored cart items are malformed: {e}")),
        }
    }
}

impl From<OrderApiError> for ServerError {
    fn from(e: OrderApiError) -> Self {
        match e {
            OrderApiError::OrderNotFound(_) => Self::ValidationError(e.to_string()),
            OrderApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
            OrderApiError::MalformedItems(e) => Self::BackendError(format!("Stored order items are malformed: {e}")),
        }
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::InvalidItems => Self::ValidationError(e.to_string()),
            OrderFlowError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<ReviewApiError> for ServerError {
    fn from(e: ReviewApiError) -> Self {
        match e {
            ReviewApiError::MissingFields => Self::ValidationError(e.to_string()),
            ReviewApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<UserApiError> for ServerError {
    fn from(e: UserApiError) -> Self {
        match e {
            UserApiError::EmailTaken => Self::Conflict(e.to_string()),
            UserApiError::AccountNotFound => Self::AuthFailed(e.to_string()),
            UserApiError::WrongPassword => Self::AuthFailed(e.to_string()),
            UserApiError::PasswordHash(e) => Self::BackendError(format!("Password hashing error: {e}")),
            UserApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}
