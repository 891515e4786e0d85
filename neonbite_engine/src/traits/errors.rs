use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for CatalogApiError {
    fn from(e: sqlx::Error) -> Self {
        CatalogApiError::DatabaseError(e.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum CartApiError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
    #[error("The cart is empty")]
    EmptyCart,
    #[error("Stored cart items are malformed. {0}")]
    MalformedItems(String),
}

impl From<sqlx::Error> for CartApiError {
    fn from(e: sqlx::Error) -> Self {
        CartApiError::DatabaseError(e.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum OrderApiError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
    #[error("The requested order {0} does not exist")]
    OrderNotFound(i64),
    #[error("Stored order items are malformed. {0}")]
    MalformedItems(String),
}

impl From<sqlx::Error> for OrderApiError {
    fn from(e: sqlx::Error) -> Self {
        OrderApiError::DatabaseError(e.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum ReviewApiError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
    #[error("Required review fields are missing")]
    MissingFields,
}

impl From<sqlx::Error> for ReviewApiError {
    fn from(e: sqlx::Error) -> Self {
        ReviewApiError::DatabaseError(e.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum UserApiError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
    #[error("Account already exists")]
    EmailTaken,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Incorrect password")]
    WrongPassword,
    #[error("Could not hash the password. {0}")]
    PasswordHash(String),
}

impl From<sqlx::Error> for UserApiError {
    fn from(e: sqlx::Error) -> Self {
        UserApiError::DatabaseError(e.to_string())
    }
}

/// Failure to deliver an outbound notification. Always a soft failure from the checkout flow's point of view.
#[derive(Debug, Clone, Error)]
#[error("Could not send notification. {0}")]
pub struct NotifierError(pub String);
