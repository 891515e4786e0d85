use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewUser, User},
    traits::UserApiError,
};

/// Inserts a new account row. Uniqueness of the email is enforced by the UNIQUE constraint on the column; a
/// constraint violation maps to [`UserApiError::EmailTaken`]. There is no lookup-before-insert, so two concurrent
/// signups for the same email race at the storage level, where exactly one wins.
pub async fn insert_user(user: NewUser, conn: &mut SqliteConnection) -> Result<i64, UserApiError> {
    let result: Result<(i64,), sqlx::Error> =
        sqlx::query_as("INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING id")
            .bind(user.name)
            .bind(&user.email)
            .bind(user.password_hash)
            .fetch_one(conn)
            .await;
    match result {
        Ok((id,)) => {
            debug!("🔐️ User inserted with id {id}");
            Ok(id)
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(UserApiError::EmailTaken),
        Err(e) => Err(e.into()),
    }
}

pub async fn fetch_user_by_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<User>, UserApiError> {
    let user = sqlx::query_as("SELECT * FROM users WHERE email = $1").bind(email).fetch_optional(conn).await?;
    Ok(user)
}
