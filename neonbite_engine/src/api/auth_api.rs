use log::info;

use crate::{
    db_types::{NewUser, UserProfile},
    helpers::{hash_password, verify_password},
    traits::{UserApiError, UserManagement},
};

/// Account creation and password login.
///
/// Passwords are stored as argon2id PHC strings. The hash is computed here, before the storage layer is touched,
/// so a plaintext password never crosses the trait boundary.
#[derive(Debug, Clone)]
pub struct AuthApi<B> {
    db: B,
}

impl<B> AuthApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> AuthApi<B>
where B: UserManagement
{
    /// Creates a new account and returns its identifier. A duplicate email surfaces as
    /// [`UserApiError::EmailTaken`], decided by the storage layer at commit time.
    pub async fn signup(&self, name: String, email: String, password: &str) -> Result<i64, UserApiError> {
        let password_hash = hash_password(password)?;
        let id = self.db.insert_user(NewUser { name, email, password_hash }).await?;
        info!("🔐️ New account #{id} created");
        Ok(id)
    }

    /// Verifies the credentials and returns the account profile. An unknown email and a wrong password are
    /// distinct failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, UserApiError> {
        let user = self.db.fetch_user_by_email(email).await?.ok_or(UserApiError::AccountNotFound)?;
        verify_password(password, &user.password)?;
        info!("🔐️ Account #{} logged in", user.id);
        Ok(UserProfile::from(user))
    }
}
