use crate::{credentials::StoredCredentials, AuthApiError};

/// Supplies the expected administrator credentials.
///
/// [`StoredCredentials`] implements this directly, which is how credentials taken from the process configuration are
/// used. A backend that keeps the password hash and salt in a record would implement it by loading that record.
#[allow(async_fn_in_trait)]
pub trait CredentialSource {
    async fn fetch_admin_credentials(&self) -> Result<StoredCredentials, AuthApiError>;
}

impl CredentialSource for StoredCredentials {
    async fn fetch_admin_credentials(&self) -> Result<StoredCredentials, AuthApiError> {
        Ok(self.clone())
    }
}
