//! Login checks for the single administrator account.
use std::fmt::Debug;

use log::{debug, trace};

use crate::{credentials::verify_credentials, traits::CredentialSource, AuthApiError};

/// `AuthApi` checks submitted credentials against whatever [`CredentialSource`] it was built with.
pub struct AuthApi<C> {
    source: C,
}

impl<C: Debug> Debug for AuthApi<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi ({:?})", self.source)
    }
}

impl<C> AuthApi<C>
where C: CredentialSource
{
    pub fn new(source: C) -> Self {
        Self { source }
    }

    /// Returns the administrator subject if the credentials match. Unknown usernames and wrong passwords produce the
    /// same [`AuthApiError::InvalidCredentials`] error.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<&'static str, AuthApiError> {
        trace!("🔐️ Checking login credentials");
        let expected = self.source.fetch_admin_credentials().await?;
        let subject = verify_credentials(username, password, &expected).map_err(|e| {
            debug!("🔐️ Login rejected. {e}");
            AuthApiError::from(e)
        })?;
        Ok(subject)
    }
}
