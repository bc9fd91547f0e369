use crate::cache::SharedCache;
use crate::dto::auth_dto::{LoginInput, RegisterInput};
use crate::error::Result;
use crate::graphql::api::JobBoardApi;
use crate::session::SessionStore;
use crate::utils::validation::{validate_credentials, validate_registration};
use std::sync::Arc;

pub const MSG_AUTO_LOGIN_FAILED: &str =
    "Registro exitoso, pero no se pudo iniciar sesión automáticamente. Inicia sesión manualmente.";

#[derive(Debug, PartialEq)]
pub enum RegisterOutcome {
    /// Registration and the chained auto-login both succeeded.
    LoggedIn,
    /// Registration succeeded but the chained login did not; the user must
    /// log in manually.
    AutoLoginFailed { login_error: String },
}

#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn JobBoardApi>,
    session: SessionStore,
    cache: SharedCache,
}

impl AuthService {
    pub fn new(api: Arc<dyn JobBoardApi>, session: SessionStore, cache: SharedCache) -> Self {
        Self { api, session, cache }
    }

    /// Validates locally, then runs the Login mutation and persists the
    /// returned bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        validate_credentials(email, password)?;

        let token = self
            .api
            .login(LoginInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        self.session.store(&token.access_token)?;
        tracing::info!("session started");
        Ok(())
    }

    /// Registers and immediately chains a login with the same credentials.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<RegisterOutcome> {
        validate_registration(name, email, password, confirm_password)?;

        let registered = self
            .api
            .register(RegisterInput {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        tracing::info!(user_id = %registered.user_id, "user registered");

        match self.login(email, password).await {
            Ok(()) => Ok(RegisterOutcome::LoggedIn),
            Err(e) => {
                tracing::warn!(error = %e, "auto-login after registration failed");
                Ok(RegisterOutcome::AutoLoginFailed {
                    login_error: e.to_string(),
                })
            }
        }
    }

    /// Drops the stored token and wipes the whole cache. This is the only
    /// full cache invalidation point.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        self.cache.clear();
        tracing::info!("session closed");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}
