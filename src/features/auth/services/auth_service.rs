use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AccessResponseDto, LoginRequestDto, LoginResponseDto, MeResponseDto, MenuResponseDto,
};
use crate::features::auth::gate::{menu_for, resolve_page};
use crate::features::auth::model::Session;
use crate::features::auth::session_store::SessionStore;
use crate::modules::backend::models::LoginRequest;
use crate::modules::backend::DashboardBackend;
use std::sync::Arc;
use uuid::Uuid;

/// Service for login, logout and page access decisions
pub struct AuthService {
    backend: Arc<dyn DashboardBackend>,
    sessions: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(backend: Arc<dyn DashboardBackend>, sessions: Arc<SessionStore>) -> Self {
        Self { backend, sessions }
    }

    /// Login with email and password, opening a new session.
    ///
    /// Returns the session details together with the backend's message.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<(LoginResponseDto, String)> {
        let response = self
            .backend
            .login(&LoginRequest {
                email: dto.email,
                password: dto.password,
            })
            .await?;

        let token = response.data.token;
        if token.is_empty() {
            return Err(AppError::ExternalServiceError(
                "Backend tidak mengembalikan token".to_string(),
            ));
        }

        let user = response.data.user;
        let session = self.sessions.create(token, user.role, user.name).await;

        tracing::info!("User {} logged in as {}", session.name, session.role);

        let message = response
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Login berhasil".to_string());

        Ok((
            LoginResponseDto {
                session_token: session.id.to_string(),
                role: session.role,
                name: session.name,
            },
            message,
        ))
    }

    /// Remove every stored value of the session
    pub async fn logout(&self, session: &Session) -> Result<()> {
        if self.sessions.clear(&session.id).await {
            tracing::info!("User {} logged out", session.name);
        }
        Ok(())
    }

    pub fn me(&self, session: &Session) -> MeResponseDto {
        MeResponseDto {
            role: session.role.clone(),
            name: session.name.clone(),
        }
    }

    pub fn menu(&self, session: &Session) -> MenuResponseDto {
        MenuResponseDto {
            items: menu_for(session.role()),
        }
    }

    /// Gate decision for a page path, for an optional session id
    pub async fn access(&self, session_id: Option<Uuid>, path: &str) -> AccessResponseDto {
        let session = match session_id {
            Some(id) => self.sessions.get(&id).await,
            None => None,
        };

        let access = resolve_page(path, session.as_ref());
        let redirect = access.redirect();

        AccessResponseDto {
            path: access.path,
            decision: access.decision,
            redirect,
        }
    }
}
