use crate::core::config::BackendConfig;
use crate::core::error::{AppError, Result};
use crate::modules::backend::models::{BackendErrorBody, LoginRequest, LoginResponse};

/// Separate client for `POST /login`; never sends a bearer token
pub struct AuthApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl AuthApiClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
        })
    }

    /// Exchange credentials for a backend token
    ///
    /// Any rejection is reported as Unauthorized with the backend's message,
    /// or a generic wrong-credentials message when it has none.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        let url = format!("{}/login", self.base_url);

        tracing::debug!("Logging in to backend as {}", credentials.email);

        let response = self
            .http_client
            .post(&url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach backend login: {}", e);
                AppError::ExternalServiceError(format!("Backend tidak dapat dihubungi: {}", e))
            })?;

        let status = response.status();

        if status.is_success() {
            let login = response.json::<LoginResponse>().await.map_err(|e| {
                tracing::error!("Failed to parse login response: {}", e);
                AppError::ExternalServiceError(format!("Respons login tidak valid: {}", e))
            })?;

            tracing::info!("Backend login succeeded with role {}", login.data.user.role);
            return Ok(login);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("Backend login rejected: HTTP {}", status);

        if status.is_server_error() {
            return Err(AppError::ExternalServiceError(format!(
                "Backend error: HTTP {}",
                status
            )));
        }

        let message = serde_json::from_str::<BackendErrorBody>(&body)
            .ok()
            .map(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "Email atau password salah".to_string());

        Err(AppError::Unauthorized(message))
    }
}
