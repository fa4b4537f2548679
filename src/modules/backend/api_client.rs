use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::config::BackendConfig;
use crate::core::error::{AppError, Result};
use crate::modules::backend::models::BackendErrorBody;

/// HTTP client for every backend call except login.
///
/// Attaches `Authorization: Bearer <token>` whenever a non-empty token is
/// supplied.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
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

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http_client.request(method, url);

        match token.filter(|t| !t.is_empty()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!("GET {}{}", self.base_url, path);
        let response = send(self.request(Method::GET, path, token).query(query), path).await?;
        parse_json(response, path).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T> {
        tracing::debug!("POST {}{}", self.base_url, path);
        let response = send(self.request(Method::POST, path, token).json(body), path).await?;
        parse_json(response, path).await
    }

    /// POST where the response body is irrelevant
    pub async fn post_discard<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<()> {
        tracing::debug!("POST {}{}", self.base_url, path);
        send(self.request(Method::POST, path, token).json(body), path).await?;
        Ok(())
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<()> {
        tracing::debug!("PUT {}{}", self.base_url, path);
        send(self.request(Method::PUT, path, token).json(body), path).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<()> {
        tracing::debug!("DELETE {}{}", self.base_url, path);
        send(self.request(Method::DELETE, path, token), path).await?;
        Ok(())
    }
}

/// Send a request and turn non-2xx statuses into `AppError`
pub(super) async fn send(builder: RequestBuilder, path: &str) -> Result<Response> {
    let response = builder.send().await.map_err(|e| {
        tracing::error!("Backend request to {} failed: {}", path, e);
        AppError::ExternalServiceError(format!("Backend tidak dapat dihubungi: {}", e))
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!("Backend error on {}: HTTP {} - {}", path, status, body);
    Err(error_from_status(status, &body))
}

pub(super) async fn parse_json<T: DeserializeOwned>(response: Response, path: &str) -> Result<T> {
    response.json::<T>().await.map_err(|e| {
        tracing::error!("Failed to parse backend response from {}: {}", path, e);
        AppError::ExternalServiceError(format!("Respons backend tidak valid: {}", e))
    })
}

/// Map a backend status code to the matching application error
pub fn error_from_status(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<BackendErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty());

    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(
            message.unwrap_or_else(|| "Sesi berakhir, silakan login kembali".to_string()),
        ),
        StatusCode::FORBIDDEN => AppError::Forbidden(
            message.unwrap_or_else(|| "Anda tidak memiliki akses".to_string()),
        ),
        StatusCode::NOT_FOUND => {
            AppError::NotFound(message.unwrap_or_else(|| "Data tidak ditemukan".to_string()))
        }
        StatusCode::UNPROCESSABLE_ENTITY => AppError::Validation(
            message.unwrap_or_else(|| "Data ditolak oleh backend".to_string()),
        ),
        _ => AppError::ExternalServiceError(format!("Backend error: HTTP {}", status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_status_uses_backend_message() {
        let err = error_from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message": "The nama item field is required."}"#,
        );
        assert!(
            matches!(err, AppError::Validation(ref m) if m == "The nama item field is required.")
        );
    }

    #[test]
    fn test_error_from_status_falls_back_on_unparseable_body() {
        let err = error_from_status(StatusCode::NOT_FOUND, "<html>not found</html>");
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Data tidak ditemukan"));

        let err = error_from_status(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = error_from_status(StatusCode::INTERNAL_SERVER_ERROR, "{}");
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }
}
