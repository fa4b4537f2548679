use async_trait::async_trait;

use crate::core::config::BackendConfig;
use crate::core::error::Result;
use crate::modules::backend::api_client::ApiClient;
use crate::modules::backend::auth_client::AuthApiClient;
use crate::modules::backend::models::*;

/// Every backend operation the dashboard consumes.
///
/// `token` is the bearer token of the calling session; `None` (or an empty
/// token) sends the request unauthenticated.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse>;

    async fn list_equipment(
        &self,
        token: Option<&str>,
        query: &EquipmentQuery,
    ) -> Result<Page<EquipmentRecord>>;
    async fn create_equipment(
        &self,
        token: Option<&str>,
        payload: &EquipmentPayload,
    ) -> Result<EquipmentRecord>;
    async fn update_equipment(
        &self,
        token: Option<&str>,
        id: &str,
        payload: &EquipmentPayload,
    ) -> Result<()>;
    async fn delete_equipment(&self, token: Option<&str>, id: &str) -> Result<()>;

    async fn list_reports(&self, token: Option<&str>) -> Result<Vec<ReportRecord>>;
    async fn create_report(&self, token: Option<&str>, payload: &NewReportPayload) -> Result<()>;
    async fn decide_report(
        &self,
        token: Option<&str>,
        id: &str,
        payload: &ReportDecisionPayload,
    ) -> Result<()>;
    async fn delete_report(&self, token: Option<&str>, id: &str) -> Result<()>;

    async fn list_users(&self, token: Option<&str>) -> Result<Vec<UserRecord>>;
    async fn create_user(&self, token: Option<&str>, payload: &UserPayload) -> Result<()>;
    async fn update_user(&self, token: Option<&str>, id: i64, payload: &UserPayload)
        -> Result<()>;
    async fn delete_user(&self, token: Option<&str>, id: i64) -> Result<()>;

    async fn equipment_summary(&self, token: Option<&str>) -> Result<EquipmentSummary>;
    async fn equipment_detail_summary(
        &self,
        token: Option<&str>,
    ) -> Result<EquipmentDetailSummary>;
}

/// `DashboardBackend` over HTTP
pub struct HttpBackend {
    api: ApiClient,
    auth: AuthApiClient,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(config)?,
            auth: AuthApiClient::new(config)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }
}

fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        self.auth.login(credentials).await
    }

    async fn list_equipment(
        &self,
        token: Option<&str>,
        query: &EquipmentQuery,
    ) -> Result<Page<EquipmentRecord>> {
        let envelope: Envelope<Vec<EquipmentRecord>> =
            self.api.get("/equipment", token, &query.to_pairs()).await?;

        let total = envelope
            .meta
            .and_then(|m| m.total)
            .unwrap_or(envelope.data.len() as i64);

        Ok(Page {
            items: envelope.data,
            total,
        })
    }

    async fn create_equipment(
        &self,
        token: Option<&str>,
        payload: &EquipmentPayload,
    ) -> Result<EquipmentRecord> {
        let envelope: Envelope<EquipmentRecord> =
            self.api.post("/equipment", token, payload).await?;
        Ok(envelope.data)
    }

    async fn update_equipment(
        &self,
        token: Option<&str>,
        id: &str,
        payload: &EquipmentPayload,
    ) -> Result<()> {
        self.api
            .put(&format!("/equipment/{}", segment(id)), token, payload)
            .await
    }

    async fn delete_equipment(&self, token: Option<&str>, id: &str) -> Result<()> {
        self.api
            .delete(&format!("/equipment/{}", segment(id)), token)
            .await
    }

    async fn list_reports(&self, token: Option<&str>) -> Result<Vec<ReportRecord>> {
        let envelope: Envelope<Vec<ReportRecord>> =
            self.api.get("/approval-pelaporan", token, &[]).await?;
        Ok(envelope.data)
    }

    async fn create_report(&self, token: Option<&str>, payload: &NewReportPayload) -> Result<()> {
        self.api
            .post_discard("/approval-pelaporan", token, payload)
            .await
    }

    async fn decide_report(
        &self,
        token: Option<&str>,
        id: &str,
        payload: &ReportDecisionPayload,
    ) -> Result<()> {
        self.api
            .put(&format!("/approval-pelaporan/{}", segment(id)), token, payload)
            .await
    }

    async fn delete_report(&self, token: Option<&str>, id: &str) -> Result<()> {
        self.api
            .delete(&format!("/approval-pelaporan/{}", segment(id)), token)
            .await
    }

    async fn list_users(&self, token: Option<&str>) -> Result<Vec<UserRecord>> {
        let envelope: Envelope<Vec<UserRecord>> = self.api.get("/users", token, &[]).await?;
        Ok(envelope.data)
    }

    async fn create_user(&self, token: Option<&str>, payload: &UserPayload) -> Result<()> {
        self.api.post_discard("/users", token, payload).await
    }

    async fn update_user(
        &self,
        token: Option<&str>,
        id: i64,
        payload: &UserPayload,
    ) -> Result<()> {
        self.api.put(&format!("/users/{}", id), token, payload).await
    }

    async fn delete_user(&self, token: Option<&str>, id: i64) -> Result<()> {
        self.api.delete(&format!("/users/{}", id), token).await
    }

    async fn equipment_summary(&self, token: Option<&str>) -> Result<EquipmentSummary> {
        let envelope: Envelope<EquipmentSummary> =
            self.api.get("/equipment-summary", token, &[]).await?;
        Ok(envelope.data)
    }

    async fn equipment_detail_summary(
        &self,
        token: Option<&str>,
    ) -> Result<EquipmentDetailSummary> {
        let envelope: Envelope<EquipmentDetailSummary> =
            self.api.get("/equipment-detail-summary", token, &[]).await?;
        Ok(envelope.data)
    }
}
