use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::Session;
use crate::features::users::dtos::*;
use crate::modules::backend::models::UserPayload;
use crate::modules::backend::DashboardBackend;

/// Service for user management
pub struct UserService {
    backend: Arc<dyn DashboardBackend>,
}

impl UserService {
    pub fn new(backend: Arc<dyn DashboardBackend>) -> Self {
        Self { backend }
    }

    pub async fn list(&self, session: &Session, query: &str) -> Result<Vec<UserDto>> {
        let users = self
            .backend
            .list_users(session.bearer())
            .await
            .map_err(|e| e.or_external("Gagal memuat data user"))?;

        let needle = query.to_lowercase();
        Ok(users
            .into_iter()
            .map(UserDto::from)
            .filter(|u| {
                u.name.to_lowercase().contains(&needle) || u.email.to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub async fn create(&self, session: &Session, dto: UserFormDto) -> Result<()> {
        let payload = UserPayload::from(dto);
        self.backend
            .create_user(session.bearer(), &payload)
            .await
            .map_err(|e| e.or_external("Gagal menambah user"))?;

        tracing::info!(
            "User {} ({}) created by {}",
            payload.email,
            payload.role,
            session.name
        );
        Ok(())
    }

    pub async fn update(&self, session: &Session, id: i64, dto: UserFormDto) -> Result<()> {
        let payload = UserPayload::from(dto);
        self.backend
            .update_user(session.bearer(), id, &payload)
            .await
            .map_err(|e| e.or_external("Gagal memperbarui user"))?;

        tracing::info!("User {} updated by {}", id, session.name);
        Ok(())
    }

    pub async fn delete(&self, session: &Session, id: i64) -> Result<()> {
        self.backend
            .delete_user(session.bearer(), id)
            .await
            .map_err(|e| e.or_external("Gagal menghapus user"))?;

        tracing::info!("User {} deleted by {}", id, session.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::{session_for, FakeBackend};

    fn form(name: &str, email: &str, role: &str) -> UserFormDto {
        UserFormDto {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_name_or_email() {
        let backend = FakeBackend::new();
        let service = UserService::new(backend.clone());
        let admin = session_for("admin", "Ani");

        service
            .create(&admin, form("Budi Santoso", "budi@kantor.id", "pegawai"))
            .await
            .unwrap();
        service
            .create(&admin, form("Sari", "atasan.sari@kantor.id", "atasan"))
            .await
            .unwrap();

        let by_name = service.list(&admin, "SANTOSO").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].email, "budi@kantor.id");

        let by_email = service.list(&admin, "atasan.").await.unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].name, "Sari");
        assert!(by_email[0].is_active);

        assert_eq!(service.list(&admin, "").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let backend = FakeBackend::new();
        let service = UserService::new(backend.clone());
        let admin = session_for("admin", "Ani");

        service
            .create(&admin, form("Dewi", "dewi@kantor.id", "pegawai"))
            .await
            .unwrap();
        let id = backend.state().users[0].id.unwrap();

        let mut edit = form("Dewi", "dewi@kantor.id", "atasan");
        edit.is_active = false;
        service.update(&admin, id, edit).await.unwrap();
        {
            let state = backend.state();
            assert_eq!(state.users[0].role, "atasan");
            assert!(!state.users[0].is_active);
        }

        service.delete(&admin, id).await.unwrap();
        assert!(matches!(
            service.delete(&admin, id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
