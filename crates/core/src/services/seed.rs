//! Initial data seeding.

use quill_common::{AppResult, SeedConfig};
use tracing::info;

use crate::services::user::{CreateUserInput, UserService};

/// Seeds the initial admin account at startup.
///
/// Runs once per boot and is idempotent: if the configured admin email
/// already exists, nothing is written.
#[derive(Clone)]
pub struct SeedService {
    user_service: UserService,
}

impl SeedService {
    /// Create a new seed service.
    #[must_use]
    pub const fn new(user_service: UserService) -> Self {
        Self { user_service }
    }

    /// Ensure the configured admin account exists.
    pub async fn run(&self, seed: Option<&SeedConfig>) -> AppResult<()> {
        let Some(seed) = seed else {
            info!("No seed configuration, skipping admin seeding");
            return Ok(());
        };

        if self
            .user_service
            .find_by_email(&seed.admin_email)
            .await?
            .is_some()
        {
            info!(email = %seed.admin_email, "Admin account already exists, skipping seeding");
            return Ok(());
        }

        let admin = self
            .user_service
            .create(CreateUserInput {
                name: seed.admin_name.clone(),
                email: seed.admin_email.clone(),
                password: seed.admin_password.clone(),
                password_confirmation: seed.admin_password.clone(),
            })
            .await?;

        info!(id = %admin.id, email = %admin.email, "Seeded admin account");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quill_db::{entities::user, repositories::UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn seed_config() -> SeedConfig {
        SeedConfig {
            admin_name: "Admin".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: "admin_password".to_string(),
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> SeedService {
        SeedService::new(UserService::new(UserRepository::new(Arc::new(db))))
    }

    #[tokio::test]
    async fn test_run_without_config_is_noop() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = service_with(db);
        assert!(service.run(None).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_skips_existing_admin() {
        let existing = user::Model {
            id: "user1".to_string(),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "$argon2$hash".to_string(),
            session_token: None,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        // Only the lookup hits the database; no insert is issued.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .into_connection();

        let service = service_with(db);
        assert!(service.run(Some(&seed_config())).await.is_ok());
    }

    #[tokio::test]
    async fn test_run_creates_missing_admin() {
        let created = user::Model {
            id: "user1".to_string(),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "$argon2$hash".to_string(),
            session_token: None,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // seed lookup (empty), create's duplicate check (empty), insert returning
            .append_query_results([vec![], vec![], vec![created]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);
        assert!(service.run(Some(&seed_config())).await.is_ok());
    }
}
