//! User service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use quill_common::{AppError, AppResult, IdGenerator};
use quill_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

/// User service for admin account management and authentication.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(email(message = "must be a valid email address"))]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    #[validate(must_match(
        other = "password_confirmation",
        message = "confirmation does not match"
    ))]
    pub password: String,

    pub password_confirmation: String,
}

/// Input for updating a user.
///
/// An absent or empty `password` preserves the stored hash; a non-empty one
/// replaces it.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "must be a valid email address"))]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub email: Option<String>,

    pub password: Option<String>,

    pub password_confirmation: Option<String>,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new user.
    pub async fn create(&self, input: CreateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        // Email is the login identifier; reject duplicates before insert
        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::validation("email", "already in use"));
        }

        let password_hash = hash_password(&input.password)?;

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(password_hash),
            session_token: Set(None),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.user_repo.create(model).await
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        self.user_repo.find_by_email(email).await
    }

    /// List users (paginated, newest first).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<user::Model>> {
        self.user_repo.list(limit, offset).await
    }

    /// Update a user.
    ///
    /// The email uniqueness check excludes the user's own row, so a
    /// self-update with an unchanged email succeeds.
    pub async fn update(&self, id: &str, input: UpdateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        let user = self.user_repo.get_by_id(id).await?;

        if let Some(email) = &input.email {
            if self
                .user_repo
                .find_by_email_excluding(email, id)
                .await?
                .is_some()
            {
                return Err(AppError::validation("email", "already in use"));
            }
        }

        let mut active: user::ActiveModel = user.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }

        // An empty password means "keep the current one"; it must never
        // overwrite the stored hash.
        match input.password.as_deref() {
            None | Some("") => {}
            Some(password) => {
                if password.len() < MIN_PASSWORD_LEN {
                    return Err(AppError::validation(
                        "password",
                        "must be at least 8 characters",
                    ));
                }
                if input.password_confirmation.as_deref() != Some(password) {
                    return Err(AppError::validation(
                        "password",
                        "confirmation does not match",
                    ));
                }
                active.password_hash = Set(hash_password(password)?);
            }
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await
    }

    /// Delete a user.
    ///
    /// Self-deletion is rejected: the authenticated actor can never remove
    /// their own account.
    pub async fn destroy(&self, actor_id: &str, target_id: &str) -> AppResult<()> {
        if actor_id == target_id {
            return Err(AppError::Forbidden(
                "You cannot delete your own account".to_string(),
            ));
        }

        let user = self.user_repo.get_by_id(target_id).await?;
        self.user_repo.delete(user).await
    }

    /// Authenticate a user by email and password.
    ///
    /// Any failure maps to `Unauthorized`; the caller cannot distinguish an
    /// unknown email from a wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    /// Authenticate a user by session token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_session_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Start a session for a user, returning the fresh token.
    ///
    /// Any previous session token is invalidated.
    pub async fn start_session(&self, user_id: &str) -> AppResult<String> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let token = self.id_gen.generate_token();

        let mut active: user::ActiveModel = user.into();
        active.session_token = Set(Some(token.clone()));
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await?;

        Ok(token)
    }

    /// End a user's session.
    pub async fn end_session(&self, user_id: &str) -> AppResult<()> {
        let user = self.user_repo.get_by_id(user_id).await?;

        let mut active: user::ActiveModel = user.into();
        active.session_token = Set(None);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await?;
        Ok(())
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash (constant-time).
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_test_user(id: &str, email: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: hash_password("12345678").unwrap(),
            session_token: Some("test_token".to_string()),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> UserService {
        UserService::new(UserRepository::new(Arc::new(db)))
    }

    // Unit tests for password functions
    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hash.len() > 50);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(verify_password("test_password_123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_hash_password_different_each_time() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
        assert!(verify_password("same_password", &hash1).unwrap());
        assert!(verify_password("same_password", &hash2).unwrap());
    }

    // Input validation
    #[test]
    fn test_create_input_rejects_invalid_email() {
        let input = CreateUserInput {
            name: "Name".to_string(),
            email: "email.com".to_string(),
            password: "12345678".to_string(),
            password_confirmation: "12345678".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_input_rejects_mismatched_confirmation() {
        let input = CreateUserInput {
            name: "Name".to_string(),
            email: "a@b.com".to_string(),
            password: "12345678".to_string(),
            password_confirmation: "87654321".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_input_rejects_short_password() {
        let input = CreateUserInput {
            name: "Name".to_string(),
            email: "a@b.com".to_string(),
            password: ".".to_string(),
            password_confirmation: ".".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_create_input_rejects_oversized_name() {
        let input = CreateUserInput {
            name: "a".repeat(300),
            email: "a@b.com".to_string(),
            password: "12345678".to_string(),
            password_confirmation: "12345678".to_string(),
        };
        assert!(input.validate().is_err());
    }

    // Service behavior
    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let existing = create_test_user("user1", "taken@example.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .into_connection();

        let service = service_with(db);
        let result = service
            .create(CreateUserInput {
                name: "Another".to_string(),
                email: "taken@example.com".to_string(),
                password: "12345678".to_string(),
                password_confirmation: "12345678".to_string(),
            })
            .await;

        match result {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "email"),
            other => panic!("Expected email validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_with_own_email_succeeds() {
        let user = create_test_user("user1", "self@example.com");
        let mut updated = user.clone();
        updated.updated_at = Some(Utc::now().into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // get_by_id, find_by_email_excluding (empty), update returning
            .append_query_results([vec![user.clone()], vec![], vec![updated]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);
        let result = service
            .update(
                "user1",
                UpdateUserInput {
                    email: Some("self@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_empty_password_keeps_hash() {
        let user = create_test_user("user1", "self@example.com");
        let original_hash = user.password_hash.clone();
        let updated = user.clone();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user], vec![updated]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);
        let result = service
            .update(
                "user1",
                UpdateUserInput {
                    name: Some("Renamed".to_string()),
                    password: Some(String::new()),
                    password_confirmation: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // The old hash still verifies the old password
        assert_eq!(result.password_hash, original_hash);
        assert!(verify_password("12345678", &result.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_short_new_password_rejected() {
        let user = create_test_user("user1", "self@example.com");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user]])
            .into_connection();

        let service = service_with(db);
        let result = service
            .update(
                "user1",
                UpdateUserInput {
                    password: Some("short".to_string()),
                    password_confirmation: Some("short".to_string()),
                    ..Default::default()
                },
            )
            .await;

        match result {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "password"),
            other => panic!("Expected password validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_destroy_self_is_forbidden() {
        // Rejected before any database access
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = service_with(db);
        let result = service.destroy("user1", "user1").await;

        match result {
            Err(AppError::Forbidden(_)) => {}
            other => panic!("Expected Forbidden error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_destroy_unknown_target_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let service = service_with(db);
        let result = service.destroy("user1", "ghost").await;

        match result {
            Err(AppError::UserNotFound(id)) => assert_eq!(id, "ghost"),
            other => panic!("Expected UserNotFound error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email_unauthorized() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let service = service_with(db);
        let result = service.authenticate("nobody@example.com", "12345678").await;

        match result {
            Err(AppError::Unauthorized) => {}
            other => panic!("Expected Unauthorized error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password_unauthorized() {
        let user = create_test_user("user1", "a@example.com");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user]])
            .into_connection();

        let service = service_with(db);
        let result = service.authenticate("a@example.com", "wrong_password").await;

        match result {
            Err(AppError::Unauthorized) => {}
            other => panic!("Expected Unauthorized error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_correct_password() {
        let user = create_test_user("user1", "a@example.com");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user]])
            .into_connection();

        let service = service_with(db);
        let result = service.authenticate("a@example.com", "12345678").await.unwrap();

        assert_eq!(result.id, "user1");
    }

    #[tokio::test]
    async fn test_authenticate_by_token_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let service = service_with(db);
        let result = service.authenticate_by_token("invalid").await;

        match result {
            Err(AppError::Unauthorized) => {}
            other => panic!("Expected Unauthorized error, got {other:?}"),
        }
    }
}
