//! Question service.

use std::time::Duration;

use quill_common::{AppError, AppResult, IdGenerator};
use quill_db::{entities::question, repositories::QuestionRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Question service for contact form intake and moderation.
#[derive(Clone)]
pub struct QuestionService {
    question_repo: QuestionRepository,
    id_gen: IdGenerator,
    throttle_window: Duration,
}

/// Input for submitting a question through the contact form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuestionInput {
    #[validate(email(message = "must be a valid email address"))]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub email: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub question_text: String,
}

impl QuestionService {
    /// Create a new question service.
    #[must_use]
    pub const fn new(question_repo: QuestionRepository, throttle_window: Duration) -> Self {
        Self {
            question_repo,
            id_gen: IdGenerator::new(),
            throttle_window,
        }
    }

    /// Submit a question from `source_ip`.
    ///
    /// Returns `None` when another question from the same IP already landed
    /// inside the throttle window; the caller reports success either way, so
    /// a throttled submitter learns nothing.
    pub async fn submit(
        &self,
        input: SubmitQuestionInput,
        source_ip: &str,
    ) -> AppResult<Option<question::Model>> {
        input.validate()?;

        let model = question::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(input.email),
            question_text: Set(input.question_text),
            ip: Set(source_ip.to_string()),
            verified: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };

        let created = self
            .question_repo
            .create_if_window_elapsed(model, source_ip, self.throttle_window)
            .await?;

        if created.is_none() {
            tracing::debug!(ip = %source_ip, "Question submission throttled");
        }

        Ok(created)
    }

    /// Get a question by ID.
    pub async fn get(&self, id: &str) -> AppResult<question::Model> {
        self.question_repo.get_by_id(id).await
    }

    /// List questions (paginated, newest first).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<question::Model>> {
        self.question_repo.list(limit, offset).await
    }

    /// Mark a question as verified.
    ///
    /// Verification only moves forward: a verified question can never be
    /// reset to unverified. Marking an already-verified question again is a
    /// no-op.
    pub async fn set_verified(&self, id: &str, verified: bool) -> AppResult<question::Model> {
        if !verified {
            return Err(AppError::validation(
                "verified",
                "cannot be reset to unverified",
            ));
        }

        let question = self.question_repo.get_by_id(id).await?;
        if question.verified {
            return Ok(question);
        }

        let mut active: question::ActiveModel = question.into();
        active.verified = Set(true);

        self.question_repo.update(active).await
    }

    /// Delete a question.
    pub async fn destroy(&self, id: &str) -> AppResult<()> {
        let question = self.question_repo.get_by_id(id).await?;
        self.question_repo.delete(question).await
    }
}
