//! Question repository.

use std::sync::Arc;
use std::time::Duration;

use crate::entities::{Question, question};
use chrono::Utc;
use quill_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};

/// Question repository for database operations.
#[derive(Clone)]
pub struct QuestionRepository {
    db: Arc<DatabaseConnection>,
}

impl QuestionRepository {
    /// Create a new question repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a question by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<question::Model>> {
        Question::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a question by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<question::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::QuestionNotFound(id.to_string()))
    }

    /// List questions (paginated, newest first).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<question::Model>> {
        Question::find()
            .order_by_desc(question::Column::CreatedAt)
            .order_by_desc(question::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a question unless another one from the same IP exists inside
    /// the throttle window.
    ///
    /// The prior question is the most recent for the IP, ordered by creation
    /// timestamp with id as a deterministic tie-break. The window check and
    /// the insert run in one transaction, so two concurrent submissions from
    /// the same IP cannot both land inside the window. Returns `None` when
    /// the insert was skipped.
    pub async fn create_if_window_elapsed(
        &self,
        model: question::ActiveModel,
        ip: &str,
        window: Duration,
    ) -> AppResult<Option<question::Model>> {
        let window = chrono::Duration::from_std(window)
            .map_err(|e| AppError::Internal(format!("Throttle window out of range: {e}")))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let prior = Question::find()
            .filter(question::Column::Ip.eq(ip))
            .order_by_desc(question::Column::CreatedAt)
            .order_by_desc(question::Column::Id)
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if let Some(prior) = prior {
            let elapsed = Utc::now().signed_duration_since(prior.created_at.with_timezone(&Utc));
            if elapsed < window {
                txn.rollback()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                return Ok(None);
            }
        }

        let created = model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Some(created))
    }

    /// Update a question.
    pub async fn update(&self, model: question::ActiveModel) -> AppResult<question::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a question.
    pub async fn delete(&self, model: question::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
