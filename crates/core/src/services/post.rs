//! Post service.

use quill_common::{AppError, AppResult, IdGenerator};
use quill_db::{entities::post, repositories::PostRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Post service for blog content management.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub slug: String,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub text: String,

    #[serde(default)]
    pub active: bool,
}

/// Input for updating a post.
///
/// Ownership is fixed at creation: there is deliberately no owner field
/// here, so an update can never reassign a post to another user.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostInput {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "must not be empty"))]
    pub text: Option<String>,

    pub active: Option<bool>,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(post_repo: PostRepository) -> Self {
        Self {
            post_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new post owned by `owner_id`.
    pub async fn create(&self, input: CreatePostInput, owner_id: &str) -> AppResult<post::Model> {
        input.validate()?;

        if self.post_repo.find_by_slug(&input.slug).await?.is_some() {
            return Err(AppError::validation("slug", "already in use"));
        }

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            slug: Set(input.slug),
            text: Set(input.text),
            active: Set(input.active),
            user_id: Set(Some(owner_id.to_string())),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        self.post_repo.create(model).await
    }

    /// Get a post by ID, regardless of its active flag. Admin surface.
    pub async fn get(&self, id: &str) -> AppResult<post::Model> {
        self.post_repo.get_by_id(id).await
    }

    /// Get an active post by slug. Public surface.
    ///
    /// An inactive post is indistinguishable from a missing one.
    pub async fn get_active_by_slug(&self, slug: &str) -> AppResult<post::Model> {
        self.post_repo
            .find_active_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::PostNotFound(slug.to_string()))
    }

    /// List all posts (paginated, newest first). Admin surface.
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<post::Model>> {
        self.post_repo.list(limit, offset).await
    }

    /// List active posts (paginated, newest first). Public surface.
    pub async fn list_active(&self, limit: u64, offset: u64) -> AppResult<Vec<post::Model>> {
        self.post_repo.list_active(limit, offset).await
    }

    /// List posts owned by a user (newest first).
    pub async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<post::Model>> {
        self.post_repo.list_by_user(user_id).await
    }

    /// Update a post.
    ///
    /// The slug uniqueness check excludes the post's own row, so an update
    /// that keeps the slug unchanged succeeds.
    pub async fn update(&self, id: &str, input: UpdatePostInput) -> AppResult<post::Model> {
        input.validate()?;

        let post = self.post_repo.get_by_id(id).await?;

        if let Some(slug) = &input.slug {
            if self
                .post_repo
                .find_by_slug_excluding(slug, id)
                .await?
                .is_some()
            {
                return Err(AppError::validation("slug", "already in use"));
            }
        }

        let mut active: post::ActiveModel = post.into();

        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(slug) = input.slug {
            active.slug = Set(slug);
        }
        if let Some(text) = input.text {
            active.text = Set(text);
        }
        if let Some(flag) = input.active {
            active.active = Set(flag);
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.post_repo.update(active).await
    }

    /// Delete a post.
    pub async fn destroy(&self, id: &str) -> AppResult<()> {
        let post = self.post_repo.get_by_id(id).await?;
        self.post_repo.delete(post).await
    }
}
