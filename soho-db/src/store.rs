use async_trait::async_trait;
use soho_common::model::{
    Id, ModelValidationError,
    comment::{Comment, CommentContent, CommentMarker},
    post::{PartialPost, Post, PostContent, PostMarker},
};
use std::fmt::Debug;
use thiserror::Error;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("An object in the database was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error("Post with id {0} does not exist")]
    MissingPost(Id<PostMarker>),
    #[error("Running migrations failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for posts and the comments attached to them.
///
/// Comment lookups are always scoped to a post: a comment id that belongs to a
/// different post is treated as absent.
#[async_trait]
pub trait Store: Debug + Send + Sync {
    /// Fetches a post together with all of its comments, ordered by id.
    async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>>;

    async fn fetch_partial_post(&self, post_id: Id<PostMarker>) -> Result<Option<PartialPost>>;

    async fn create_post(&self, post: &PostContent) -> Result<PartialPost>;

    /// Fails with [`DbError::MissingPost`] if the post does not exist.
    async fn create_comment(
        &self,
        post_id: Id<PostMarker>,
        comment: &CommentContent,
    ) -> Result<Comment>;

    async fn fetch_comment(
        &self,
        post_id: Id<PostMarker>,
        comment_id: Id<CommentMarker>,
    ) -> Result<Option<Comment>>;

    /// Returns the removed comment, or `None` if there was nothing to remove.
    async fn delete_comment(
        &self,
        post_id: Id<PostMarker>,
        comment_id: Id<CommentMarker>,
    ) -> Result<Option<Comment>>;
}
