use crate::{
    record::{CommentRecord, PartialPostRecord},
    store::{DbError, Result, Store},
};
use async_trait::async_trait;
use soho_common::model::{
    Id,
    comment::{Comment, CommentContent, CommentMarker},
    post::{PartialPost, Post, PostContent, PostMarker},
};
use sqlx::{PgPool, migrate::Migrator, query_as};
use tracing::debug;

static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Clone, Debug)]
pub struct DbClient {
    pool: PgPool,
}

impl DbClient {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        debug!("Database migrations are up to date");

        Ok(())
    }

    async fn fetch_post_comments(&self, post_id: Id<PostMarker>) -> Result<Vec<Comment>> {
        let records = query_as::<_, CommentRecord>(
            "
            SELECT
                comments.comment_id,
                comments.post_id,
                comments.username,
                comments.body,
                comments.created_at
            FROM
                posts.comments
            WHERE
                comments.post_id = $1
            ORDER BY
                comments.comment_id
            ",
        )
        .bind(post_id.get().cast_signed())
        .fetch_all(&self.pool)
        .await?;

        let comments = records
            .into_iter()
            .map(Comment::try_from)
            .collect::<Result<_, _>>()?;
        Ok(comments)
    }
}

#[async_trait]
impl Store for DbClient {
    async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        let Some(post) = self.fetch_partial_post(post_id).await? else {
            return Ok(None);
        };

        let comments = self.fetch_post_comments(post_id).await?;
        Ok(Some(post.with_comments(comments)))
    }

    async fn fetch_partial_post(&self, post_id: Id<PostMarker>) -> Result<Option<PartialPost>> {
        let record = query_as::<_, PartialPostRecord>(
            "
            SELECT
                posts.post_id,
                posts.title,
                posts.body
            FROM
                posts.posts
            WHERE
                posts.post_id = $1
            ",
        )
        .bind(post_id.get().cast_signed())
        .fetch_optional(&self.pool)
        .await?;

        let post = record.map(PartialPost::try_from).transpose()?;
        Ok(post)
    }

    async fn create_post(&self, post: &PostContent) -> Result<PartialPost> {
        let record = query_as::<_, PartialPostRecord>(
            "
            INSERT INTO posts.posts (title, body)
            VALUES ($1, $2)
            RETURNING post_id, title, body
            ",
        )
        .bind(&post.title)
        .bind(&post.body)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.try_into()?)
    }

    async fn create_comment(
        &self,
        post_id: Id<PostMarker>,
        comment: &CommentContent,
    ) -> Result<Comment> {
        let record = query_as::<_, CommentRecord>(
            "
            INSERT INTO posts.comments (post_id, username, body)
            VALUES ($1, $2, $3)
            RETURNING comment_id, post_id, username, body, created_at
            ",
        )
        .bind(post_id.get().cast_signed())
        .bind(&comment.username)
        .bind(&comment.body)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                DbError::MissingPost(post_id)
            }
            err => err.into(),
        })?;

        Ok(record.try_into()?)
    }

    async fn fetch_comment(
        &self,
        post_id: Id<PostMarker>,
        comment_id: Id<CommentMarker>,
    ) -> Result<Option<Comment>> {
        let record = query_as::<_, CommentRecord>(
            "
            SELECT
                comments.comment_id,
                comments.post_id,
                comments.username,
                comments.body,
                comments.created_at
            FROM
                posts.comments
            WHERE
                comments.comment_id = $1
                AND comments.post_id = $2
            ",
        )
        .bind(comment_id.get().cast_signed())
        .bind(post_id.get().cast_signed())
        .fetch_optional(&self.pool)
        .await?;

        let comment = record.map(Comment::try_from).transpose()?;
        Ok(comment)
    }

    async fn delete_comment(
        &self,
        post_id: Id<PostMarker>,
        comment_id: Id<CommentMarker>,
    ) -> Result<Option<Comment>> {
        let record = query_as::<_, CommentRecord>(
            "
            DELETE FROM posts.comments
            WHERE
                comments.comment_id = $1
                AND comments.post_id = $2
            RETURNING comment_id, post_id, username, body, created_at
            ",
        )
        .bind(comment_id.get().cast_signed())
        .bind(post_id.get().cast_signed())
        .fetch_optional(&self.pool)
        .await?;

        let comment = record.map(Comment::try_from).transpose()?;
        Ok(comment)
    }
}
