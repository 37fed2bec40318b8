use crate::store::{DbError, Result, Store};
use async_trait::async_trait;
use soho_common::model::{
    Id,
    comment::{Comment, CommentContent, CommentMarker},
    post::{PartialPost, Post, PostContent, PostMarker},
};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// A [`Store`] that keeps everything in process memory.
///
/// Ids are handed out sequentially starting at 1, like the identity columns of
/// the Postgres schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    last_post_id: u64,
    last_comment_id: u64,
    posts: BTreeMap<Id<PostMarker>, PostContent>,
    comments: BTreeMap<Id<CommentMarker>, Comment>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn comment_count(&self) -> usize {
        self.inner.read().await.comments.len()
    }
}

impl Tables {
    fn partial_post(&self, post_id: Id<PostMarker>) -> Option<PartialPost> {
        self.posts.get(&post_id).map(|content| PartialPost {
            id: post_id,
            content: content.clone(),
        })
    }

    fn comment(&self, post_id: Id<PostMarker>, comment_id: Id<CommentMarker>) -> Option<&Comment> {
        self.comments
            .get(&comment_id)
            .filter(|comment| comment.post_id == post_id)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        let tables = self.inner.read().await;

        let post = tables.partial_post(post_id).map(|post| {
            let comments = tables
                .comments
                .values()
                .filter(|comment| comment.post_id == post_id)
                .cloned()
                .collect();
            post.with_comments(comments)
        });
        Ok(post)
    }

    async fn fetch_partial_post(&self, post_id: Id<PostMarker>) -> Result<Option<PartialPost>> {
        Ok(self.inner.read().await.partial_post(post_id))
    }

    async fn create_post(&self, post: &PostContent) -> Result<PartialPost> {
        let mut tables = self.inner.write().await;

        tables.last_post_id += 1;
        let id = Id::new(tables.last_post_id);
        tables.posts.insert(id, post.clone());

        Ok(PartialPost {
            id,
            content: post.clone(),
        })
    }

    async fn create_comment(
        &self,
        post_id: Id<PostMarker>,
        comment: &CommentContent,
    ) -> Result<Comment> {
        let mut tables = self.inner.write().await;

        if !tables.posts.contains_key(&post_id) {
            return Err(DbError::MissingPost(post_id));
        }

        tables.last_comment_id += 1;
        let comment = Comment {
            id: Id::new(tables.last_comment_id),
            post_id,
            content: comment.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        tables.comments.insert(comment.id, comment.clone());

        Ok(comment)
    }

    async fn fetch_comment(
        &self,
        post_id: Id<PostMarker>,
        comment_id: Id<CommentMarker>,
    ) -> Result<Option<Comment>> {
        let tables = self.inner.read().await;
        Ok(tables.comment(post_id, comment_id).cloned())
    }

    async fn delete_comment(
        &self,
        post_id: Id<PostMarker>,
        comment_id: Id<CommentMarker>,
    ) -> Result<Option<Comment>> {
        let mut tables = self.inner.write().await;

        if tables.comment(post_id, comment_id).is_none() {
            return Ok(None);
        }
        Ok(tables.comments.remove(&comment_id))
    }
}
