use soho_common::model::{
    ModelValidationError,
    comment::{Comment, CommentContent},
    post::{PartialPost, PostContent},
};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, FromRow)]
pub(crate) struct PartialPostRecord {
    pub post_id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, FromRow)]
pub(crate) struct CommentRecord {
    pub comment_id: i64,
    pub post_id: i64,
    pub username: String,
    pub body: String,
    pub created_at: OffsetDateTime,
}

impl TryFrom<PartialPostRecord> for PartialPost {
    type Error = ModelValidationError;

    fn try_from(value: PartialPostRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.post_id.try_into()?,
            content: PostContent {
                title: value.title,
                body: value.body,
            },
        })
    }
}

impl TryFrom<CommentRecord> for Comment {
    type Error = ModelValidationError;

    fn try_from(value: CommentRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.comment_id.try_into()?,
            post_id: value.post_id.try_into()?,
            content: CommentContent {
                username: value.username,
                body: value.body,
            },
            created_at: value.created_at,
        })
    }
}
